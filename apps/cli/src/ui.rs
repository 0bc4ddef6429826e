use std::fmt::Display;

use build_store::{ExternalPath, SwitchConfig};
use console::style;

pub fn info(message: impl Display) {
    println!("{message}");
}

pub fn success(message: impl Display) {
    println!("{}", style(message).green());
}

pub fn error(message: impl Display) {
    println!("{}", style(message).red());
}

pub fn print_builds(config: &SwitchConfig) {
    println!("{}", style("\nAvailable Builds:").blue());
    for (index, build) in config.builds.iter().enumerate() {
        println!(
            "{}",
            style(format!("{}. {} ({})", index + 1, build.name, build.path)).green()
        );
    }
}

pub fn print_menu_hint(config: &SwitchConfig) {
    println!(
        "\n{}",
        style(format!("Current username is '{}'.", config.display_username())).blue()
    );
    println!("{}", style(menu_hint()).yellow());
}

fn menu_hint() -> String {
    let mut hint = String::from(
        "Select a build by number, or type \"add\" to add a build, \"rename\" to rename a build, \
         \"path\" to change a build's path, \"username\" to change the username",
    );
    for target in ExternalPath::ALL {
        hint.push_str(&format!(
            ", \"{}\" to set the {} path",
            target.keyword(),
            target.label()
        ));
    }
    hint.push('.');
    hint
}
