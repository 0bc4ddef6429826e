use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use console::Term;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};

/// Source of the answers an interactive session needs.
pub trait Prompter {
    /// Reads one line of free text. Empty answers are allowed; surrounding whitespace is trimmed.
    fn text(&mut self, prompt: &str) -> Result<String>;
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Picks the dialoguer prompter on a terminal and plain line reads when stdin is piped.
pub fn stdin_prompter() -> Box<dyn Prompter> {
    if Term::stderr().is_term() {
        Box::new(TermPrompter::default())
    } else {
        Box::new(LinePrompter::new(io::stdin().lock()))
    }
}

#[derive(Default)]
pub struct TermPrompter {
    theme: ColorfulTheme,
}

/// Reads answers one line at a time, for scripted or piped sessions.
pub struct LinePrompter<R> {
    reader: R,
}

impl Prompter for TermPrompter {
    fn text(&mut self, prompt: &str) -> Result<String> {
        let value: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .with_context(|| format!("Failed to read input for '{prompt}'"))?;
        Ok(value.trim().to_string())
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
            .context("Failed to read confirmation")
    }
}

impl<R: BufRead> LinePrompter<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        print!("{prompt}: ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .with_context(|| format!("Failed to read input for '{prompt}'"))?;
        if read == 0 {
            bail!("Unexpected end of input while waiting for '{prompt}'");
        }
        println!();
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead> Prompter for LinePrompter<R> {
    fn text(&mut self, prompt: &str) -> Result<String> {
        self.read_line(prompt)
    }

    /// Asks again until the answer is yes or no.
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let prompt = format!("{prompt} [y/n]");
        loop {
            match self.read_line(&prompt)?.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => {}
            }
        }
    }
}
