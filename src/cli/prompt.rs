//! Line-based prompting and input validation.
//!
//! The session asks questions through the [`Prompt`] trait so it can be driven
//! by a real terminal ([`Interactive`]), by lines of piped input
//! ([`LinePrompt`]) or by a scripted answer list in tests.

use std::{
    io::{BufRead, Write},
    sync::LazyLock,
};

use gradebook::{StudentName, domain::marks::MAX_MARK};
use regex::Regex;

use super::terminal::Colorize;

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("digits pattern is valid"));

/// A source of answers to interactive questions.
pub trait Prompt {
    /// Asks the user to pick one of `items`, returning its index.
    fn select(&mut self, prompt: &str, items: &[&str]) -> anyhow::Result<usize>;

    /// Asks the user for a line of text.
    fn input(&mut self, prompt: &str) -> anyhow::Result<String>;
}

/// Prompts on the controlling terminal using `dialoguer`.
#[derive(Debug, Default)]
pub struct Interactive;

impl Prompt for Interactive {
    fn select(&mut self, prompt: &str, items: &[&str]) -> anyhow::Result<usize> {
        let index = dialoguer::Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?;
        Ok(index)
    }

    fn input(&mut self, prompt: &str) -> anyhow::Result<String> {
        let line = dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(line)
    }
}

/// Reads answers one line at a time, showing menus as a numbered list.
///
/// Used when stdin is not a terminal.
#[derive(Debug)]
pub struct LinePrompt<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub const fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    fn read_answer(&mut self, prompt: &str) -> anyhow::Result<String> {
        write!(self.out, "{prompt}: ")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            anyhow::bail!("Input ended while waiting for '{prompt}'");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn select(&mut self, prompt: &str, items: &[&str]) -> anyhow::Result<usize> {
        for (number, item) in (1..).zip(items) {
            writeln!(self.out, "{number}. {item}")?;
        }

        loop {
            let answer = self.read_answer(prompt)?;
            let choice = match parse_number(answer.trim()) {
                Ok(number) => usize::try_from(number).ok(),
                Err(message) => {
                    writeln!(self.out, "{}", format!("❌ {message}").error())?;
                    continue;
                }
            };
            match choice {
                Some(number @ 1..) if number <= items.len() => return Ok(number - 1),
                _ => writeln!(
                    self.out,
                    "{}",
                    "❌ Invalid choice! Please select a valid option.".error()
                )?,
            }
        }
    }

    fn input(&mut self, prompt: &str) -> anyhow::Result<String> {
        self.read_answer(prompt)
    }
}

/// Keeps asking `question` until `parse` accepts the answer.
///
/// Each rejection is reported on `out` before asking again.
pub fn ask<P, W, T, F>(prompt: &mut P, out: &mut W, question: &str, parse: F) -> anyhow::Result<T>
where
    P: Prompt + ?Sized,
    W: Write,
    F: Fn(&str) -> Result<T, String>,
{
    loop {
        let answer = prompt.input(question)?;
        match parse(answer.trim()) {
            Ok(value) => return Ok(value),
            Err(message) => {
                tracing::debug!("Rejected input {answer:?}: {message}");
                writeln!(out, "{}", format!("❌ {message}").error())?;
            }
        }
    }
}

/// Accepts a name of letters and spaces only.
pub fn parse_name(input: &str) -> Result<StudentName, String> {
    StudentName::new(input).map_err(|_| "Invalid name! Use letters and spaces only.".to_string())
}

/// Accepts a non-negative whole number made of digits only.
pub fn parse_number(input: &str) -> Result<u32, String> {
    if !DIGITS.is_match(input) {
        return Err("Invalid input! Please enter a numeric value.".to_string());
    }
    input
        .parse()
        .map_err(|_| format!("Invalid input! Numbers above {} are not supported.", u32::MAX))
}

/// Accepts a single subject mark between 0 and 100.
pub fn parse_mark(input: &str) -> Result<u32, String> {
    if !DIGITS.is_match(input) {
        return Err("Numeric values only.".to_string());
    }
    match input.parse::<u32>() {
        Ok(mark) if mark <= MAX_MARK => Ok(mark),
        _ => Err(format!("Enter mark between 0 and {MAX_MARK}.")),
    }
}
