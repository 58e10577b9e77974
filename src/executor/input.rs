//! Input providers for the `u` value source
//!
//! Evaluation blocks on [`InputProvider::request_input`] until a string is
//! returned. The raw string is then typed by [`probe`].

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use super::types::Scalar;

/// Synchronous source of user input
pub trait InputProvider {
    fn request_input(&mut self) -> io::Result<String>;
}

/// Type a raw input string.
///
/// Probe order: integer, double, single character, boolean, string. An empty
/// string has no type and yields `None`.
pub fn probe(raw: &str) -> Option<Scalar> {
    if raw.is_empty() {
        return None;
    }
    if let Some(i) = Scalar::parse_int(raw) {
        return Some(Scalar::Int(i));
    }
    if let Some(d) = Scalar::parse_double(raw) {
        return Some(Scalar::Double(d));
    }
    let mut chars = raw.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(Scalar::Char(c));
    }
    match raw {
        "true" => Some(Scalar::Bool(true)),
        "false" => Some(Scalar::Bool(false)),
        _ => Some(Scalar::Str(raw.to_string())),
    }
}

/// Reads one line from stdin per request, after writing a prompt to stderr
#[derive(Debug, Clone)]
pub struct StdinInput {
    prompt: String,
}

impl StdinInput {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

impl InputProvider for StdinInput {
    fn request_input(&mut self) -> io::Result<String> {
        let mut stderr = io::stderr();
        if !self.prompt.is_empty() {
            writeln!(stderr, "{}", self.prompt)?;
            stderr.flush()?;
        }

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}

/// Answers requests from a fixed queue; empty strings once it runs dry
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    answers: VecDeque<String>,
    requests: usize,
}

impl ScriptedInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            requests: 0,
        }
    }

    /// How many times input has been requested
    pub fn requests(&self) -> usize {
        self.requests
    }
}

impl InputProvider for ScriptedInput {
    fn request_input(&mut self) -> io::Result<String> {
        self.requests += 1;
        Ok(self.answers.pop_front().unwrap_or_default())
    }
}
