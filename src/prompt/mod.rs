//! Line input for the interactive session.
//!
//! Every read names the completion provider active for that prompt, so there
//! is no shared completer to swap between prompts.

pub mod editor;

use std::rc::Rc;

use reqwest::header::HeaderName;
use rustyline::error::ReadlineError;
use thiserror::Error;

use crate::certificate::{self, ValidatedCertificate};
use crate::completion::CompletionProvider;

pub use editor::EditorReader;

/// Completion provider handed to a single prompt
pub type ActiveCompletion = Option<Rc<dyn CompletionProvider>>;

#[derive(Debug, Error)]
pub enum PromptError {
    /// Ctrl-C or Ctrl-D
    #[error("input aborted")]
    Aborted,
    #[error("failed to read input: {0}")]
    Readline(#[from] ReadlineError),
}

/// Source of user input lines plus a place to show short notices.
pub trait LineReader {
    fn read_line(&mut self, prompt: &str, completion: ActiveCompletion)
        -> Result<String, PromptError>;

    fn say(&mut self, message: &str);
}

/// Read a non-negative whole number, asking again until one is given.
pub fn ask_count(reader: &mut dyn LineReader, prompt: &str) -> Result<usize, PromptError> {
    loop {
        let line = reader.read_line(prompt, None)?;
        match line.trim().parse::<usize>() {
            Ok(n) => return Ok(n),
            Err(_) => reader.say("Please enter a whole number (0 or more)."),
        }
    }
}

/// Read a yes/no answer, asking again until one is given.
pub fn ask_yes_no(reader: &mut dyn LineReader, prompt: &str) -> Result<bool, PromptError> {
    loop {
        let line = reader.read_line(prompt, None)?;
        match line.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => reader.say("Please answer 'y' or 'n'."),
        }
    }
}

/// Read a header name that is a valid HTTP token.
pub fn ask_header_name(
    reader: &mut dyn LineReader,
    prompt: &str,
    completion: ActiveCompletion,
) -> Result<String, PromptError> {
    loop {
        let line = reader.read_line(prompt, completion.clone())?;
        let name = line.trim();
        if name.is_empty() {
            reader.say("Header name cannot be empty.");
            continue;
        }
        match HeaderName::from_bytes(name.as_bytes()) {
            Ok(_) => return Ok(name.to_string()),
            Err(_) => reader.say(&format!("'{}' is not a valid header name.", name)),
        }
    }
}

/// Read certificate paths until one validates.
pub fn ask_certificate(
    reader: &mut dyn LineReader,
    prompt: &str,
) -> Result<ValidatedCertificate, PromptError> {
    loop {
        let line = reader.read_line(prompt, None)?;
        let input = line.trim();
        if input.is_empty() {
            reader.say("Please enter a certificate path.");
            continue;
        }
        match certificate::validate(&certificate::expand_home(input)) {
            Ok(cert) => return Ok(cert),
            Err(e) => {
                tracing::debug!(error = %e, "Certificate rejected");
                reader.say(&e.to_string());
            }
        }
    }
}
