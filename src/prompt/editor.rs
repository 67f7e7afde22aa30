//! Terminal line editor with Tab completion, backed by rustyline.

use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Context, Editor, Helper};

use super::{ActiveCompletion, LineReader, PromptError};
use crate::completion::Completion;

/// Bridges the prompt's completion provider into rustyline
struct PromptHelper {
    completion: ActiveCompletion,
}

impl Completer for PromptHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        let Some(provider) = &self.completion else {
            return Ok((pos, Vec::new()));
        };
        // The whole input up to the cursor is the prefix; one Tab press is one snapshot.
        let candidates = Completion::start(provider.as_ref(), &line[..pos]).into_candidates();
        Ok((0, candidates))
    }
}

impl Hinter for PromptHelper {
    type Hint = String;
}

impl Highlighter for PromptHelper {}

impl Validator for PromptHelper {}

impl Helper for PromptHelper {}

pub struct EditorReader {
    editor: Editor<PromptHelper, DefaultHistory>,
}

impl EditorReader {
    pub fn new() -> Result<Self, PromptError> {
        let config = Config::builder()
            .completion_type(CompletionType::List)
            .auto_add_history(false)
            .build();
        let editor = Editor::with_config(config)?;
        Ok(EditorReader { editor })
    }
}

impl LineReader for EditorReader {
    fn read_line(
        &mut self,
        prompt: &str,
        completion: ActiveCompletion,
    ) -> Result<String, PromptError> {
        self.editor.set_helper(Some(PromptHelper { completion }));
        match self.editor.readline(prompt) {
            Ok(line) => Ok(line),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Err(PromptError::Aborted),
            Err(e) => Err(PromptError::Readline(e)),
        }
    }

    fn say(&mut self, message: &str) {
        println!("{}", message);
    }
}
