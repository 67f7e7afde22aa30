//! The interactive prompt sequence that assembles and sends one POST request.

use std::rc::Rc;

use anyhow::Result;
use thiserror::Error;

use crate::cli::Config;
use crate::completion::{CompletionProvider, HeaderCompleter, UrlCompleter};
use crate::models::{PostRequest, Response, TlsVerification};
use crate::network::{DispatchError, Dispatcher};
use crate::prompt::{self, EditorReader, LineReader, PromptError};
use crate::storage::UrlStore;

/// Collects a [`PostRequest`] from the user, recording the URL in the history.
pub struct Session<'a> {
    reader: &'a mut dyn LineReader,
    store: &'a UrlStore,
    urls: Rc<dyn CompletionProvider>,
    headers: Rc<dyn CompletionProvider>,
}

impl<'a> Session<'a> {
    pub fn new(reader: &'a mut dyn LineReader, store: &'a UrlStore) -> Self {
        Session {
            reader,
            store,
            urls: Rc::new(UrlCompleter::new(store.clone())),
            headers: Rc::new(HeaderCompleter::default()),
        }
    }

    /// Run every prompt in order and return the finished request
    pub fn assemble(&mut self) -> Result<PostRequest, PromptError> {
        let url = self.ask_url()?;
        self.remember(&url);
        let mut request = PostRequest::new(url);

        let header_count = prompt::ask_count(self.reader, "Enter number of headers: ")?;
        for _ in 0..header_count {
            let key = prompt::ask_header_name(
                self.reader,
                "Enter header name (Tab to complete): ",
                Some(self.headers.clone()),
            )?;
            let value = self
                .reader
                .read_line(&format!("Enter header value for '{}': ", key), None)?;
            request.set_header(key, value);
        }

        let field_count = prompt::ask_count(self.reader, "Enter number of JSON fields (data): ")?;

        if prompt::ask_yes_no(self.reader, "Verify TLS certificate? [y/n]: ")? {
            let cert = prompt::ask_certificate(self.reader, "Enter certificate path: ")?;
            request.tls = TlsVerification::Enabled(cert);
        }

        for i in 0..field_count {
            let key = self
                .reader
                .read_line(&format!("Enter data key #{}: ", i + 1), None)?;
            let value = self
                .reader
                .read_line(&format!("Enter value for '{}': ", key), None)?;
            request.set_field(key, value);
        }

        Ok(request)
    }

    fn ask_url(&mut self) -> Result<String, PromptError> {
        loop {
            let line = self
                .reader
                .read_line("Enter URL (Tab to complete): ", Some(self.urls.clone()))?;
            // Stored exactly as typed; only blank input is refused.
            if !line.trim().is_empty() {
                return Ok(line);
            }
            self.reader.say("Please enter a URL.");
        }
    }

    /// A failed history write never stops the run.
    fn remember(&mut self, url: &str) {
        if let Err(e) = self.store.record_use(url) {
            tracing::warn!(error = %e, "URL history not saved");
            self.reader
                .say(&format!("Warning: URL history not saved ({}).", e));
        }
    }
}

/// Text printed after a dispatch
pub fn render_outcome(outcome: &Result<Response, DispatchError>) -> String {
    match outcome {
        Ok(resp) => format!(
            "\nStatus Code: {}\nResponse Body:\n{}",
            resp.status_code, resp.body
        ),
        Err(e) => format!("\n{}", e),
    }
}

/// Failures before any request can be sent
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Could not open the terminal for input: {0}")]
    Terminal(#[source] PromptError),
    #[error("Could not read input: {0}")]
    Input(#[source] PromptError),
    #[error("Could not prepare the HTTP client: {0:#}")]
    Client(anyhow::Error),
}

fn report(err: SetupError) {
    tracing::warn!(error = %err, "Session stopped");
    println!("\n{}", err);
}

/// Build the client for `request`, send it once and return the text to print
pub async fn dispatch(config: &Config, request: &PostRequest) -> Result<String, SetupError> {
    let dispatcher = Dispatcher::new(config.timeout, &request.tls).map_err(SetupError::Client)?;
    let outcome = dispatcher.send(request).await;
    Ok(render_outcome(&outcome))
}

/// Interactive entry point: prompt, send, print.
pub async fn run(config: &Config) -> Result<()> {
    let store = UrlStore::new(&config.history_file);
    let mut reader = match EditorReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            report(SetupError::Terminal(e));
            return Ok(());
        }
    };

    let request = match Session::new(&mut reader, &store).assemble() {
        Ok(request) => request,
        Err(PromptError::Aborted) => {
            tracing::info!("Session aborted by user");
            println!("\nAborted.");
            return Ok(());
        }
        Err(e) => {
            report(SetupError::Input(e));
            return Ok(());
        }
    };

    match dispatch(config, &request).await {
        Ok(text) => println!("{}", text),
        Err(e) => report(e),
    }
    Ok(())
}
