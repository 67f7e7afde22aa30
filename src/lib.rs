//! # Freeman Post
//!
//! An interactive terminal assistant for building and sending HTTP POST requests.
//!
//! ## Features
//! - URL history with usage counts, persisted as JSON
//! - Tab completion for URLs (from history) and common header names
//! - JSON body assembled from key/value prompts
//! - Optional certificate verification against a user supplied CA
//! - Classified network errors (timeout, connection, request)
//!
//! ## Architecture
//! Single-threaded and synchronous up to the one network call:
//! - Prompt layer (rustyline) - line input with a per-prompt completer
//! - Session - assembles a [`PostRequest`] and records the URL
//! - Network layer (reqwest on a current-thread Tokio runtime)

pub mod certificate;
pub mod cli;
pub mod completion;
pub mod constants;
pub mod logging;
pub mod models;
pub mod network;
pub mod prompt;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use certificate::{validate, CertificateError, ValidatedCertificate};
pub use completion::{Completion, CompletionProvider, HeaderCompleter, UrlCompleter};
pub use models::{Header, PostRequest, Response, TlsVerification, UrlRecord};
pub use network::{DispatchError, Dispatcher};
pub use storage::{StoreError, UrlStore};
