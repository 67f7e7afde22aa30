//! Network layer - HTTP request execution
//!
//! A single blocking-in-effect POST per run, bounded by the configured timeout.

pub mod client;

pub use client::{build_request, create_client, DispatchError, Dispatcher};
