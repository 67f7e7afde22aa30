//! Freeman Post - interactive HTTP POST assistant
//!
//! Flow:
//! - URL prompt, completed from the saved URL history
//! - Header prompts, completed from common header names
//! - JSON body fields and optional certificate verification
//! - One POST with a fixed timeout, then the status and body are printed

use std::io;

use clap::Parser;

use freeman_post::cli::{run_history, Cli, CliCommand};
use freeman_post::storage::UrlStore;
use freeman_post::{logging, session};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.config();

    // Initialize logging to file
    let _guard = match logging::init_logging(&config.log_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            logging::init_logging_stderr();
            tracing::warn!("File logging unavailable: {:#}", e);
            None
        }
    };

    match &cli.command {
        None | Some(CliCommand::Send) => session::run(&config).await,
        Some(CliCommand::History { action }) => {
            let store = UrlStore::new(&config.history_file);
            run_history(&store, action, &mut io::stdout().lock())
        }
    }
}
