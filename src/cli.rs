//! Command line parsing and runtime configuration.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::constants::{APP_DIR_NAME, DEFAULT_HISTORY_FILE, DEFAULT_TIMEOUT_SECS};
use crate::storage::UrlStore;

/// Interactively build and send an HTTP POST request.
#[derive(Debug, Parser)]
#[command(name = "freeman-post", version)]
#[command(about = "Interactive assistant for composing HTTP POST requests", long_about = None)]
pub struct Cli {
    /// File holding the URL history.
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_HISTORY_FILE)]
    pub history: PathBuf,

    /// Request timeout in seconds.
    #[arg(long, global = true, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Directory for the log file (default: platform data dir).
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum CliCommand {
    /// Prompt for a request and send it (the default).
    Send,

    /// Inspect or edit the saved URL history.
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum HistoryCommand {
    /// List saved URLs with their usage counts.
    List,

    /// Forget a saved URL (exact match).
    Remove {
        /// URL to remove.
        url: String,
    },
}

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct Config {
    pub history_file: PathBuf,
    pub timeout: Duration,
    pub log_dir: PathBuf,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config {
            history_file: self.history.clone(),
            timeout: Duration::from_secs(self.timeout),
            log_dir: self.log_dir.clone().unwrap_or_else(default_log_dir),
        }
    }
}

fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `history list` / `history remove`
pub fn run_history(store: &UrlStore, action: &HistoryCommand, out: &mut impl Write) -> Result<()> {
    match action {
        HistoryCommand::List => {
            let records = store.load();
            if records.is_empty() {
                writeln!(out, "No saved URLs.")?;
            }
            for record in records {
                writeln!(out, "{:>5}  {}  {}", record.usage_count, record.added_on, record.url)?;
            }
        }
        HistoryCommand::Remove { url } => {
            if store.remove(url)? {
                writeln!(out, "Removed {}", url)?;
            } else {
                writeln!(out, "No saved URL matches {}", url)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["freeman-post"]).unwrap();
        assert_eq!(cli.command, None);
        let config = cli.config();
        assert_eq!(config.history_file, PathBuf::from("urls.json"));
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "freeman-post",
            "history",
            "remove",
            "https://x",
            "--history",
            "/tmp/h.json",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(CliCommand::History {
                action: HistoryCommand::Remove {
                    url: "https://x".into()
                }
            })
        );
        assert_eq!(cli.history, PathBuf::from("/tmp/h.json"));
    }

    #[test]
    fn test_rejects_non_numeric_timeout() {
        assert!(Cli::try_parse_from(["freeman-post", "--timeout", "soon"]).is_err());
    }

    #[test]
    fn test_history_list_and_remove() {
        let dir = TempDir::new().unwrap();
        let store = UrlStore::new(dir.path().join("urls.json"));
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let mut out = Vec::new();
        run_history(&store, &HistoryCommand::List, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No saved URLs.\n");

        store.record_use_on("https://a", day).unwrap();
        store.record_use_on("https://a", day).unwrap();

        let mut out = Vec::new();
        run_history(&store, &HistoryCommand::List, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "    2  2024-06-01  https://a\n");

        let mut out = Vec::new();
        let missing = HistoryCommand::Remove { url: "https://b".into() };
        run_history(&store, &missing, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No saved URL matches https://b\n");

        let mut out = Vec::new();
        let present = HistoryCommand::Remove { url: "https://a".into() };
        run_history(&store, &present, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Removed https://a\n");
        assert!(store.load().is_empty());
    }
}
