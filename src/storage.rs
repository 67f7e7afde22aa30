//! URL history persisted as a JSON array of [`UrlRecord`]s.
//!
//! Every mutation reads the whole file, changes it in memory and writes the
//! whole file back. The file is the only state that survives a call.

use crate::models::UrlRecord;
use chrono::{Local, NaiveDate};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("history file {0} does not exist")]
    NotFound(PathBuf),
    #[error("could not read history file: {0}")]
    Read(#[source] io::Error),
    #[error("history file is not a valid URL list: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("could not encode URL history: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("could not write history file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Handle on the history file. Holds no records itself.
#[derive(Clone, Debug)]
pub struct UrlStore {
    path: PathBuf,
}

impl UrlStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        UrlStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the history, reporting why it could not be read.
    pub fn try_load(&self) -> Result<Vec<UrlRecord>, StoreError> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                StoreError::NotFound(self.path.clone())
            } else {
                StoreError::Read(e)
            }
        })?;
        serde_json::from_str(&content).map_err(StoreError::Malformed)
    }

    /// Read the history. A missing, unreadable or malformed file is an empty history.
    pub fn load(&self) -> Vec<UrlRecord> {
        match self.try_load() {
            Ok(records) => records,
            Err(StoreError::NotFound(_)) => Vec::new(),
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "Treating URL history as empty");
                Vec::new()
            }
        }
    }

    /// Replace the file contents with `records`
    pub fn save(&self, records: &[UrlRecord]) -> Result<(), StoreError> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(records).map_err(StoreError::Encode)?;
        fs::write(&self.path, content).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Count one use of `url` today. Returns the updated record.
    pub fn record_use(&self, url: &str) -> Result<UrlRecord, StoreError> {
        self.record_use_on(url, Local::now().date_naive())
    }

    /// Count one use of `url`, stamping `date` if the URL is new.
    pub fn record_use_on(&self, url: &str, date: NaiveDate) -> Result<UrlRecord, StoreError> {
        let mut records = self.load();
        let record = match records.iter_mut().find(|r| r.url == url) {
            Some(existing) => {
                existing.bump();
                existing.clone()
            }
            None => {
                let record = UrlRecord::first_use(url, date);
                records.push(record.clone());
                record
            }
        };
        self.save(&records)?;
        tracing::info!(url, usage_count = record.usage_count.get(), "Recorded URL use");
        Ok(record)
    }

    /// Drop every record for `url`. Returns whether anything was removed.
    ///
    /// When nothing matches the file is left untouched.
    pub fn remove(&self, url: &str) -> Result<bool, StoreError> {
        let mut records = self.load();
        let before = records.len();
        records.retain(|r| r.url != url);
        if records.len() == before {
            return Ok(false);
        }
        self.save(&records)?;
        tracing::info!(url, "Removed URL from history");
        Ok(true)
    }

    /// Every stored URL, in store order
    pub fn urls(&self) -> Vec<String> {
        self.load().into_iter().map(|r| r.url).collect()
    }

    fn ensure_dir(&self) -> Result<(), StoreError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
                fs::create_dir_all(dir).map_err(|source| StoreError::Write {
                    path: self.path.clone(),
                    source,
                })
            }
            _ => Ok(()),
        }
    }
}
