use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::num::NonZeroU32;

use crate::certificate::ValidatedCertificate;

/// One entry of the URL history.
///
/// Serialized as `{"url": ..., "added_on": "YYYY-MM-DD", "usage_count": n}`;
/// any other field makes the whole file malformed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UrlRecord {
    pub url: String,
    pub added_on: NaiveDate,
    pub usage_count: NonZeroU32,
}

impl UrlRecord {
    /// A record for a URL used for the first time on `date`
    pub fn first_use(url: impl Into<String>, date: NaiveDate) -> Self {
        UrlRecord {
            url: url.into(),
            added_on: date,
            usage_count: NonZeroU32::MIN,
        }
    }

    /// Count one more use. `added_on` is never touched.
    pub fn bump(&mut self) {
        self.usage_count = self.usage_count.saturating_add(1);
    }
}

/// HTTP Header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub key: String,
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Header {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Server certificate verification for the outgoing request
#[derive(Clone, Debug, Default)]
pub enum TlsVerification {
    /// Certificate errors are ignored
    #[default]
    Disabled,
    /// Platform roots plus the user supplied certificate are trusted
    Enabled(ValidatedCertificate),
}

impl TlsVerification {
    pub fn is_enabled(&self) -> bool {
        matches!(self, TlsVerification::Enabled(_))
    }
}

/// A fully assembled POST request
#[derive(Clone, Debug)]
pub struct PostRequest {
    pub url: String,
    pub headers: Vec<Header>,
    /// JSON object sent as the request body
    pub body: Map<String, Value>,
    pub tls: TlsVerification,
}

impl PostRequest {
    pub fn new(url: impl Into<String>) -> Self {
        PostRequest {
            url: url.into(),
            headers: Vec::new(),
            body: Map::new(),
            tls: TlsVerification::Disabled,
        }
    }

    /// Set a header, replacing any earlier header with the same name.
    /// Header names compare case-insensitively.
    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|h| h.key.eq_ignore_ascii_case(&key))
        {
            Some(existing) => {
                existing.key = key;
                existing.value = value;
            }
            None => self.headers.push(Header::new(key, value)),
        }
    }

    /// Set a string body field, replacing any earlier value for `key`
    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.body.insert(key.into(), Value::String(value.into()));
    }
}

/// Response from HTTP request
#[derive(Clone, Debug)]
pub struct Response {
    pub status_code: u16,
    pub body: String,
}
