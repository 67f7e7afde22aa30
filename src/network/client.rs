//! HTTP client wrapper - sends the assembled POST and classifies failures

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::models::{PostRequest, Response, TlsVerification};

/// Why a dispatch failed. `Display` is the message shown to the user.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Request timed out ({}s)", .0.as_secs_f64())]
    Timeout(Duration),
    #[error("Connection failed: {0}")]
    Connect(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Error reading body: {0}")]
    Body(String),
    #[error("Request failed: {0}")]
    Other(String),
}

impl DispatchError {
    fn classify(e: reqwest::Error, timeout: Duration) -> Self {
        if e.is_timeout() {
            DispatchError::Timeout(timeout)
        } else if e.is_connect() {
            DispatchError::Connect(e.to_string())
        } else if e.is_builder() {
            DispatchError::InvalidRequest(e.to_string())
        } else if e.is_body() || e.is_decode() {
            DispatchError::Body(e.to_string())
        } else {
            DispatchError::Other(e.to_string())
        }
    }
}

/// One configured client plus the timeout it enforces
pub struct Dispatcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl Dispatcher {
    pub fn new(timeout: Duration, tls: &TlsVerification) -> Result<Self> {
        Ok(Dispatcher {
            client: create_client(timeout, tls)?,
            timeout,
        })
    }

    /// Send `request` once. No retries.
    pub async fn send(&self, request: &PostRequest) -> Result<Response, DispatchError> {
        let start = Instant::now();
        tracing::info!(url = %request.url, headers = request.headers.len(), fields = request.body.len(), "Executing request");

        let result = self.execute(request).await;
        let elapsed = start.elapsed().as_millis() as u64;

        match &result {
            Ok(resp) => {
                tracing::info!(status = resp.status_code, elapsed_ms = elapsed, "Request completed")
            }
            Err(e) => tracing::warn!(error = %e, elapsed_ms = elapsed, "Request failed"),
        }
        result
    }

    async fn execute(&self, request: &PostRequest) -> Result<Response, DispatchError> {
        let resp = build_request(&self.client, request)
            .send()
            .await
            .map_err(|e| DispatchError::classify(e, self.timeout))?;

        let status_code = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| match DispatchError::classify(e, self.timeout) {
                DispatchError::Other(msg) => DispatchError::Body(msg),
                other => other,
            })?;

        Ok(Response {
            status_code,
            body,
        })
    }
}

/// Build a POST with the request's headers and its fields as a JSON object
pub fn build_request(client: &reqwest::Client, request: &PostRequest) -> reqwest::RequestBuilder {
    let mut req_builder = client.post(&request.url);

    for header in &request.headers {
        req_builder = req_builder.header(&header.key, &header.value);
    }

    req_builder.json(&request.body)
}

/// Create an HTTP client with the given timeout and certificate policy
pub fn create_client(timeout: Duration, tls: &TlsVerification) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().timeout(timeout);

    builder = match tls {
        TlsVerification::Disabled => builder.danger_accept_invalid_certs(true),
        TlsVerification::Enabled(cert) => {
            for der in &cert.certificates {
                let root = reqwest::Certificate::from_der(der.as_ref())
                    .with_context(|| format!("Unusable certificate {}", cert.path.display()))?;
                builder = builder.add_root_certificate(root);
            }
            builder
        }
    };

    builder.build().context("Failed to build HTTP client")
}
