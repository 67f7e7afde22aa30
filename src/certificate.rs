//! Checks that a user supplied path holds a usable X.509 certificate.

use rustls::pki_types::CertificateDer;
use rustls::RootCertStore;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CertificateError {
    #[error("file does not exist: {0}")]
    NotFound(PathBuf),
    #[error("not a regular file: {0}")]
    NotAFile(PathBuf),
    #[error("could not read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no certificate found in {0}")]
    NoCertificate(PathBuf),
    #[error("invalid certificate in {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

/// Certificates that parsed cleanly, in DER form.
#[derive(Clone, Debug)]
pub struct ValidatedCertificate {
    pub path: PathBuf,
    pub certificates: Vec<CertificateDer<'static>>,
}

/// Expand a leading `~/` against the home directory
pub fn expand_home(input: &str) -> PathBuf {
    match input.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(input)),
        None => PathBuf::from(input),
    }
}

/// Load `path` and parse it as PEM (one or more `CERTIFICATE` blocks) or raw DER.
pub fn validate(path: &Path) -> Result<ValidatedCertificate, CertificateError> {
    let meta = fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CertificateError::NotFound(path.to_path_buf()),
        _ => CertificateError::Unreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    if !meta.is_file() {
        return Err(CertificateError::NotAFile(path.to_path_buf()));
    }

    let bytes = fs::read(path).map_err(|source| CertificateError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let certificates = decode(&bytes).map_err(|reason| CertificateError::Invalid {
        path: path.to_path_buf(),
        reason,
    })?;
    if certificates.is_empty() {
        return Err(CertificateError::NoCertificate(path.to_path_buf()));
    }

    // Parsing into a root store runs the full X.509 decoder.
    let mut roots = RootCertStore::empty();
    for cert in &certificates {
        roots
            .add(cert.clone())
            .map_err(|e| CertificateError::Invalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
    }

    tracing::info!(path = %path.display(), count = certificates.len(), "Certificate validated");
    Ok(ValidatedCertificate {
        path: path.to_path_buf(),
        certificates,
    })
}

fn decode(bytes: &[u8]) -> Result<Vec<CertificateDer<'static>>, String> {
    if looks_like_pem(bytes) {
        rustls_pemfile::certs(&mut io::BufReader::new(bytes))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.to_string())
    } else if bytes.first() == Some(&0x30) {
        Ok(vec![CertificateDer::from(bytes.to_vec())])
    } else {
        Ok(Vec::new())
    }
}

fn looks_like_pem(bytes: &[u8]) -> bool {
    bytes.windows(11).any(|w| w == b"-----BEGIN ")
}
