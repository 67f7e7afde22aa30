//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default file backing the URL history
pub const DEFAULT_HISTORY_FILE: &str = "urls.json";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Directory name used under the platform data dir for logs
pub const APP_DIR_NAME: &str = "freeman-post";

/// Log file name
pub const LOG_FILE_NAME: &str = "freeman-post.log";

/// Application name
pub const APP_NAME: &str = "Freeman Post";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common HTTP header names offered by header completion, in suggestion order.
pub const COMMON_HTTP_HEADERS: &[&str] = &[
    "Accept",
    "Accept-Charset",
    "Accept-Encoding",
    "Accept-Language",
    "Authorization",
    "Cache-Control",
    "Connection",
    "Content-Length",
    "Content-Type",
    "Cookie",
    "Date",
    "DNT",
    "Expect",
    "From",
    "Host",
    "If-Match",
    "If-Modified-Since",
    "If-None-Match",
    "If-Range",
    "If-Unmodified-Since",
    "Max-Forwards",
    "Origin",
    "Pragma",
    "Proxy-Authorization",
    "Range",
    "Referer",
    "TE",
    "Upgrade",
    "User-Agent",
    "Via",
    "Warning",
    "X-Requested-With",
    "X-Forwarded-For",
    "X-Forwarded-Host",
    "X-Forwarded-Proto",
    "X-Real-IP",
    "X-CSRF-Token",
    "X-API-Key",
];
