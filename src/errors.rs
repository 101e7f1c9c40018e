//! Error types for curlscope

use thiserror::Error;

/// Errors raised while turning a curl command into a request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty command")]
    Empty,

    #[error("Command must start with 'curl'")]
    NotCurl,

    #[error("Unterminated quote in curl command")]
    UnterminatedQuote,

    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Invalid header (expected 'Name: value'): {0}")]
    InvalidHeader(String),

    #[error("No URL specified in curl command")]
    MissingUrl,

    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),
}

/// Network and transport failures while executing a request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("DNS resolution failed for {host}: {message}")]
    Dns { host: String, message: String },

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request timed out after {0:.1} seconds")]
    Timeout(f64),

    #[error("TLS error: {0}")]
    Tls(String),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl RequestError {
    /// Classify a reqwest failure, keeping the underlying cause message
    pub fn from_reqwest(err: &reqwest::Error, timeout_secs: f64) -> Self {
        if err.is_timeout() {
            return RequestError::Timeout(timeout_secs);
        }

        let message = error_chain(err);
        if err.is_connect() {
            if cause_is_tls(err) {
                RequestError::Tls(message)
            } else {
                RequestError::Connect(message)
            }
        } else if err.is_builder() {
            RequestError::InvalidRequest(message)
        } else {
            RequestError::Transport(message)
        }
    }

    /// Phase label used in logs and failure records
    pub fn phase(&self) -> &'static str {
        match self {
            RequestError::Dns { .. } => "dns",
            RequestError::Connect(_) | RequestError::Tls(_) => "connect",
            RequestError::Timeout(_) | RequestError::Transport(_) => "request",
            RequestError::InvalidRequest(_) => "setup",
        }
    }
}

/// Whether a cause below the top-level error reports a TLS failure
///
/// The top-level reqwest message carries the request URL and is skipped.
fn cause_is_tls(err: &dyn std::error::Error) -> bool {
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string().to_lowercase();
        if ["certificate", "tls", "handshake"].iter().any(|k| text.contains(k)) {
            return true;
        }
        source = cause.source();
    }
    false
}

/// Flatten an error and its sources into one message
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Main error type for curlscope
#[derive(Error, Debug)]
pub enum CurlscopeError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    Argument(String),
}

pub type Result<T> = std::result::Result<T, CurlscopeError>;
