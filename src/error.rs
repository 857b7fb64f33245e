//! Error types for talking to the diagnosis API and the upload webhook.
//!
//! The dashboard never surfaces these to the user directly: failed loads
//! degrade to empty data and failed uploads mark the item as errored. They
//! exist so the degradation is logged with a reason.

/// Errors produced by HTTP calls and upload file handling.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("{url} answered with status {status}")]
    Status { status: u16, url: String },

    /// The response body was not the expected JSON shape.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// A file selected for upload could not be read.
    #[error("{path}: {message}")]
    Io { path: String, message: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Request(err.to_string())
    }
}

/// Errors produced while reading configuration from the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be an http(s) URL, got `{value}`")]
    InvalidUrl { var: &'static str, value: String },
}
