//! Shared error types for the services crate.

use thiserror::Error;

use lesson_core::model::MalformedReply;

/// Errors emitted while building server configuration or endpoint URLs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error(transparent)]
    InvalidUrl(#[from] url::ParseError),
    #[error("unsupported server url scheme: {0}")]
    UnsupportedScheme(String),
}

/// Transport-level failures of the completion request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompletionError {
    #[error("completion request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("completion reply was not valid json: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Malformed(#[from] MalformedReply),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
