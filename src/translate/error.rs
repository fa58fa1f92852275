//! Translator error type.

use thiserror::Error;

/// Failure of a single translation call.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// Transport problem: connect, timeout, body decode.
    #[error("translation request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("translator returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// The provider answered with a body we could not use.
    #[error("unexpected translator response: {0}")]
    Malformed(String),
}
