//! Service-level error taxonomy.

use thiserror::Error;

/// Errors returned by [`FaqService`](super::FaqService) operations.
///
/// Translation failures never show up here: they degrade a single record
/// to its baseline text instead.
#[derive(Debug, Error)]
pub enum FaqError {
    /// Missing or malformed input, detected before any side effect.
    #[error("{0}")]
    Validation(String),

    /// The targeted record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Store failure or other unexpected condition.
    #[error("internal error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl FaqError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}
