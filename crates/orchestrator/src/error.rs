//! Orchestrator boundary errors.

use thiserror::Error;

/// Synchronous submission failure. No job is created.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// Malformed submission: unknown provider or strategy, capability
    /// mismatch, or empty/too-short input.
    #[error("validation failed: {0}")]
    Validation(String),
}

impl SubmitError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Status-query failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StatusError {
    /// Unknown or expired job id.
    #[error("job not found")]
    NotFound,
}
