//! Classified provider failures.

use depsig_core::StrategyId;
use thiserror::Error;

/// Why a provider analysis failed.
///
/// The three classes are kept distinct end to end: the orchestrator stores
/// the class on the job, and the API surfaces it to the client. In
/// particular, a backend that *answered* but produced unparsable output is a
/// backend-quality problem (`MalformedResponse`), not an availability one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderFailure {
    /// Network, auth, or quota failure reaching the model backend.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The backend answered, but the reply could not be parsed into the
    /// strategy's expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The provider does not implement the requested strategy.
    #[error("provider {provider} does not support strategy {strategy}")]
    UnsupportedStrategy {
        provider: String,
        strategy: StrategyId,
    },
}

impl ProviderFailure {
    /// Stable class name for logging and job error classification.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderFailure::BackendUnavailable(_) => "backend_unavailable",
            ProviderFailure::MalformedResponse(_) => "malformed_response",
            ProviderFailure::UnsupportedStrategy { .. } => "unsupported_strategy",
        }
    }
}
