//! The uniform provider contract.

use async_trait::async_trait;
use depsig_core::{AnalysisResult, StrategyId};
use serde::Serialize;

use crate::failure::ProviderFailure;

/// One LLM backend integration.
///
/// Implementations own: rendering the strategy's instruction prompt,
/// invoking their backing model, and converting the raw reply into the
/// strategy's expected shape (via the shared normalize/parse steps). They
/// hold no mutable orchestration state; a shared backend handle must be safe
/// to reuse across concurrent calls.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Logical name used in the submission contract (e.g. `"gemini"`).
    fn name(&self) -> &'static str;

    /// Human-readable label surfaced to clients.
    fn display_name(&self) -> &'static str;

    /// Whether this provider implements the given strategy.
    ///
    /// All shipped providers support the full catalog, but callers must not
    /// hard-assume this.
    fn supports(&self, _strategy: StrategyId) -> bool {
        true
    }

    /// Analyze `input_text` in the given style.
    ///
    /// Input is assumed pre-validated by the submission boundary (non-empty,
    /// minimum length); providers do not re-check it.
    async fn analyze(
        &self,
        input_text: &str,
        strategy: StrategyId,
    ) -> Result<AnalysisResult, ProviderFailure>;
}

/// Introspectable description of a registered provider.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderDescriptor {
    pub name: &'static str,
    pub display_name: &'static str,
    pub strategies: Vec<StrategyId>,
}

impl ProviderDescriptor {
    pub fn for_provider(provider: &dyn Provider) -> Self {
        Self {
            name: provider.name(),
            display_name: provider.display_name(),
            strategies: StrategyId::ALL
                .into_iter()
                .filter(|s| provider.supports(*s))
                .collect(),
        }
    }
}
