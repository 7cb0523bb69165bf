//! Provider registry and dispatch.
//!
//! A pure lookup table from logical provider name to implementation, built
//! once at process start and read-only afterwards; it is safely shared across
//! all concurrent job executions. Adding a provider means adding one entry
//! here — the orchestrator never changes.

use std::collections::HashMap;
use std::sync::Arc;

use depsig_core::{AnalysisResult, StrategyId};
use thiserror::Error;
use tracing::{info, warn};

use crate::chat::ChatBackend;
use crate::failure::ProviderFailure;
use crate::gemini::GeminiProvider;
use crate::groq::GroqProvider;
use crate::provider::{Provider, ProviderDescriptor};
use crate::statik::StaticProvider;

/// Failure of one dispatch attempt.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    #[error(transparent)]
    Provider(#[from] ProviderFailure),
}

#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<&'static str, Arc<dyn Provider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from the process environment.
    ///
    /// The offline `static` provider is always registered; backends whose
    /// API key is absent are skipped with a warning rather than failing
    /// startup, so the service stays usable with whatever keys it has.
    pub fn from_env() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(StaticProvider::new()));

        match std::env::var("GROQ_API_KEY") {
            Ok(key) if !key.is_empty() => {
                let backend = Arc::new(ChatBackend::new(key));
                registry.register(Arc::new(GroqProvider::llama(backend.clone())));
                registry.register(Arc::new(GroqProvider::chatgpt(backend.clone())));
                registry.register(Arc::new(GroqProvider::kimi(backend.clone())));
                registry.register(Arc::new(GroqProvider::qwen(backend.clone())));
                registry.register(Arc::new(GroqProvider::compound(backend)));
            }
            _ => warn!("GROQ_API_KEY not set; skipping llama/chatgpt/kimi/qwen/compound"),
        }

        match std::env::var("GEMINI_API_KEY") {
            Ok(key) if !key.is_empty() => {
                registry.register(Arc::new(GeminiProvider::new(key)));
            }
            _ => warn!("GEMINI_API_KEY not set; skipping gemini"),
        }

        info!(providers = ?registry.names(), "provider registry initialized");
        registry
    }

    pub fn register(&mut self, provider: Arc<dyn Provider>) {
        self.providers.insert(provider.name(), provider);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Resolve a logical name to a live implementation.
    ///
    /// Resolution happens fresh on every dispatch; nothing holds a provider
    /// binding across executions.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Provider>, DispatchError> {
        self.providers
            .get(name)
            .cloned()
            .ok_or_else(|| DispatchError::UnknownProvider(name.to_string()))
    }

    /// Resolve, check capability, delegate. No business logic of its own.
    pub async fn dispatch(
        &self,
        provider_name: &str,
        input_text: &str,
        strategy: StrategyId,
    ) -> Result<AnalysisResult, DispatchError> {
        let provider = self.resolve(provider_name)?;
        if !provider.supports(strategy) {
            return Err(ProviderFailure::UnsupportedStrategy {
                provider: provider_name.to_string(),
                strategy,
            }
            .into());
        }
        Ok(provider.analyze(input_text, strategy).await?)
    }

    /// Whether `name` supports `strategy` (false for unknown providers).
    pub fn supports(&self, name: &str, strategy: StrategyId) -> bool {
        self.providers
            .get(name)
            .is_some_and(|p| p.supports(strategy))
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.providers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Descriptors for client enumeration, sorted by name.
    pub fn descriptors(&self) -> Vec<ProviderDescriptor> {
        let mut all: Vec<_> = self
            .providers
            .values()
            .map(|p| ProviderDescriptor::for_provider(p.as_ref()))
            .collect();
        all.sort_by_key(|d| d.name);
        all
    }
}
