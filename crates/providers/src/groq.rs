//! Groq-hosted chat model providers.
//!
//! One implementation, five registry entries: each provider pairs a logical
//! name with the Groq model id it fronts and delegates the wire work to the
//! shared [`ChatBackend`].

use std::sync::Arc;

use async_trait::async_trait;
use depsig_core::{AnalysisResult, StrategyId};
use tracing::debug;

use crate::catalog;
use crate::chat::ChatBackend;
use crate::failure::ProviderFailure;
use crate::parse::parse_result;
use crate::provider::Provider;

pub struct GroqProvider {
    name: &'static str,
    display_name: &'static str,
    model: &'static str,
    backend: Arc<ChatBackend>,
}

impl GroqProvider {
    pub fn llama(backend: Arc<ChatBackend>) -> Self {
        Self::with_model("llama", "Llama", "llama-3.1-8b-instant", backend)
    }

    pub fn chatgpt(backend: Arc<ChatBackend>) -> Self {
        Self::with_model("chatgpt", "ChatGPT", "openai/gpt-oss-120b", backend)
    }

    pub fn kimi(backend: Arc<ChatBackend>) -> Self {
        Self::with_model("kimi", "Kimi", "moonshotai/kimi-k2-instruct-0905", backend)
    }

    pub fn qwen(backend: Arc<ChatBackend>) -> Self {
        Self::with_model("qwen", "Qwen", "qwen/qwen3-32b", backend)
    }

    pub fn compound(backend: Arc<ChatBackend>) -> Self {
        Self::with_model("compound", "Compound", "groq/compound", backend)
    }

    pub fn with_model(
        name: &'static str,
        display_name: &'static str,
        model: &'static str,
        backend: Arc<ChatBackend>,
    ) -> Self {
        Self {
            name,
            display_name,
            model,
            backend,
        }
    }
}

#[async_trait]
impl Provider for GroqProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn display_name(&self) -> &'static str {
        self.display_name
    }

    async fn analyze(
        &self,
        input_text: &str,
        strategy: StrategyId,
    ) -> Result<AnalysisResult, ProviderFailure> {
        let prompt = catalog::render(strategy, input_text);
        debug!(provider = self.name, model = self.model, %strategy, "sending chat completion");
        let raw = self.backend.complete(self.model, &prompt).await?;
        parse_result(strategy, &raw)
    }
}
