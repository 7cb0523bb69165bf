//! Gemini provider (native `generateContent` API).

use std::time::Duration;

use async_trait::async_trait;
use depsig_core::{AnalysisResult, StrategyId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog;
use crate::failure::ProviderFailure;
use crate::parse::parse_result;
use crate::provider::Provider;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const MODEL: &str = "gemini-flash-latest";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const MAX_OUTPUT_TOKENS: u32 = 2048;

pub struct GeminiProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderFailure> {
        let request = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.0,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, MODEL, self.api_key
        );

        let response = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderFailure::BackendUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderFailure::BackendUnavailable(format!(
                "gemini backend returned {status}"
            )));
        }

        let body: GenerateResponse = response.json().await.map_err(|e| {
            ProviderFailure::MalformedResponse(format!("gemini response envelope: {e}"))
        })?;

        body.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ProviderFailure::MalformedResponse("gemini reply had no candidate text".to_string())
            })
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn display_name(&self) -> &'static str {
        "Gemini"
    }

    async fn analyze(
        &self,
        input_text: &str,
        strategy: StrategyId,
    ) -> Result<AnalysisResult, ProviderFailure> {
        let prompt = catalog::render(strategy, input_text);
        debug!(provider = "gemini", model = MODEL, %strategy, "sending generateContent");
        let raw = self.generate(&prompt).await?;
        parse_result(strategy, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_backend_is_classified_unavailable() {
        let provider = GeminiProvider::with_base_url("test-key", "http://127.0.0.1:9");
        let err = provider
            .analyze("I feel fine today.", StrategyId::Simple)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderFailure::BackendUnavailable(_)));
    }
}
