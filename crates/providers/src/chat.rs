//! Shared OpenAI-compatible chat-completions backend.
//!
//! Five of the shipped providers (Llama, ChatGPT, Kimi, Qwen, Compound) are
//! hosted behind one Groq endpoint and differ only in model id, so they share
//! this client. The handle is stateless and safe to clone/share across
//! concurrent analyses.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::failure::ProviderFailure;

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const MAX_OUTPUT_TOKENS: u32 = 1024;

#[derive(Debug, Clone)]
pub struct ChatBackend {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl ChatBackend {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the client at a different OpenAI-compatible endpoint
    /// (used by tests and self-hosted deployments).
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

    /// Run one completion and return the raw reply text.
    ///
    /// Temperature is pinned to 0 for deterministic-as-possible output; the
    /// structural parser downstream depends on the model following the
    /// template's JSON format.
    pub async fn complete(&self, model: &str, prompt: &str) -> Result<String, ProviderFailure> {
        let request = ChatRequest {
            model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.0,
            max_tokens: MAX_OUTPUT_TOKENS,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderFailure::BackendUnavailable(transport_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            // Auth, quota, and server errors are all "the backend is not
            // usable right now" from the caller's perspective.
            return Err(ProviderFailure::BackendUnavailable(format!(
                "chat backend returned {status} for model {model}"
            )));
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            ProviderFailure::MalformedResponse(format!("chat completion envelope: {e}"))
        })?;

        body.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| {
                ProviderFailure::MalformedResponse("chat completion had no choices".to_string())
            })
    }
}

fn transport_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("request timed out: {e}")
    } else if e.is_connect() {
        format!("connection failed: {e}")
    } else {
        e.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_backend_is_classified_unavailable() {
        // Port 9 (discard) on localhost is not listening.
        let backend = ChatBackend::with_base_url("test-key", "http://127.0.0.1:9/openai/v1");
        let err = backend.complete("test-model", "hello").await.unwrap_err();
        assert!(matches!(err, ProviderFailure::BackendUnavailable(_)));
    }
}
