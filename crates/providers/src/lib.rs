//! `depsig-providers`
//!
//! **Responsibility:** the provider abstraction layer.
//!
//! Everything between "input text + strategy" and "strategy-shaped
//! [`AnalysisResult`](depsig_core::AnalysisResult) or classified failure"
//! lives here:
//!
//! - [`Provider`]: the uniform capability contract every backend implements
//! - [`catalog`]: the closed instruction-template catalog (one per strategy)
//! - [`normalize`] + [`parse`]: shared response cleanup and structural parsing
//! - concrete backends: Gemini (native API) and five Groq-hosted chat models
//! - [`StaticProvider`]: deterministic offline backend for dev and tests
//! - [`ProviderRegistry`]: name → implementation lookup plus thin dispatch
//!
//! Providers never mutate orchestration state; they return results or
//! failures, and only the orchestrator updates jobs.

pub mod catalog;
pub mod chat;
pub mod failure;
pub mod gemini;
pub mod groq;
pub mod normalize;
pub mod parse;
pub mod provider;
pub mod registry;
pub mod statik;

pub use chat::ChatBackend;
pub use failure::ProviderFailure;
pub use gemini::GeminiProvider;
pub use groq::GroqProvider;
pub use provider::{Provider, ProviderDescriptor};
pub use registry::{DispatchError, ProviderRegistry};
pub use statik::StaticProvider;
