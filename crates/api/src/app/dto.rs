//! Request/response DTOs.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/analyses`.
///
/// `strategy` arrives as a string so an unknown value becomes a 400 with a
/// useful message instead of a generic deserialization failure.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    pub provider: String,
    #[serde(default = "default_strategy")]
    pub strategy: String,
}

fn default_strategy() -> String {
    "simple".to_string()
}

/// `202 Accepted` body: the handle the client polls with.
#[derive(Debug, Serialize)]
pub struct AnalysisAccepted {
    pub job_id: String,
    pub status: &'static str,
}

/// One entry of `GET /api/strategies`.
#[derive(Debug, Serialize)]
pub struct StrategyInfo {
    pub id: &'static str,
    pub description: &'static str,
}
