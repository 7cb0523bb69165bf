//! Enumeration endpoints clients build their pickers from.

use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse, Json};

use depsig_core::StrategyId;

use crate::app::{dto, AppServices};

pub async fn providers(
    Extension(services): Extension<Arc<AppServices>>,
) -> impl IntoResponse {
    Json(services.orchestrator.registry().descriptors())
}

pub async fn strategies() -> impl IntoResponse {
    let all: Vec<dto::StrategyInfo> = StrategyId::ALL
        .iter()
        .map(|s| dto::StrategyInfo {
            id: s.as_str(),
            description: s.description(),
        })
        .collect();
    Json(all)
}
