use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::AppServices;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn job_stats(
    Extension(services): Extension<Arc<AppServices>>,
) -> impl IntoResponse {
    Json(services.orchestrator.stats())
}
