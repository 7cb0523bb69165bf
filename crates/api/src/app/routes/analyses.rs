//! Submission and polling.
//!
//! `GET /api/analyses/:id` deliberately changes shape across the lifecycle:
//! JSON progress while the job is in flight, the raw report bytes once it
//! completes, and a JSON error body when it fails. Clients switch on the
//! `Content-Type` header, not on guessing the body.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use depsig_core::{JobId, StrategyId};
use depsig_orchestrator::{JobView, StatusError, SubmitError};

use crate::app::{dto, errors, AppServices};

pub async fn submit(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::AnalyzeRequest>,
) -> axum::response::Response {
    let strategy: StrategyId = match body.strategy.parse() {
        Ok(s) => s,
        Err(e) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string())
        }
    };

    match services
        .orchestrator
        .submit(&body.text, &body.provider, strategy)
    {
        Ok(job_id) => (
            StatusCode::ACCEPTED,
            Json(dto::AnalysisAccepted {
                job_id: job_id.to_string(),
                status: "pending",
            }),
        )
            .into_response(),
        Err(SubmitError::Validation(msg)) => {
            errors::json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
    }
}

pub async fn poll(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    // An unparsable id cannot name a job, so it gets the same answer as an
    // unknown one.
    let job_id: JobId = match id.parse() {
        Ok(id) => id,
        Err(_) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "job not found"),
    };

    match services.orchestrator.get_status(job_id) {
        Err(StatusError::NotFound) => {
            errors::json_error(StatusCode::NOT_FOUND, "not_found", "job not found")
        }
        Ok(JobView::InFlight { status, progress }) => (
            StatusCode::OK,
            Json(json!({
                "status": status.as_str(),
                "progress": progress,
            })),
        )
            .into_response(),
        Ok(JobView::Error { kind, message }) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "status": "error",
                "kind": kind.as_str(),
                "error": message,
            })),
        )
            .into_response(),
        Ok(JobView::Complete {
            report,
            content_type,
            ..
        }) => {
            let filename = format!("{}_report.{}", job_id.short(), services.report_extension);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, content_type.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{filename}\""),
                    ),
                ],
                report,
            )
                .into_response()
        }
    }
}
