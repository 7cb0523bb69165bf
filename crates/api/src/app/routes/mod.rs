use axum::{
    routing::{get, post},
    Router,
};

pub mod analyses;
pub mod catalog;
pub mod system;

/// Router for the `/api` surface.
pub fn router() -> Router {
    Router::new()
        .route("/api/analyses", post(analyses::submit))
        .route("/api/analyses/:id", get(analyses::poll))
        .route("/api/providers", get(catalog::providers))
        .route("/api/strategies", get(catalog::strategies))
        .route("/api/jobs/stats", get(system::job_stats))
}
