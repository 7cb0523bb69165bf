//! HTTP application wiring (Axum router + service injection).
//!
//! Layout:
//! - `routes/`: HTTP routes + handlers (one file per surface area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent JSON error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use depsig_orchestrator::Orchestrator;
use depsig_providers::ProviderRegistry;
use depsig_report::{ReportGenerator, TextReportRenderer};

pub mod dto;
pub mod errors;
pub mod routes;

/// Everything the handlers need, injected as one `Extension`.
pub struct AppServices {
    pub orchestrator: Orchestrator,
    /// File extension the report generator produces, for download filenames.
    pub report_extension: &'static str,
}

/// Build the production router: providers from the environment, text reports.
pub fn build_app() -> Router {
    let registry = Arc::new(ProviderRegistry::from_env());
    let generator: Arc<dyn ReportGenerator> = Arc::new(TextReportRenderer::new());
    build_app_with(registry, generator)
}

/// Build the router around explicit services. Tests use this to wire
/// deterministic providers; the router itself is identical to production.
pub fn build_app_with(
    registry: Arc<ProviderRegistry>,
    generator: Arc<dyn ReportGenerator>,
) -> Router {
    let report_extension = generator.file_extension();
    let services = Arc::new(AppServices {
        orchestrator: Orchestrator::new(registry, generator),
        report_extension,
    });

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(services))
}
