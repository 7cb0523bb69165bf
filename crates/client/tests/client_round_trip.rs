use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use depsig_client::{AnalysisClient, ClientError, PollPolicy, PollState};
use depsig_core::{AnalysisResult, StrategyId};
use depsig_providers::{Provider, ProviderFailure, ProviderRegistry, StaticProvider};
use depsig_report::TextReportRenderer;

const SAMPLE: &str = "I feel hopeless and exhausted every day.";

/// Deterministic provider that takes long enough to outlast a short poll
/// budget.
struct SlowProvider;

#[async_trait]
impl Provider for SlowProvider {
    fn name(&self) -> &'static str {
        "slow"
    }
    fn display_name(&self) -> &'static str {
        "Slow"
    }
    async fn analyze(
        &self,
        input_text: &str,
        strategy: StrategyId,
    ) -> Result<AnalysisResult, ProviderFailure> {
        tokio::time::sleep(Duration::from_millis(200)).await;
        StaticProvider::new().analyze(input_text, strategy).await
    }
}

struct FailingProvider;

#[async_trait]
impl Provider for FailingProvider {
    fn name(&self) -> &'static str {
        "failing"
    }
    fn display_name(&self) -> &'static str {
        "Failing"
    }
    async fn analyze(
        &self,
        _input_text: &str,
        _strategy: StrategyId,
    ) -> Result<AnalysisResult, ProviderFailure> {
        Err(ProviderFailure::BackendUnavailable("connection refused".into()))
    }
}

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(StaticProvider::new()));
        registry.register(Arc::new(SlowProvider));
        registry.register(Arc::new(FailingProvider));
        let app = depsig_api::app::build_app_with(
            Arc::new(registry),
            Arc::new(TextReportRenderer::new()),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn client(base_url: &str) -> AnalysisClient {
    // Tight cadence so the suite stays fast.
    AnalysisClient::with_policy(
        base_url,
        PollPolicy {
            interval: Duration::from_millis(10),
            max_attempts: 500,
        },
    )
}

#[tokio::test]
async fn analyze_returns_the_report() {
    let srv = TestServer::spawn().await;
    let client = client(&srv.base_url);

    let report = client
        .analyze(SAMPLE, "static", StrategyId::Simple)
        .await
        .unwrap();

    assert!(report.content_type.starts_with("text/plain"));
    assert!(!report.bytes.is_empty());
    let name = report.filename.unwrap();
    assert!(name.ends_with("_report.txt"));
    assert!(String::from_utf8(report.bytes).unwrap().contains("Judgment"));
}

#[tokio::test]
async fn rejected_submission_creates_no_job() {
    let srv = TestServer::spawn().await;
    let client = client(&srv.base_url);

    let err = client
        .submit(SAMPLE, "claude", StrategyId::Simple)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Rejected(_)));
    assert!(err.to_string().contains("claude"));
}

#[tokio::test]
async fn failed_job_surfaces_the_classification() {
    let srv = TestServer::spawn().await;
    let client = client(&srv.base_url);

    let err = client
        .analyze(SAMPLE, "failing", StrategyId::Structured)
        .await
        .unwrap_err();
    match err {
        ClientError::Job { kind, message } => {
            assert_eq!(kind, "backend_unavailable");
            assert!(message.contains("connection refused"));
        }
        other => panic!("expected job failure, got {other:?}"),
    }
}

#[tokio::test]
async fn exhausted_poll_budget_times_out_without_cancelling_the_job() {
    let srv = TestServer::spawn().await;

    // A budget far smaller than the provider's latency.
    let impatient = AnalysisClient::with_policy(
        &srv.base_url,
        PollPolicy {
            interval: Duration::from_millis(5),
            max_attempts: 2,
        },
    );

    let job_id = impatient
        .submit(SAMPLE, "slow", StrategyId::Simple)
        .await
        .unwrap();
    let err = impatient.wait_for_report(job_id).await.unwrap_err();
    assert!(matches!(err, ClientError::TimedOut { attempts: 2 }));

    // The timeout is purely local; the server-side job keeps running and a
    // patient client still gets the report.
    let patient = client(&srv.base_url);
    let report = patient.wait_for_report(job_id).await.unwrap();
    assert!(!report.bytes.is_empty());
}

#[tokio::test]
async fn unknown_job_id_is_not_found() {
    let srv = TestServer::spawn().await;
    let client = client(&srv.base_url);

    let err = client
        .fetch(depsig_core::JobId::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound));
}

#[tokio::test]
async fn fetch_reports_progress_shape_while_in_flight() {
    let srv = TestServer::spawn().await;
    let client = client(&srv.base_url);

    let job_id = client
        .submit(SAMPLE, "static", StrategyId::FreeForm)
        .await
        .unwrap();

    // Either we catch it in flight (pending/running with bounded progress) or
    // it is already done; both are protocol-conforming.
    match client.fetch(job_id).await.unwrap() {
        PollState::InFlight { status, progress } => {
            assert!(status == "pending" || status == "running");
            assert!(progress <= 100);
        }
        PollState::Done(report) => assert!(!report.bytes.is_empty()),
    }
}
