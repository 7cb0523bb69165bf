//! The job orchestrator.

use std::sync::Arc;

use depsig_core::{JobId, StrategyId};
use depsig_providers::ProviderRegistry;
use depsig_report::ReportGenerator;
use tracing::{info, warn};

use crate::error::{StatusError, SubmitError};
use crate::job::{Job, JobOutcome, JobView};
use crate::store::{InMemoryJobStore, JobStats, JobStore};

/// Minimum input length after trimming, enforced at the submission boundary
/// (not by providers).
const MIN_INPUT_CHARS: usize = 10;

/// Progress checkpoints for the two execution steps.
const PROGRESS_ANALYZED: u8 = 80;

/// Owns job creation, asynchronous execution, and terminal-result storage.
///
/// Cheap to share: hand out `Arc<Orchestrator>` and call it from any task.
pub struct Orchestrator {
    registry: Arc<ProviderRegistry>,
    generator: Arc<dyn ReportGenerator>,
    store: Arc<dyn JobStore>,
}

impl Orchestrator {
    pub fn new(registry: Arc<ProviderRegistry>, generator: Arc<dyn ReportGenerator>) -> Self {
        Self::with_store(registry, generator, Arc::new(InMemoryJobStore::new()))
    }

    pub fn with_store(
        registry: Arc<ProviderRegistry>,
        generator: Arc<dyn ReportGenerator>,
        store: Arc<dyn JobStore>,
    ) -> Self {
        Self {
            registry,
            generator,
            store,
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn stats(&self) -> JobStats {
        self.store.stats()
    }

    /// Validate, create a pending job, schedule its execution, return.
    ///
    /// Never blocks on the provider call. Validation failures are synchronous
    /// and create no job.
    pub fn submit(
        &self,
        input_text: &str,
        provider: &str,
        strategy: StrategyId,
    ) -> Result<JobId, SubmitError> {
        let text = input_text.trim();
        if text.is_empty() {
            return Err(SubmitError::validation("input text must not be empty"));
        }
        if text.chars().count() < MIN_INPUT_CHARS {
            return Err(SubmitError::validation(format!(
                "input text too short (minimum {MIN_INPUT_CHARS} characters)"
            )));
        }
        if !self.registry.contains(provider) {
            return Err(SubmitError::validation(format!(
                "unknown provider: {provider}"
            )));
        }
        if !self.registry.supports(provider, strategy) {
            return Err(SubmitError::validation(format!(
                "provider {provider} does not support strategy {strategy}"
            )));
        }

        let job = Job::new(provider, strategy, text.to_string());
        let job_id = job.id;
        self.store
            .insert(job)
            .map_err(|e| SubmitError::validation(e.to_string()))?;

        info!(%job_id, provider, %strategy, "job submitted");

        // The only execution attempt this job will ever get.
        let registry = self.registry.clone();
        let generator = self.generator.clone();
        let store = self.store.clone();
        tokio::spawn(async move {
            execute(registry, generator, store, job_id).await;
        });

        Ok(job_id)
    }

    /// Snapshot the current state of a job.
    ///
    /// Reads are idempotent: terminal jobs return identical content on every
    /// call.
    pub fn get_status(&self, job_id: JobId) -> Result<JobView, StatusError> {
        self.store
            .get(job_id)
            .map(|job| job.view())
            .ok_or(StatusError::NotFound)
    }
}

/// One job's execution: dispatch, render, store the terminal outcome.
///
/// Steps are strictly sequential for a given job; failures land in the job's
/// terminal `error` state and are never thrown across the async boundary.
async fn execute(
    registry: Arc<ProviderRegistry>,
    generator: Arc<dyn ReportGenerator>,
    store: Arc<dyn JobStore>,
    job_id: JobId,
) {
    let Some(mut job) = store.get(job_id) else {
        warn!(%job_id, "job vanished before execution");
        return;
    };

    job.mark_running();
    let _ = store.update(&job);

    let analysis = match registry
        .dispatch(&job.provider, &job.input_text, job.strategy)
        .await
    {
        Ok(analysis) => analysis,
        Err(e) => {
            let error: crate::job::JobError = e.into();
            warn!(%job_id, kind = error.kind.as_str(), message = %error.message, "dispatch failed");
            job.mark_error(error);
            let _ = store.update(&job);
            return;
        }
    };

    job.bump_progress(PROGRESS_ANALYZED);
    let _ = store.update(&job);

    match generator.generate(&analysis, job.strategy) {
        Ok(report) => {
            job.mark_complete(JobOutcome {
                analysis,
                report,
                content_type: generator.content_type(),
            });
            let _ = store.update(&job);
            info!(%job_id, "job complete");
        }
        Err(e) => {
            let error: crate::job::JobError = e.into();
            warn!(%job_id, kind = error.kind.as_str(), message = %error.message, "report generation failed");
            job.mark_error(error);
            let _ = store.update(&job);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{FailureKind, JobStatus};
    use async_trait::async_trait;
    use depsig_core::AnalysisResult;
    use depsig_providers::{parse::parse_result, Provider, ProviderFailure, StaticProvider};
    use depsig_report::{ReportError, TextReportRenderer};
    use std::time::Duration;

    const SAMPLE: &str = "I feel hopeless and exhausted every day.";

    /// Provider that always fails the way it is told to.
    struct FailingProvider {
        failure: ProviderFailure,
    }

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
            Err(self.failure.clone())
        }
    }

    /// Second deterministic provider, for cross-provider isolation checks.
    struct MirrorProvider;

    #[async_trait]
    impl Provider for MirrorProvider {
        fn name(&self) -> &'static str {
            "mirror"
        }
        fn display_name(&self) -> &'static str {
            "Mirror"
        }
        async fn analyze(
            &self,
            input_text: &str,
            strategy: StrategyId,
        ) -> Result<AnalysisResult, ProviderFailure> {
            StaticProvider::new().analyze(input_text, strategy).await
        }
    }

    /// Provider that answers with garbage, exercising the parse path.
    struct GarbledProvider;

    #[async_trait]
    impl Provider for GarbledProvider {
        fn name(&self) -> &'static str {
            "garbled"
        }
        fn display_name(&self) -> &'static str {
            "Garbled"
        }
        async fn analyze(
            &self,
            _input_text: &str,
            strategy: StrategyId,
        ) -> Result<AnalysisResult, ProviderFailure> {
            parse_result(strategy, "I'd rather not answer in JSON today.")
        }
    }

    fn orchestrator() -> Orchestrator {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(StaticProvider::new()));
        registry.register(Arc::new(MirrorProvider));
        registry.register(Arc::new(GarbledProvider));
        registry.register(Arc::new(FailingProvider {
            failure: ProviderFailure::BackendUnavailable("simulated auth failure".into()),
        }));
        Orchestrator::new(Arc::new(registry), Arc::new(TextReportRenderer::new()))
    }

    async fn wait_terminal(orch: &Orchestrator, job_id: JobId) -> JobView {
        for _ in 0..500 {
            match orch.get_status(job_id).unwrap() {
                JobView::InFlight { .. } => {
                    tokio::time::sleep(Duration::from_millis(5)).await;
                }
                terminal => return terminal,
            }
        }
        panic!("job {job_id} did not reach a terminal state");
    }

    #[tokio::test]
    async fn submit_then_poll_reaches_complete() {
        let orch = orchestrator();
        let job_id = orch.submit(SAMPLE, "static", StrategyId::Simple).unwrap();

        match wait_terminal(&orch, job_id).await {
            JobView::Complete {
                analysis,
                report,
                content_type,
            } => {
                assert_eq!(analysis.strategy(), StrategyId::Simple);
                assert!(!report.is_empty());
                assert!(content_type.starts_with("text/plain"));
                let summary = analysis.summary();
                assert!(!summary.label.is_empty());
                assert!(summary.confidence > 0.0);
            }
            other => panic!("expected complete, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn feature_extraction_result_carries_metrics() {
        let orch = orchestrator();
        let job_id = orch
            .submit(SAMPLE, "static", StrategyId::FeatureExtraction)
            .unwrap();

        match wait_terminal(&orch, job_id).await {
            JobView::Complete { analysis, report, .. } => {
                let AnalysisResult::FeatureExtraction(fe) = analysis else {
                    panic!("wrong shape");
                };
                assert!(fe.features.negative_emotion_words > 0);
                let text = String::from_utf8(report).unwrap();
                assert!(text.contains("Negative emotion words"));
            }
            other => panic!("expected complete, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_input_fails_synchronously_without_a_job() {
        let orch = orchestrator();
        let err = orch.submit("   \n  ", "static", StrategyId::Simple).unwrap_err();
        assert!(matches!(err, SubmitError::Validation(_)));
        assert_eq!(orch.stats(), JobStats::default());
    }

    #[tokio::test]
    async fn short_input_fails_validation() {
        let orch = orchestrator();
        assert!(orch.submit("meh", "static", StrategyId::Simple).is_err());
    }

    #[tokio::test]
    async fn unknown_provider_fails_synchronously_without_a_job() {
        let orch = orchestrator();
        let err = orch.submit(SAMPLE, "claude", StrategyId::Simple).unwrap_err();
        assert!(matches!(err, SubmitError::Validation(_)));
        assert_eq!(orch.stats(), JobStats::default());
    }

    #[tokio::test]
    async fn backend_failure_lands_in_error_state() {
        let orch = orchestrator();
        let job_id = orch.submit(SAMPLE, "failing", StrategyId::Simple).unwrap();

        match wait_terminal(&orch, job_id).await {
            JobView::Error { kind, message } => {
                assert_eq!(kind, FailureKind::BackendUnavailable);
                assert!(message.contains("simulated auth failure"));
            }
            other => panic!("expected error, got {other:?}"),
        }

        // Terminal and stable: repeated reads return identical content.
        let first = orch.get_status(job_id).unwrap();
        let second = orch.get_status(job_id).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn garbled_reply_is_classified_malformed_not_unavailable() {
        let orch = orchestrator();
        let job_id = orch.submit(SAMPLE, "garbled", StrategyId::Structured).unwrap();

        match wait_terminal(&orch, job_id).await {
            JobView::Error { kind, .. } => assert_eq!(kind, FailureKind::MalformedResponse),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn report_failure_is_its_own_classification() {
        struct BrokenRenderer;
        impl ReportGenerator for BrokenRenderer {
            fn content_type(&self) -> &'static str {
                "text/plain; charset=utf-8"
            }
            fn file_extension(&self) -> &'static str {
                "txt"
            }
            fn generate(
                &self,
                result: &AnalysisResult,
                _strategy: StrategyId,
            ) -> Result<Vec<u8>, ReportError> {
                Err(ReportError::ShapeMismatch {
                    requested: StrategyId::Simple,
                    actual: result.strategy(),
                })
            }
        }

        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(StaticProvider::new()));
        let orch = Orchestrator::new(Arc::new(registry), Arc::new(BrokenRenderer));

        let job_id = orch.submit(SAMPLE, "static", StrategyId::Simple).unwrap();
        match wait_terminal(&orch, job_id).await {
            JobView::Error { kind, .. } => assert_eq!(kind, FailureKind::ReportGeneration),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_job_id_is_not_found() {
        let orch = orchestrator();
        assert_eq!(orch.get_status(JobId::new()), Err(StatusError::NotFound));
    }

    #[tokio::test]
    async fn concurrent_jobs_complete_independently() {
        let orch = Arc::new(orchestrator());

        // Interleave strategies and providers across the batch.
        let mut ids = Vec::new();
        for (i, strategy) in StrategyId::ALL.iter().cycle().take(12).enumerate() {
            let provider = if i % 2 == 0 { "static" } else { "mirror" };
            let text = format!("I feel hopeless and exhausted, submission number {i}.");
            ids.push((orch.submit(&text, provider, *strategy).unwrap(), *strategy));
        }

        for (job_id, strategy) in ids {
            match wait_terminal(&orch, job_id).await {
                JobView::Complete { analysis, .. } => {
                    // Each job's result carries its own strategy's shape; a
                    // cross-attached result would show the wrong one.
                    assert_eq!(analysis.strategy(), strategy);
                }
                other => panic!("job {job_id} expected complete, got {other:?}"),
            }
        }

        let stats = orch.stats();
        assert_eq!(stats.complete, 12);
        assert_eq!(stats.error, 0);
    }
}
