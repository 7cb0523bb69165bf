//! The job model and its state machine.

use chrono::{DateTime, Utc};
use depsig_core::{AnalysisResult, JobId, StrategyId};
use depsig_providers::{DispatchError, ProviderFailure};
use depsig_report::ReportError;
use serde::Serialize;

/// Job execution status.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Queued for execution, not yet started.
    Pending,
    /// Execution has begun.
    Running,
    /// Terminal: result and report populated.
    Complete,
    /// Terminal: classified error populated.
    Error,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Complete | JobStatus::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Running => "running",
            JobStatus::Complete => "complete",
            JobStatus::Error => "error",
        }
    }
}

/// Classified reason a job failed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    UnknownProvider,
    UnsupportedStrategy,
    BackendUnavailable,
    MalformedResponse,
    ReportGeneration,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::UnknownProvider => "unknown_provider",
            FailureKind::UnsupportedStrategy => "unsupported_strategy",
            FailureKind::BackendUnavailable => "backend_unavailable",
            FailureKind::MalformedResponse => "malformed_response",
            FailureKind::ReportGeneration => "report_generation",
        }
    }
}

/// Terminal error stored on a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobError {
    pub kind: FailureKind,
    pub message: String,
}

impl From<DispatchError> for JobError {
    fn from(err: DispatchError) -> Self {
        let kind = match &err {
            DispatchError::UnknownProvider(_) => FailureKind::UnknownProvider,
            DispatchError::Provider(ProviderFailure::BackendUnavailable(_)) => {
                FailureKind::BackendUnavailable
            }
            DispatchError::Provider(ProviderFailure::MalformedResponse(_)) => {
                FailureKind::MalformedResponse
            }
            DispatchError::Provider(ProviderFailure::UnsupportedStrategy { .. }) => {
                FailureKind::UnsupportedStrategy
            }
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

impl From<ReportError> for JobError {
    fn from(err: ReportError) -> Self {
        Self {
            kind: FailureKind::ReportGeneration,
            message: err.to_string(),
        }
    }
}

/// Analysis + rendered report attached to a completed job.
#[derive(Debug, Clone, PartialEq)]
pub struct JobOutcome {
    pub analysis: AnalysisResult,
    pub report: Vec<u8>,
    pub content_type: &'static str,
}

/// One analysis request from submission to terminal outcome.
///
/// Mutated only by the orchestrator's execution path, and only through the
/// `mark_*` transitions below. Invariant: exactly one of `result`/`error` is
/// populated, and only in the matching terminal state.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub status: JobStatus,
    /// Percentage, monotonically non-decreasing while running.
    pub progress: u8,
    pub provider: String,
    pub strategy: StrategyId,
    pub input_text: String,
    pub result: Option<JobOutcome>,
    pub error: Option<JobError>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Job {
    pub fn new(provider: impl Into<String>, strategy: StrategyId, input_text: String) -> Self {
        Self {
            id: JobId::new(),
            status: JobStatus::Pending,
            progress: 0,
            provider: provider.into(),
            strategy,
            input_text,
            result: None,
            error: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Transition into `running`. No-op on terminal jobs.
    pub fn mark_running(&mut self) {
        if self.status.is_terminal() {
            return;
        }
        self.status = JobStatus::Running;
        self.bump_progress(10);
    }

    /// Raise `progress` to `value` if that is an increase.
    pub fn bump_progress(&mut self, value: u8) {
        if !self.status.is_terminal() && value > self.progress {
            self.progress = value.min(100);
        }
    }

    /// Terminal success transition. The result becomes visible in the same
    /// store write as the status flip.
    pub fn mark_complete(&mut self, outcome: JobOutcome) {
        if self.status.is_terminal() {
            return;
        }
        self.status = JobStatus::Complete;
        self.progress = 100;
        self.result = Some(outcome);
        self.completed_at = Some(Utc::now());
    }

    /// Terminal failure transition.
    pub fn mark_error(&mut self, error: JobError) {
        if self.status.is_terminal() {
            return;
        }
        self.status = JobStatus::Error;
        self.error = Some(error);
        self.completed_at = Some(Utc::now());
    }

    /// Client-facing snapshot of this job.
    pub fn view(&self) -> JobView {
        match self.status {
            JobStatus::Complete => {
                // mark_complete is the only way into this state.
                let outcome = self.result.clone().expect("complete job has a result");
                JobView::Complete {
                    analysis: outcome.analysis,
                    report: outcome.report,
                    content_type: outcome.content_type,
                }
            }
            JobStatus::Error => {
                let error = self.error.clone().expect("errored job has an error");
                JobView::Error {
                    kind: error.kind,
                    message: error.message,
                }
            }
            status => JobView::InFlight {
                status,
                progress: self.progress,
            },
        }
    }
}

/// What a status query returns: in-flight progress or the terminal outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum JobView {
    InFlight {
        status: JobStatus,
        progress: u8,
    },
    Complete {
        analysis: AnalysisResult,
        report: Vec<u8>,
        content_type: &'static str,
    },
    Error {
        kind: FailureKind,
        message: String,
    },
}
