//! `depsig-client`
//!
//! Typed client for the analysis API: submit, poll, download.
//!
//! The status endpoint changes shape across a job's lifecycle, so the client
//! switches on the response `Content-Type`: JSON means lifecycle metadata
//! (progress or a classified failure), anything else is the report itself.

use std::time::Duration;

use depsig_core::{JobId, StrategyId};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

/// How long and how often to poll before giving up.
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: usize,
}

impl Default for PollPolicy {
    fn default() -> Self {
        // Ten minutes at one-second granularity, enough for the slowest
        // backed models without hammering the server.
        Self {
            interval: Duration::from_secs(1),
            max_attempts: 600,
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The server rejected the submission; no job was created.
    #[error("submission rejected: {0}")]
    Rejected(String),

    /// The job ran and failed with a classified error.
    #[error("job failed ({kind}): {message}")]
    Job { kind: String, message: String },

    #[error("job not found")]
    NotFound,

    #[error("job still in flight after {attempts} polls")]
    TimedOut { attempts: usize },

    /// The server answered with something the protocol does not allow.
    #[error("unexpected response: {0}")]
    Protocol(String),
}

/// A downloaded report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub bytes: Vec<u8>,
    pub content_type: String,
    /// Suggested filename from `Content-Disposition`, when present.
    pub filename: Option<String>,
}

/// One poll observation.
#[derive(Debug, Clone, PartialEq)]
pub enum PollState {
    InFlight { status: String, progress: u8 },
    Done(Report),
}

#[derive(Debug, Deserialize)]
struct AcceptedBody {
    job_id: JobId,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProgressBody {
    status: String,
    progress: u8,
}

pub struct AnalysisClient {
    http: reqwest::Client,
    base_url: String,
    policy: PollPolicy,
}

impl AnalysisClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_policy(base_url, PollPolicy::default())
    }

    pub fn with_policy(base_url: impl Into<String>, policy: PollPolicy) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            policy,
        }
    }

    /// Submit text for analysis. Returns the job handle to poll with.
    pub async fn submit(
        &self,
        text: &str,
        provider: &str,
        strategy: StrategyId,
    ) -> Result<JobId, ClientError> {
        let res = self
            .http
            .post(format!("{}/api/analyses", self.base_url))
            .json(&json!({
                "text": text,
                "provider": provider,
                "strategy": strategy.as_str(),
            }))
            .send()
            .await?;

        if res.status() == reqwest::StatusCode::ACCEPTED {
            let body: AcceptedBody = res.json().await?;
            debug!(job_id = %body.job_id, "submission accepted");
            return Ok(body.job_id);
        }

        let status = res.status();
        let body: ErrorBody = res.json().await?;
        Err(ClientError::Rejected(
            body.message
                .or(body.error)
                .unwrap_or_else(|| format!("http {status}")),
        ))
    }

    /// One status check: metadata while in flight, the report once done.
    pub async fn fetch(&self, job_id: JobId) -> Result<PollState, ClientError> {
        let res = self
            .http
            .get(format!("{}/api/analyses/{}", self.base_url, job_id))
            .send()
            .await?;

        let status = res.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound);
        }

        let content_type = res
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if !content_type.starts_with("application/json") {
            if !status.is_success() {
                return Err(ClientError::Protocol(format!(
                    "non-JSON failure response: http {status}"
                )));
            }
            let filename = res
                .headers()
                .get(reqwest::header::CONTENT_DISPOSITION)
                .and_then(|v| v.to_str().ok())
                .and_then(parse_filename);
            let bytes = res.bytes().await?.to_vec();
            return Ok(PollState::Done(Report {
                bytes,
                content_type,
                filename,
            }));
        }

        if status.is_success() {
            let body: ProgressBody = res.json().await?;
            return Ok(PollState::InFlight {
                status: body.status,
                progress: body.progress,
            });
        }

        let body: ErrorBody = res.json().await?;
        match body.status.as_deref() {
            Some("error") => Err(ClientError::Job {
                kind: body.kind.unwrap_or_else(|| "unknown".to_string()),
                message: body.error.unwrap_or_default(),
            }),
            _ => Err(ClientError::Protocol(format!(
                "unexpected JSON failure: http {status}"
            ))),
        }
    }

    /// Poll at the configured cadence until the job resolves.
    pub async fn wait_for_report(&self, job_id: JobId) -> Result<Report, ClientError> {
        for attempt in 0..self.policy.max_attempts {
            match self.fetch(job_id).await? {
                PollState::Done(report) => return Ok(report),
                PollState::InFlight { status, progress } => {
                    debug!(%job_id, attempt, status, progress, "still in flight");
                    tokio::time::sleep(self.policy.interval).await;
                }
            }
        }
        Err(ClientError::TimedOut {
            attempts: self.policy.max_attempts,
        })
    }

    /// Submit and block until the report is ready.
    pub async fn analyze(
        &self,
        text: &str,
        provider: &str,
        strategy: StrategyId,
    ) -> Result<Report, ClientError> {
        let job_id = self.submit(text, provider, strategy).await?;
        self.wait_for_report(job_id).await
    }
}

/// Pull the filename out of a `Content-Disposition: attachment` header.
fn parse_filename(header: &str) -> Option<String> {
    let marker = "filename=";
    let idx = header.find(marker)? + marker.len();
    let rest = header[idx..].trim();
    let name = rest.trim_matches('"').split(';').next()?.trim_matches('"');
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_parses_quoted_and_bare() {
        assert_eq!(
            parse_filename("attachment; filename=\"abc12345_report.txt\""),
            Some("abc12345_report.txt".to_string())
        );
        assert_eq!(
            parse_filename("attachment; filename=report.txt"),
            Some("report.txt".to_string())
        );
        assert_eq!(parse_filename("attachment"), None);
    }

    #[test]
    fn default_policy_is_patient() {
        let policy = PollPolicy::default();
        assert_eq!(policy.interval, Duration::from_secs(1));
        assert_eq!(policy.max_attempts, 600);
    }
}
