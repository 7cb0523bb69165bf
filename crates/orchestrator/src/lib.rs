//! `depsig-orchestrator`
//!
//! **Responsibility:** the job lifecycle.
//!
//! The orchestrator is the only component with concurrency concerns: it
//! accepts submissions, runs each analysis on its own task, and owns every
//! job-state mutation. Providers and the report generator return values;
//! nothing else writes to a job.
//!
//! ## Design
//!
//! - `pending → running → {complete | error}`; terminal states are never left
//! - at most one execution attempt per job, no automatic retries
//! - submissions validate synchronously and never block on provider calls
//! - state lives behind one `RwLock`, so a reader that observes `complete`
//!   always sees the fully populated result

pub mod error;
pub mod job;
pub mod orchestrator;
pub mod store;

pub use error::{StatusError, SubmitError};
pub use job::{FailureKind, Job, JobError, JobOutcome, JobStatus, JobView};
pub use orchestrator::Orchestrator;
pub use store::{InMemoryJobStore, JobStats, JobStore, StoreError};
