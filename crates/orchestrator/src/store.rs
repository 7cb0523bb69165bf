//! Job storage.
//!
//! In-memory only, per the scope of this service: jobs do not survive a
//! process restart. The trait seam exists so a durable store can replace
//! [`InMemoryJobStore`] without touching the orchestrator.

use std::collections::HashMap;
use std::sync::RwLock;

use depsig_core::JobId;
use serde::Serialize;
use thiserror::Error;

use crate::job::{Job, JobStatus};

/// Job store abstraction.
pub trait JobStore: Send + Sync {
    /// Insert a new job. Fails if the id already exists.
    fn insert(&self, job: Job) -> Result<(), StoreError>;

    /// Snapshot a job by id.
    fn get(&self, job_id: JobId) -> Option<Job>;

    /// Replace a stored job. Fails if the id is unknown.
    fn update(&self, job: &Job) -> Result<(), StoreError>;

    /// Counters by status.
    fn stats(&self) -> JobStats;
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("job already exists: {0}")]
    AlreadyExists(JobId),
    #[error("job not found: {0}")]
    NotFound(JobId),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JobStats {
    pub pending: usize,
    pub running: usize,
    pub complete: usize,
    pub error: usize,
}

/// Process-memory job store.
///
/// All writes go through the one `RwLock`, so a status flip and its result
/// payload become visible to readers atomically.
#[derive(Debug, Default)]
pub struct InMemoryJobStore {
    jobs: RwLock<HashMap<JobId, Job>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl JobStore for InMemoryJobStore {
    fn insert(&self, job: Job) -> Result<(), StoreError> {
        let mut jobs = self.jobs.write().expect("job store lock poisoned");
        if jobs.contains_key(&job.id) {
            return Err(StoreError::AlreadyExists(job.id));
        }
        jobs.insert(job.id, job);
        Ok(())
    }

    fn get(&self, job_id: JobId) -> Option<Job> {
        self.jobs
            .read()
            .expect("job store lock poisoned")
            .get(&job_id)
            .cloned()
    }

    fn update(&self, job: &Job) -> Result<(), StoreError> {
        let mut jobs = self.jobs.write().expect("job store lock poisoned");
        if !jobs.contains_key(&job.id) {
            return Err(StoreError::NotFound(job.id));
        }
        jobs.insert(job.id, job.clone());
        Ok(())
    }

    fn stats(&self) -> JobStats {
        let jobs = self.jobs.read().expect("job store lock poisoned");
        let mut stats = JobStats::default();
        for job in jobs.values() {
            match job.status {
                JobStatus::Pending => stats.pending += 1,
                JobStatus::Running => stats.running += 1,
                JobStatus::Complete => stats.complete += 1,
                JobStatus::Error => stats.error += 1,
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depsig_core::StrategyId;

    fn job() -> Job {
        Job::new("static", StrategyId::Simple, "some input text".into())
    }

    #[test]
    fn insert_and_get() {
        let store = InMemoryJobStore::new();
        let j = job();
        let id = j.id;
        store.insert(j).unwrap();
        assert_eq!(store.get(id).unwrap().id, id);
    }

    #[test]
    fn double_insert_is_rejected() {
        let store = InMemoryJobStore::new();
        let j = job();
        store.insert(j.clone()).unwrap();
        assert_eq!(store.insert(j.clone()), Err(StoreError::AlreadyExists(j.id)));
    }

    #[test]
    fn update_unknown_job_is_rejected() {
        let store = InMemoryJobStore::new();
        let j = job();
        assert_eq!(store.update(&j), Err(StoreError::NotFound(j.id)));
    }

    #[test]
    fn get_unknown_is_none() {
        let store = InMemoryJobStore::new();
        assert!(store.get(JobId::new()).is_none());
    }

    #[test]
    fn stats_count_by_status() {
        let store = InMemoryJobStore::new();
        let mut running = job();
        running.mark_running();
        store.insert(running).unwrap();
        store.insert(job()).unwrap();
        store.insert(job()).unwrap();

        let stats = store.stats();
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.running, 1);
        assert_eq!(stats.complete + stats.error, 0);
    }
}
