//! Non-durable [`JobStore`] backed by a `HashMap`.

use std::collections::HashMap;

use chrono::NaiveDate;
use jobboard_model::{Job, JobId, JobStatus};
use parking_lot::Mutex;

use super::{JobIndex, JobStore, StoreError};

#[derive(Default)]
struct Inner {
    jobs: HashMap<JobId, Job>,
    index: JobIndex,
}

/// In-memory implementation of [`JobStore`].
///
/// Behaves like the durable store in every respect except that all data is
/// lost when the process exits. Used by tests and `--ephemeral` runs.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    /// Create a new, empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `jobs`.
    #[must_use]
    pub fn with_jobs(jobs: impl IntoIterator<Item = Job>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.lock();
            for job in jobs {
                inner.index.insert(&job);
                inner.jobs.insert(job.id.clone(), job);
            }
        }
        store
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().jobs.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().jobs.is_empty()
    }

    fn lookup(&self, ids: &[JobId]) -> Vec<Job> {
        let inner = self.inner.lock();
        ids.iter()
            .filter_map(|id| inner.jobs.get(id).cloned())
            .collect()
    }
}

impl JobStore for InMemoryStore {
    async fn initialize(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Job>, StoreError> {
        Ok(self.inner.lock().jobs.values().cloned().collect())
    }

    async fn upsert(&self, job: &Job) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        inner.index.insert(job);
        inner.jobs.insert(job.id.clone(), job.clone());
        Ok(())
    }

    async fn delete(&self, id: &JobId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        inner.index.remove(id);
        inner.jobs.remove(id);
        Ok(())
    }

    async fn by_status(&self, status: &JobStatus) -> Result<Vec<Job>, StoreError> {
        let ids = self.inner.lock().index.with_status(status);
        Ok(self.lookup(&ids))
    }

    async fn due_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Job>, StoreError> {
        let ids = self.inner.lock().index.due_between(from, to);
        Ok(self.lookup(&ids))
    }
}
