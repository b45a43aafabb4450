//! Secondary indices over stored records.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use jobboard_model::{Job, JobId, JobStatus};

/// Status and due-date indices, maintained alongside the primary records.
///
/// Each backend updates the index on every successful upsert and delete so
/// lookups never need a full scan.
#[derive(Debug, Default)]
pub struct JobIndex {
    by_status: HashMap<JobStatus, BTreeSet<JobId>>,
    by_due: BTreeMap<NaiveDate, BTreeSet<JobId>>,
    /// What each id is currently filed under, so stale entries can be removed.
    entries: HashMap<JobId, (JobStatus, Option<NaiveDate>)>,
}

impl JobIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index over `jobs`.
    #[must_use]
    pub fn from_jobs<'a>(jobs: impl IntoIterator<Item = &'a Job>) -> Self {
        let mut index = Self::new();
        for job in jobs {
            index.insert(job);
        }
        index
    }

    /// Files `job` under its current status and due date, replacing any
    /// previous entry for the same id.
    pub fn insert(&mut self, job: &Job) {
        self.remove(&job.id);
        let due = job.due();
        self.by_status
            .entry(job.status.clone())
            .or_default()
            .insert(job.id.clone());
        if let Some(date) = due {
            self.by_due.entry(date).or_default().insert(job.id.clone());
        }
        self.entries
            .insert(job.id.clone(), (job.status.clone(), due));
    }

    /// Drops every entry for `id`. Unknown ids are ignored.
    pub fn remove(&mut self, id: &JobId) {
        let Some((status, due)) = self.entries.remove(id) else {
            return;
        };
        if let Some(ids) = self.by_status.get_mut(&status) {
            ids.remove(id);
            if ids.is_empty() {
                self.by_status.remove(&status);
            }
        }
        if let Some(date) = due
            && let Some(ids) = self.by_due.get_mut(&date)
        {
            ids.remove(id);
            if ids.is_empty() {
                self.by_due.remove(&date);
            }
        }
    }

    /// Ids filed under `status`.
    #[must_use]
    pub fn with_status(&self, status: &JobStatus) -> Vec<JobId> {
        self.by_status
            .get(status)
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Ids due within `from..=to`, earliest first. Empty if `from > to`.
    #[must_use]
    pub fn due_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<JobId> {
        if from > to {
            return Vec::new();
        }
        self.by_due
            .range(from..=to)
            .flat_map(|(_, ids)| ids.iter().cloned())
            .collect()
    }

    /// Number of indexed records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
