//! Durable [`JobStore`] keeping one JSON file per record.
//!
//! Layout under the store root:
//!
//! ```text
//! <root>/<job-id>.json       committed record
//! <root>/<job-id>.json.tmp   in-flight write, renamed over the record
//! ```
//!
//! Writing to a temporary file and renaming it into place makes each upsert
//! atomic: a reader sees either the old record or the new one, never a torn
//! file.
//!
//! A record is only read from the file named after its id. Other `.json`
//! files (copies, backups) are logged and skipped, so ids stay unique and a
//! delete removes the only visible copy.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use jobboard_model::{Job, JobId, JobStatus, codec};
use parking_lot::Mutex;

use super::{JobIndex, JobStore, StoreError};

const RECORD_EXTENSION: &str = "json";
const PROBE_FILE: &str = ".write-probe";

/// File-backed implementation of [`JobStore`].
pub struct FileStore {
    root: PathBuf,
    index: Mutex<JobIndex>,
}

impl FileStore {
    /// Creates a store rooted at `root`. Nothing touches the disk until
    /// [`initialize`](JobStore::initialize) is called.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            index: Mutex::new(JobIndex::new()),
        }
    }

    /// Directory holding the record files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, id: &JobId) -> PathBuf {
        self.root.join(format!("{id}.{RECORD_EXTENSION}"))
    }

    /// Reads every committed record. In-flight temporary files and files not
    /// named after their record's id are skipped.
    async fn load_all(&self) -> Result<Vec<Job>, StoreError> {
        let mut dir = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| StoreError::ReadFailed(format!("{}: {e}", self.root.display())))?;

        let mut jobs = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| StoreError::ReadFailed(format!("{}: {e}", self.root.display())))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            let Some(job) = read_record(&path).await? else {
                continue;
            };
            let expected = job.id.to_string();
            if path.file_stem().and_then(|stem| stem.to_str()) == Some(expected.as_str()) {
                jobs.push(job);
            } else {
                tracing::warn!(
                    path = %path.display(),
                    job_id = %job.id,
                    "record file name does not match its id, skipped"
                );
            }
        }
        Ok(jobs)
    }

    async fn lookup(&self, ids: Vec<JobId>) -> Result<Vec<Job>, StoreError> {
        let mut jobs = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(job) = read_record(&self.record_path(&id)).await? {
                jobs.push(job);
            }
        }
        Ok(jobs)
    }
}

/// Reads and decodes one record file. A file that vanished is `Ok(None)`.
async fn read_record(path: &Path) -> Result<Option<Job>, StoreError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::ReadFailed(format!("{}: {e}", path.display()))),
    };
    codec::decode(&bytes)
        .map(Some)
        .map_err(|e| StoreError::ReadFailed(format!("{}: {e}", path.display())))
}

impl JobStore for FileStore {
    async fn initialize(&self) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StoreError::Unavailable(format!("{}: {e}", self.root.display())))?;

        let probe = self.root.join(PROBE_FILE);
        tokio::fs::write(&probe, b"ok").await.map_err(|e| {
            StoreError::Unavailable(format!("{} is not writable: {e}", self.root.display()))
        })?;
        tokio::fs::remove_file(&probe)
            .await
            .map_err(|e| StoreError::Unavailable(format!("{}: {e}", probe.display())))?;

        let jobs = self.load_all().await?;
        let index = JobIndex::from_jobs(&jobs);
        tracing::info!(root = %self.root.display(), records = index.len(), "job store opened");
        *self.index.lock() = index;
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Job>, StoreError> {
        self.load_all().await
    }

    async fn upsert(&self, job: &Job) -> Result<(), StoreError> {
        let bytes = codec::encode(job).map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        let path = self.record_path(&job.id);
        let tmp = path.with_extension(format!("{RECORD_EXTENSION}.tmp"));

        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| StoreError::WriteFailed(format!("{}: {e}", tmp.display())))?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StoreError::WriteFailed(format!("{}: {e}", path.display())));
        }

        self.index.lock().insert(job);
        tracing::debug!(job_id = %job.id, status = %job.status, "job saved");
        Ok(())
    }

    async fn delete(&self, id: &JobId) -> Result<(), StoreError> {
        let path = self.record_path(id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::debug!(job_id = %id, "job deleted"),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(job_id = %id, "delete of absent job ignored");
            }
            Err(e) => return Err(StoreError::WriteFailed(format!("{}: {e}", path.display()))),
        }
        self.index.lock().remove(id);
        Ok(())
    }

    async fn by_status(&self, status: &JobStatus) -> Result<Vec<Job>, StoreError> {
        let ids = self.index.lock().with_status(status);
        self.lookup(ids).await
    }

    async fn due_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Job>, StoreError> {
        let ids = self.index.lock().due_between(from, to);
        self.lookup(ids).await
    }
}
