//! Durable job record storage.
//!
//! Defines the [`JobStore`] trait every backend implements, plus the two
//! backends shipped with the tracker:
//! - [`FileStore`] — one JSON file per record under the data directory
//! - [`InMemoryStore`] — non-durable store for tests and `--ephemeral` runs
//!
//! Every operation is atomic for a single record. Nothing spans more than
//! one record, so no transactions are needed.

pub mod file;
pub mod index;
pub mod memory;

pub use file::FileStore;
pub use index::JobIndex;
pub use memory::InMemoryStore;

use chrono::NaiveDate;
use jobboard_model::{Job, JobId, JobStatus};

/// Errors that can occur during record storage operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The host has no usable persistent storage.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A read operation failed.
    #[error("read failed: {0}")]
    ReadFailed(String),

    /// A write operation failed.
    #[error("write failed: {0}")]
    WriteFailed(String),
}

/// Trait for persisting job records keyed by [`JobId`].
pub trait JobStore: Send + Sync {
    /// Open or create the backing store.
    ///
    /// Must be called once before any other operation.
    fn initialize(&self) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Return every stored record, in no particular order.
    fn get_all(&self) -> impl std::future::Future<Output = Result<Vec<Job>, StoreError>> + Send;

    /// Insert the record, or fully replace the one sharing its id.
    fn upsert(&self, job: &Job)
    -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Remove the record with `id`. Absent ids are not an error.
    fn delete(&self, id: &JobId)
    -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Return the records with `status`, using the status index.
    fn by_status(
        &self,
        status: &JobStatus,
    ) -> impl std::future::Future<Output = Result<Vec<Job>, StoreError>> + Send;

    /// Return the records due within `from..=to`, earliest first, using the
    /// due-date index. Records without a parseable due date are never returned.
    fn due_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> impl std::future::Future<Output = Result<Vec<Job>, StoreError>> + Send;
}
