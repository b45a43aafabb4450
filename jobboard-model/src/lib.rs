//! Record model shared by the `jobboard` store, renderer and controller.

pub mod codec;
pub mod job;

pub use job::{
    DUE_DATE_FORMAT, Job, JobId, JobStatus, MAX_JOB_TITLE_LENGTH, Priority, now_ms, parse_due_date,
    parse_tags,
};
