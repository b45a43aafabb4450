//! The job record and its enumerated fields.
//!
//! A [`Job`] is the only entity in the tracker. Its `status` decides which
//! kanban column it lands in; `priority` only affects styling; `due_date`
//! drives the global sort order.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum allowed job title length in characters.
pub const MAX_JOB_TITLE_LENGTH: usize = 256;

/// Date format accepted for `due_date` values.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Unique identifier for a job, based on UUID v7 for time-ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    /// Creates a new time-ordered job identifier (UUID v7).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `JobId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for JobId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Workflow status of a job.
///
/// Stored as its lowercase label. Labels outside the four known ones are
/// preserved in [`JobStatus::Unrecognized`] so that a foreign or hand-edited
/// record survives a load/save cycle unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    /// Not started.
    #[default]
    Todo,
    /// Being worked on.
    InProgress,
    /// Waiting for review.
    Review,
    /// Finished.
    Done,
    /// Any other label found in storage.
    Unrecognized(String),
}

impl JobStatus {
    /// The kanban columns, left to right.
    pub const BOARD: [Self; 4] = [Self::Todo, Self::InProgress, Self::Review, Self::Done];

    /// Returns the stored label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Review => "review",
            Self::Done => "done",
            Self::Unrecognized(label) => label,
        }
    }

    /// Whether this status has a kanban column.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    /// Position of this status on the board, if it has one.
    #[must_use]
    pub fn column(&self) -> Option<usize> {
        Self::BOARD.iter().position(|s| s == self)
    }

    /// The next board status, wrapping around. Unrecognized values map to `Todo`.
    #[must_use]
    pub fn next(&self) -> Self {
        self.column()
            .map_or(Self::Todo, |i| Self::BOARD[(i + 1) % Self::BOARD.len()].clone())
    }

    /// The previous board status, wrapping around. Unrecognized values map to `Todo`.
    #[must_use]
    pub fn prev(&self) -> Self {
        self.column().map_or(Self::Todo, |i| {
            Self::BOARD[(i + Self::BOARD.len() - 1) % Self::BOARD.len()].clone()
        })
    }
}

impl From<String> for JobStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            "todo" => Self::Todo,
            "in-progress" => Self::InProgress,
            "review" => Self::Review,
            "done" => Self::Done,
            _ => Self::Unrecognized(label),
        }
    }
}

impl From<&str> for JobStatus {
    fn from(label: &str) -> Self {
        Self::from(label.to_string())
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Unrecognized(label) => label,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority of a job. Display only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Normal.
    #[default]
    Medium,
    /// Urgent.
    High,
}

impl Priority {
    /// All priorities, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// The next priority, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }

    /// The previous priority, wrapping around.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::Medium => Self::Low,
            Self::High => Self::Medium,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// A single tracked job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Unique job identifier, fixed at creation.
    pub id: JobId,
    /// Short display title.
    pub title: String,
    /// Optional free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Workflow status; decides the kanban column.
    #[serde(default)]
    pub status: JobStatus,
    /// Priority badge.
    #[serde(default)]
    pub priority: Priority,
    /// Due date as entered, normally `YYYY-MM-DD`.
    pub due_date: String,
    /// Search tags, in entry order.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Milliseconds since epoch of the last save.
    #[serde(default)]
    pub updated_at: u64,
}

impl Job {
    /// Creates a job with a fresh id and default status and priority.
    #[must_use]
    pub fn new(title: impl Into<String>, due_date: impl Into<String>) -> Self {
        Self {
            id: JobId::new(),
            title: title.into(),
            description: None,
            status: JobStatus::Todo,
            priority: Priority::Medium,
            due_date: due_date.into(),
            tags: Vec::new(),
            updated_at: 0,
        }
    }

    /// Parsed due date, or `None` if the stored string is not a valid date.
    #[must_use]
    pub fn due(&self) -> Option<NaiveDate> {
        parse_due_date(&self.due_date)
    }

    /// Stamps `updated_at` with the current time.
    pub fn touch(&mut self) {
        self.updated_at = now_ms();
    }

    /// Whether the title or any tag contains `needle`, ignoring case.
    ///
    /// An empty needle matches every job.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }
}

/// Parses a `YYYY-MM-DD` due date, ignoring surrounding whitespace.
#[must_use]
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DUE_DATE_FORMAT).ok()
}

/// Splits comma-separated tag input into trimmed, non-empty tags.
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Returns the current timestamp in milliseconds since epoch.
#[must_use]
pub fn now_ms() -> u64 {
    u64::try_from(
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis(),
    )
    .unwrap_or(u64::MAX)
}
