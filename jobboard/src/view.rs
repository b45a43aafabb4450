//! Pure rendering of the job collection into one of the three views.
//!
//! [`render`] takes the sorted jobs, the search filter and the active view
//! and produces a [`Rendered`] view model. It does no I/O; the `ui` module
//! turns the view model into terminal widgets.

use std::fmt::Write as _;

use jobboard_model::{Job, JobStatus};

use crate::state::View;

/// Message shown by the dashboard when no job passes the filter.
pub const EMPTY_STATE: &str = "No jobs found";

/// Default number of jobs shown on the dashboard.
pub const DEFAULT_DASHBOARD_LIMIT: usize = 5;

/// Counts over the full, unfiltered job collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Every stored job.
    pub total: usize,
    /// Jobs in progress or under review.
    pub active: usize,
    /// Jobs marked done.
    pub completed: usize,
    /// Jobs not yet started.
    pub pending: usize,
}

impl Summary {
    /// Tallies `jobs` by status.
    #[must_use]
    pub fn of(jobs: &[Job]) -> Self {
        jobs.iter().fold(
            Self {
                total: jobs.len(),
                ..Self::default()
            },
            |mut acc, job| {
                match job.status {
                    JobStatus::Todo => acc.pending += 1,
                    JobStatus::InProgress | JobStatus::Review => acc.active += 1,
                    JobStatus::Done => acc.completed += 1,
                    JobStatus::Unrecognized(_) => {}
                }
                acc
            },
        )
    }
}

/// One kanban column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column<'a> {
    /// Status this column collects.
    pub status: JobStatus,
    /// Jobs in the column, in global order.
    pub jobs: Vec<&'a Job>,
}

impl Column<'_> {
    /// Count shown in the column header.
    #[must_use]
    pub fn count(&self) -> usize {
        self.jobs.len()
    }
}

/// View-specific part of a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body<'a> {
    /// The first few jobs due.
    Dashboard {
        /// Jobs to show, earliest due first.
        upcoming: Vec<&'a Job>,
    },
    /// Jobs bucketed by status.
    Kanban {
        /// One column per board status, left to right.
        columns: Vec<Column<'a>>,
        /// Filtered jobs left off the board because their status is unrecognized.
        hidden: usize,
    },
    /// Every filtered job.
    List {
        /// One row per job.
        rows: Vec<&'a Job>,
    },
}

/// Output of [`render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered<'a> {
    /// Counts over every job, ignoring view and filter.
    pub summary: Summary,
    /// The active view's content.
    pub body: Body<'a>,
}

impl<'a> Rendered<'a> {
    /// The dashboard's empty-state message, when it applies.
    #[must_use]
    pub fn empty_message(&self) -> Option<&'static str> {
        match &self.body {
            Body::Dashboard { upcoming } if upcoming.is_empty() => Some(EMPTY_STATE),
            _ => None,
        }
    }

    /// Number of job cards or rows in the body.
    #[must_use]
    pub fn card_count(&self) -> usize {
        match &self.body {
            Body::Dashboard { upcoming } => upcoming.len(),
            Body::Kanban { columns, .. } => columns.iter().map(Column::count).sum(),
            Body::List { rows } => rows.len(),
        }
    }

    /// The jobs a vertical cursor moves through, for views with one list.
    #[must_use]
    pub fn rows(&self) -> &[&'a Job] {
        match &self.body {
            Body::Dashboard { upcoming } => upcoming,
            Body::List { rows } => rows,
            Body::Kanban { .. } => &[],
        }
    }

    /// Jobs in kanban column `index`, or empty for other views.
    #[must_use]
    pub fn column(&self, index: usize) -> &[&'a Job] {
        match &self.body {
            Body::Kanban { columns, .. } => match columns.get(index) {
                Some(column) => &column.jobs,
                None => &[],
            },
            _ => &[],
        }
    }
}

/// Returns the jobs passing `filter`, preserving order.
///
/// A job passes when the filter is empty, or its lowercased title or any of
/// its lowercased tags contains the lowercased filter.
#[must_use]
pub fn filter<'a>(jobs: &'a [Job], filter: &str) -> Vec<&'a Job> {
    jobs.iter().filter(|j| j.matches(filter)).collect()
}

/// Buckets `jobs` into the four board columns.
///
/// Returns the columns and the number of jobs that fit none of them.
#[must_use]
pub fn bucket<'a>(jobs: &[&'a Job]) -> (Vec<Column<'a>>, usize) {
    let mut columns: Vec<Column<'a>> = JobStatus::BOARD
        .iter()
        .map(|status| Column {
            status: status.clone(),
            jobs: Vec::new(),
        })
        .collect();
    let mut hidden = 0;
    for &job in jobs {
        match job.status.column() {
            Some(i) => columns[i].jobs.push(job),
            None => hidden += 1,
        }
    }
    (columns, hidden)
}

/// Renders `jobs` for `view`.
#[must_use]
pub fn render<'a>(
    jobs: &'a [Job],
    search: &str,
    view: View,
    dashboard_limit: usize,
) -> Rendered<'a> {
    let summary = Summary::of(jobs);
    let visible = filter(jobs, search);
    let body = match view {
        View::Dashboard => Body::Dashboard {
            upcoming: visible.into_iter().take(dashboard_limit).collect(),
        },
        View::Kanban => {
            let (columns, hidden) = bucket(&visible);
            Body::Kanban { columns, hidden }
        }
        View::List => Body::List { rows: visible },
    };
    Rendered { summary, body }
}

/// Formats a job's due date for display, e.g. `Jun 1, 2024`.
///
/// Unparseable dates, and dates `format` cannot render, are shown as stored.
#[must_use]
pub fn format_due(job: &Job, format: &str) -> String {
    let Some(date) = job.due() else {
        return job.due_date.clone();
    };
    let mut out = String::new();
    match write!(out, "{}", date.format(format)) {
        Ok(()) => out,
        Err(_) => job.due_date.clone(),
    }
}
