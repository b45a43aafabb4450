//! In-memory snapshot of the store used for rendering.
//!
//! [`AppState`] never diverges from storage: the job collection can only be
//! replaced wholesale by [`AppState::reload`], which reads it back from the
//! store after every write.

use jobboard_model::Job;

use crate::store::{JobStore, StoreError};

/// Which of the three views is displayed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Summary of the next jobs due.
    #[default]
    Dashboard,
    /// Four-column status board.
    Kanban,
    /// One row per job.
    List,
}

impl View {
    /// All views in tab order.
    pub const ALL: [Self; 3] = [Self::Dashboard, Self::Kanban, Self::List];

    /// Tab position of this view.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Dashboard => 0,
            Self::Kanban => 1,
            Self::List => 2,
        }
    }

    /// The next view in tab order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Dashboard => Self::Kanban,
            Self::Kanban => Self::List,
            Self::List => Self::Dashboard,
        }
    }

    /// The previous view in tab order, wrapping around.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Dashboard => Self::List,
            Self::Kanban => Self::Dashboard,
            Self::List => Self::Kanban,
        }
    }

    /// Tab title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Kanban => "Kanban",
            Self::List => "List",
        }
    }
}

/// Authoritative in-memory copy of the stored jobs plus view selection.
#[derive(Debug, Default)]
pub struct AppState {
    jobs: Vec<Job>,
    active_view: View,
    search_filter: String,
}

impl AppState {
    /// Creates an empty state showing `view`.
    #[must_use]
    pub fn new(view: View) -> Self {
        Self {
            jobs: Vec::new(),
            active_view: view,
            search_filter: String::new(),
        }
    }

    /// All jobs, earliest due date first.
    #[must_use]
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Looks up a loaded job by id.
    #[must_use]
    pub fn job(&self, id: &jobboard_model::JobId) -> Option<&Job> {
        self.jobs.iter().find(|j| &j.id == id)
    }

    /// The active view.
    #[must_use]
    pub const fn active_view(&self) -> View {
        self.active_view
    }

    /// The active search filter, as typed.
    #[must_use]
    pub fn search_filter(&self) -> &str {
        &self.search_filter
    }

    pub(crate) const fn set_view(&mut self, view: View) {
        self.active_view = view;
    }

    pub(crate) fn set_filter(&mut self, filter: String) {
        self.search_filter = filter;
    }

    /// Replaces the job collection with the store's current contents.
    ///
    /// On failure the previous collection is kept untouched.
    ///
    /// # Errors
    ///
    /// Returns the store's [`StoreError`] if the full scan fails.
    pub async fn reload<S: JobStore>(&mut self, store: &S) -> Result<(), StoreError> {
        let mut jobs = store.get_all().await?;
        sort_by_due(&mut jobs);

        let unplaced = jobs.iter().filter(|j| !j.status.is_recognized()).count();
        if unplaced > 0 {
            tracing::warn!(
                unplaced,
                "jobs with an unrecognized status are stored but have no kanban column"
            );
        }
        tracing::debug!(jobs = jobs.len(), "state reloaded from store");

        self.jobs = jobs;
        Ok(())
    }
}

/// Sorts jobs by due date ascending.
///
/// Jobs whose due date does not parse go after every dated job. Ties are
/// broken by id, which orders by creation time.
pub fn sort_by_due(jobs: &mut [Job]) {
    jobs.sort_by_cached_key(|j| {
        let due = j.due();
        (due.is_none(), due, j.id.clone())
    });
}
