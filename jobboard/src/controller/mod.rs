//! Interaction controller: turns [`Action`]s into store writes and state
//! changes.
//!
//! Every action that writes to the store is followed by a full
//! [`AppState::reload`], so the state the renderer sees is always what was
//! durably saved. Actions that fail leave both the store and the state as
//! they were.

pub mod action;
pub mod form;

pub use action::{Action, Direction};
pub use form::{FormError, FormField, JobForm};

use jobboard_model::{JobId, JobStatus, MAX_JOB_TITLE_LENGTH};
use thiserror::Error;

use crate::state::{AppState, View};
use crate::store::{JobStore, StoreError};
use crate::view::{self, DEFAULT_DASHBOARD_LIMIT, Rendered};

/// Errors that abort a single action.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    /// The store call failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The form did not validate.
    #[error("invalid form: {0}")]
    Invalid(#[from] FormError),
    /// The referenced job is not loaded.
    #[error("job not found: {0}")]
    NotFound(JobId),
    /// The action is not available in the current view.
    #[error("not allowed: {0}")]
    NotAllowed(&'static str),
    /// The write was stored, but reloading the state afterwards failed. The
    /// state is stale until the next successful reload.
    #[error("saved, but could not refresh: {0}")]
    Resync(StoreError),
}

/// What a successful action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Only transient UI state changed; redraw without touching the store.
    Redraw,
    /// The store was written and the state reloaded from it.
    Reloaded,
    /// Nothing to do.
    Ignored,
}

/// Tunables for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    /// Maximum title length in characters.
    pub max_title_len: usize,
    /// Number of jobs on the dashboard.
    pub dashboard_limit: usize,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            max_title_len: MAX_JOB_TITLE_LENGTH,
            dashboard_limit: DEFAULT_DASHBOARD_LIMIT,
        }
    }
}

/// A card picked up on the kanban board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drag {
    /// The dragged job.
    pub job_id: JobId,
    /// Column currently under the card.
    pub over: JobStatus,
}

/// Owns the store and the application state; the only place either changes.
pub struct Controller<S: JobStore> {
    store: S,
    state: AppState,
    settings: ControllerSettings,
    form: Option<JobForm>,
    pending_delete: Option<JobId>,
    drag: Option<Drag>,
}

impl<S: JobStore> Controller<S> {
    /// Creates a controller over an already initialized store. The state
    /// starts empty until the first [`reload`](Self::reload).
    #[must_use]
    pub fn new(store: S, view: View, settings: ControllerSettings) -> Self {
        Self {
            store,
            state: AppState::new(view),
            settings,
            form: None,
            pending_delete: None,
            drag: None,
        }
    }

    /// Initializes `store`, loads its records and returns a ready controller.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store cannot be opened, or
    /// [`StoreError::ReadFailed`] if the initial load fails.
    pub async fn start(
        store: S,
        view: View,
        settings: ControllerSettings,
    ) -> Result<Self, StoreError> {
        store.initialize().await?;
        let mut controller = Self::new(store, view, settings);
        controller.reload().await?;
        Ok(controller)
    }

    /// Resynchronizes the state from the store.
    ///
    /// # Errors
    ///
    /// Returns the store's read error; the state is left unchanged.
    pub async fn reload(&mut self) -> Result<(), StoreError> {
        self.state.reload(&self.store).await
    }

    /// The current state snapshot.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The open form, if any.
    #[must_use]
    pub const fn form(&self) -> Option<&JobForm> {
        self.form.as_ref()
    }

    /// The job awaiting delete confirmation, if any.
    #[must_use]
    pub fn pending_delete(&self) -> Option<&jobboard_model::Job> {
        self.pending_delete.as_ref().and_then(|id| self.state.job(id))
    }

    /// The card being dragged, if any.
    #[must_use]
    pub const fn drag(&self) -> Option<&Drag> {
        self.drag.as_ref()
    }

    /// Renders the active view from the current state.
    #[must_use]
    pub fn rendered(&self) -> Rendered<'_> {
        view::render(
            self.state.jobs(),
            self.state.search_filter(),
            self.state.active_view(),
            self.settings.dashboard_limit,
        )
    }

    /// Applies one action.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError`] if the action is invalid here or a store call
    /// fails. Store and state are unchanged in that case, except for
    /// [`ActionError::Resync`], where the write landed but the state is stale.
    pub async fn dispatch(&mut self, action: Action) -> Result<Outcome, ActionError> {
        tracing::trace!(?action, "dispatch");
        match action {
            Action::Navigate(view) => {
                if view != View::Kanban {
                    self.drag = None;
                }
                self.state.set_view(view);
                Ok(Outcome::Redraw)
            }
            Action::OpenCreateForm => {
                self.form = Some(JobForm::blank());
                Ok(Outcome::Redraw)
            }
            Action::OpenEditForm(id) => {
                let job = self.state.job(&id).ok_or(ActionError::NotFound(id))?;
                self.form = Some(JobForm::from_job(job));
                Ok(Outcome::Redraw)
            }
            Action::FormInput(c) => Ok(self.edit_form(|form| form.input(c))),
            Action::FormBackspace => Ok(self.edit_form(JobForm::backspace)),
            Action::FormNextField => Ok(self.edit_form(|form| form.focus = form.focus.next())),
            Action::FormPrevField => Ok(self.edit_form(|form| form.focus = form.focus.prev())),
            Action::FormCycle(direction) => Ok(self.edit_form(|form| form.cycle(direction))),
            Action::SubmitForm => self.submit_form().await,
            Action::CancelForm => Ok(if self.form.take().is_some() {
                Outcome::Redraw
            } else {
                Outcome::Ignored
            }),
            Action::RequestDelete(id) => {
                if self.state.job(&id).is_none() {
                    return Err(ActionError::NotFound(id));
                }
                self.pending_delete = Some(id);
                Ok(Outcome::Redraw)
            }
            Action::ConfirmDelete => self.confirm_delete().await,
            Action::CancelDelete => Ok(if self.pending_delete.take().is_some() {
                Outcome::Redraw
            } else {
                Outcome::Ignored
            }),
            Action::DragStart(id) => {
                if self.state.active_view() != View::Kanban {
                    return Err(ActionError::NotAllowed("cards can only be dragged on the board"));
                }
                let job = self.state.job(&id).ok_or_else(|| ActionError::NotFound(id.clone()))?;
                self.drag = Some(Drag {
                    over: job.status.clone(),
                    job_id: id,
                });
                Ok(Outcome::Redraw)
            }
            Action::DragOver(status) => match self.drag.as_mut() {
                Some(drag) if status.is_recognized() => {
                    drag.over = status;
                    Ok(Outcome::Redraw)
                }
                _ => Ok(Outcome::Ignored),
            },
            Action::Drop(status) => self.drop_card(status).await,
            Action::DragCancel => Ok(if self.drag.take().is_some() {
                Outcome::Redraw
            } else {
                Outcome::Ignored
            }),
            Action::Search(filter) => {
                self.state.set_filter(filter);
                Ok(Outcome::Redraw)
            }
        }
    }

    fn edit_form(&mut self, edit: impl FnOnce(&mut JobForm)) -> Outcome {
        match self.form.as_mut() {
            Some(form) => {
                edit(form);
                Outcome::Redraw
            }
            None => Outcome::Ignored,
        }
    }

    async fn submit_form(&mut self) -> Result<Outcome, ActionError> {
        let Some(form) = self.form.as_ref() else {
            return Ok(Outcome::Ignored);
        };
        let mut job = form.build(self.settings.max_title_len)?;
        let created = !form.is_edit();
        job.touch();

        self.store.upsert(&job).await?;
        self.form = None;
        if created {
            tracing::info!(job_id = %job.id, title = %job.title, "job created");
        } else {
            tracing::info!(job_id = %job.id, "job updated");
        }
        self.resync().await
    }

    async fn confirm_delete(&mut self) -> Result<Outcome, ActionError> {
        let Some(id) = self.pending_delete.take() else {
            return Ok(Outcome::Ignored);
        };
        self.store.delete(&id).await?;
        tracing::info!(job_id = %id, "job deleted");
        if self.drag.as_ref().is_some_and(|d| d.job_id == id) {
            self.drag = None;
        }
        self.resync().await
    }

    /// Reloads after a completed write. A failure here is reported as
    /// [`ActionError::Resync`], never as a failed write.
    async fn resync(&mut self) -> Result<Outcome, ActionError> {
        self.reload().await.map_err(ActionError::Resync)?;
        Ok(Outcome::Reloaded)
    }

    async fn drop_card(&mut self, target: JobStatus) -> Result<Outcome, ActionError> {
        let Some(drag) = self.drag.take() else {
            return Ok(Outcome::Ignored);
        };
        if !target.is_recognized() {
            return Ok(Outcome::Ignored);
        }
        let mut job = self
            .state
            .job(&drag.job_id)
            .cloned()
            .ok_or(ActionError::NotFound(drag.job_id))?;
        if job.status == target {
            return Ok(Outcome::Ignored);
        }

        let from = std::mem::replace(&mut job.status, target);
        job.touch();
        self.store.upsert(&job).await?;
        tracing::info!(job_id = %job.id, %from, to = %job.status, "job moved");
        self.resync().await
    }
}
