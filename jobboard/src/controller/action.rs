//! Discrete user events understood by the [`Controller`](super::Controller).

use jobboard_model::{JobId, JobStatus};

use crate::state::View;

/// Direction for cycling enumerated form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Next value.
    Forward,
    /// Previous value.
    Backward,
}

/// One user interaction, independent of the input surface that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Switch the active view.
    Navigate(View),
    /// Open an empty form for a new job.
    OpenCreateForm,
    /// Open the form pre-filled with an existing job.
    OpenEditForm(JobId),
    /// Type a character into the focused form field.
    FormInput(char),
    /// Erase the last character of the focused form field.
    FormBackspace,
    /// Focus the next form field.
    FormNextField,
    /// Focus the previous form field.
    FormPrevField,
    /// Cycle the focused status or priority field.
    FormCycle(Direction),
    /// Validate and save the form.
    SubmitForm,
    /// Close the form without saving.
    CancelForm,
    /// Ask for confirmation before deleting a job.
    RequestDelete(JobId),
    /// Delete the job awaiting confirmation.
    ConfirmDelete,
    /// Keep the job awaiting confirmation.
    CancelDelete,
    /// Pick up a kanban card.
    DragStart(JobId),
    /// Move the picked-up card over a column.
    DragOver(JobStatus),
    /// Release the picked-up card onto a column.
    Drop(JobStatus),
    /// Put the picked-up card back.
    DragCancel,
    /// Replace the search filter.
    Search(String),
}

impl Action {
    /// Whether this action can write to the store.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        matches!(self, Self::SubmitForm | Self::ConfirmDelete | Self::Drop(_))
    }
}
