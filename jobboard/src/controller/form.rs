//! Transient edit buffer behind the create/edit form.

use jobboard_model::{Job, JobId, JobStatus, Priority, parse_tags};

use super::action::Direction;

/// Reasons a form submission is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// Title is empty or whitespace.
    #[error("title is required")]
    TitleEmpty,
    /// Title exceeds the configured maximum.
    #[error("title too long (max {0} characters)")]
    TitleTooLong(usize),
    /// Due date is empty or whitespace.
    #[error("due date is required")]
    DueDateEmpty,
}

/// Form fields in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Job title.
    Title,
    /// Free-text description.
    Description,
    /// Workflow status.
    Status,
    /// Priority.
    Priority,
    /// Due date.
    DueDate,
    /// Comma-separated tags.
    Tags,
}

impl FormField {
    /// All fields in focus order.
    pub const ALL: [Self; 6] = [
        Self::Title,
        Self::Description,
        Self::Status,
        Self::Priority,
        Self::DueDate,
        Self::Tags,
    ];

    /// Field label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Status => "Status",
            Self::Priority => "Priority",
            Self::DueDate => "Due date",
            Self::Tags => "Tags",
        }
    }

    const fn position(self) -> usize {
        match self {
            Self::Title => 0,
            Self::Description => 1,
            Self::Status => 2,
            Self::Priority => 3,
            Self::DueDate => 4,
            Self::Tags => 5,
        }
    }

    /// The next field, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// The previous field, wrapping around.
    #[must_use]
    pub const fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Whether the field takes typed text.
    #[must_use]
    pub const fn is_text(self) -> bool {
        !matches!(self, Self::Status | Self::Priority)
    }
}

/// Edit buffer for one job. `id` is `None` while creating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobForm {
    /// Id of the job being edited.
    pub id: Option<JobId>,
    /// Title text.
    pub title: String,
    /// Description text.
    pub description: String,
    /// Selected status.
    pub status: JobStatus,
    /// Selected priority.
    pub priority: Priority,
    /// Due date text.
    pub due_date: String,
    /// Tags as typed, comma-separated.
    pub tags: String,
    /// Focused field.
    pub focus: FormField,
}

impl JobForm {
    /// A cleared form for a new job.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            id: None,
            title: String::new(),
            description: String::new(),
            status: JobStatus::Todo,
            priority: Priority::Medium,
            due_date: String::new(),
            tags: String::new(),
            focus: FormField::Title,
        }
    }

    /// A form pre-filled from `job`.
    #[must_use]
    pub fn from_job(job: &Job) -> Self {
        Self {
            id: Some(job.id.clone()),
            title: job.title.clone(),
            description: job.description.clone().unwrap_or_default(),
            status: job.status.clone(),
            priority: job.priority,
            due_date: job.due_date.clone(),
            tags: job.tags.join(", "),
            focus: FormField::Title,
        }
    }

    /// Whether the form edits an existing job.
    #[must_use]
    pub const fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    /// Text of a text field; `None` for status and priority.
    #[must_use]
    pub fn text(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Title => Some(&self.title),
            FormField::Description => Some(&self.description),
            FormField::DueDate => Some(&self.due_date),
            FormField::Tags => Some(&self.tags),
            FormField::Status | FormField::Priority => None,
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::DueDate => Some(&mut self.due_date),
            FormField::Tags => Some(&mut self.tags),
            FormField::Status | FormField::Priority => None,
        }
    }

    /// Appends `c` to the focused text field.
    pub fn input(&mut self, c: char) {
        if let Some(text) = self.focused_text_mut() {
            text.push(c);
        }
    }

    /// Removes the last character of the focused text field.
    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text_mut() {
            text.pop();
        }
    }

    /// Cycles the focused status or priority.
    pub fn cycle(&mut self, direction: Direction) {
        match (self.focus, direction) {
            (FormField::Status, Direction::Forward) => self.status = self.status.next(),
            (FormField::Status, Direction::Backward) => self.status = self.status.prev(),
            (FormField::Priority, Direction::Forward) => self.priority = self.priority.next(),
            (FormField::Priority, Direction::Backward) => self.priority = self.priority.prev(),
            _ => {}
        }
    }

    /// Validates the buffer and builds the record to save.
    ///
    /// A new id is generated when creating. `updated_at` is left for the
    /// caller to stamp.
    ///
    /// # Errors
    ///
    /// Returns a [`FormError`] naming the first invalid field.
    pub fn build(&self, max_title_len: usize) -> Result<Job, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::TitleEmpty);
        }
        if title.chars().count() > max_title_len {
            return Err(FormError::TitleTooLong(max_title_len));
        }
        let due_date = self.due_date.trim();
        if due_date.is_empty() {
            return Err(FormError::DueDateEmpty);
        }
        let description = self.description.trim();

        Ok(Job {
            id: self.id.clone().unwrap_or_default(),
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            status: self.status.clone(),
            priority: self.priority,
            due_date: due_date.to_string(),
            tags: parse_tags(&self.tags),
            updated_at: 0,
        })
    }
}

impl Default for JobForm {
    fn default() -> Self {
        Self::blank()
    }
}
