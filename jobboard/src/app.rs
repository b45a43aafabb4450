//! TUI shell: key bindings, selection cursor and modal notices.
//!
//! Key handling is split in two. [`action_for_key`] is a pure, declarative
//! mapping from (mode, key) to a [`Command`]; [`App::handle_key_event`]
//! executes the command, forwarding [`Action`]s to the [`Controller`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use jobboard_model::{JobId, JobStatus};

use crate::controller::{Action, ActionError, Controller, Direction, Outcome};
use crate::state::View;
use crate::store::JobStore;

/// Which input surface currently receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Browsing the active view.
    Normal,
    /// Typing into the search box.
    Search,
    /// Editing the create/edit form.
    Form,
    /// Answering the delete confirmation.
    Confirm,
    /// Reading a blocking notice.
    Notice,
}

/// A blocking message the user must dismiss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Dialog title.
    pub title: String,
    /// Message body.
    pub message: String,
}

/// Result of a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Forward to the controller.
    Dispatch(Action),
    /// Move the cursor up.
    SelectPrev,
    /// Move the cursor down.
    SelectNext,
    /// Move the cursor one kanban column left.
    ColumnLeft,
    /// Move the cursor one kanban column right.
    ColumnRight,
    /// Focus the search box.
    StartSearch,
    /// Leave the search box, keeping the filter.
    EndSearch,
    /// Leave the search box and clear the filter.
    ClearSearch,
    /// Close the notice.
    DismissNotice,
    /// Exit the application.
    Quit,
}

/// What the keymap needs to know about the current screen.
#[derive(Debug, Clone, Copy)]
pub struct KeyContext<'a> {
    /// Active input mode.
    pub mode: Mode,
    /// Active view.
    pub view: View,
    /// Job under the cursor.
    pub selected: Option<&'a JobId>,
    /// Column under the dragged card, while dragging.
    pub drag_over: Option<&'a JobStatus>,
    /// Current search filter.
    pub filter: &'a str,
}

/// Maps a key press to a command. Returns `None` for unbound keys.
#[must_use]
pub fn action_for_key(ctx: &KeyContext<'_>, key: KeyEvent) -> Option<Command> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Quit);
    }
    match ctx.mode {
        Mode::Notice => Some(Command::DismissNotice),
        Mode::Confirm => confirm_key(key),
        Mode::Form => form_key(key),
        Mode::Search => search_key(ctx, key),
        Mode::Normal => normal_key(ctx, key),
    }
}

fn confirm_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Command::Dispatch(Action::ConfirmDelete)),
        KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Command::Dispatch(Action::CancelDelete)),
        _ => None,
    }
}

fn form_key(key: KeyEvent) -> Option<Command> {
    let action = match key.code {
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::SubmitForm,
        KeyCode::Enter => Action::SubmitForm,
        KeyCode::Esc => Action::CancelForm,
        KeyCode::Tab | KeyCode::Down => Action::FormNextField,
        KeyCode::BackTab | KeyCode::Up => Action::FormPrevField,
        KeyCode::Left => Action::FormCycle(Direction::Backward),
        KeyCode::Right => Action::FormCycle(Direction::Forward),
        KeyCode::Backspace => Action::FormBackspace,
        KeyCode::Char(c) => Action::FormInput(c),
        _ => return None,
    };
    Some(Command::Dispatch(action))
}

fn search_key(ctx: &KeyContext<'_>, key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Enter => Some(Command::EndSearch),
        KeyCode::Esc => Some(Command::ClearSearch),
        KeyCode::Backspace => {
            let mut filter = ctx.filter.to_string();
            filter.pop();
            Some(Command::Dispatch(Action::Search(filter)))
        }
        KeyCode::Char(c) => Some(Command::Dispatch(Action::Search(format!("{}{c}", ctx.filter)))),
        _ => None,
    }
}

fn normal_key(ctx: &KeyContext<'_>, key: KeyEvent) -> Option<Command> {
    let dispatch = |action| Some(Command::Dispatch(action));
    let selected = || ctx.selected.cloned();

    match key.code {
        KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Esc => match ctx.drag_over {
            Some(_) => dispatch(Action::DragCancel),
            None => Some(Command::Quit),
        },
        KeyCode::Char('1') => dispatch(Action::Navigate(View::Dashboard)),
        KeyCode::Char('2') => dispatch(Action::Navigate(View::Kanban)),
        KeyCode::Char('3') => dispatch(Action::Navigate(View::List)),
        KeyCode::Tab => dispatch(Action::Navigate(ctx.view.next())),
        KeyCode::BackTab => dispatch(Action::Navigate(ctx.view.prev())),
        KeyCode::Up | KeyCode::Char('k') => Some(Command::SelectPrev),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::SelectNext),
        KeyCode::Left | KeyCode::Char('h') if ctx.view == View::Kanban => match ctx.drag_over {
            Some(over) => dispatch(Action::DragOver(over.prev())),
            None => Some(Command::ColumnLeft),
        },
        KeyCode::Right | KeyCode::Char('l') if ctx.view == View::Kanban => match ctx.drag_over {
            Some(over) => dispatch(Action::DragOver(over.next())),
            None => Some(Command::ColumnRight),
        },
        KeyCode::Char(' ') if ctx.view == View::Kanban => match ctx.drag_over {
            Some(over) => dispatch(Action::Drop(over.clone())),
            None => selected().map(|id| Command::Dispatch(Action::DragStart(id))),
        },
        KeyCode::Char('/') => Some(Command::StartSearch),
        KeyCode::Char('n') => dispatch(Action::OpenCreateForm),
        KeyCode::Char('e') | KeyCode::Enter => {
            selected().map(|id| Command::Dispatch(Action::OpenEditForm(id)))
        }
        KeyCode::Char('x') | KeyCode::Delete => {
            selected().map(|id| Command::Dispatch(Action::RequestDelete(id)))
        }
        _ => None,
    }
}

/// Cursor position within the active view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    /// Kanban column index; unused by the other views.
    pub column: usize,
    /// Row within the list, dashboard or column.
    pub row: usize,
}

/// Main application state for the terminal front end.
pub struct App<S: JobStore> {
    controller: Controller<S>,
    /// Cursor position.
    pub selection: Selection,
    searching: bool,
    notice: Option<Notice>,
    /// Due date display format (chrono).
    pub date_format: String,
    /// Where records are kept, shown in the status bar.
    pub location: String,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl<S: JobStore> App<S> {
    /// Wraps a started controller.
    #[must_use]
    pub fn new(controller: Controller<S>, date_format: String, location: String) -> Self {
        Self {
            controller,
            selection: Selection::default(),
            searching: false,
            notice: None,
            date_format,
            location,
            should_quit: false,
        }
    }

    /// The controller driving this app.
    #[must_use]
    pub const fn controller(&self) -> &Controller<S> {
        &self.controller
    }

    /// The notice awaiting dismissal, if any.
    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Shows a blocking notice.
    pub fn show_notice(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notice = Some(Notice {
            title: title.into(),
            message: message.into(),
        });
    }

    /// Current input mode. Notices take precedence over everything else.
    #[must_use]
    pub fn mode(&self) -> Mode {
        if self.notice.is_some() {
            Mode::Notice
        } else if self.controller.form().is_some() {
            Mode::Form
        } else if self.controller.pending_delete().is_some() {
            Mode::Confirm
        } else if self.searching {
            Mode::Search
        } else {
            Mode::Normal
        }
    }

    /// Id of the job under the cursor.
    #[must_use]
    pub fn selected_job(&self) -> Option<JobId> {
        let rendered = self.controller.rendered();
        let jobs = match self.controller.state().active_view() {
            View::Kanban => rendered.column(self.selection.column),
            View::Dashboard | View::List => rendered.rows(),
        };
        jobs.get(self.selection.row).map(|job| job.id.clone())
    }

    /// Handles one key press.
    pub async fn handle_key_event(&mut self, key: KeyEvent) {
        let selected = self.selected_job();
        let command = {
            let ctx = KeyContext {
                mode: self.mode(),
                view: self.controller.state().active_view(),
                selected: selected.as_ref(),
                drag_over: self.controller.drag().map(|d| &d.over),
                filter: self.controller.state().search_filter(),
            };
            action_for_key(&ctx, key)
        };
        if let Some(command) = command {
            self.apply(command).await;
        }
    }

    /// Executes a command.
    pub async fn apply(&mut self, command: Command) {
        match command {
            Command::Dispatch(action) => self.dispatch(action).await,
            Command::SelectPrev => self.selection.row = self.selection.row.saturating_sub(1),
            Command::SelectNext => {
                if self.selection.row + 1 < self.visible_rows() {
                    self.selection.row += 1;
                }
            }
            Command::ColumnLeft => {
                self.selection.column = self.selection.column.saturating_sub(1);
                self.clamp_selection();
            }
            Command::ColumnRight => {
                if self.selection.column + 1 < JobStatus::BOARD.len() {
                    self.selection.column += 1;
                }
                self.clamp_selection();
            }
            Command::StartSearch => self.searching = true,
            Command::EndSearch => self.searching = false,
            Command::ClearSearch => {
                self.searching = false;
                self.dispatch(Action::Search(String::new())).await;
            }
            Command::DismissNotice => self.notice = None,
            Command::Quit => self.should_quit = true,
        }
    }

    async fn dispatch(&mut self, action: Action) {
        let followed = match &action {
            Action::DragStart(id) => Some(id.clone()),
            Action::Drop(_) => self.controller.drag().map(|d| d.job_id.clone()),
            _ => None,
        };
        let column = match &action {
            Action::DragOver(status) | Action::Drop(status) => status.column(),
            _ => None,
        };
        let mutation = action.is_mutation();

        match self.controller.dispatch(action).await {
            Ok(outcome) => {
                if mutation && outcome == Outcome::Reloaded {
                    tracing::debug!("state resynchronized after write");
                }
                if let Some(column) = column {
                    self.selection.column = column;
                }
                if let Some(id) = followed {
                    self.select_job(&id);
                }
                self.clamp_selection();
            }
            Err(err) => {
                tracing::warn!(error = %err, "action failed");
                let title = match err {
                    ActionError::Store(_) => "Storage error",
                    ActionError::Resync(_) => "Saved, not refreshed",
                    ActionError::Invalid(_) => "Invalid job",
                    ActionError::NotFound(_) | ActionError::NotAllowed(_) => "Cannot do that",
                };
                self.show_notice(title, err.to_string());
            }
        }
    }

    /// Moves the kanban cursor onto `id` if it is on the board.
    fn select_job(&mut self, id: &JobId) {
        let rendered = self.controller.rendered();
        for column in 0..JobStatus::BOARD.len() {
            if let Some(row) = rendered.column(column).iter().position(|j| &j.id == id) {
                self.selection = Selection { column, row };
                return;
            }
        }
    }

    fn visible_rows(&self) -> usize {
        let rendered = self.controller.rendered();
        match self.controller.state().active_view() {
            View::Kanban => rendered.column(self.selection.column).len(),
            View::Dashboard | View::List => rendered.rows().len(),
        }
    }

    fn clamp_selection(&mut self) {
        let rows = self.visible_rows();
        self.selection.row = self.selection.row.min(rows.saturating_sub(1));
    }
}
