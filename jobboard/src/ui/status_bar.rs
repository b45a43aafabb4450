//! Bottom status bar: key help for the current mode and the data location.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, Mode};
use crate::state::View;
use crate::store::JobStore;

fn help(mode: Mode, view: View, dragging: bool) -> &'static str {
    match mode {
        Mode::Notice => "any key: dismiss",
        Mode::Confirm => "y: delete · n/Esc: keep",
        Mode::Form => "Enter: save · Esc: cancel · Tab: next field",
        Mode::Search => "type to filter · Enter: keep · Esc: clear",
        Mode::Normal if dragging => "←/→: choose column · Space: drop · Esc: cancel",
        Mode::Normal if view == View::Kanban => {
            "1-3 views · ←/→ column · Space drag · n new · e edit · x delete · / search · q quit"
        }
        Mode::Normal => "1-3 views · ↑/↓ move · n new · e edit · x delete · / search · q quit",
    }
}

/// Render the status bar.
pub fn render<S: JobStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let view = app.controller().state().active_view();
    let dragging = app.controller().drag().is_some();
    let line = Line::from(vec![
        Span::styled(format!(" {} ", help(app.mode(), view, dragging)), theme::status_bar_bg()),
        Span::styled(format!(" {}", app.location), theme::dimmed()),
    ]);
    frame.render_widget(Paragraph::new(line).style(theme::status_bar_bg()), area);
}
