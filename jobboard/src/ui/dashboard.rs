//! Dashboard rendering: the next jobs due.

use jobboard_model::Job;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::{job_line, theme};
use crate::app::App;
use crate::store::JobStore;
use crate::view::EMPTY_STATE;

/// Render the upcoming jobs, or the empty-state message.
pub fn render<S: JobStore>(frame: &mut Frame, area: Rect, app: &App<S>, upcoming: &[&Job]) {
    let block = Block::default()
        .title("Upcoming")
        .borders(Borders::ALL)
        .border_style(theme::normal());

    if upcoming.is_empty() {
        let empty = Paragraph::new(EMPTY_STATE)
            .style(theme::dimmed())
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = upcoming
        .iter()
        .enumerate()
        .map(|(idx, job)| {
            let item = ListItem::new(job_line(job, &app.date_format));
            if idx == app.selection.row {
                item.style(theme::selected())
            } else {
                item
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
