//! List rendering: one table row per job.

use jobboard_model::Job;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
};

use super::theme;
use crate::app::App;
use crate::store::JobStore;
use crate::view::format_due;

/// Render every filtered job as a table row.
pub fn render<S: JobStore>(frame: &mut Frame, area: Rect, app: &App<S>, rows: &[&Job]) {
    let header = Row::new(["Title", "Status", "Priority", "Due", "Tags"]).style(theme::bold());

    let body: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(idx, job)| {
            let row = Row::new(vec![
                Cell::from(job.title.as_str()),
                Cell::from(Span::styled(
                    job.status.as_str(),
                    theme::badge(theme::status_color(&job.status)),
                )),
                Cell::from(Span::styled(
                    job.priority.to_string(),
                    theme::badge(theme::priority_color(job.priority)),
                )),
                Cell::from(format_due(job, &app.date_format)),
                Cell::from(job.tags.join(", ")),
            ]);
            if idx == app.selection.row {
                row.style(theme::selected())
            } else {
                row
            }
        })
        .collect();

    let widths = [
        Constraint::Percentage(35),
        Constraint::Length(12),
        Constraint::Length(9),
        Constraint::Length(14),
        Constraint::Fill(1),
    ];
    let table = Table::new(body, widths).header(header).block(
        Block::default()
            .title(format!("Jobs ({})", rows.len()))
            .borders(Borders::ALL)
            .border_style(theme::normal()),
    );
    frame.render_widget(table, area);
}
