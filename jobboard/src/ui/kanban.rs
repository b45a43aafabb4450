//! Kanban rendering: four status columns with counted headers.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::theme;
use crate::app::App;
use crate::store::JobStore;
use crate::view::{Column, format_due};

/// Render the board. `hidden` jobs have no column and are only counted.
pub fn render<S: JobStore>(
    frame: &mut Frame,
    area: Rect,
    app: &App<S>,
    columns: &[Column<'_>],
    hidden: usize,
) {
    let (board_area, footer_area) = if hidden > 0 {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    let lanes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(columns.iter().map(|_| Constraint::Fill(1)))
        .split(board_area);

    let drag = app.controller().drag();
    for (idx, (column, lane)) in columns.iter().zip(lanes.iter()).enumerate() {
        let is_drop_target = drag.is_some_and(|d| d.over == column.status);
        let is_cursor_column = idx == app.selection.column;

        let items: Vec<ListItem> = column
            .jobs
            .iter()
            .enumerate()
            .map(|(row, job)| {
                let is_dragged = drag.is_some_and(|d| d.job_id == job.id);
                let lines = vec![
                    Line::from(Span::raw(job.title.as_str())),
                    Line::from(vec![
                        Span::styled(
                            format!("[{}]", job.priority),
                            theme::badge(theme::priority_color(job.priority)),
                        ),
                        Span::styled(
                            format!(" {}", format_due(job, &app.date_format)),
                            theme::dimmed(),
                        ),
                    ]),
                ];
                let item = ListItem::new(lines);
                if is_dragged {
                    item.style(theme::dragged())
                } else if is_cursor_column && row == app.selection.row {
                    item.style(theme::selected())
                } else {
                    item
                }
            })
            .collect();

        let title = Span::styled(
            format!("{} ({})", column.status, column.count()),
            theme::panel_title(theme::status_color(&column.status)),
        );
        let border = if is_drop_target {
            theme::dragged()
        } else if is_cursor_column {
            theme::highlighted()
        } else {
            theme::normal()
        };
        let list = List::new(items).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border),
        );
        frame.render_widget(list, *lane);
    }

    if let Some(footer) = footer_area {
        let notice = Paragraph::new(Span::styled(
            format!("{hidden} job(s) hidden: unrecognized status (see list view)"),
            theme::normal().fg(theme::WARNING),
        ));
        frame.render_widget(notice, footer);
    }
}
