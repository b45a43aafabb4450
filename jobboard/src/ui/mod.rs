//! Terminal UI rendering.
//!
//! Widgets are built from the [`Rendered`](crate::view::Rendered) view model;
//! nothing here reads the store or changes state.

pub mod dashboard;
pub mod dialog;
pub mod kanban;
pub mod list;
pub mod status_bar;
pub mod theme;

use jobboard_model::Job;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};

use crate::app::{App, Mode};
use crate::state::View;
use crate::store::JobStore;
use crate::view::{Body, Rendered, Summary, format_due};

/// Main draw function for the entire UI.
pub fn draw<S: JobStore>(frame: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs + search
            Constraint::Length(1), // Summary
            Constraint::Min(3),    // Active view
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let controller = app.controller();
    let rendered = controller.rendered();

    render_header(frame, chunks[0], app);
    render_summary(frame, chunks[1], &rendered.summary);
    render_body(frame, chunks[2], app, &rendered);
    status_bar::render(frame, chunks[3], app);

    match app.mode() {
        Mode::Form => dialog::render_form(frame, app),
        Mode::Confirm => dialog::render_confirm(frame, app),
        Mode::Notice => dialog::render_notice(frame, app),
        Mode::Normal | Mode::Search => {}
    }
}

fn render_body<S: JobStore>(frame: &mut Frame, area: Rect, app: &App<S>, rendered: &Rendered<'_>) {
    match &rendered.body {
        Body::Dashboard { upcoming } => dashboard::render(frame, area, app, upcoming),
        Body::Kanban { columns, hidden } => kanban::render(frame, area, app, columns, *hidden),
        Body::List { rows } => list::render(frame, area, app, rows),
    }
}

fn render_header<S: JobStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!("{} {}", i + 1, view.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.controller().state().active_view().index())
        .block(
            Block::default()
                .title(Span::styled("Jobboard", theme::panel_title(theme::HIGHLIGHT)))
                .borders(Borders::ALL),
        )
        .style(theme::normal())
        .highlight_style(theme::selected());
    frame.render_widget(tabs, chunks[0]);

    let searching = app.mode() == Mode::Search;
    let filter = app.controller().state().search_filter();
    let mut spans = vec![Span::styled("/ ", theme::dimmed()), Span::raw(filter)];
    if searching {
        spans.push(Span::styled("_", theme::highlighted()));
    }
    let search = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title("Search")
            .borders(Borders::ALL)
            .border_style(if searching {
                theme::highlighted()
            } else {
                theme::normal()
            }),
    );
    frame.render_widget(search, chunks[1]);
}

fn render_summary(frame: &mut Frame, area: Rect, summary: &Summary) {
    let line = Line::from(vec![
        Span::styled(" Total ", theme::dimmed()),
        Span::styled(summary.total.to_string(), theme::bold()),
        Span::styled("  Active ", theme::dimmed()),
        Span::styled(summary.active.to_string(), theme::badge(theme::WARNING)),
        Span::styled("  Completed ", theme::dimmed()),
        Span::styled(summary.completed.to_string(), theme::badge(theme::SUCCESS)),
        Span::styled("  Pending ", theme::dimmed()),
        Span::styled(summary.pending.to_string(), theme::badge(theme::HIGHLIGHT)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// One-line rendering of a job: title, status and priority badges, due date.
#[must_use]
pub fn job_line<'a>(job: &'a Job, date_format: &str) -> Line<'a> {
    Line::from(vec![
        Span::raw(job.title.as_str()),
        Span::raw(" "),
        Span::styled(
            format!("[{}]", job.status),
            theme::badge(theme::status_color(&job.status)),
        ),
        Span::raw(" "),
        Span::styled(
            format!("[{}]", job.priority),
            theme::badge(theme::priority_color(job.priority)),
        ),
        Span::styled(format!("  {}", format_due(job, date_format)), theme::dimmed()),
    ])
}

/// A rectangle of `percent_x` by `height` centered in `area`.
#[must_use]
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height.min(area.height)),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
