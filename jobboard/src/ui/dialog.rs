//! Modal overlays: the job form, delete confirmation and notices.

use ratatui::{
    Frame,
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::{centered_rect, theme};
use crate::app::App;
use crate::controller::{FormField, JobForm};
use crate::store::JobStore;

/// Render the create/edit form over the current view.
pub fn render_form<S: JobStore>(frame: &mut Frame, app: &App<S>) {
    let Some(form) = app.controller().form() else {
        return;
    };
    let height = u16::try_from(FormField::ALL.len()).unwrap_or(6) + 4;
    let area = centered_rect(60, height, frame.area());

    let mut lines: Vec<Line> = FormField::ALL
        .iter()
        .map(|&field| field_line(form, field))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter save · Esc cancel · Tab next field · ←/→ change value",
        theme::dimmed(),
    )));

    let title = if form.is_edit() { "Edit job" } else { "New job" };
    let dialog = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(title, theme::panel_title(theme::HIGHLIGHT)))
            .borders(Borders::ALL)
            .border_style(theme::highlighted()),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(dialog, area);
}

fn field_line(form: &JobForm, field: FormField) -> Line<'_> {
    let focused = form.focus == field;
    let label_style = if focused {
        theme::highlighted()
    } else {
        theme::dimmed()
    };
    let value = match field {
        FormField::Status => Span::styled(
            format!("< {} >", form.status),
            theme::badge(theme::status_color(&form.status)),
        ),
        FormField::Priority => Span::styled(
            format!("< {} >", form.priority),
            theme::badge(theme::priority_color(form.priority)),
        ),
        _ => {
            let text = form.text(field).unwrap_or_default();
            if focused {
                Span::styled(format!("{text}_"), theme::bold())
            } else {
                Span::styled(text.to_string(), theme::normal())
            }
        }
    };
    Line::from(vec![
        Span::styled(format!("{:>12}: ", field.label()), label_style),
        value,
    ])
}

/// Render the delete confirmation.
pub fn render_confirm<S: JobStore>(frame: &mut Frame, app: &App<S>) {
    let Some(job) = app.controller().pending_delete() else {
        return;
    };
    let area = centered_rect(50, 5, frame.area());
    let dialog = Paragraph::new(vec![
        Line::from(format!("Delete '{}'?", job.title)),
        Line::from(Span::styled("y confirm · n cancel", theme::dimmed())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(Span::styled("Confirm", theme::panel_title(theme::WARNING)))
            .borders(Borders::ALL)
            .border_style(theme::normal().fg(theme::WARNING)),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(dialog, area);
}

/// Render the pending notice.
pub fn render_notice<S: JobStore>(frame: &mut Frame, app: &App<S>) {
    let Some(notice) = app.notice() else {
        return;
    };
    let area = centered_rect(60, 7, frame.area());
    let dialog = Paragraph::new(vec![
        Line::from(notice.message.as_str()),
        Line::from(""),
        Line::from(Span::styled("press any key", theme::dimmed())),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(Span::styled(
                notice.title.as_str(),
                theme::panel_title(theme::ERROR),
            ))
            .borders(Borders::ALL)
            .border_style(theme::normal().fg(theme::ERROR)),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(dialog, area);
}
