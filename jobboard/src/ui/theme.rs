//! Theme and styling constants for the TUI.

use jobboard_model::{JobStatus, Priority};
use ratatui::style::{Color, Modifier, Style};

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::Gray;

/// Highlight color for focused elements.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Success color.
pub const SUCCESS: Color = Color::Green;

/// Warning color.
pub const WARNING: Color = Color::Yellow;

/// Error color.
pub const ERROR: Color = Color::Red;

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (dates, metadata).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Highlighted text style (focused borders, drop targets).
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Selected item style (in lists).
#[must_use]
pub fn selected() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Style for a card that is being dragged.
#[must_use]
pub fn dragged() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(WARNING)
        .add_modifier(Modifier::BOLD)
}

/// Badge color for a status.
#[must_use]
pub const fn status_color(status: &JobStatus) -> Color {
    match status {
        JobStatus::Todo => Color::Blue,
        JobStatus::InProgress => Color::Yellow,
        JobStatus::Review => Color::Magenta,
        JobStatus::Done => SUCCESS,
        JobStatus::Unrecognized(_) => Color::DarkGray,
    }
}

/// Badge color for a priority.
#[must_use]
pub const fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => Color::Gray,
        Priority::Medium => WARNING,
        Priority::High => ERROR,
    }
}

/// Bracketed badge style with the given color.
#[must_use]
pub fn badge(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Style for the status bar background (dark background with white foreground).
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50))
}

/// Style for panel titles with a given color (bold).
#[must_use]
pub fn panel_title(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}
