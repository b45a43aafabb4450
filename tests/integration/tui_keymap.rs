//! Key-driven flows through the TUI shell.
//!
//! Drives [`App`] with the same key events the terminal loop delivers and
//! checks the resulting mode, selection, store contents and drawn frame.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use jobboard::app::{App, Mode};
use jobboard::controller::{Controller, ControllerSettings};
use jobboard::state::View;
use jobboard::store::{InMemoryStore, JobStore};
use jobboard::ui;
use jobboard_model::{Job, JobStatus};
use ratatui::{Terminal, backend::TestBackend};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

async fn make_app(view: View, jobs: Vec<Job>) -> App<InMemoryStore> {
    let controller = Controller::start(
        InMemoryStore::with_jobs(jobs),
        view,
        ControllerSettings::default(),
    )
    .await
    .unwrap();
    App::new(controller, "%Y-%m-%d".to_string(), "memory".to_string())
}

async fn press(app: &mut App<InMemoryStore>, code: KeyCode) {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
        .await;
}

async fn type_keys(app: &mut App<InMemoryStore>, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c)).await;
    }
}

fn screen(app: &App<InMemoryStore>) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    terminal.draw(|frame| ui::draw(frame, app)).unwrap();
    terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(ratatui::buffer::Cell::symbol)
        .collect()
}

fn job(title: &str, status: JobStatus, due: &str) -> Job {
    let mut job = Job::new(title, due);
    job.status = status;
    job
}

// ---------------------------------------------------------------------------
// Flows
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_job_from_keyboard() {
    let mut app = make_app(View::Dashboard, vec![]).await;

    press(&mut app, KeyCode::Char('n')).await;
    assert_eq!(app.mode(), Mode::Form);
    assert!(screen(&app).contains("New job"));

    type_keys(&mut app, "Write report").await;
    for _ in 0..4 {
        press(&mut app, KeyCode::Tab).await;
    }
    type_keys(&mut app, "2024-06-01").await;
    press(&mut app, KeyCode::Tab).await;
    type_keys(&mut app, "work, q2").await;
    press(&mut app, KeyCode::Enter).await;

    assert_eq!(app.mode(), Mode::Normal);
    let stored = app.controller().store().get_all().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].title, "Write report");
    assert_eq!(stored[0].tags, vec!["work".to_string(), "q2".to_string()]);
    assert!(screen(&app).contains("Write report"));
}

#[tokio::test]
async fn invalid_form_shows_notice_and_keeps_form() {
    let mut app = make_app(View::Dashboard, vec![]).await;
    press(&mut app, KeyCode::Char('n')).await;
    press(&mut app, KeyCode::Enter).await;

    assert_eq!(app.mode(), Mode::Notice);
    assert_eq!(app.notice().unwrap().title, "Invalid job");
    assert!(screen(&app).contains("Invalid job"));

    press(&mut app, KeyCode::Char('z')).await;
    assert_eq!(app.mode(), Mode::Form);
    assert!(app.controller().form().unwrap().title.is_empty());
}

#[tokio::test]
async fn number_keys_switch_views() {
    let mut app = make_app(View::Dashboard, vec![]).await;
    press(&mut app, KeyCode::Char('2')).await;
    assert_eq!(app.controller().state().active_view(), View::Kanban);
    press(&mut app, KeyCode::Char('3')).await;
    assert_eq!(app.controller().state().active_view(), View::List);
    press(&mut app, KeyCode::Tab).await;
    assert_eq!(app.controller().state().active_view(), View::Dashboard);
}

#[tokio::test]
async fn drag_card_across_board_with_keys() {
    let card = job("Ship it", JobStatus::Todo, "2024-06-01");
    let id = card.id.clone();
    let mut app = make_app(View::Kanban, vec![card]).await;

    assert_eq!(app.selected_job(), Some(id.clone()));
    press(&mut app, KeyCode::Char(' ')).await;
    assert!(app.controller().drag().is_some());
    assert!(screen(&app).contains("Space: drop"));

    press(&mut app, KeyCode::Right).await;
    press(&mut app, KeyCode::Right).await;
    assert_eq!(app.controller().drag().unwrap().over, JobStatus::Review);
    press(&mut app, KeyCode::Char(' ')).await;

    assert!(app.controller().drag().is_none());
    assert_eq!(
        app.controller().state().job(&id).unwrap().status,
        JobStatus::Review
    );
    assert_eq!(app.selection.column, 2);
    assert_eq!(app.selected_job(), Some(id));
}

#[tokio::test]
async fn escape_cancels_drag_without_writing() {
    let card = job("Stay put", JobStatus::InProgress, "2024-06-01");
    let id = card.id.clone();
    let mut app = make_app(View::Kanban, vec![card]).await;
    press(&mut app, KeyCode::Right).await;

    press(&mut app, KeyCode::Char(' ')).await;
    press(&mut app, KeyCode::Right).await;
    press(&mut app, KeyCode::Esc).await;

    assert!(app.controller().drag().is_none());
    assert!(!app.should_quit);
    assert_eq!(
        app.controller().state().job(&id).unwrap().status,
        JobStatus::InProgress
    );
}

#[tokio::test]
async fn search_filters_list_and_escape_clears() {
    let jobs = vec![
        job("Alpha", JobStatus::Todo, "2024-06-01"),
        job("Beta", JobStatus::Todo, "2024-06-02"),
    ];
    let mut app = make_app(View::List, jobs).await;

    press(&mut app, KeyCode::Char('/')).await;
    assert_eq!(app.mode(), Mode::Search);
    type_keys(&mut app, "alp").await;
    assert_eq!(app.controller().state().search_filter(), "alp");
    assert_eq!(app.controller().rendered().rows().len(), 1);

    press(&mut app, KeyCode::Backspace).await;
    assert_eq!(app.controller().state().search_filter(), "al");

    press(&mut app, KeyCode::Esc).await;
    assert_eq!(app.mode(), Mode::Normal);
    assert_eq!(app.controller().state().search_filter(), "");
    assert_eq!(app.controller().rendered().rows().len(), 2);
}

#[tokio::test]
async fn delete_requires_confirmation() {
    let jobs = vec![
        job("First", JobStatus::Todo, "2024-06-01"),
        job("Second", JobStatus::Todo, "2024-06-02"),
    ];
    let mut app = make_app(View::List, jobs).await;

    press(&mut app, KeyCode::Down).await;
    press(&mut app, KeyCode::Char('x')).await;
    assert_eq!(app.mode(), Mode::Confirm);
    assert!(screen(&app).contains("Delete 'Second'?"));

    press(&mut app, KeyCode::Char('n')).await;
    assert_eq!(app.controller().store().get_all().await.unwrap().len(), 2);

    press(&mut app, KeyCode::Char('x')).await;
    press(&mut app, KeyCode::Char('y')).await;
    let remaining = app.controller().store().get_all().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "First");
    assert_eq!(app.selection.row, 0);
}

#[tokio::test]
async fn unrecognized_status_is_flagged_on_board() {
    let jobs = vec![
        job("Visible", JobStatus::Todo, "2024-06-01"),
        job("Odd one", JobStatus::from("blocked"), "2024-06-02"),
    ];
    let app = make_app(View::Kanban, jobs).await;
    let text = screen(&app);
    assert!(text.contains("1 job(s) hidden"));
    assert!(!text.contains("Odd one"));
}

#[tokio::test]
async fn q_quits_from_normal_mode_only() {
    let mut app = make_app(View::Dashboard, vec![]).await;
    press(&mut app, KeyCode::Char('/')).await;
    press(&mut app, KeyCode::Char('q')).await;
    assert!(!app.should_quit);
    assert_eq!(app.controller().state().search_filter(), "q");

    press(&mut app, KeyCode::Enter).await;
    press(&mut app, KeyCode::Char('q')).await;
    assert!(app.should_quit);
}
