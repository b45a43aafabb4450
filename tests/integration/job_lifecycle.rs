//! End-to-end job lifecycle through the controller.
//!
//! Create, drag to another column, search and delete, checking after each
//! step that the rendered views and the store agree.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::similar_names)]

use jobboard::controller::{Action, ActionError, Controller, ControllerSettings, Direction, Outcome};
use jobboard::state::View;
use jobboard::store::{FileStore, InMemoryStore, JobStore};
use jobboard::view::{Body, EMPTY_STATE};
use jobboard_model::{Job, JobId, JobStatus, Priority};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

async fn start(store: InMemoryStore, view: View) -> Controller<InMemoryStore> {
    Controller::start(store, view, ControllerSettings::default())
        .await
        .unwrap()
}

async fn type_text<S: JobStore>(controller: &mut Controller<S>, text: &str) {
    for c in text.chars() {
        controller.dispatch(Action::FormInput(c)).await.unwrap();
    }
}

/// Fills the create form field by field, the way the keyboard does.
async fn create_draft_report<S: JobStore>(controller: &mut Controller<S>) -> JobId {
    controller.dispatch(Action::OpenCreateForm).await.unwrap();
    type_text(controller, "Draft report").await; // Title
    controller.dispatch(Action::FormNextField).await.unwrap(); // Description
    controller.dispatch(Action::FormNextField).await.unwrap(); // Status stays todo
    controller.dispatch(Action::FormNextField).await.unwrap(); // Priority
    controller
        .dispatch(Action::FormCycle(Direction::Forward))
        .await
        .unwrap(); // medium -> high
    controller.dispatch(Action::FormNextField).await.unwrap(); // Due date
    type_text(controller, "2024-06-01").await;
    controller.dispatch(Action::FormNextField).await.unwrap(); // Tags
    type_text(controller, "writing").await;

    let outcome = controller.dispatch(Action::SubmitForm).await.unwrap();
    assert_eq!(outcome, Outcome::Reloaded);
    assert!(controller.form().is_none());

    controller
        .state()
        .jobs()
        .iter()
        .find(|j| j.title == "Draft report")
        .map(|j| j.id.clone())
        .unwrap()
}

fn kanban_column_titles<S: JobStore>(controller: &Controller<S>, status: &JobStatus) -> Vec<String> {
    let rendered = controller.rendered();
    let Body::Kanban { columns, .. } = &rendered.body else {
        panic!("expected kanban body");
    };
    columns
        .iter()
        .find(|c| &c.status == status)
        .unwrap()
        .jobs
        .iter()
        .map(|j| j.title.clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn created_job_shows_in_kanban_and_list() {
    let mut controller = start(InMemoryStore::new(), View::Dashboard).await;
    let id = create_draft_report(&mut controller).await;

    let stored = controller.store().get_all().await.unwrap();
    assert_eq!(stored.len(), 1);
    let job = &stored[0];
    assert_eq!(job.id, id);
    assert_eq!(job.status, JobStatus::Todo);
    assert_eq!(job.priority, Priority::High);
    assert_eq!(job.due_date, "2024-06-01");
    assert_eq!(job.tags, vec!["writing".to_string()]);
    assert!(job.updated_at > 0);

    controller.dispatch(Action::Navigate(View::Kanban)).await.unwrap();
    assert_eq!(
        kanban_column_titles(&controller, &JobStatus::Todo),
        vec!["Draft report".to_string()]
    );

    controller.dispatch(Action::Navigate(View::List)).await.unwrap();
    let rendered = controller.rendered();
    let rows = rendered.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status.as_str(), "todo");
    assert_eq!(rows[0].priority.to_string(), "high");
}

#[tokio::test]
async fn dragging_to_done_updates_store_and_counts() {
    let mut controller = start(InMemoryStore::new(), View::Kanban).await;
    let id = create_draft_report(&mut controller).await;
    let before = controller.rendered().summary;

    controller.dispatch(Action::DragStart(id.clone())).await.unwrap();
    controller
        .dispatch(Action::DragOver(JobStatus::Done))
        .await
        .unwrap();
    let outcome = controller.dispatch(Action::Drop(JobStatus::Done)).await.unwrap();
    assert_eq!(outcome, Outcome::Reloaded);
    assert!(controller.drag().is_none());

    let stored = controller.store().get_all().await.unwrap();
    assert_eq!(stored[0].status, JobStatus::Done);
    assert_eq!(
        kanban_column_titles(&controller, &JobStatus::Done),
        vec!["Draft report".to_string()]
    );
    assert!(kanban_column_titles(&controller, &JobStatus::Todo).is_empty());

    let after = controller.rendered().summary;
    assert_eq!(after.total, before.total);
    assert_eq!(after.completed, before.completed + 1);

    controller.dispatch(Action::Navigate(View::List)).await.unwrap();
    assert_eq!(controller.rendered().rows()[0].status.as_str(), "done");
}

#[tokio::test]
async fn drop_on_same_column_writes_nothing() {
    let mut controller = start(InMemoryStore::new(), View::Kanban).await;
    let id = create_draft_report(&mut controller).await;
    let stamped = controller.state().job(&id).unwrap().updated_at;

    controller.dispatch(Action::DragStart(id.clone())).await.unwrap();
    let outcome = controller.dispatch(Action::Drop(JobStatus::Todo)).await.unwrap();
    assert_eq!(outcome, Outcome::Ignored);
    assert_eq!(controller.state().job(&id).unwrap().updated_at, stamped);
}

#[tokio::test]
async fn search_narrows_views_but_not_summary() {
    let mut controller = start(InMemoryStore::new(), View::Dashboard).await;
    create_draft_report(&mut controller).await;
    let summary = controller.rendered().summary;

    controller
        .dispatch(Action::Search("writing".to_string()))
        .await
        .unwrap();
    let rendered = controller.rendered();
    assert_eq!(rendered.card_count(), 1);
    assert_eq!(rendered.rows()[0].title, "Draft report");

    controller
        .dispatch(Action::Search("nonexistent".to_string()))
        .await
        .unwrap();
    let rendered = controller.rendered();
    assert_eq!(rendered.empty_message(), Some(EMPTY_STATE));
    assert_eq!(rendered.summary, summary);

    for view in [View::Kanban, View::List] {
        controller.dispatch(Action::Navigate(view)).await.unwrap();
        let rendered = controller.rendered();
        assert_eq!(rendered.card_count(), 0);
        assert_eq!(rendered.summary, summary);
    }
}

#[tokio::test]
async fn confirmed_delete_removes_job_everywhere() {
    let keep = Job::new("Keep me", "2024-07-01");
    let mut controller = start(InMemoryStore::with_jobs([keep]), View::List).await;
    let id = create_draft_report(&mut controller).await;
    assert_eq!(controller.rendered().summary.total, 2);

    controller
        .dispatch(Action::RequestDelete(id.clone()))
        .await
        .unwrap();
    assert_eq!(controller.pending_delete().unwrap().title, "Draft report");
    let outcome = controller.dispatch(Action::ConfirmDelete).await.unwrap();
    assert_eq!(outcome, Outcome::Reloaded);

    let stored = controller.store().get_all().await.unwrap();
    assert!(stored.iter().all(|j| j.id != id));
    let rendered = controller.rendered();
    assert_eq!(rendered.summary.total, 1);
    assert_eq!(rendered.summary.pending, 1);
    assert_eq!(rendered.card_count(), 1);
}

#[tokio::test]
async fn cancelled_delete_keeps_job() {
    let job = Job::new("Keep me", "2024-07-01");
    let id = job.id.clone();
    let mut controller = start(InMemoryStore::with_jobs([job]), View::List).await;

    controller
        .dispatch(Action::RequestDelete(id.clone()))
        .await
        .unwrap();
    controller.dispatch(Action::CancelDelete).await.unwrap();
    assert!(controller.pending_delete().is_none());
    assert_eq!(controller.store().get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn editing_keeps_id_and_replaces_fields() {
    let job = Job::new("Old title", "2024-07-01");
    let id = job.id.clone();
    let mut controller = start(InMemoryStore::with_jobs([job]), View::List).await;

    controller
        .dispatch(Action::OpenEditForm(id.clone()))
        .await
        .unwrap();
    for _ in 0.."title".len() {
        controller.dispatch(Action::FormBackspace).await.unwrap();
    }
    type_text(&mut controller, "name").await;
    controller.dispatch(Action::SubmitForm).await.unwrap();

    let stored = controller.store().get_all().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, id);
    assert_eq!(stored[0].title, "Old name");
}

#[tokio::test]
async fn invalid_form_is_rejected_and_kept_open() {
    let mut controller = start(InMemoryStore::new(), View::Dashboard).await;
    controller.dispatch(Action::OpenCreateForm).await.unwrap();
    type_text(&mut controller, "No due date").await;

    let err = controller.dispatch(Action::SubmitForm).await.unwrap_err();
    assert!(matches!(err, ActionError::Invalid(_)));
    assert!(controller.form().is_some());
    assert!(controller.store().is_empty());
}

#[tokio::test]
async fn file_store_survives_restart() {
    let dir = std::env::temp_dir().join(format!("jobboard-lifecycle-{}", JobId::new()));

    let mut controller = Controller::start(
        FileStore::new(&dir),
        View::Kanban,
        ControllerSettings::default(),
    )
    .await
    .unwrap();
    let id = create_draft_report(&mut controller).await;
    controller.dispatch(Action::DragStart(id.clone())).await.unwrap();
    controller
        .dispatch(Action::Drop(JobStatus::Review))
        .await
        .unwrap();
    drop(controller);

    let reopened = Controller::start(
        FileStore::new(&dir),
        View::Kanban,
        ControllerSettings::default(),
    )
    .await
    .unwrap();
    let job = reopened.state().job(&id).unwrap();
    assert_eq!(job.status, JobStatus::Review);
    assert_eq!(
        kanban_column_titles(&reopened, &JobStatus::Review),
        vec!["Draft report".to_string()]
    );

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn unrecognized_status_is_off_board_but_kept() {
    let dir = std::env::temp_dir().join(format!("jobboard-foreign-{}", JobId::new()));
    let mut blocked = Job::new("Blocked on vendor", "2024-06-05");
    blocked.status = JobStatus::from("blocked");
    let blocked_id = blocked.id.clone();
    let seed = FileStore::new(&dir);
    seed.initialize().await.unwrap();
    seed.upsert(&blocked).await.unwrap();
    seed.upsert(&Job::new("Plain todo", "2024-06-01"))
        .await
        .unwrap();
    drop(seed);

    let mut controller = Controller::start(
        FileStore::new(&dir),
        View::Dashboard,
        ControllerSettings::default(),
    )
    .await
    .unwrap();

    let summary = controller.rendered().summary;
    assert_eq!(summary.total, 2);
    assert_eq!(summary.pending, 1);
    assert_eq!(summary.active + summary.completed, 0);
    assert!(controller.rendered().rows().iter().any(|j| j.id == blocked_id));

    controller.dispatch(Action::Navigate(View::Kanban)).await.unwrap();
    {
        let rendered = controller.rendered();
        let Body::Kanban { columns, hidden } = &rendered.body else {
            panic!("expected kanban body");
        };
        assert_eq!(*hidden, 1);
        assert!(
            columns
                .iter()
                .all(|c| c.jobs.iter().all(|j| j.id != blocked_id))
        );
    }

    controller.dispatch(Action::Navigate(View::List)).await.unwrap();
    assert!(controller.rendered().rows().iter().any(|j| j.id == blocked_id));

    // Edit only the title; the foreign status label must survive the save.
    controller
        .dispatch(Action::OpenEditForm(blocked_id.clone()))
        .await
        .unwrap();
    type_text(&mut controller, " (chased)").await;
    let outcome = controller.dispatch(Action::SubmitForm).await.unwrap();
    assert_eq!(outcome, Outcome::Reloaded);

    let saved = controller.state().job(&blocked_id).unwrap();
    assert_eq!(saved.title, "Blocked on vendor (chased)");
    assert_eq!(saved.status, JobStatus::Unrecognized("blocked".to_string()));
    let raw = std::fs::read_to_string(dir.join(format!("{blocked_id}.json"))).unwrap();
    assert!(raw.contains("\"status\": \"blocked\""));

    std::fs::remove_dir_all(&dir).unwrap();
}
