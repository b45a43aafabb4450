//! Property-based tests for view rendering.
//!
//! Uses proptest to verify:
//! 1. The list view shows exactly the jobs passing the search filter.
//! 2. Every recognized job lands in exactly one kanban column, and the
//!    column counts plus the hidden count add up to the filtered total.
//! 3. The summary counts ignore the search filter.
//! 4. The dashboard never exceeds its limit.
//! 5. Sorting by due date puts every dated job before every undated one.

use jobboard::state::{View, sort_by_due};
use jobboard::view::{Body, Column, render};
use jobboard_model::{Job, JobStatus};
use proptest::prelude::*;

fn arb_status() -> impl Strategy<Value = JobStatus> {
    prop_oneof![
        Just(JobStatus::Todo),
        Just(JobStatus::InProgress),
        Just(JobStatus::Review),
        Just(JobStatus::Done),
        "[a-z]{3,8}".prop_map(JobStatus::from),
    ]
}

fn arb_due() -> impl Strategy<Value = String> {
    prop_oneof![
        (2020u32..2030, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| format!("{y}-{m:02}-{d:02}")),
        Just("soon".to_string()),
        Just(String::new()),
    ]
}

fn arb_job() -> impl Strategy<Value = Job> {
    (
        "[A-Za-z ]{1,16}",
        arb_status(),
        arb_due(),
        prop::collection::vec("[a-z]{1,6}", 0..3),
    )
        .prop_map(|(title, status, due, tags)| {
            let mut job = Job::new(title, due);
            job.status = status;
            job.tags = tags;
            job
        })
}

fn arb_jobs() -> impl Strategy<Value = Vec<Job>> {
    prop::collection::vec(arb_job(), 0..24)
}

proptest! {
    #[test]
    fn list_shows_exactly_matching_jobs(jobs in arb_jobs(), needle in "[a-z]{0,3}") {
        let rendered = render(&jobs, &needle, View::List, 5);
        let shown: Vec<_> = rendered.rows().iter().map(|j| j.id.clone()).collect();
        let expected: Vec<_> = jobs
            .iter()
            .filter(|j| j.matches(&needle))
            .map(|j| j.id.clone())
            .collect();
        prop_assert_eq!(shown, expected);
    }

    #[test]
    fn kanban_buckets_each_recognized_job_once(jobs in arb_jobs(), needle in "[a-z]{0,2}") {
        let rendered = render(&jobs, &needle, View::Kanban, 5);
        let Body::Kanban { columns, hidden } = &rendered.body else {
            return Err(TestCaseError::fail("expected kanban body"));
        };
        let visible: Vec<&Job> = jobs.iter().filter(|j| j.matches(&needle)).collect();

        prop_assert_eq!(columns.len(), JobStatus::BOARD.len());
        for column in columns {
            prop_assert!(column.jobs.iter().all(|j| j.status == column.status));
        }
        let placed: usize = columns.iter().map(Column::count).sum();
        prop_assert_eq!(placed + hidden, visible.len());
        prop_assert_eq!(
            *hidden,
            visible.iter().filter(|j| !j.status.is_recognized()).count()
        );
    }

    #[test]
    fn summary_ignores_filter(jobs in arb_jobs(), needle in "[a-z]{0,3}") {
        let unfiltered = render(&jobs, "", View::Dashboard, 5).summary;
        for view in View::ALL {
            prop_assert_eq!(render(&jobs, &needle, view, 5).summary, unfiltered);
        }
        prop_assert_eq!(unfiltered.total, jobs.len());
        prop_assert!(unfiltered.active + unfiltered.completed + unfiltered.pending <= jobs.len());
    }

    #[test]
    fn dashboard_respects_limit(jobs in arb_jobs(), limit in 0usize..8) {
        let rendered = render(&jobs, "", View::Dashboard, limit);
        prop_assert_eq!(rendered.card_count(), jobs.len().min(limit));
        prop_assert_eq!(rendered.empty_message().is_some(), jobs.is_empty() || limit == 0);
    }

    #[test]
    fn sort_puts_dated_jobs_first(mut jobs in arb_jobs()) {
        sort_by_due(&mut jobs);
        let first_undated = jobs.iter().position(|j| j.due().is_none()).unwrap_or(jobs.len());
        prop_assert!(jobs[first_undated..].iter().all(|j| j.due().is_none()));
        let dated: Vec<_> = jobs[..first_undated].iter().filter_map(Job::due).collect();
        prop_assert!(dated.windows(2).all(|w| w[0] <= w[1]));
    }
}
