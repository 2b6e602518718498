//! Snapshot Lifecycle Integration Tests
//!
//! The caller loads a snapshot, previews or submits a request, and reloads
//! its snapshot after a successful reconciliation.

use shift_desk::models::AppConfig;
use shift_desk::services::preview;
use shift_desk::{submit_request, AppState, ScheduleSnapshot};
use shift_desk_core::{join, Employee, RequestKind, ScheduleChangeItem, SessionStatus};

use crate::support::{schedule_change, Backend, FixedAnalyzer};

#[tokio::test]
async fn test_snapshot_reloaded_after_apply() {
    let backend = Backend::office();
    let analyzer = FixedAnalyzer::returning(schedule_change(
        "approve",
        &[("Alice", "2024-01-05", "Carol")],
    ));
    let state = AppState::with_collaborators(
        AppConfig::default(),
        backend.clone(),
        analyzer,
        backend.clone(),
    );

    let before = state.load_snapshot("2024-01-05").await.unwrap();
    let session = state
        .pipeline("2024-01-05")
        .submit_change_request("switch my Friday shift")
        .await
        .unwrap();
    assert_eq!(session.status, SessionStatus::Applied);

    let after = before.reload(backend.as_ref()).await.unwrap();

    assert_eq!(before.display[0].employee_name, "Alice");
    assert_eq!(after.display, session.display.unwrap());
    assert_eq!(after.display[0].employee_name, "Carol");
}

#[tokio::test]
async fn test_reloaded_snapshot_previews_against_new_staff() {
    let backend = Backend::office();
    let analyzer = FixedAnalyzer::returning(schedule_change(
        "approve",
        &[("Alice", "2024-01-05", "Carol")],
    ));
    let state = AppState::with_collaborators(
        AppConfig::default(),
        backend.clone(),
        analyzer,
        backend.clone(),
    );
    let before = state.load_snapshot("2024-01-05").await.unwrap();

    // Staff hired between the first load and the commit.
    backend
        .employees
        .lock()
        .unwrap()
        .push(Employee::new("Dave", "E4"));
    state
        .pipeline("2024-01-05")
        .submit_change_request("switch my Friday shift")
        .await
        .unwrap();
    let after = before.reload(backend.as_ref()).await.unwrap();

    let edits = vec![ScheduleChangeItem {
        employee_name: "Carol".to_string(),
        target_date: "2024-01-06".to_string(),
        suggested_replacement: "Dave".to_string(),
    }];
    let previewed = preview(&after, &edits);

    assert_eq!(previewed[1].employee_name, "Dave");
    assert_eq!(previewed[1].first_line_support(), "E4");
    assert_eq!(preview(&before, &edits)[1].employee_name, "Bob");
}

#[tokio::test]
async fn test_preview_matches_committed_result() {
    let backend = Backend::office();
    let edits_payload = schedule_change(
        "approve",
        &[("Alice", "2024-01-05", "Carol"), ("Carol", "2024-01-09", "Bob")],
    );
    let state = AppState::with_collaborators(
        AppConfig::default(),
        backend.clone(),
        FixedAnalyzer::returning(edits_payload),
        backend.clone(),
    );
    let snapshot = ScheduleSnapshot::load(backend.as_ref(), "2024-01-05")
        .await
        .unwrap();

    let analyzed = state
        .pipeline("2024-01-05")
        .analyze_only("switch my Friday shift", RequestKind::ScheduleChange)
        .await
        .unwrap();
    let edits = analyzed
        .response
        .as_ref()
        .and_then(|r| r.as_schedule_change())
        .map(|a| a.changes.clone())
        .unwrap();
    let previewed = preview(&snapshot, &edits);
    assert_eq!(backend.apply_count(), 0);

    let response = submit_request(&state, "switch my Friday shift", false, "2024-01-05").await;
    let committed = response.data.unwrap().display;

    assert_eq!(previewed, committed);
}

#[tokio::test]
async fn test_join_of_loaded_snapshot_is_stable() {
    let backend = Backend::office();
    let snapshot = ScheduleSnapshot::load(backend.as_ref(), "2024-01-05")
        .await
        .unwrap();

    let rejoined = join(&snapshot.employees, &snapshot.entries);

    assert_eq!(rejoined, snapshot.display);
}
