//! Submit Commands
//!
//! Send a request through the pipeline, or preview it without committing.

use serde::{Deserialize, Serialize};
use tracing::info;

use shift_desk_core::{DisplayScheduleEntry, RequestKind, RequestSession, ScheduleChangeItem};

use crate::models::response::CommandResponse;
use crate::services::pipeline::should_reconcile;
use crate::services::reconcile::preview;
use crate::services::snapshot::ScheduleSnapshot;
use crate::state::AppState;

/// Result of a committed submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitOutcome {
    /// `None` when the text was blank and nothing was sent.
    pub session: Option<RequestSession>,
    /// Display rows to show afterwards: the rebuilt rows after an apply,
    /// otherwise the rows loaded before submitting. Empty for blank text.
    pub display: Vec<DisplayScheduleEntry>,
}

/// Result of an uncommitted preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewOutcome {
    pub session: Option<RequestSession>,
    /// Whether committing this analysis would change the schedule.
    pub would_apply: bool,
    pub display: Vec<DisplayScheduleEntry>,
    /// Approved edits whose replacement has registered an absence that day.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub absent_replacements: Vec<ScheduleChangeItem>,
}

impl SubmitOutcome {
    fn blank() -> Self {
        Self {
            session: None,
            display: Vec::new(),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_failed())
    }
}

impl PreviewOutcome {
    fn blank() -> Self {
        Self {
            session: None,
            would_apply: false,
            display: Vec::new(),
            absent_replacements: Vec::new(),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_failed())
    }
}

fn is_blank(text: &str) -> bool {
    if text.trim().is_empty() {
        info!("[Submit] Blank request, nothing sent");
        return true;
    }
    false
}

fn request_kind(freeform: bool) -> RequestKind {
    if freeform {
        RequestKind::Freeform
    } else {
        RequestKind::ScheduleChange
    }
}

/// Submit `text` and commit approved changes.
///
/// Blank text is a no-op: nothing is fetched or sent.
pub async fn submit_request(
    state: &AppState,
    text: &str,
    freeform: bool,
    window: &str,
) -> CommandResponse<SubmitOutcome> {
    if is_blank(text) {
        return CommandResponse::ok(SubmitOutcome::blank());
    }

    let snapshot = match state.load_snapshot(window).await {
        Ok(snapshot) => snapshot,
        Err(e) => return CommandResponse::err(e.to_string()),
    };

    let pipeline = state.pipeline(window);
    let session = if freeform {
        pipeline.submit_text_request(text).await
    } else {
        pipeline.submit_change_request(text).await
    };

    // Only an applied session carries rebuilt rows.
    let display = match session.as_ref().and_then(|s| s.display.clone()) {
        Some(display) => display,
        None => snapshot.display,
    };

    CommandResponse::ok(SubmitOutcome { session, display })
}

/// Analyze `text` and show what an approval would do, without committing.
pub async fn preview_request(
    state: &AppState,
    text: &str,
    freeform: bool,
    window: &str,
) -> CommandResponse<PreviewOutcome> {
    if is_blank(text) {
        return CommandResponse::ok(PreviewOutcome::blank());
    }

    let snapshot = match state.load_snapshot(window).await {
        Ok(snapshot) => snapshot,
        Err(e) => return CommandResponse::err(e.to_string()),
    };

    let session = state
        .pipeline(window)
        .analyze_only(text, request_kind(freeform))
        .await;

    CommandResponse::ok(preview_outcome(&snapshot, session))
}

fn preview_outcome(
    snapshot: &ScheduleSnapshot,
    session: Option<RequestSession>,
) -> PreviewOutcome {
    let edits = session
        .as_ref()
        .and_then(|s| s.response.as_ref())
        .filter(|response| should_reconcile(response))
        .and_then(|response| response.as_schedule_change())
        .map(|analysis| analysis.changes.as_slice());

    match edits {
        Some(edits) => PreviewOutcome {
            display: preview(snapshot, edits),
            would_apply: true,
            absent_replacements: absent_replacements(snapshot, edits),
            session,
        },
        None => PreviewOutcome {
            display: snapshot.display.clone(),
            would_apply: false,
            absent_replacements: Vec::new(),
            session,
        },
    }
}

fn absent_replacements(
    snapshot: &ScheduleSnapshot,
    edits: &[ScheduleChangeItem],
) -> Vec<ScheduleChangeItem> {
    edits
        .iter()
        .filter(|edit| {
            snapshot.employees.iter().any(|e| {
                e.name == edit.suggested_replacement && e.is_absent_on(&edit.target_date)
            })
        })
        .cloned()
        .collect()
}
