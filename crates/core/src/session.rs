//! Request Session State
//!
//! One session per submitted text. The status machine is
//!
//! ```text
//! submitted ──> analyzed ──> applying ──> applied
//!     │             │            │
//!     └─────────────┴────────────┴──────> failed
//! ```
//!
//! `analyzed` is also terminal when the analysis does not warrant an apply.
//! Sessions are never persisted.

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisResponse;
use crate::error::{CoreError, CoreResult};
use crate::models::DisplayScheduleEntry;

/// The single message shown to staff for any failed session.
pub const GENERIC_FAILURE_MESSAGE: &str = "We could not process your request. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Submitted,
    Analyzed,
    Applying,
    Applied,
    Failed,
}

impl SessionStatus {
    /// Whether the machine permits moving from `self` to `next`.
    pub fn can_transition_to(&self, next: SessionStatus) -> bool {
        use SessionStatus::*;
        matches!(
            (self, next),
            (Submitted, Analyzed)
                | (Submitted, Failed)
                | (Analyzed, Applying)
                | (Analyzed, Failed)
                | (Applying, Applied)
                | (Applying, Failed)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Applied | SessionStatus::Failed)
    }
}

/// Lifecycle record of one submitted request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestSession {
    pub request_text: String,
    pub status: SessionStatus,
    /// Every status the session has been in, oldest first.
    pub history: Vec<SessionStatus>,
    /// Present only once the analysis passed validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<AnalysisResponse>,
    /// Fresh display rows after a successful reconciliation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<Vec<DisplayScheduleEntry>>,
    /// User-facing failure message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Underlying cause of a failure, for logs and diagnostics only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl RequestSession {
    /// Open a session in `submitted`.
    pub fn new(request_text: impl Into<String>) -> Self {
        Self {
            request_text: request_text.into(),
            status: SessionStatus::Submitted,
            history: vec![SessionStatus::Submitted],
            response: None,
            display: None,
            error: None,
            detail: None,
        }
    }

    fn transition(&mut self, next: SessionStatus) -> CoreResult<()> {
        if self.status.is_terminal() {
            return Err(CoreError::internal(format!(
                "session already finished as {:?}, cannot move to {:?}",
                self.status, next
            )));
        }
        if !self.status.can_transition_to(next) {
            return Err(CoreError::internal(format!(
                "invalid session transition {:?} -> {:?}",
                self.status, next
            )));
        }
        self.status = next;
        self.history.push(next);
        Ok(())
    }

    /// Record a validated analysis.
    pub fn mark_analyzed(&mut self, response: AnalysisResponse) -> CoreResult<()> {
        self.transition(SessionStatus::Analyzed)?;
        self.response = Some(response);
        Ok(())
    }

    pub fn mark_applying(&mut self) -> CoreResult<()> {
        self.transition(SessionStatus::Applying)
    }

    /// Record the display state rebuilt after committing edits.
    pub fn mark_applied(&mut self, display: Vec<DisplayScheduleEntry>) -> CoreResult<()> {
        self.transition(SessionStatus::Applied)?;
        self.display = Some(display);
        Ok(())
    }

    /// Fail the session with the generic message, keeping `cause` as detail.
    pub fn mark_failed(&mut self, cause: &CoreError) -> CoreResult<()> {
        self.transition(SessionStatus::Failed)?;
        self.error = Some(GENERIC_FAILURE_MESSAGE.to_string());
        self.detail = Some(cause.to_string());
        Ok(())
    }

    pub fn is_failed(&self) -> bool {
        self.status == SessionStatus::Failed
    }
}
