//! Collaborator Traits
//!
//! The three external services the request pipeline talks to. Implementations
//! live outside this crate (the HTTP client crate, test mocks); the pipeline
//! only ever sees `Arc<dyn Trait>`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::ScheduleChangeItem;
use crate::error::CoreResult;
use crate::models::{Employee, Rules, ScheduleEntry};

/// Read-only access to employees, schedules and rules.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    async fn fetch_employees(&self) -> CoreResult<Vec<Employee>>;

    /// Schedule rows for the week containing `week_start` (`YYYY-MM-DD`).
    /// Week boundaries are the source's business.
    async fn fetch_schedules(&self, week_start: &str) -> CoreResult<Vec<ScheduleEntry>>;

    async fn fetch_rules(&self) -> CoreResult<Rules>;
}

/// Which submission entry point produced a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// Explicit "schedule change request" form.
    ScheduleChange,
    /// Free text that the service classifies itself.
    Freeform,
}

/// Input to the text-analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub request_text: String,
    #[serde(skip)]
    pub kind: RequestKind,
}

impl Default for RequestKind {
    fn default() -> Self {
        Self::Freeform
    }
}

impl AnalysisRequest {
    pub fn new(request_text: impl Into<String>, kind: RequestKind) -> Self {
        Self {
            request_text: request_text.into(),
            kind,
        }
    }
}

/// The text-analysis service.
///
/// Returns the raw decoded payload. Narrowing it into an
/// [`crate::analysis::AnalysisResponse`] is the caller's job, so a payload that
/// fails validation is distinguishable from a transport failure.
#[async_trait]
pub trait TextAnalyzer: Send + Sync {
    async fn analyze_text(&self, request: &AnalysisRequest) -> CoreResult<Value>;
}

/// What to commit through the persistence service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyInput {
    /// Let the service re-analyze the text and apply its own verdict.
    RequestText(String),
    /// Commit these already-approved edits as one batch.
    Edits(Vec<ScheduleChangeItem>),
}

impl ApplyInput {
    pub fn edit_count(&self) -> usize {
        match self {
            ApplyInput::RequestText(_) => 0,
            ApplyInput::Edits(edits) => edits.len(),
        }
    }
}

/// Acknowledgement returned by the persistence service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyAck {
    pub message: String,
}

/// The persistence service. Idempotency, if needed, is its responsibility.
#[async_trait]
pub trait ChangeApplier: Send + Sync {
    async fn apply_changes(&self, input: ApplyInput) -> CoreResult<ApplyAck>;
}
