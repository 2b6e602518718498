//! Analysis Response Model
//!
//! The closed set of shapes the text-analysis service may answer with, and
//! the validation boundary that narrows a raw JSON payload into exactly one of
//! them.
//!
//! ## Wire format
//!
//! Every payload carries a `type` discriminant plus the shared fields
//! `thoughts`, `original_query`, `response` and `reasoning`:
//!
//! ```json
//! {
//!   "type": "schedulechange",
//!   "thoughts": "...", "original_query": "...", "response": "...", "reasoning": "...",
//!   "recommendation": "approve",
//!   "changes": [
//!     {"employee_name": "Bob", "target_date": "2024-01-05", "suggested_replacement": "Carol"}
//!   ]
//! }
//! ```
//!
//! Unknown extra fields are ignored. Missing required fields, an unknown
//! `type`, or a `recommendation` outside `approve | deny | discuss` are
//! rejected with [`CoreError::MalformedResponse`]; nothing is defaulted.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, CoreResult};

/// The four discriminant values accepted in the `type` field.
pub const ANALYSIS_TYPES: [&str; 4] = ["question", "other", "complaint", "schedulechange"];

/// Fields shared by every analysis variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseAnalysis {
    pub thoughts: String,
    pub original_query: String,
    pub response: String,
    pub reasoning: String,
}

/// A complaint analysis. The service may attach a proposal for a manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintAnalysis {
    #[serde(flatten)]
    pub base: BaseAnalysis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution_proposal: Option<String>,
}

/// Proposed, not yet committed, edit to one schedule day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleChangeItem {
    /// Employee currently scheduled for `target_date`.
    pub employee_name: String,
    /// `YYYY-MM-DD`
    pub target_date: String,
    /// Name of the employee proposed to take over the day.
    pub suggested_replacement: String,
}

/// What the service recommends doing with the proposed edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Approve,
    Deny,
    Discuss,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Approve => "approve",
            Recommendation::Deny => "deny",
            Recommendation::Discuss => "discuss",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A schedule-change analysis: ordered edits plus a recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleChangeAnalysis {
    #[serde(flatten)]
    pub base: BaseAnalysis,
    pub changes: Vec<ScheduleChangeItem>,
    pub recommendation: Recommendation,
    /// Reason for the change as extracted from the request, when stated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ScheduleChangeAnalysis {
    /// Approved and carrying at least one edit.
    pub fn is_actionable(&self) -> bool {
        self.recommendation == Recommendation::Approve && !self.changes.is_empty()
    }
}

/// Discriminant of an [`AnalysisResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisKind {
    Question,
    Other,
    Complaint,
    ScheduleChange,
}

impl AnalysisKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::Question => "question",
            AnalysisKind::Other => "other",
            AnalysisKind::Complaint => "complaint",
            AnalysisKind::ScheduleChange => "schedulechange",
        }
    }
}

/// A validated response from the text-analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnalysisResponse {
    Question(BaseAnalysis),
    Other(BaseAnalysis),
    Complaint(ComplaintAnalysis),
    #[serde(rename = "schedulechange")]
    ScheduleChange(ScheduleChangeAnalysis),
}

impl AnalysisResponse {
    /// Narrow a raw payload into exactly one variant.
    pub fn from_value(payload: Value) -> CoreResult<Self> {
        let tag = match payload.get("type") {
            None => return Err(CoreError::malformed("missing `type` discriminant")),
            Some(Value::String(tag)) => tag.as_str(),
            Some(other) => {
                return Err(CoreError::malformed(format!(
                    "`type` must be a string, got {}",
                    other
                )))
            }
        };
        if !ANALYSIS_TYPES.contains(&tag) {
            return Err(CoreError::malformed(format!("unknown analysis type `{}`", tag)));
        }
        serde_json::from_value(payload).map_err(|e| CoreError::malformed(e.to_string()))
    }

    /// Parse and narrow a JSON document.
    pub fn from_json_str(raw: &str) -> CoreResult<Self> {
        let payload: Value =
            serde_json::from_str(raw).map_err(|e| CoreError::malformed(e.to_string()))?;
        Self::from_value(payload)
    }

    pub fn kind(&self) -> AnalysisKind {
        match self {
            AnalysisResponse::Question(_) => AnalysisKind::Question,
            AnalysisResponse::Other(_) => AnalysisKind::Other,
            AnalysisResponse::Complaint(_) => AnalysisKind::Complaint,
            AnalysisResponse::ScheduleChange(_) => AnalysisKind::ScheduleChange,
        }
    }

    /// Shared fields, available for every variant.
    pub fn base(&self) -> &BaseAnalysis {
        match self {
            AnalysisResponse::Question(base) | AnalysisResponse::Other(base) => base,
            AnalysisResponse::Complaint(c) => &c.base,
            AnalysisResponse::ScheduleChange(s) => &s.base,
        }
    }

    pub fn as_schedule_change(&self) -> Option<&ScheduleChangeAnalysis> {
        match self {
            AnalysisResponse::ScheduleChange(s) => Some(s),
            _ => None,
        }
    }

    /// Only schedule-change analyses carry a recommendation.
    pub fn recommendation(&self) -> Option<Recommendation> {
        self.as_schedule_change().map(|s| s.recommendation)
    }
}
