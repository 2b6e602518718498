//! Shift Desk Core
//!
//! Foundational types for the Shift Desk workspace: the schedule data model,
//! the identity join, the analysis response model and its validation boundary,
//! request session state, and the traits behind which the external services
//! sit. This crate performs no I/O of its own.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `models` - Employees, schedule rows, display rows, rules
//! - `joiner` - Identity Joiner (`join`, `UNKNOWN_EMPLOYEE`)
//! - `analysis` - Closed `AnalysisResponse` union and payload narrowing
//! - `session` - `RequestSession` status machine
//! - `collaborators` - `ScheduleSource`, `TextAnalyzer`, `ChangeApplier`
//! - `simulate` - Offline preview of proposed edits

pub mod analysis;
pub mod collaborators;
pub mod error;
pub mod joiner;
pub mod models;
pub mod session;
pub mod simulate;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Data Model ─────────────────────────────────────────────────────────
pub use models::{DisplayScheduleEntry, Employee, Rules, ScheduleEntry};

// ── Identity Join ──────────────────────────────────────────────────────
pub use joiner::{join, UNKNOWN_EMPLOYEE};

// ── Analysis Responses ─────────────────────────────────────────────────
pub use analysis::{
    AnalysisKind, AnalysisResponse, BaseAnalysis, ComplaintAnalysis, Recommendation,
    ScheduleChangeAnalysis, ScheduleChangeItem,
};

// ── Sessions ───────────────────────────────────────────────────────────
pub use session::{RequestSession, SessionStatus, GENERIC_FAILURE_MESSAGE};

// ── Collaborators ──────────────────────────────────────────────────────
pub use collaborators::{
    AnalysisRequest, ApplyAck, ApplyInput, ChangeApplier, RequestKind, ScheduleSource,
    TextAnalyzer,
};

// ── Simulation ─────────────────────────────────────────────────────────
pub use simulate::simulate_changes;
