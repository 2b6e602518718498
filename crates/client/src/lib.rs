//! Shift Desk Client
//!
//! HTTP implementations of the collaborator traits defined in
//! `shift-desk-core`, backed by the scheduling service's REST API:
//! - `ScheduleSource` (employees, schedules, rules)
//! - `TextAnalyzer` (structured and freeform request analysis)
//! - `ChangeApplier` (commit approved edits)
//!
//! Also includes the HTTP client factory and status-code error mapping.

pub mod error;
pub mod http_client;
pub mod scheduling;

pub use error::{parse_http_error, ApiError, ApiResult};
pub use http_client::build_http_client;
pub use scheduling::{unwrap_analysis_envelope, SchedulingApiClient};
