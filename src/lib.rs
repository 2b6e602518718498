//! Shift Desk
//!
//! Submit free-text shift-change requests to the scheduling service's
//! analysis endpoint, commit approved edits, and rebuild the displayed
//! schedule. It includes:
//! - The request pipeline and reconciliation step
//! - Schedule snapshot loading
//! - JSON config storage
//! - CLI command handlers and logging setup

pub mod commands;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use commands::{
    // Submit commands
    preview_request, submit_request,
    // Schedule commands
    show_schedule,
    // Settings commands
    get_settings, reset_settings, update_settings,
};
pub use models::response::*;
pub use models::settings::{AppConfig, SettingsUpdate};
pub use services::{should_reconcile, RequestPipeline, Reconciler, ScheduleSnapshot};
pub use state::AppState;
pub use storage::ConfigService;
pub use utils::error::{AppError, AppResult};
