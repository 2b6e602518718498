//! CLI Commands
//!
//! Handlers behind each `shift-desk` subcommand. Every handler returns a
//! [`crate::models::CommandResponse`] that the binary prints as JSON.

pub mod schedule;
pub mod settings;
pub mod submit;

pub use schedule::*;
pub use settings::*;
pub use submit::*;
