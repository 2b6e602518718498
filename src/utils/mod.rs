//! Utilities
//!
//! Error types, path helpers and logging setup.

pub mod error;
pub mod logging;
pub mod paths;

pub use error::{AppError, AppResult};
