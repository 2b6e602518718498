//! Storage Layer
//!
//! JSON config persistence. Schedule data lives in the scheduling service.

pub mod config;

pub use config::*;
