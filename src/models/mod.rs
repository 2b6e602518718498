//! Data Models
//!
//! Application-level data structures. Schedule and analysis types live in
//! `shift_desk_core`.

pub mod response;
pub mod settings;

pub use response::*;
pub use settings::*;
