//! Services
//!
//! Request pipeline, reconciliation and snapshot loading.
//! Services hold the business logic and are called by commands.

pub mod pipeline;
pub mod reconcile;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod testing;

pub use pipeline::{should_reconcile, RequestPipeline};
pub use reconcile::{preview, Reconciler};
pub use snapshot::{today_window, ScheduleSnapshot};
