//! Reconciliation
//!
//! Commits approved edits through the [`ChangeApplier`] and rebuilds display
//! rows from a fresh fetch. Display rows are never patched locally.

use std::sync::Arc;

use tracing::{debug, info};

use shift_desk_core::{
    join, simulate_changes, ApplyInput, ChangeApplier, CoreError, CoreResult,
    DisplayScheduleEntry, ScheduleChangeItem, ScheduleSource,
};

use crate::services::snapshot::ScheduleSnapshot;

pub struct Reconciler {
    source: Arc<dyn ScheduleSource>,
    applier: Arc<dyn ChangeApplier>,
    window: String,
}

impl Reconciler {
    pub fn new(
        source: Arc<dyn ScheduleSource>,
        applier: Arc<dyn ChangeApplier>,
        window: impl Into<String>,
    ) -> Self {
        Self {
            source,
            applier,
            window: window.into(),
        }
    }

    pub fn window(&self) -> &str {
        &self.window
    }

    /// Commit `edits` as one batch, then re-fetch and re-join the window.
    ///
    /// No retry on failure; the applier owns any retry policy.
    pub async fn apply(
        &self,
        edits: &[ScheduleChangeItem],
    ) -> CoreResult<Vec<DisplayScheduleEntry>> {
        if edits.is_empty() {
            return Err(CoreError::validation("no schedule changes to apply"));
        }

        let ack = self
            .applier
            .apply_changes(ApplyInput::Edits(edits.to_vec()))
            .await?;
        info!("[Reconcile] {} edits committed: {}", edits.len(), ack.message);

        let (employees, entries) = tokio::try_join!(
            self.source.fetch_employees(),
            self.source.fetch_schedules(&self.window)
        )?;
        debug!(
            "[Reconcile] Re-fetched {} rows for {}",
            entries.len(),
            self.window
        );

        Ok(join(&employees, &entries))
    }
}

/// Display rows as they would look after `edits`, without committing anything.
pub fn preview(
    snapshot: &ScheduleSnapshot,
    edits: &[ScheduleChangeItem],
) -> Vec<DisplayScheduleEntry> {
    let entries = simulate_changes(&snapshot.employees, &snapshot.entries, edits);
    join(&snapshot.employees, &entries)
}
