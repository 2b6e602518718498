//! Schedule Commands

use crate::models::response::CommandResponse;
use crate::services::snapshot::ScheduleSnapshot;
use crate::state::AppState;

/// Load and join the schedule for the week containing `window`.
pub async fn show_schedule(state: &AppState, window: &str) -> CommandResponse<ScheduleSnapshot> {
    state.load_snapshot(window).await.into()
}
