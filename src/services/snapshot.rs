//! Schedule Snapshot
//!
//! The caller-owned "current state": employees, the window's schedule rows,
//! rules, and the joined display rows. A snapshot is never patched in place;
//! after a reconciliation the caller reloads it so staff, rules and rows
//! stay consistent with each other.

use serde::Serialize;
use tracing::{debug, warn};

use shift_desk_core::{
    join, CoreResult, DisplayScheduleEntry, Employee, Rules, ScheduleEntry, ScheduleSource,
};

/// Today's local date as `YYYY-MM-DD`, the default display window.
pub fn today_window() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleSnapshot {
    /// Any date inside the displayed week.
    pub window: String,
    pub employees: Vec<Employee>,
    pub entries: Vec<ScheduleEntry>,
    pub rules: Rules,
    pub display: Vec<DisplayScheduleEntry>,
}

impl ScheduleSnapshot {
    pub fn from_parts(
        window: impl Into<String>,
        employees: Vec<Employee>,
        entries: Vec<ScheduleEntry>,
        rules: Rules,
    ) -> Self {
        let display = join(&employees, &entries);
        Self {
            window: window.into(),
            employees,
            entries,
            rules,
            display,
        }
    }

    /// Fetch employees, schedules and rules concurrently and join them.
    pub async fn load(source: &dyn ScheduleSource, window: impl Into<String>) -> CoreResult<Self> {
        let window = window.into();
        let (employees, entries, rules) = tokio::try_join!(
            source.fetch_employees(),
            source.fetch_schedules(&window),
            source.fetch_rules()
        )?;

        // Rules are shown, not enforced; out-of-range values are only reported.
        if let Err(e) = rules.validate() {
            warn!("[Snapshot] Service returned questionable rules: {}", e);
        }

        debug!(
            "[Snapshot] Loaded {} employees, {} rows for {}",
            employees.len(),
            entries.len(),
            window
        );
        Ok(Self::from_parts(window, employees, entries, rules))
    }

    /// A fresh snapshot of the same window.
    pub async fn reload(&self, source: &dyn ScheduleSource) -> CoreResult<Self> {
        Self::load(source, self.window.clone()).await
    }
}
