//! Schedule-edit simulation
//!
//! Applies proposed edits to a copy of the schedule without touching any
//! service, so a caller can preview an analysis before committing it.

use std::collections::HashMap;

use crate::analysis::ScheduleChangeItem;
use crate::models::{Employee, ScheduleEntry};

/// Return `entries` with `edits` applied in order.
///
/// Replacements are resolved by exact employee name. An edit whose
/// replacement matches nobody is skipped. An edit for a date with no row
/// appends a new row; later edits for the same date win.
pub fn simulate_changes(
    employees: &[Employee],
    entries: &[ScheduleEntry],
    edits: &[ScheduleChangeItem],
) -> Vec<ScheduleEntry> {
    let by_name: HashMap<&str, &str> = employees
        .iter()
        .map(|e| (e.name.as_str(), e.employee_number.as_str()))
        .collect();

    let mut simulated = entries.to_vec();
    for edit in edits {
        let Some(number) = by_name.get(edit.suggested_replacement.as_str()) else {
            continue;
        };
        match simulated.iter_mut().find(|e| e.date == edit.target_date) {
            Some(existing) => existing.first_line_support = number.to_string(),
            None => simulated.push(ScheduleEntry::new(edit.target_date.clone(), *number)),
        }
    }
    simulated
}
