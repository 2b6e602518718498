//! Identity Joiner
//!
//! Attaches a readable employee name to raw schedule rows.

use std::collections::HashMap;

use crate::models::{DisplayScheduleEntry, Employee, ScheduleEntry};

/// Name shown for rows whose `first_line_support` matches no employee.
pub const UNKNOWN_EMPLOYEE: &str = "Unknown Employee";

/// Join schedule rows against the employee set.
///
/// Output has exactly one row per input row, in input order. Unresolved
/// references degrade to [`UNKNOWN_EMPLOYEE`]. An employee with an empty name
/// also renders as the sentinel so display rows are never blank.
pub fn join(employees: &[Employee], entries: &[ScheduleEntry]) -> Vec<DisplayScheduleEntry> {
    let by_number: HashMap<&str, &str> = employees
        .iter()
        .map(|e| (e.employee_number.as_str(), e.name.as_str()))
        .collect();

    entries
        .iter()
        .map(|entry| {
            let employee_name = by_number
                .get(entry.first_line_support.as_str())
                .filter(|name| !name.trim().is_empty())
                .map(|name| name.to_string())
                .unwrap_or_else(|| UNKNOWN_EMPLOYEE.to_string());
            DisplayScheduleEntry {
                entry: entry.clone(),
                employee_name,
            }
        })
        .collect()
}
