//! Schedule Data Model
//!
//! Employees, raw schedule rows, display rows and the scheduling rules, in the
//! wire shape the scheduling service exchanges (`snake_case`, dates as
//! `YYYY-MM-DD` strings).

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, CoreResult};

/// A staff member who can be scheduled for first-line support.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    /// Unique key; schedule rows reference employees by this number.
    pub employee_number: String,
    #[serde(default)]
    pub first_line_support_count: u32,
    #[serde(default)]
    pub known_absences: BTreeSet<String>,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl Employee {
    /// Create an employee with no absences and empty metadata.
    pub fn new(name: impl Into<String>, employee_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            employee_number: employee_number.into(),
            first_line_support_count: 0,
            known_absences: BTreeSet::new(),
            metadata: HashMap::new(),
        }
    }

    /// Whether the employee has registered an absence on `date`.
    pub fn is_absent_on(&self, date: &str) -> bool {
        self.known_absences.contains(date)
    }
}

/// One day of the schedule. `first_line_support` is a lookup key into the
/// employee set and may point at nobody.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub date: String,
    pub first_line_support: String,
}

impl ScheduleEntry {
    pub fn new(date: impl Into<String>, first_line_support: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            first_line_support: first_line_support.into(),
        }
    }
}

/// A schedule row annotated with the resolved employee name.
///
/// `employee_name` is derived and never persisted; it is always a readable
/// name or [`crate::joiner::UNKNOWN_EMPLOYEE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayScheduleEntry {
    #[serde(flatten)]
    pub entry: ScheduleEntry,
    pub employee_name: String,
}

impl DisplayScheduleEntry {
    pub fn date(&self) -> &str {
        &self.entry.date
    }

    pub fn first_line_support(&self) -> &str {
        &self.entry.first_line_support
    }
}

/// Read-only scheduling rules. Shown to staff; the analysis service is
/// trusted to have applied them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    #[serde(default = "default_max_days_per_week")]
    pub max_days_per_week: u32,
    #[serde(default = "default_preferred_balance")]
    pub preferred_balance: f64,
}

fn default_max_days_per_week() -> u32 {
    3
}

fn default_preferred_balance() -> f64 {
    0.2
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_days_per_week: default_max_days_per_week(),
            preferred_balance: default_preferred_balance(),
        }
    }
}

impl Rules {
    /// Check the rule bounds: at least one day per week, balance in `[0, 1]`.
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_days_per_week == 0 {
            return Err(CoreError::validation(
                "max_days_per_week must be a positive integer",
            ));
        }
        if !(0.0..=1.0).contains(&self.preferred_balance) {
            return Err(CoreError::validation(format!(
                "preferred_balance must be within [0, 1], got {}",
                self.preferred_balance
            )));
        }
        Ok(())
    }
}
