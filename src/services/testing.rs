//! In-memory collaborators for service tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use shift_desk_core::{
    simulate_changes, AnalysisRequest, ApplyAck, ApplyInput, ChangeApplier, CoreError,
    CoreResult, Employee, Rules, ScheduleEntry, ScheduleSource, TextAnalyzer,
};

/// Schedule service backed by vectors; `fail_with` makes every fetch fail.
pub struct MockSource {
    pub employees: Mutex<Vec<Employee>>,
    pub entries: Mutex<Vec<ScheduleEntry>>,
    pub fail_with: Mutex<Option<String>>,
    pub schedule_fetches: AtomicUsize,
    pub windows: Mutex<Vec<String>>,
}

impl MockSource {
    pub fn new(employees: Vec<Employee>, entries: Vec<ScheduleEntry>) -> Self {
        Self {
            employees: Mutex::new(employees),
            entries: Mutex::new(entries),
            fail_with: Mutex::new(None),
            schedule_fetches: AtomicUsize::new(0),
            windows: Mutex::new(Vec::new()),
        }
    }

    /// Alice (E1) covers 2024-01-05; Bob (E2) and Carol (E3) are free.
    pub fn office() -> Self {
        Self::new(
            vec![
                Employee::new("Alice", "E1"),
                Employee::new("Bob", "E2"),
                Employee::new("Carol", "E3"),
            ],
            vec![ScheduleEntry::new("2024-01-05", "E1")],
        )
    }

    pub fn fail(&self, message: &str) {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
    }

    fn check(&self) -> CoreResult<()> {
        match self.fail_with.lock().unwrap().as_ref() {
            Some(message) => Err(CoreError::fetch(message.clone())),
            None => Ok(()),
        }
    }

    pub fn schedule_fetch_count(&self) -> usize {
        self.schedule_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScheduleSource for MockSource {
    async fn fetch_employees(&self) -> CoreResult<Vec<Employee>> {
        self.check()?;
        Ok(self.employees.lock().unwrap().clone())
    }

    async fn fetch_schedules(&self, week_start: &str) -> CoreResult<Vec<ScheduleEntry>> {
        self.check()?;
        self.schedule_fetches.fetch_add(1, Ordering::SeqCst);
        self.windows.lock().unwrap().push(week_start.to_string());
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn fetch_rules(&self) -> CoreResult<Rules> {
        self.check()?;
        Ok(Rules::default())
    }
}

/// Analyzer that pops scripted payloads in order.
pub struct MockAnalyzer {
    pub responses: Mutex<Vec<CoreResult<Value>>>,
    pub requests: Mutex<Vec<AnalysisRequest>>,
}

impl MockAnalyzer {
    pub fn new(responses: Vec<CoreResult<Value>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_payload(payload: Value) -> Self {
        Self::new(vec![Ok(payload)])
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl TextAnalyzer for MockAnalyzer {
    async fn analyze_text(&self, request: &AnalysisRequest) -> CoreResult<Value> {
        self.requests.lock().unwrap().push(request.clone());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Err(CoreError::fetch("No more mock responses available"))
        } else {
            responses.remove(0)
        }
    }
}

/// Applier that writes approved edits into the shared [`MockSource`].
pub struct MockApplier {
    pub source: Arc<MockSource>,
    pub fail_with: Mutex<Option<String>>,
    pub inputs: Mutex<Vec<ApplyInput>>,
}

impl MockApplier {
    pub fn new(source: Arc<MockSource>) -> Self {
        Self {
            source,
            fail_with: Mutex::new(None),
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn fail(&self, message: &str) {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
    }

    pub fn call_count(&self) -> usize {
        self.inputs.lock().unwrap().len()
    }
}

#[async_trait]
impl ChangeApplier for MockApplier {
    async fn apply_changes(&self, input: ApplyInput) -> CoreResult<ApplyAck> {
        self.inputs.lock().unwrap().push(input.clone());
        if let Some(message) = self.fail_with.lock().unwrap().as_ref() {
            return Err(CoreError::apply(message.clone()));
        }
        if let ApplyInput::Edits(edits) = &input {
            let employees = self.source.employees.lock().unwrap().clone();
            let mut entries = self.source.entries.lock().unwrap();
            *entries = simulate_changes(&employees, &entries, edits);
        }
        Ok(ApplyAck {
            message: format!("{} edits committed", input.edit_count()),
        })
    }
}

/// A `schedulechange` payload swapping Alice for `replacement` on 2024-01-05.
pub fn schedule_change_payload(recommendation: &str, replacement: Option<&str>) -> Value {
    let changes: Vec<Value> = replacement
        .map(|name| {
            json!({
                "employee_name": "Alice",
                "target_date": "2024-01-05",
                "suggested_replacement": name
            })
        })
        .into_iter()
        .collect();
    json!({
        "type": "schedulechange",
        "thoughts": "Alice asked for Friday off",
        "original_query": "switch my Friday shift",
        "response": "Noted.",
        "reasoning": "coverage is available",
        "changes": changes,
        "recommendation": recommendation
    })
}
