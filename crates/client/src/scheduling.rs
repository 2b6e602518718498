//! Scheduling Service Client
//!
//! Implements [`ScheduleSource`], [`TextAnalyzer`] and [`ChangeApplier`]
//! against the scheduling service's REST API:
//!
//! | Operation | Route |
//! |---|---|
//! | employees | `GET employees` |
//! | schedules | `GET schedules?start_date=<date>` |
//! | rules | `GET rules` |
//! | structured analysis | `POST schedule-changes` `{request_text}` |
//! | freeform analysis | `POST process-text-request` `{request}` |
//! | apply by text | `POST schedule-changes/apply` `{request_text}` |
//! | apply edits | `GET schedules/<date>`, then `PUT schedules/<date>` or `POST schedules` |
//!
//! Routes are resolved relative to the configured base URL.

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use shift_desk_core::{
    AnalysisRequest, ApplyAck, ApplyInput, ChangeApplier, CoreError, CoreResult, Employee,
    RequestKind, Rules, ScheduleChangeItem, ScheduleEntry, ScheduleSource, TextAnalyzer,
};

use crate::error::{parse_http_error, ApiError, ApiResult};

#[derive(Debug, Deserialize)]
struct MessageResponse {
    message: String,
}

#[derive(Debug, Serialize)]
struct FreeformBody<'a> {
    request: &'a str,
}

#[derive(Debug, Serialize)]
struct RequestTextBody<'a> {
    request_text: &'a str,
}

/// HTTP client for the scheduling service.
#[derive(Debug, Clone)]
pub struct SchedulingApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl SchedulingApiClient {
    /// Create a client rooted at `base_url` (e.g. `http://localhost:8000/api`).
    pub fn new(base_url: &str, client: reqwest::Client) -> ApiResult<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl {
                message: format!("unsupported scheme `{}`", base_url.scheme()),
            });
        }
        // Url::join drops the last path segment unless it ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a route relative to the base URL.
    pub fn endpoint(&self, route: &str) -> ApiResult<Url> {
        Ok(self.base_url.join(route.trim_start_matches('/'))?)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> ApiResult<reqwest::Response> {
        tracing::debug!("[SchedulingApi] {} {}", method, url);
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let err = match request.send().await {
            Ok(response) if response.status().is_success() => return Ok(response),
            Ok(response) => {
                let status = response.status().as_u16();
                let text = response.text().await.unwrap_or_default();
                parse_http_error(status, &text)
            }
            Err(e) => ApiError::from(e),
        };
        if err.is_transient() {
            tracing::warn!("[SchedulingApi] Service unavailable, worth retrying: {}", err);
        } else {
            tracing::debug!("[SchedulingApi] Request rejected: {}", err);
        }
        Err(err)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        let response = self.send::<()>(Method::GET, url, None).await?;
        Ok(response.json::<T>().await?)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> ApiResult<T> {
        let response = self.send(Method::POST, url, Some(body)).await?;
        Ok(response.json::<T>().await?)
    }

    /// Fetch one schedule day; a 404 means the day has no row yet.
    pub async fn get_schedule(&self, date: &str) -> ApiResult<Option<ScheduleEntry>> {
        let url = self.endpoint(&format!("schedules/{}", date))?;
        match self.get_json::<ScheduleEntry>(url).await {
            Ok(entry) => Ok(Some(entry)),
            Err(ApiError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Update the day if it exists, otherwise create it.
    pub async fn upsert_schedule(&self, entry: &ScheduleEntry) -> ApiResult<ScheduleEntry> {
        match self.get_schedule(&entry.date).await? {
            Some(_) => {
                let url = self.endpoint(&format!("schedules/{}", entry.date))?;
                let response = self.send(Method::PUT, url, Some(entry)).await?;
                Ok(response.json::<ScheduleEntry>().await?)
            }
            None => {
                let url = self.endpoint("schedules")?;
                self.post_json(url, entry).await
            }
        }
    }

    async fn apply_request_text(&self, text: &str) -> ApiResult<ApplyAck> {
        let body = RequestTextBody { request_text: text };
        let url = self.endpoint("schedule-changes/apply")?;
        let response: MessageResponse = self.post_json(url, &body).await?;
        Ok(ApplyAck {
            message: response.message,
        })
    }

    async fn apply_edits(&self, edits: &[ScheduleChangeItem]) -> ApiResult<ApplyAck> {
        let employees: Vec<Employee> = self.get_json(self.endpoint("employees")?).await?;

        let mut applied = 0usize;
        for edit in edits {
            let Some(replacement) = employees
                .iter()
                .find(|e| e.name == edit.suggested_replacement)
            else {
                tracing::warn!(
                    "[SchedulingApi] No employee named '{}' for {}; edit skipped",
                    edit.suggested_replacement,
                    edit.target_date
                );
                continue;
            };
            let entry = ScheduleEntry::new(
                edit.target_date.clone(),
                replacement.employee_number.clone(),
            );
            self.upsert_schedule(&entry).await?;
            tracing::info!(
                "[SchedulingApi] Schedule change applied: {} -> {}",
                entry.date,
                replacement.name
            );
            applied += 1;
        }

        Ok(ApplyAck {
            message: format!("Applied {} of {} schedule changes.", applied, edits.len()),
        })
    }
}

/// The freeform route wraps the analysis as `{request, analysis}`; unwrap it
/// and pass any other payload through untouched.
pub fn unwrap_analysis_envelope(payload: Value) -> Value {
    match payload {
        Value::Object(mut map) if !map.contains_key("type") && map.contains_key("analysis") => {
            map.remove("analysis").unwrap_or(Value::Null)
        }
        other => other,
    }
}

#[async_trait]
impl ScheduleSource for SchedulingApiClient {
    async fn fetch_employees(&self) -> CoreResult<Vec<Employee>> {
        Ok(self.get_json(self.endpoint("employees")?).await?)
    }

    async fn fetch_schedules(&self, week_start: &str) -> CoreResult<Vec<ScheduleEntry>> {
        let mut url = self.endpoint("schedules")?;
        url.query_pairs_mut().append_pair("start_date", week_start);
        Ok(self.get_json(url).await?)
    }

    async fn fetch_rules(&self) -> CoreResult<Rules> {
        Ok(self.get_json(self.endpoint("rules")?).await?)
    }
}

#[async_trait]
impl TextAnalyzer for SchedulingApiClient {
    async fn analyze_text(&self, request: &AnalysisRequest) -> CoreResult<Value> {
        let sent: ApiResult<Value> = match request.kind {
            RequestKind::ScheduleChange => {
                let body = RequestTextBody {
                    request_text: &request.request_text,
                };
                self.post_json(self.endpoint("schedule-changes")?, &body).await
            }
            RequestKind::Freeform => {
                let body = FreeformBody {
                    request: &request.request_text,
                };
                self.post_json(self.endpoint("process-text-request")?, &body)
                    .await
            }
        };
        match sent {
            Ok(payload) => Ok(unwrap_analysis_envelope(payload)),
            // A body that is not JSON at all breaks the response contract.
            Err(ApiError::Decode { message }) => Err(CoreError::malformed(message)),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl ChangeApplier for SchedulingApiClient {
    async fn apply_changes(&self, input: ApplyInput) -> CoreResult<ApplyAck> {
        let result = match &input {
            ApplyInput::RequestText(text) => self.apply_request_text(text).await,
            ApplyInput::Edits(edits) => self.apply_edits(edits).await,
        };
        result.map_err(|e| CoreError::apply(e.to_string()))
    }
}
