//! Application State
//!
//! The effective configuration plus the three collaborators, wired once per
//! process and shared by every command.

use std::sync::Arc;
use std::time::Duration;

use shift_desk_client::{build_http_client, SchedulingApiClient};
use shift_desk_core::{ChangeApplier, ScheduleSource, TextAnalyzer};

use crate::models::settings::AppConfig;
use crate::services::pipeline::RequestPipeline;
use crate::services::snapshot::ScheduleSnapshot;
use crate::utils::error::{AppError, AppResult};

pub struct AppState {
    config: AppConfig,
    source: Arc<dyn ScheduleSource>,
    analyzer: Arc<dyn TextAnalyzer>,
    applier: Arc<dyn ChangeApplier>,
}

impl AppState {
    /// Wire the HTTP collaborators described by `config`.
    pub fn from_config(config: AppConfig) -> AppResult<Self> {
        config.validate().map_err(AppError::validation)?;

        let http = build_http_client(
            Duration::from_secs(config.request_timeout_secs),
            config.proxy_url.as_deref(),
        )?;
        let client = Arc::new(SchedulingApiClient::new(&config.api_base_url, http)?);
        tracing::debug!("[State] Scheduling service at {}", client.base_url());

        Ok(Self::with_collaborators(
            config,
            client.clone(),
            client.clone(),
            client,
        ))
    }

    /// Wire explicit collaborators, e.g. in-memory ones.
    pub fn with_collaborators(
        config: AppConfig,
        source: Arc<dyn ScheduleSource>,
        analyzer: Arc<dyn TextAnalyzer>,
        applier: Arc<dyn ChangeApplier>,
    ) -> Self {
        Self {
            config,
            source,
            analyzer,
            applier,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// A pipeline whose reconciliations re-fetch `window`.
    pub fn pipeline(&self, window: &str) -> RequestPipeline {
        RequestPipeline::new(
            self.source.clone(),
            self.analyzer.clone(),
            self.applier.clone(),
            window,
        )
    }

    pub async fn load_snapshot(&self, window: &str) -> AppResult<ScheduleSnapshot> {
        Ok(ScheduleSnapshot::load(self.source.as_ref(), window).await?)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("api_base_url", &self.config.api_base_url)
            .finish()
    }
}
