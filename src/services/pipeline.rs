//! Request Pipeline
//!
//! Drives one submitted text through
//! `submitted -> analyzed -> [applying -> applied]`, or `failed`.
//!
//! Both submission entry points go through the same routine and the same
//! reconcile guard. Nothing is carried between calls; overlapping
//! submissions are independent sessions.

use std::sync::Arc;

use tracing::{debug, info, warn};

use shift_desk_core::{
    AnalysisRequest, AnalysisResponse, ChangeApplier, CoreError, RequestKind, RequestSession,
    ScheduleSource, TextAnalyzer,
};

use crate::services::reconcile::Reconciler;

/// Whether a validated response warrants committing its edits:
/// a `schedulechange` that is approved and carries at least one change.
pub fn should_reconcile(response: &AnalysisResponse) -> bool {
    response
        .as_schedule_change()
        .map(|analysis| analysis.is_actionable())
        .unwrap_or(false)
}

pub struct RequestPipeline {
    analyzer: Arc<dyn TextAnalyzer>,
    reconciler: Reconciler,
}

impl RequestPipeline {
    pub fn new(
        source: Arc<dyn ScheduleSource>,
        analyzer: Arc<dyn TextAnalyzer>,
        applier: Arc<dyn ChangeApplier>,
        window: impl Into<String>,
    ) -> Self {
        Self {
            analyzer,
            reconciler: Reconciler::new(source, applier, window),
        }
    }

    /// The display window re-fetched after a reconciliation.
    pub fn window(&self) -> &str {
        self.reconciler.window()
    }

    /// Submit from the structured "schedule change request" form.
    ///
    /// Returns `None` for blank text; nothing is sent in that case.
    pub async fn submit_change_request(&self, text: &str) -> Option<RequestSession> {
        self.submit(text, RequestKind::ScheduleChange).await
    }

    /// Submit free text for the service to classify.
    ///
    /// Returns `None` for blank text; nothing is sent in that case.
    pub async fn submit_text_request(&self, text: &str) -> Option<RequestSession> {
        self.submit(text, RequestKind::Freeform).await
    }

    /// Run the analysis only. The session ends `analyzed` or `failed` and
    /// nothing is committed, whatever the recommendation.
    pub async fn analyze_only(&self, text: &str, kind: RequestKind) -> Option<RequestSession> {
        if text.trim().is_empty() {
            debug!("[Pipeline] Blank request ignored");
            return None;
        }
        let mut session = RequestSession::new(text);
        let request = AnalysisRequest::new(text, kind);

        let outcome = match self.analyzer.analyze_text(&request).await {
            Ok(payload) => AnalysisResponse::from_value(payload),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(response) => {
                info!(
                    "[Pipeline] Request analyzed as {}{}",
                    response.kind().as_str(),
                    response
                        .recommendation()
                        .map(|r| format!(" ({})", r))
                        .unwrap_or_default()
                );
                if let Err(e) = session.mark_analyzed(response) {
                    fail(&mut session, e);
                }
            }
            Err(e) => fail(&mut session, e),
        }
        Some(session)
    }

    async fn submit(&self, text: &str, kind: RequestKind) -> Option<RequestSession> {
        let mut session = self.analyze_only(text, kind).await?;

        let approved = session
            .response
            .as_ref()
            .filter(|response| should_reconcile(response))
            .and_then(|response| response.as_schedule_change())
            .map(|analysis| analysis.changes.clone());
        let Some(edits) = approved else {
            return Some(session);
        };

        if let Err(e) = session.mark_applying() {
            fail(&mut session, e);
            return Some(session);
        }
        info!("[Pipeline] Applying {} approved changes", edits.len());

        let applied = match self.reconciler.apply(&edits).await {
            Ok(display) => session.mark_applied(display),
            Err(e) => Err(e),
        };
        if let Err(e) = applied {
            fail(&mut session, e);
        }
        Some(session)
    }
}

/// Move the session to `failed`, keeping the cause for diagnostics.
fn fail(session: &mut RequestSession, cause: CoreError) {
    if cause.is_retryable() {
        warn!("[Pipeline] Request failed, may succeed if resubmitted: {}", cause);
    } else {
        warn!("[Pipeline] Request failed: {}", cause);
    }
    if let Err(e) = session.mark_failed(&cause) {
        warn!("[Pipeline] {}", e);
    }
}
