use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    clients::{format_slack_message, WebhookClient},
    error::{AppError, Result},
    repositories::{DispatchRecord, HistoryRepository},
};

/// Orchestrates the dispatch pipeline: validate → format → deliver → record.
pub struct SlackService {
    webhook: Arc<dyn WebhookClient>,
    history: Arc<dyn HistoryRepository>,
}

impl SlackService {
    pub fn new(webhook: Arc<dyn WebhookClient>, history: Arc<dyn HistoryRepository>) -> Self {
        Self { webhook, history }
    }

    /// Deliver a generated summary to the configured Slack channel and
    /// append a dispatch record.
    ///
    /// One delivery attempt, no retry. `PersistenceFailed` here means the
    /// message is already visible in the channel even though the
    /// record-keeping write failed, so callers must not treat that as an
    /// undelivered message.
    pub async fn send_summary(
        &self,
        user_id: String,
        email: String,
        summary: String,
    ) -> Result<DispatchRecord> {
        if summary.trim().is_empty() {
            return Err(AppError::InvalidInput("summary is required".to_string()));
        }

        // Missing webhook URL is a deployment problem, checked before any
        // formatting or delivery work happens.
        if !self.webhook.is_configured() {
            return Err(AppError::NotConfigured(
                "Slack webhook URL not configured".to_string(),
            ));
        }

        let sent_at = Utc::now();
        let message = format_slack_message(&summary, &email, sent_at);
        self.webhook.post(&message).await?;

        let record = DispatchRecord {
            dispatch_id: Uuid::new_v4().to_string(),
            user_id,
            summary_text: summary,
            email,
            sent_at,
        };

        let record_id = self.history.append_dispatch(record.clone()).await?;
        info!(%record_id, "summary dispatched to Slack");

        Ok(record)
    }
}
