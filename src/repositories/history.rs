use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Snapshot of one summarized todo, kept with the summary record.
///
/// Only id and title; the todo itself keeps changing after the summary is
/// written, and the record must not duplicate that mutable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoRef {
    pub id: String,
    pub title: String,
}

/// A generated summary, appended once and never touched again.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    pub summary_id: String,
    pub user_id: String,
    pub task_refs: Vec<TodoRef>,
    pub summary_text: String,
    /// Stored as a native BSON date so audit tooling can range-query it.
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

/// One Slack delivery, appended once after the webhook call succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRecord {
    pub dispatch_id: String,
    pub user_id: String,
    pub summary_text: String,
    pub email: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub sent_at: DateTime<Utc>,
}

/// Append-only store for generated summaries and their Slack deliveries.
///
/// Nothing in this server reads the records back; they exist for external
/// audit tooling. Both appends return the stored record's id.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    async fn append_summary(&self, record: SummaryRecord) -> Result<String>;
    async fn append_dispatch(&self, record: DispatchRecord) -> Result<String>;
}

/// MongoDB-backed history store over the `summaries` and `slackMessages`
/// collections. Each append is a single atomic document insert.
pub struct MongoHistoryRepository {
    summaries: Collection<SummaryRecord>,
    dispatches: Collection<DispatchRecord>,
}

impl MongoHistoryRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            summaries: db.collection("summaries"),
            dispatches: db.collection("slackMessages"),
        }
    }
}

#[async_trait]
impl HistoryRepository for MongoHistoryRepository {
    async fn append_summary(&self, record: SummaryRecord) -> Result<String> {
        let id = record.summary_id.clone();
        self.summaries
            .insert_one(record)
            .await
            .map_err(|e| AppError::PersistenceFailed(format!("summary insert: {}", e)))?;
        Ok(id)
    }

    async fn append_dispatch(&self, record: DispatchRecord) -> Result<String> {
        let id = record.dispatch_id.clone();
        self.dispatches
            .insert_one(record)
            .await
            .map_err(|e| AppError::PersistenceFailed(format!("dispatch insert: {}", e)))?;
        Ok(id)
    }
}
