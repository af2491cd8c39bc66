use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    clients::GenerativeClient,
    error::{AppError, Result},
    models::Todo,
    prompt,
    repositories::{HistoryRepository, SummaryRecord, TodoRef},
};

/// Orchestrates the summary pipeline: validate → prompt → backend → record.
pub struct SummaryService {
    backend: Arc<dyn GenerativeClient>,
    history: Arc<dyn HistoryRepository>,
}

impl SummaryService {
    pub fn new(backend: Arc<dyn GenerativeClient>, history: Arc<dyn HistoryRepository>) -> Self {
        Self { backend, history }
    }

    /// Generate a natural-language summary of the given todos and append a
    /// record of it to the history store.
    ///
    /// The history write is awaited before returning: a summary the backend
    /// produced but the store failed to record surfaces as
    /// `PersistenceFailed`, so callers can tell "no summary" apart from
    /// "summary exists but was not recorded".
    pub async fn generate_summary(&self, user_id: String, todos: Vec<Todo>) -> Result<String> {
        if todos.is_empty() {
            return Err(AppError::InvalidInput(
                "todos must be a non-empty array".to_string(),
            ));
        }

        // The prompt is deterministic for a fixed todo list; only the
        // backend response varies between calls.
        let prompt = prompt::build_summary_prompt(&todos);
        let summary_text = self.backend.generate(&prompt).await?;

        let task_refs = todos
            .iter()
            .map(|t| TodoRef {
                id: t.id.clone(),
                title: t.title.clone(),
            })
            .collect();

        let record = SummaryRecord {
            summary_id: Uuid::new_v4().to_string(),
            user_id,
            task_refs,
            summary_text: summary_text.clone(),
            created_at: Utc::now(),
        };

        let record_id = self.history.append_summary(record).await?;
        info!(%record_id, todo_count = todos.len(), "summary generated and recorded");

        Ok(summary_text)
    }
}
