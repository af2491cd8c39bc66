use axum::{Router, extract::State, response::Json, routing::post};
use serde::{Deserialize, Serialize};

use crate::{error::Result, models::Todo, server::AppState};

pub fn create_summarize_routes() -> Router<AppState> {
    Router::new().route("/summarize", post(summarize_todos))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeRequest {
    pub todos: Vec<Todo>,
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

async fn summarize_todos(
    State(state): State<AppState>,
    Json(req): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>> {
    let summary = state
        .summary_service
        .generate_summary(req.user_id, req.todos)
        .await?;

    Ok(Json(SummarizeResponse { summary }))
}
