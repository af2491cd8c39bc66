use axum::{Router, extract::State, response::Json, routing::post};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{error::Result, server::AppState};

pub fn create_slack_routes() -> Router<AppState> {
    Router::new().route("/slack", post(send_to_slack))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlackRequest {
    pub summary: String,
    pub user_id: String,
    pub email: String,
}

async fn send_to_slack(
    State(state): State<AppState>,
    Json(req): Json<SlackRequest>,
) -> Result<Json<Value>> {
    state
        .slack_service
        .send_summary(req.user_id, req.email, req.summary)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Summary sent to Slack successfully"
    })))
}
