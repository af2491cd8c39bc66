use axum::Router;

use crate::server::AppState;

mod slack;
mod summarize;

pub fn create_api_routes() -> Router<AppState> {
    Router::new()
        .merge(summarize::create_summarize_routes())
        .merge(slack::create_slack_routes())
}
