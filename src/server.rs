use axum::{
    Router,
    http::{Method, header},
    response::Json,
    routing::get,
};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::Config;
use crate::routes::create_api_routes;
use crate::services::{SlackService, SummaryService};

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub summary_service: Arc<SummaryService>,
    pub slack_service: Arc<SlackService>,
    pub config: Arc<Config>,
}

pub fn create_app(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", create_api_routes())
        .with_state(state)
        .layer(cors)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub async fn start_server(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    info!("Starting Todo Summary Server...");

    let allowed_origins = state.config.server.get_allowed_origins(&addr)?;
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(vec![Method::GET, Method::POST])
        .allow_headers(vec![header::CONTENT_TYPE]);

    let app = create_app(state, cors);

    let listener = TcpListener::bind(addr).await?;
    info!("Server is running on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
