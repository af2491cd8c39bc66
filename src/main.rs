use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use todo_summary_server::{
    clients::{GeminiClient, SlackWebhook},
    config::Config,
    repositories::MongoHistoryRepository,
    server::{AppState, start_server},
    services::{SlackService, SummaryService},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    // RUST_LOG wins over the configured level when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    let mongo_client = mongodb::Client::with_uri_str(&config.database.mongodb.connection_uri)
        .await
        .context("Failed to connect to MongoDB")?;
    let db = mongo_client.database(&config.database.mongodb.db_name);
    info!("Connected to MongoDB database '{}'", db.name());

    let http = reqwest::Client::new();

    let history = Arc::new(MongoHistoryRepository::new(&db));
    let gemini = Arc::new(
        GeminiClient::new(
            http.clone(),
            config.gemini.api_key.clone(),
            config.gemini.model.clone(),
        ),
    );
    let slack_webhook = Arc::new(SlackWebhook::new(http, config.slack.webhook_url.clone()));

    let state = AppState {
        summary_service: Arc::new(SummaryService::new(gemini, history.clone())),
        slack_service: Arc::new(SlackService::new(slack_webhook, history)),
        config: Arc::new(config.clone()),
    };

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Failed to parse server address")?;

    start_server(addr, state).await
}
