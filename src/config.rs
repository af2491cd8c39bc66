use anyhow::Context;
use axum::http::HeaderValue;
use serde::Deserialize;
use std::env;
use std::fs;
use std::str::FromStr;

/// Runtime environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(anyhow::anyhow!("Invalid environment: {}", s)),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

impl<'de> Deserialize<'de> for Environment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Environment::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl serde::Serialize for Environment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let s = match self {
            Environment::Development => "development",
            Environment::Production => "production",
        };
        serializer.serialize_str(s)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub gemini: GeminiConfig,
    pub slack: SlackConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub mongodb: MongoDBConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MongoDBConfig {
    pub connection_uri: String,
    pub db_name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub env: Environment,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Resolve the CORS origin list for this environment.
    ///
    /// # Errors
    /// Fails in production when no allowed_origins are configured.
    pub fn get_allowed_origins(
        &self,
        addr: &std::net::SocketAddr,
    ) -> anyhow::Result<Vec<HeaderValue>> {
        let origin_strings = match self.env {
            Environment::Production => {
                // Production only trusts origins named in config or env.
                if !self.allowed_origins.is_empty() {
                    self.allowed_origins.clone()
                } else {
                    anyhow::bail!(
                        "Production environment requires explicit ALLOWED_ORIGINS configuration. \
                        Set ALLOWED_ORIGINS environment variable"
                    );
                }
            }
            Environment::Development => {
                // Development allows the usual localhost origins.
                let mut origins = vec![
                    format!("http://localhost:{}", addr.port()),
                    format!("http://127.0.0.1:{}", addr.port()),
                    "http://localhost:3000".to_string(),
                    format!("http://{}", addr),
                    format!("https://{}", addr),
                ];

                origins.extend(self.allowed_origins.clone());
                origins
            }
        };

        // Unparseable origins are skipped with a warning rather than
        // taking the server down.
        let headers: Vec<HeaderValue> = origin_strings
            .into_iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(header_value) => {
                    tracing::debug!("Allowed origin: {}", origin);
                    Some(header_value)
                }
                Err(e) => {
                    tracing::warn!("Failed to parse origin '{}': {}", origin, e);
                    None
                }
            })
            .collect();

        if headers.is_empty() {
            anyhow::bail!("No valid CORS origins configured");
        }

        Ok(headers)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct SlackConfig {
    /// Incoming-webhook URL. Absent (or empty) means dispatch requests
    /// fail with a configuration error.
    #[serde(default)]
    pub webhook_url: Option<String>,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        // Environment-variable deployment (containers).
        if let Ok(mongodb_uri) = env::var("MONGODB_CONNECTION_URI") {
            return Ok(Config {
                database: DatabaseConfig {
                    mongodb: MongoDBConfig {
                        connection_uri: mongodb_uri,
                        db_name: env::var("MONGODB_DB_NAME")
                            .unwrap_or_else(|_| "todo_summary".to_string()),
                    },
                },
                server: ServerConfig {
                    host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                    port: env::var("SERVER_PORT")
                        .unwrap_or_else(|_| "5050".to_string())
                        .parse()
                        .unwrap_or(5050),
                    env: env::var("ENVIRONMENT")
                        .ok()
                        .and_then(|s| Environment::from_str(&s).ok())
                        .unwrap_or(Environment::Development),
                    allowed_origins: env::var("ALLOWED_ORIGINS")
                        .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                        .unwrap_or_else(|_| Vec::new()),
                },
                logging: LoggingConfig {
                    level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                },
                gemini: GeminiConfig {
                    api_key: env::var("GEMINI_API_KEY").unwrap_or_else(|_| String::new()),
                    model: env::var("GEMINI_MODEL").unwrap_or_else(|_| default_gemini_model()),
                },
                slack: SlackConfig {
                    webhook_url: env::var("SLACK_WEBHOOK_URL")
                        .ok()
                        .filter(|s| !s.is_empty()),
                },
            });
        }

        // Config.toml deployment (local development).
        let config_str = fs::read_to_string("Config.toml").context(
            "Failed to read Config.toml. Use environment variables or provide Config.toml",
        )?;

        let mut config: Config =
            toml::from_str(&config_str).context("Failed to parse Config.toml")?;

        // Environment variables override the file for secrets.
        if let Ok(api_key) = env::var("GEMINI_API_KEY") {
            config.gemini.api_key = api_key;
        }
        if let Ok(model) = env::var("GEMINI_MODEL") {
            config.gemini.model = model;
        }
        if let Ok(webhook_url) = env::var("SLACK_WEBHOOK_URL") {
            config.slack.webhook_url = if webhook_url.is_empty() {
                None
            } else {
                Some(webhook_url)
            };
        }

        Ok(config)
    }
}
