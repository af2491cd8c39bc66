use async_trait::async_trait;
use serde_json::json;

use crate::error::{AppError, Result};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Single-shot text generation backend.
///
/// One prompt in, one text response out. No streaming, no retries, no
/// timeout beyond what the underlying HTTP client is built with.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, api_key: String, model: String) -> Self {
        Self {
            http,
            base_url: GEMINI_BASE_URL.to_string(),
            api_key,
            model,
        }
    }

    /// Point the client at a different API root. Tests aim this at a local
    /// mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        if self.api_key.is_empty() {
            return Err(AppError::NotConfigured(
                "GEMINI_API_KEY is not set".to_string(),
            ));
        }

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .http
            .post(&url)
            .json(&json!({
                "contents": [{
                    "parts": [{ "text": prompt }]
                }]
            }))
            .send()
            .await
            .map_err(|e| AppError::GenerationFailed(format!("request to Gemini failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::GenerationFailed(format!(
                "Gemini API error: status={}, body={}",
                status, body
            )));
        }

        let response_json: serde_json::Value = response.json().await.map_err(|e| {
            AppError::GenerationFailed(format!("failed to parse Gemini response: {}", e))
        })?;

        let parts = response_json["candidates"]
            .get(0)
            .and_then(|c| c["content"]["parts"].as_array())
            .ok_or_else(|| {
                AppError::GenerationFailed("Gemini response contained no candidates".to_string())
            })?;

        // Multi-part candidates concatenate in order; the text is passed
        // through untrimmed.
        let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();

        if text.is_empty() {
            return Err(AppError::GenerationFailed(
                "Gemini response contained no text parts".to_string(),
            ));
        }

        Ok(text)
    }
}
