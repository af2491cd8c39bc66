use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::error::{AppError, Result};

/// Build the Block Kit message posted to the Slack channel.
///
/// Pure given the timestamp: callers pass `Utc::now()`, tests pin a fixed
/// one. The summary section carries the text verbatim. Slack renders the
/// mrkdwn, this function never escapes or rewrites it.
pub fn format_slack_message(summary: &str, email: &str, sent_at: DateTime<Utc>) -> Value {
    json!({
        "blocks": [
            {
                "type": "header",
                "text": {
                    "type": "plain_text",
                    "text": "📋 Todo Summary",
                    "emoji": true
                }
            },
            {
                "type": "section",
                "text": {
                    "type": "mrkdwn",
                    "text": format!("*Generated for:* {}", email)
                }
            },
            {
                "type": "divider"
            },
            {
                "type": "section",
                "text": {
                    "type": "mrkdwn",
                    "text": summary
                }
            },
            {
                "type": "context",
                "elements": [
                    {
                        "type": "mrkdwn",
                        "text": format!(
                            "Generated on {}",
                            sent_at.format("%B %-d, %Y at %-I:%M %p UTC")
                        )
                    }
                ]
            }
        ]
    })
}

/// Outbound webhook delivery. One attempt per call, no retry; the caller
/// decides what a failure means.
#[async_trait]
pub trait WebhookClient: Send + Sync {
    /// Whether a delivery endpoint is configured at all.
    fn is_configured(&self) -> bool;
    async fn post(&self, payload: &Value) -> Result<()>;
}

/// Slack incoming-webhook client.
pub struct SlackWebhook {
    http: reqwest::Client,
    webhook_url: Option<String>,
}

impl SlackWebhook {
    pub fn new(http: reqwest::Client, webhook_url: Option<String>) -> Self {
        Self { http, webhook_url }
    }
}

#[async_trait]
impl WebhookClient for SlackWebhook {
    fn is_configured(&self) -> bool {
        self.webhook_url.is_some()
    }

    async fn post(&self, payload: &Value) -> Result<()> {
        let url = self
            .webhook_url
            .as_deref()
            .ok_or_else(|| AppError::NotConfigured("SLACK_WEBHOOK_URL is not set".to_string()))?;

        let response = self
            .http
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::DeliveryFailed(format!("request to Slack failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::DeliveryFailed(format!(
                "Slack webhook error: status={}, body={}",
                status, body
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 3, 14, 5, 0).unwrap()
    }

    #[test]
    fn message_follows_the_block_layout() {
        let msg = format_slack_message("All done.", "a@b.com", fixed_time());
        let blocks = msg["blocks"].as_array().unwrap();

        assert_eq!(blocks.len(), 5);
        assert_eq!(blocks[0]["type"], "header");
        assert_eq!(blocks[0]["text"]["text"], "📋 Todo Summary");
        assert_eq!(blocks[1]["text"]["text"], "*Generated for:* a@b.com");
        assert_eq!(blocks[2]["type"], "divider");
        assert_eq!(blocks[3]["type"], "section");
        assert_eq!(
            blocks[4]["elements"][0]["text"],
            "Generated on June 3, 2026 at 2:05 PM UTC"
        );
    }

    #[test]
    fn summary_section_carries_the_text_unmodified() {
        // Markdown, asterisks, whitespace: none of it gets escaped.
        let summary = "X";
        let msg = format_slack_message(summary, "a@b.com", fixed_time());

        assert_eq!(msg["blocks"][3]["text"]["text"], "X");

        let tricky = "*bold* and\n- a list\n- with <links|here>";
        let msg = format_slack_message(tricky, "a@b.com", fixed_time());

        assert_eq!(msg["blocks"][3]["text"]["text"], tricky);
    }

    #[test]
    fn message_is_deterministic_for_a_fixed_clock() {
        let a = format_slack_message("S", "a@b.com", fixed_time());
        let b = format_slack_message("S", "a@b.com", fixed_time());

        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn post_without_url_is_a_configuration_error() {
        let webhook = SlackWebhook::new(reqwest::Client::new(), None);

        assert!(!webhook.is_configured());
        let err = webhook.post(&json!({"blocks": []})).await.unwrap_err();
        assert!(matches!(err, AppError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn post_delivers_the_payload_once() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/services/T000/B000/hook")
            .match_body(mockito::Matcher::PartialJson(json!({
                "blocks": [{ "type": "header" }]
            })))
            .with_status(200)
            .with_body("ok")
            .expect(1)
            .create_async()
            .await;

        let webhook = SlackWebhook::new(
            reqwest::Client::new(),
            Some(format!("{}/services/T000/B000/hook", server.url())),
        );

        let payload = format_slack_message("All done.", "a@b.com", fixed_time());
        webhook.post(&payload).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_fails_delivery() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/hook")
            .with_status(404)
            .with_body("no_service")
            .create_async()
            .await;

        let webhook = SlackWebhook::new(
            reqwest::Client::new(),
            Some(format!("{}/hook", server.url())),
        );

        let err = webhook.post(&json!({"blocks": []})).await.unwrap_err();

        match err {
            AppError::DeliveryFailed(msg) => {
                assert!(msg.contains("404"));
                assert!(msg.contains("no_service"));
            }
            other => panic!("expected DeliveryFailed, got {:?}", other),
        }
    }
}
