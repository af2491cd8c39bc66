pub mod gemini;
pub mod slack;

pub use gemini::{GeminiClient, GenerativeClient};
pub use slack::{format_slack_message, SlackWebhook, WebhookClient};
