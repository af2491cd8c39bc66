mod slack_service;
mod summary_service;

pub use slack_service::SlackService;
pub use summary_service::SummaryService;
