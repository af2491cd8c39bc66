use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task priority as stored by the task store and rendered into prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        };
        write!(f, "{}", s)
    }
}

/// A todo as the client submits it for summarization.
///
/// The task store owns these; this server only reads them. Clients are
/// expected to send active (incomplete) todos, but nothing here filters on
/// `completed`; whatever arrives is the summarization set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_payload() {
        let todo: Todo = serde_json::from_str(
            r#"{
                "id": "1",
                "title": "Buy milk",
                "description": "2 liters",
                "priority": "high",
                "dueDate": "2026-06-03T00:00:00Z",
                "completed": false
            }"#,
        )
        .unwrap();

        assert_eq!(todo.id, "1");
        assert_eq!(todo.priority, Some(Priority::High));
        assert!(todo.due_date.is_some());
        assert!(!todo.completed);
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let todo: Todo = serde_json::from_str(r#"{"id": "2", "title": "Call mom"}"#).unwrap();

        assert!(todo.description.is_none());
        assert!(todo.priority.is_none());
        assert!(todo.due_date.is_none());
        assert!(!todo.completed);
    }

    #[test]
    fn priority_renders_lowercase() {
        assert_eq!(Priority::High.to_string(), "high");
        assert_eq!(Priority::Medium.to_string(), "medium");
        assert_eq!(Priority::Low.to_string(), "low");
    }
}
