use crate::models::Todo;

/// Render a todo list as the numbered block fed to the summary prompt.
///
/// One line per todo, 1-indexed, in input order. The caller decides the
/// ordering; this function never re-sorts. Optional fields that are absent
/// (or empty, for descriptions) contribute nothing to the line.
pub fn format_todo_list(todos: &[Todo]) -> String {
    todos
        .iter()
        .enumerate()
        .map(|(i, todo)| {
            let mut line = format!("{}. {}", i + 1, todo.title);
            if let Some(priority) = todo.priority {
                line.push_str(&format!(" (Priority: {})", priority));
            }
            if let Some(due) = todo.due_date {
                line.push_str(&format!(" (Due: {})", due.format("%B %-d, %Y")));
            }
            if let Some(description) = todo.description.as_deref().filter(|d| !d.is_empty()) {
                line.push_str(&format!("\n   Description: {}", description));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assemble the full prompt sent to the generative backend.
///
/// The instruction block's five numbered directives shape the structure of
/// the generated summary (overview, high-priority callout, deadlines,
/// grouping, tone). Clients render the result as-is, so the ordering is
/// part of the contract, not just phrasing.
pub fn build_summary_prompt(todos: &[Todo]) -> String {
    format!(
        "You are a helpful assistant that summarizes todo lists. \
         Please provide a concise summary of the following todos:\n\
         \n\
         {}\n\
         \n\
         Please include:\n\
         1. A brief overview of the tasks\n\
         2. Highlight any high priority items\n\
         3. Mention any upcoming deadlines\n\
         4. Group similar tasks if possible\n\
         5. Keep the summary professional and actionable",
        format_todo_list(todos)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use chrono::{TimeZone, Utc};

    fn todo(id: &str, title: &str) -> Todo {
        Todo {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            priority: None,
            due_date: None,
            completed: false,
        }
    }

    #[test]
    fn one_line_per_todo_in_input_order() {
        let todos = vec![todo("b", "Second task"), todo("a", "First task")];

        let block = format_todo_list(&todos);
        let lines: Vec<&str> = block.lines().collect();

        assert_eq!(lines, vec!["1. Second task", "2. First task"]);
    }

    #[test]
    fn bare_todo_renders_without_optional_segments() {
        let block = format_todo_list(&[todo("1", "Call mom")]);

        assert_eq!(block, "1. Call mom");
        assert!(!block.contains('('));
        assert!(!block.contains("Description:"));
    }

    #[test]
    fn priority_segment_matches_wire_format() {
        let mut t = todo("1", "Buy milk");
        t.priority = Some(Priority::High);

        assert_eq!(format_todo_list(&[t]), "1. Buy milk (Priority: high)");
    }

    #[test]
    fn due_date_and_description_render_in_fixed_order() {
        let mut t = todo("1", "Ship release");
        t.priority = Some(Priority::Medium);
        t.due_date = Some(Utc.with_ymd_and_hms(2026, 6, 3, 0, 0, 0).unwrap());
        t.description = Some("Tag and publish".to_string());

        assert_eq!(
            format_todo_list(&[t]),
            "1. Ship release (Priority: medium) (Due: June 3, 2026)\n   Description: Tag and publish"
        );
    }

    #[test]
    fn empty_description_is_treated_as_absent() {
        // The task store fills missing descriptions with ""; those must not
        // produce a blank description line.
        let mut t = todo("1", "Water plants");
        t.description = Some(String::new());

        assert_eq!(format_todo_list(&[t]), "1. Water plants");
    }

    #[test]
    fn prompt_contains_list_and_all_five_directives() {
        let mut t = todo("1", "Buy milk");
        t.priority = Some(Priority::High);

        let prompt = build_summary_prompt(&[t]);

        assert!(prompt.contains("1. Buy milk (Priority: high)"));
        assert!(prompt.contains("1. A brief overview of the tasks"));
        assert!(prompt.contains("2. Highlight any high priority items"));
        assert!(prompt.contains("3. Mention any upcoming deadlines"));
        assert!(prompt.contains("4. Group similar tasks if possible"));
        assert!(prompt.contains("5. Keep the summary professional and actionable"));
    }

    #[test]
    fn prompt_is_deterministic_for_fixed_input() {
        let mut t = todo("1", "Buy milk");
        t.due_date = Some(Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap());
        let todos = vec![t, todo("2", "Call mom")];

        assert_eq!(build_summary_prompt(&todos), build_summary_prompt(&todos));
    }
}
