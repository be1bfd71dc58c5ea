//! State for the one-shot AI exchanges on the task detail view. Submissions
//! carry a monotonic ticket; a completion is applied only while its ticket is
//! still the latest, so overlapping requests cannot land out of order.

use tracing::debug;

use crate::model::Task;

pub const ERROR_PREFIX: &str = "Error: ";

pub const BREAKDOWN_BLOCKED: &str =
    "This task already has subtasks. Please delete them first if you want a new breakdown.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssistExchange {
    input: String,
    response: Option<String>,
    latest_ticket: u64,
    pending: bool,
}

impl AssistExchange {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: String) {
        self.input = text;
    }

    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Starts a submission. Blank input does not submit. Returns the ticket
    /// and the trimmed message to send.
    pub fn begin(&mut self) -> Option<(u64, String)> {
        let message = self.input.trim().to_string();
        if message.is_empty() {
            return None;
        }
        self.latest_ticket += 1;
        self.pending = true;
        Some((self.latest_ticket, message))
    }

    /// Applies a completed request. Stale tickets are discarded. The new
    /// response replaces the previous one; the input is cleared only on
    /// success.
    pub fn complete(&mut self, ticket: u64, result: Result<String, String>) -> bool {
        if ticket != self.latest_ticket {
            debug!(ticket, latest = self.latest_ticket, "discarding stale assist response");
            return false;
        }
        self.pending = false;
        match result {
            Ok(text) => {
                self.response = Some(text);
                self.input.clear();
            }
            Err(message) => {
                self.response = Some(format!("{ERROR_PREFIX}{message}"));
            }
        }
        true
    }
}

pub fn is_error_response(text: &str) -> bool {
    text.starts_with(ERROR_PREFIX.trim_end())
}

/// The breakdown action never cascades over existing children; the user has
/// to delete them first.
pub fn breakdown_guard(task: &Task) -> Result<(), String> {
    if task.has_subtasks() {
        Err(BREAKDOWN_BLOCKED.to_string())
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn blank_input_never_submits() {
        let mut exchange = AssistExchange::default();
        exchange.set_input("   ".to_string());
        assert_eq!(exchange.begin(), None);
        assert!(!exchange.is_pending());
    }

    #[test]
    fn success_replaces_response_and_clears_input() {
        let mut exchange = AssistExchange::default();
        exchange.set_input("split this task up".to_string());
        let (ticket, message) = exchange.begin().expect("submission");
        assert_eq!(message, "split this task up");

        assert!(exchange.complete(ticket, Ok("1. First step".to_string())));
        assert_eq!(exchange.response(), Some("1. First step"));
        assert_eq!(exchange.input(), "");
        assert!(!exchange.is_pending());
    }

    #[test]
    fn failure_prefixes_error_and_keeps_input() {
        let mut exchange = AssistExchange::default();
        exchange.set_input("help".to_string());
        let (ticket, _) = exchange.begin().expect("submission");

        assert!(exchange.complete(ticket, Err("model unavailable".to_string())));
        assert_eq!(exchange.response(), Some("Error: model unavailable"));
        assert!(is_error_response(exchange.response().expect("response")));
        assert_eq!(exchange.input(), "help");
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut exchange = AssistExchange::default();
        exchange.set_input("first".to_string());
        let (first, _) = exchange.begin().expect("first submission");

        exchange.set_input("second".to_string());
        let (second, _) = exchange.begin().expect("second submission");

        // The slow first response arrives after the second submission.
        assert!(!exchange.complete(first, Ok("first answer".to_string())));
        assert_eq!(exchange.response(), None);
        assert!(exchange.is_pending());

        assert!(exchange.complete(second, Ok("second answer".to_string())));
        assert_eq!(exchange.response(), Some("second answer"));
    }

    #[test]
    fn breakdown_refuses_while_subtasks_exist() {
        let with_children: Task = serde_json::from_value(json!({
            "id": 1, "title": "parent", "subtasks": [{"id": 2, "title": "child"}]
        }))
        .expect("fixture");
        let childless: Task =
            serde_json::from_value(json!({"id": 3, "title": "leaf"})).expect("fixture");

        assert_eq!(breakdown_guard(&with_children), Err(BREAKDOWN_BLOCKED.to_string()));
        assert_eq!(breakdown_guard(&childless), Ok(()));
    }
}
