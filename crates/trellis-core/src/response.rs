use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::model::{Tag, Task, TaskPriority, TaskStatus};

/// Accept both response shapes the API serves: a bare array and a paginated
/// `{"results": [...]}` envelope. Anything else decodes to an empty list.
pub fn extract_tasks(response: &Value) -> Vec<Task> {
    extract_list(response, "tasks")
}

pub fn extract_tags(response: &Value) -> Vec<Tag> {
    extract_list(response, "tags")
}

fn extract_list<T: DeserializeOwned>(response: &Value, what: &str) -> Vec<T> {
    let items = match response {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("results") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => {
                warn!(what, "response object carries no results list");
                return Vec::new();
            }
        },
        _ => {
            warn!(what, "response is neither a list nor an envelope");
            return Vec::new();
        }
    };

    match serde_json::from_value(Value::Array(items.to_vec())) {
        Ok(list) => list,
        Err(err) => {
            warn!(what, error = %err, "response list failed to decode");
            Vec::new()
        }
    }
}

pub fn filter_tasks_by_status(tasks: &[Task], status: TaskStatus) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| task.status == status)
        .cloned()
        .collect()
}

/// A single acceptable priority is just a one-element slice.
pub fn filter_tasks_by_priority(tasks: &[Task], priorities: &[TaskPriority]) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| priorities.contains(&task.priority))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn task(id: u64, status: TaskStatus, priority: TaskPriority) -> Task {
        let mut task: Task = serde_json::from_value(json!({"id": id})).expect("task stub");
        task.status = status;
        task.priority = priority;
        task
    }

    #[test]
    fn bare_list_is_returned_unchanged() {
        let response = json!([{"id": 1, "title": "a"}, {"id": 2, "title": "b"}]);
        let tasks = extract_tasks(&response);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, 1);
        assert_eq!(tasks[1].title, "b");
    }

    #[test]
    fn paginated_envelope_yields_inner_list() {
        let response = json!({"count": 1, "next": null, "results": [{"id": 9}]});
        let tasks = extract_tasks(&response);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, 9);
    }

    #[test]
    fn malformed_shapes_yield_empty_lists() {
        for response in [
            json!(null),
            json!(42),
            json!("tasks"),
            json!({"items": []}),
            json!({"results": "not-a-list"}),
        ] {
            assert!(extract_tasks(&response).is_empty());
            assert!(extract_tags(&response).is_empty());
        }
    }

    #[test]
    fn undecodable_elements_yield_empty_list() {
        // Elements missing the required id cannot become tasks.
        let response = json!([{"title": "no id"}]);
        assert!(extract_tasks(&response).is_empty());
    }

    #[test]
    fn tags_extract_from_both_shapes() {
        let bare = json!([{"id": 1, "name": "work", "color": "#ff0000"}]);
        let envelope = json!({"results": [{"id": 2, "name": "home"}]});
        assert_eq!(extract_tags(&bare)[0].name, "work");
        assert_eq!(extract_tags(&envelope)[0].id, 2);
    }

    #[test]
    fn status_filter_keeps_exact_matches_only() {
        let tasks = vec![
            task(1, TaskStatus::Todo, TaskPriority::High),
            task(2, TaskStatus::InProgress, TaskPriority::Low),
            task(3, TaskStatus::Completed, TaskPriority::Urgent),
        ];
        let todo = filter_tasks_by_status(&tasks, TaskStatus::Todo);
        assert_eq!(todo.len(), 1);
        assert_eq!(todo[0].id, 1);
    }

    #[test]
    fn priority_filter_accepts_scalar_and_set() {
        let tasks = vec![
            task(1, TaskStatus::Todo, TaskPriority::High),
            task(2, TaskStatus::InProgress, TaskPriority::Low),
            task(3, TaskStatus::Completed, TaskPriority::Urgent),
        ];

        let high_only = filter_tasks_by_priority(&tasks, &[TaskPriority::High]);
        assert_eq!(high_only.len(), 1);
        assert_eq!(high_only[0].id, 1);

        let high_or_urgent =
            filter_tasks_by_priority(&tasks, &[TaskPriority::High, TaskPriority::Urgent]);
        assert_eq!(
            high_or_urgent.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![1, 3]
        );

        assert!(filter_tasks_by_priority(&[], &[TaskPriority::Low]).is_empty());
    }
}
