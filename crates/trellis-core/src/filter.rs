use tracing::trace;

use crate::model::{Task, TaskPriority, TaskStatus};

/// Case-insensitive substring search over title and description. A blank
/// query selects everything.
pub fn search_tasks(tasks: &[Task], query: &str) -> Vec<Task> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return tasks.to_vec();
    }

    tasks
        .iter()
        .filter(|task| matches_query(task, &q))
        .cloned()
        .collect()
}

fn matches_query(task: &Task, q: &str) -> bool {
    let ok = task.title.to_lowercase().contains(q) || task.description.to_lowercase().contains(q);
    trace!(id = task.id, ok, "search predicate evaluation");
    ok
}

/// The list view's visible set: search intersected with the optional status
/// and priority equality filters.
pub fn filter_visible_tasks(
    tasks: &[Task],
    query: &str,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
) -> Vec<Task> {
    let q = query.trim().to_lowercase();

    tasks
        .iter()
        .filter(|task| {
            if !q.is_empty() && !matches_query(task, &q) {
                return false;
            }
            if let Some(status) = status
                && task.status != status
            {
                return false;
            }
            if let Some(priority) = priority
                && task.priority != priority
            {
                return false;
            }
            true
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample_tasks() -> Vec<Task> {
        serde_json::from_value(json!([
            {"id": 1, "title": "Plan the launch", "description": "Draft rollout checklist",
             "status": "todo", "priority": "high"},
            {"id": 2, "title": "Fix login bug", "description": "Token refresh loops",
             "status": "in_progress", "priority": "low"},
            {"id": 3, "title": "Write release notes", "description": "Summarize the LAUNCH",
             "status": "completed", "priority": "urgent"}
        ]))
        .expect("sample tasks")
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let tasks = sample_tasks();
        let hits = search_tasks(&tasks, "launch");
        assert_eq!(hits.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn blank_query_selects_everything() {
        let tasks = sample_tasks();
        assert_eq!(search_tasks(&tasks, "").len(), 3);
        assert_eq!(search_tasks(&tasks, "   ").len(), 3);
    }

    #[test]
    fn filters_intersect_with_search() {
        let tasks = sample_tasks();

        let visible = filter_visible_tasks(&tasks, "", Some(TaskStatus::Todo), None);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 1);

        let visible = filter_visible_tasks(&tasks, "launch", None, Some(TaskPriority::Urgent));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 3);

        let visible = filter_visible_tasks(
            &tasks,
            "launch",
            Some(TaskStatus::Todo),
            Some(TaskPriority::Low),
        );
        assert!(visible.is_empty());
    }

    #[test]
    fn missing_term_yields_empty_even_when_tasks_exist() {
        let tasks = sample_tasks();
        assert!(filter_visible_tasks(&tasks, "xyz", None, None).is_empty());
    }
}
