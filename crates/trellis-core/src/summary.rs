use crate::model::{Task, TaskPriority, TaskStatus};

/// The dashboard shows at most this many tasks per status bucket.
pub const PREVIEW_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub todo: Vec<Task>,
    pub in_progress: Vec<Task>,
    pub completed: Vec<Task>,
    pub high_priority_count: usize,
}

impl DashboardSummary {
    pub fn build(tasks: &[Task]) -> Self {
        let mut summary = Self::default();
        for task in tasks {
            match task.status {
                TaskStatus::Todo => summary.todo.push(task.clone()),
                TaskStatus::InProgress => summary.in_progress.push(task.clone()),
                TaskStatus::Completed => summary.completed.push(task.clone()),
            }
            if matches!(task.priority, TaskPriority::High | TaskPriority::Urgent) {
                summary.high_priority_count += 1;
            }
        }
        summary
    }

    pub fn bucket(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Completed => &self.completed,
        }
    }
}

pub fn bucket_preview(bucket: &[Task], limit: usize) -> &[Task] {
    &bucket[..bucket.len().min(limit)]
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn tasks() -> Vec<Task> {
        serde_json::from_value(json!([
            {"id": 1, "title": "a", "status": "todo", "priority": "high"},
            {"id": 2, "title": "b", "status": "todo", "priority": "low"},
            {"id": 3, "title": "c", "status": "in_progress", "priority": "urgent"},
            {"id": 4, "title": "d", "status": "completed", "priority": "medium"},
            {"id": 5, "title": "e", "status": "completed", "priority": "urgent"},
            {"id": 6, "title": "f", "status": "todo", "priority": "low"},
            {"id": 7, "title": "g", "status": "todo", "priority": "low"},
            {"id": 8, "title": "h", "status": "todo", "priority": "low"},
            {"id": 9, "title": "i", "status": "todo", "priority": "low"}
        ]))
        .expect("summary fixture")
    }

    #[test]
    fn buckets_group_by_status() {
        let summary = DashboardSummary::build(&tasks());
        assert_eq!(summary.todo.len(), 6);
        assert_eq!(summary.in_progress.len(), 1);
        assert_eq!(summary.completed.len(), 2);
    }

    #[test]
    fn high_priority_counts_high_and_urgent() {
        let summary = DashboardSummary::build(&tasks());
        assert_eq!(summary.high_priority_count, 3);
    }

    #[test]
    fn preview_caps_each_bucket() {
        let summary = DashboardSummary::build(&tasks());
        assert_eq!(bucket_preview(&summary.todo, PREVIEW_LIMIT).len(), 5);
        assert_eq!(bucket_preview(&summary.in_progress, PREVIEW_LIMIT).len(), 1);
        assert!(bucket_preview(&[], PREVIEW_LIMIT).is_empty());
    }
}
