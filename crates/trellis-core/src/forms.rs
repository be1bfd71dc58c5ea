use crate::datetime;
use crate::model::{Task, TaskDraft, TaskPatch, TaskPriority, TaskStatus};

pub const TITLE_REQUIRED: &str = "Title is required";

/// Draft state behind the create and edit forms. The only client-side rule
/// is the title check; everything else is the server's call.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: String,
    pub tag_ids: Vec<u64>,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            due_date: String::new(),
            tag_ids: Vec::new(),
        }
    }
}

impl TaskForm {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            due_date: task
                .due_date
                .as_deref()
                .map(datetime::datetime_local_value)
                .unwrap_or_default(),
            tag_ids: task.tags.iter().map(|tag| tag.id).collect(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err(TITLE_REQUIRED.to_string());
        }
        Ok(())
    }

    pub fn toggle_tag(&mut self, tag_id: u64) {
        if let Some(pos) = self.tag_ids.iter().position(|id| *id == tag_id) {
            self.tag_ids.remove(pos);
        } else {
            self.tag_ids.push(tag_id);
        }
    }

    pub fn draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            status: self.status,
            priority: self.priority,
            due_date: some_if_nonempty(&self.due_date),
            tag_ids: self.tag_ids.clone(),
            parent_task: None,
        }
    }

    /// Full-form patch for the edit page; a cleared due date becomes an
    /// explicit null so the server drops it.
    pub fn patch(&self) -> TaskPatch {
        TaskPatch {
            title: Some(self.title.trim().to_string()),
            description: Some(self.description.clone()),
            status: Some(self.status),
            priority: Some(self.priority),
            due_date: Some(some_if_nonempty(&self.due_date)),
            tag_ids: Some(self.tag_ids.clone()),
            ..TaskPatch::default()
        }
    }
}

/// Manual subtask creation inherits medium priority and todo status and links
/// to its parent.
pub fn subtask_draft(parent_id: u64, title: &str, description: &str) -> TaskDraft {
    TaskDraft {
        title: title.trim().to_string(),
        description: description.to_string(),
        status: TaskStatus::Todo,
        priority: TaskPriority::Medium,
        due_date: None,
        tag_ids: Vec::new(),
        parent_task: Some(parent_id),
    }
}

fn some_if_nonempty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn blank_title_is_rejected() {
        let form = TaskForm::default();
        assert_eq!(form.validate(), Err(TITLE_REQUIRED.to_string()));

        let form = TaskForm {
            title: "   ".to_string(),
            ..TaskForm::default()
        };
        assert_eq!(form.validate(), Err(TITLE_REQUIRED.to_string()));
    }

    #[test]
    fn trimmed_title_passes_and_reaches_the_draft() {
        let form = TaskForm {
            title: "  Ship it  ".to_string(),
            ..TaskForm::default()
        };
        assert!(form.validate().is_ok());
        assert_eq!(form.draft().title, "Ship it");
    }

    #[test]
    fn empty_due_date_is_omitted_on_create_and_nulled_on_edit() {
        let form = TaskForm {
            title: "t".to_string(),
            ..TaskForm::default()
        };
        assert_eq!(form.draft().due_date, None);
        assert_eq!(form.patch().due_date, Some(None));

        let value = serde_json::to_value(form.patch()).expect("patch json");
        assert_eq!(value["due_date"], json!(null));
    }

    #[test]
    fn from_task_prefills_tags_and_due_date() {
        let task: crate::model::Task = serde_json::from_value(json!({
            "id": 5, "title": "edit me", "status": "in_progress", "priority": "urgent",
            "due_date": "2026-08-07T09:30:00Z",
            "tags": [{"id": 1, "name": "work"}, {"id": 3, "name": "deep"}]
        }))
        .expect("task fixture");

        let form = TaskForm::from_task(&task);
        assert_eq!(form.due_date, "2026-08-07T09:30");
        assert_eq!(form.tag_ids, vec![1, 3]);

        let mut form = form;
        form.toggle_tag(1);
        assert_eq!(form.tag_ids, vec![3]);
        form.toggle_tag(7);
        assert_eq!(form.tag_ids, vec![3, 7]);
    }

    #[test]
    fn subtask_draft_inherits_defaults_and_parent() {
        let draft = subtask_draft(12, "  Child task ", "details");
        assert_eq!(draft.title, "Child task");
        assert_eq!(draft.status, TaskStatus::Todo);
        assert_eq!(draft.priority, TaskPriority::Medium);
        assert_eq!(draft.parent_task, Some(12));
    }
}
