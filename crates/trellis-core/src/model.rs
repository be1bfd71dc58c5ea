use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    pub fn as_wire(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Wire values outside the known set collapse to `Todo`; the server owns
    /// the status vocabulary and the client only needs a renderable value.
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "todo" => TaskStatus::Todo,
            "in_progress" => TaskStatus::InProgress,
            "completed" => TaskStatus::Completed,
            other => {
                warn!(value = other, "unrecognized task status from server");
                TaskStatus::Todo
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl Serialize for TaskStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(TaskStatus::from_wire(&raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 4] = [
        TaskPriority::Low,
        TaskPriority::Medium,
        TaskPriority::High,
        TaskPriority::Urgent,
    ];

    pub fn as_wire(self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Urgent => "urgent",
        }
    }

    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw {
            "low" => Some(TaskPriority::Low),
            "medium" => Some(TaskPriority::Medium),
            "high" => Some(TaskPriority::High),
            "urgent" => Some(TaskPriority::Urgent),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
            TaskPriority::Urgent => "Urgent",
        }
    }
}

impl Serialize for TaskPriority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for TaskPriority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(TaskPriority::from_wire(&raw).unwrap_or_else(|| {
            warn!(value = %raw, "unrecognized task priority from server");
            TaskPriority::Medium
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Free-text notes; the server appends the AI conversation log here.
    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub status: TaskStatus,

    #[serde(default)]
    pub priority: TaskPriority,

    #[serde(default)]
    pub progress: Option<u8>,

    #[serde(default)]
    pub due_date: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,

    #[serde(default)]
    pub tags: Vec<Tag>,

    /// Back-reference only; lifecycle lives server-side.
    #[serde(default)]
    pub parent_task: Option<u64>,

    #[serde(default)]
    pub parent_task_title: Option<String>,

    /// Children carried for display; the server guarantees the tree shape.
    #[serde(default)]
    pub subtasks: Vec<Task>,
}

impl Task {
    pub fn has_subtasks(&self) -> bool {
        !self.subtasks.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag_ids: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_task: Option<u64>,
}

/// Partial update; `Some(None)` on a double-`Option` field serializes as an
/// explicit `null` so the server clears the value.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<u64>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagDraft {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AiSuggestRequest {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AiSuggestResponse {
    pub ai_response: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AiSettings {
    #[serde(default)]
    pub has_api_key: bool,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub max_tokens: u32,
    #[serde(default)]
    pub temperature: f32,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub api_key_preview: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AiSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionTestResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_round_trip() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::from_wire(status.as_wire()), status);
        }
    }

    #[test]
    fn unknown_status_falls_back_to_todo() {
        assert_eq!(TaskStatus::from_wire("cancelled"), TaskStatus::Todo);
        assert_eq!(TaskStatus::from_wire(""), TaskStatus::Todo);
    }

    #[test]
    fn unknown_priority_is_rejected_by_parse() {
        assert_eq!(TaskPriority::from_wire("high"), Some(TaskPriority::High));
        assert_eq!(TaskPriority::from_wire("severe"), None);
    }

    #[test]
    fn task_deserializes_with_missing_optional_fields() {
        let task: Task = serde_json::from_str(r#"{"id": 7, "title": "Ship it"}"#)
            .expect("minimal task should deserialize");
        assert_eq!(task.id, 7);
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert!(task.subtasks.is_empty());
        assert!(!task.has_subtasks());
    }

    #[test]
    fn nested_subtasks_deserialize_recursively() {
        let raw = r#"{
            "id": 1, "title": "root", "status": "in_progress", "priority": "high",
            "subtasks": [
                {"id": 2, "title": "child", "status": "todo", "priority": "low",
                 "parent_task": 1, "subtasks": [
                    {"id": 3, "title": "grandchild", "status": "completed",
                     "priority": "urgent", "parent_task": 2}
                 ]}
            ]
        }"#;
        let task: Task = serde_json::from_str(raw).expect("nested task");
        assert_eq!(task.subtasks.len(), 1);
        assert_eq!(task.subtasks[0].subtasks[0].id, 3);
        assert_eq!(task.subtasks[0].subtasks[0].status, TaskStatus::Completed);
    }

    #[test]
    fn patch_skips_unset_fields_and_emits_explicit_nulls() {
        let patch = TaskPatch {
            title: Some("New title".to_string()),
            due_date: Some(None),
            ..TaskPatch::default()
        };
        let value = serde_json::to_value(&patch).expect("serialize patch");
        assert_eq!(
            value,
            serde_json::json!({"title": "New title", "due_date": null})
        );
    }
}
