use crate::model::{TaskPriority, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    Alert,
    Clock,
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusVisual {
    pub badge_class: &'static str,
    pub icon: StatusIcon,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityVisual {
    pub badge_class: &'static str,
    pub label: &'static str,
}

pub fn status_visual(status: TaskStatus) -> StatusVisual {
    match status {
        TaskStatus::Todo => StatusVisual {
            badge_class: "badge status-todo",
            icon: StatusIcon::Alert,
            label: "to do",
        },
        TaskStatus::InProgress => StatusVisual {
            badge_class: "badge status-progress",
            icon: StatusIcon::Clock,
            label: "in progress",
        },
        TaskStatus::Completed => StatusVisual {
            badge_class: "badge status-completed",
            icon: StatusIcon::Check,
            label: "completed",
        },
    }
}

pub fn priority_visual(priority: TaskPriority) -> PriorityVisual {
    match priority {
        TaskPriority::Low => PriorityVisual {
            badge_class: "badge priority-low",
            label: "low",
        },
        TaskPriority::Medium => PriorityVisual {
            badge_class: "badge priority-medium",
            label: "medium",
        },
        TaskPriority::High => PriorityVisual {
            badge_class: "badge priority-high",
            label: "high",
        },
        TaskPriority::Urgent => PriorityVisual {
            badge_class: "badge priority-urgent",
            label: "urgent",
        },
    }
}

/// A wire value that failed to parse as a priority renders with the todo
/// badge style rather than inventing a fifth priority look.
pub fn priority_visual_or_todo(priority: Option<TaskPriority>) -> PriorityVisual {
    match priority {
        Some(priority) => priority_visual(priority),
        None => PriorityVisual {
            badge_class: "badge status-todo",
            label: "unknown",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TaskPriority, TaskStatus};

    #[test]
    fn status_maps_to_distinct_badges_and_icons() {
        assert_eq!(status_visual(TaskStatus::Todo).icon, StatusIcon::Alert);
        assert_eq!(status_visual(TaskStatus::InProgress).icon, StatusIcon::Clock);
        assert_eq!(status_visual(TaskStatus::Completed).icon, StatusIcon::Check);

        let classes: Vec<&str> = TaskStatus::ALL
            .into_iter()
            .map(|status| status_visual(status).badge_class)
            .collect();
        assert_eq!(classes.len(), 3);
        assert!(classes.windows(2).all(|pair| pair[0] != pair[1]));
    }

    #[test]
    fn unrecognized_status_renders_as_todo() {
        let visual = status_visual(TaskStatus::from_wire("someday"));
        assert_eq!(visual.icon, StatusIcon::Alert);
        assert_eq!(visual.badge_class, "badge status-todo");
    }

    #[test]
    fn unrecognized_priority_falls_back_to_todo_style() {
        let visual = priority_visual_or_todo(TaskPriority::from_wire("blocker"));
        assert_eq!(visual.badge_class, "badge status-todo");

        let visual = priority_visual_or_todo(TaskPriority::from_wire("urgent"));
        assert_eq!(visual.badge_class, "badge priority-urgent");
    }
}
