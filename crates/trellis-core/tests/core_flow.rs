use serde_json::json;
use trellis_core::assist::{self, AssistExchange};
use trellis_core::filter::filter_visible_tasks;
use trellis_core::forms::{TaskForm, TITLE_REQUIRED};
use trellis_core::hierarchy::{self, HierarchyState};
use trellis_core::model::{Task, TaskPriority, TaskStatus};
use trellis_core::response::{extract_tasks, filter_tasks_by_priority, filter_tasks_by_status};
use trellis_core::summary::DashboardSummary;

fn fixture_tasks() -> Vec<Task> {
    let response = json!({
        "count": 3,
        "next": null,
        "results": [
            {"id": 1, "title": "Draft roadmap", "description": "Quarterly planning",
             "status": "todo", "priority": "high"},
            {"id": 2, "title": "Refactor auth", "description": "Token handling cleanup",
             "status": "in_progress", "priority": "low"},
            {"id": 3, "title": "Release hotfix", "description": "Production incident",
             "status": "completed", "priority": "urgent"}
        ]
    });
    extract_tasks(&response)
}

#[test]
fn list_view_filtering_end_to_end() {
    let tasks = fixture_tasks();
    assert_eq!(tasks.len(), 3);

    let todo = filter_tasks_by_status(&tasks, TaskStatus::Todo);
    assert_eq!(todo.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1]);

    let important =
        filter_tasks_by_priority(&tasks, &[TaskPriority::High, TaskPriority::Urgent]);
    assert_eq!(important.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 3]);

    // A miss with tasks present is distinguishable from having no tasks.
    let misses = filter_visible_tasks(&tasks, "xyz", None, None);
    assert!(misses.is_empty());
    assert!(!tasks.is_empty());
}

#[test]
fn dashboard_buckets_from_normalized_response() {
    let summary = DashboardSummary::build(&fixture_tasks());
    assert_eq!(summary.todo.len(), 1);
    assert_eq!(summary.in_progress.len(), 1);
    assert_eq!(summary.completed.len(), 1);
    assert_eq!(summary.high_priority_count, 2);
}

#[test]
fn create_form_blocks_blank_title_before_any_request() {
    let form = TaskForm {
        title: "  ".to_string(),
        ..TaskForm::default()
    };
    assert_eq!(form.validate(), Err(TITLE_REQUIRED.to_string()));
}

#[test]
fn hierarchy_interaction_flow() {
    let root: Task = serde_json::from_value(json!({
        "id": 10, "title": "Launch", "status": "in_progress", "priority": "high",
        "subtasks": [
            {"id": 11, "title": "Docs", "parent_task": 10, "subtasks": []},
            {"id": 12, "title": "QA pass", "parent_task": 10, "subtasks": [
                {"id": 13, "title": "Smoke tests", "parent_task": 12}
            ]}
        ]
    }))
    .expect("tree fixture");

    let mut state = HierarchyState::new(root.id);
    let rows = hierarchy::flatten(&root, &state);

    // Childless node renders the disabled placeholder control.
    let docs = rows.iter().find(|row| row.task.id == 11).expect("docs row");
    assert!(!docs.has_subtasks());
    assert!(!state.toggle(11, docs.has_subtasks()));

    // A node with children starts collapsed and expands with one toggle.
    let qa = rows.iter().find(|row| row.task.id == 12).expect("qa row");
    assert!(qa.has_subtasks());
    assert!(!qa.expanded);
    assert!(state.toggle(12, true));
    let rows = hierarchy::flatten(&root, &state);
    assert!(rows.iter().any(|row| row.task.id == 13));

    // Root is never deletable from within the tree; descendants need a handler.
    assert!(!hierarchy::can_delete(0, true));
    assert!(hierarchy::can_delete(1, true));
    assert!(!hierarchy::can_delete(2, false));
}

#[test]
fn assist_error_keeps_input_and_marks_response() {
    let mut exchange = AssistExchange::default();
    exchange.set_input("Suggest next steps".to_string());
    let (ticket, _) = exchange.begin().expect("submission");

    assert!(exchange.complete(ticket, Err("upstream timed out".to_string())));
    let response = exchange.response().expect("response text");
    assert!(response.starts_with("Error:"));
    assert!(assist::is_error_response(response));
    assert_eq!(exchange.input(), "Suggest next steps");

    // A retry succeeds and only then clears the input.
    let (ticket, _) = exchange.begin().expect("retry");
    assert!(exchange.complete(ticket, Ok("Here is a plan".to_string())));
    assert_eq!(exchange.input(), "");
}
