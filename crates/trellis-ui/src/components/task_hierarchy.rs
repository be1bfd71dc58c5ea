use yew::{Callback, Html, Properties, function_component, html, use_effect_with, use_state};
use yew_router::prelude::Link;

use trellis_core::hierarchy::{self, DisplayMode, HierarchyRow, HierarchyState};
use trellis_core::model::{Task, TaskStatus};

use crate::app::Route;
use crate::components::{PriorityBadge, StatusBadge};

#[derive(Properties, PartialEq)]
pub struct TaskHierarchyProps {
    pub task: Task,
    /// Without a handler the tree is read-only: no delete controls render.
    #[prop_or_default]
    pub on_delete_subtask: Option<Callback<u64>>,
}

#[function_component(TaskHierarchy)]
pub fn task_hierarchy(props: &TaskHierarchyProps) -> Html {
    let state = use_state(|| HierarchyState::new(props.task.id));

    // Fresh tree, fresh view state: navigating between tasks must not carry
    // expand flags across.
    {
        let state = state.clone();
        use_effect_with(props.task.id, move |id| {
            state.set(HierarchyState::new(*id));
            || ()
        });
    }

    let on_toggle = {
        let state = state.clone();
        Callback::from(move |(id, has_subtasks): (u64, bool)| {
            let mut next = (*state).clone();
            if next.toggle(id, has_subtasks) {
                state.set(next);
            }
        })
    };

    match DisplayMode::for_task(&props.task) {
        DisplayMode::SubtaskView { parent_id } => {
            let parent_title = props
                .task
                .parent_task_title
                .clone()
                .unwrap_or_else(|| "parent task".to_string());
            // Simplified view: just this node, never the parent's subtree.
            let mut solo = props.task.clone();
            solo.subtasks = Vec::new();
            html! {
                <div class="panel hierarchy">
                    <div class="header">{ "Task Hierarchy" }</div>
                    <div class="hierarchy-body">
                        <Link<Route> classes="parent-link" to={Route::TaskDetail { id: parent_id }}>
                            { format!("← Back to parent: {parent_title}") }
                        </Link<Route>>
                        { render_node(&HierarchyRow { task: &solo, level: 0, expanded: false }, &on_toggle, &None) }
                    </div>
                </div>
            }
        }
        DisplayMode::FullTree => {
            let rows = hierarchy::flatten(&props.task, &state);
            html! {
                <div class="panel hierarchy">
                    <div class="header">{ "Task Breakdown" }</div>
                    <div class="hierarchy-body">
                        {
                            for rows
                                .iter()
                                .map(|row| render_node(row, &on_toggle, &props.on_delete_subtask))
                        }
                        {
                            if props.task.has_subtasks() {
                                html! {}
                            } else {
                                html! {
                                    <div class="empty-state">
                                        { "No subtasks yet. Break down this task to get started!" }
                                    </div>
                                }
                            }
                        }
                    </div>
                </div>
            }
        }
    }
}

fn render_node(
    row: &HierarchyRow<'_>,
    on_toggle: &Callback<(u64, bool)>,
    on_delete: &Option<Callback<u64>>,
) -> Html {
    let task = row.task;
    let id = task.id;
    let has_subtasks = row.has_subtasks();
    let indent = format!("margin-left:{}px;", row.level * 20);

    let expand_control = if has_subtasks {
        let on_toggle = on_toggle.clone();
        html! {
            <button
                class="expand-btn"
                onclick={move |_| on_toggle.emit((id, true))}
            >
                { if row.expanded { "▼" } else { "▶" } }
            </button>
        }
    } else {
        // Fixed-width placeholder so node titles line up across the tree.
        html! { <button class="expand-btn" disabled={true}><span class="expand-spacer" /></button> }
    };

    let delete_control = match on_delete {
        Some(handler) if hierarchy::can_delete(row.level, true) => {
            let handler = handler.clone();
            let title = task.title.clone();
            let onclick = Callback::from(move |e: yew::MouseEvent| {
                e.stop_propagation();
                let confirmed = web_sys::window()
                    .and_then(|window| {
                        window
                            .confirm_with_message(&hierarchy::delete_prompt(&title))
                            .ok()
                    })
                    .unwrap_or(false);
                if confirmed {
                    handler.emit(id);
                }
            });
            html! { <button class="btn danger small" {onclick}>{ "Delete" }</button> }
        }
        _ => html! {},
    };

    let title_class = if task.status == TaskStatus::Completed {
        "node-title completed"
    } else {
        "node-title"
    };

    html! {
        <div class="hierarchy-node" style={indent}>
            <div class="node-header">
                { expand_control }
                <div class="node-info">
                    <Link<Route> classes={title_class} to={Route::TaskDetail { id }}>
                        { &task.title }
                    </Link<Route>>
                    <div class="node-meta">
                        <StatusBadge status={task.status} />
                        <PriorityBadge priority={task.priority} />
                        {
                            match task.progress {
                                Some(progress) if progress > 0 => {
                                    html! { <span class="progress">{ format!("{progress}%") }</span> }
                                }
                                _ => html! {},
                            }
                        }
                    </div>
                </div>
                { delete_control }
            </div>
        </div>
    }
}
