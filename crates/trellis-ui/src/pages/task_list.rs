use chrono::{DateTime, Utc};
use yew::{Callback, Html, TargetCast, function_component, html, use_effect_with, use_state};
use yew_router::prelude::Link;

use trellis_core::datetime;
use trellis_core::filter::filter_visible_tasks;
use trellis_core::model::{Task, TaskPriority, TaskStatus};

use crate::api;
use crate::app::Route;
use crate::components::{PriorityBadge, StatusBadge, TagBadge};

fn status_from_value(value: &str) -> Option<TaskStatus> {
    TaskStatus::ALL
        .into_iter()
        .find(|status| status.as_wire() == value)
}

fn priority_from_value(value: &str) -> Option<TaskPriority> {
    TaskPriority::ALL
        .into_iter()
        .find(|priority| priority.as_wire() == value)
}

fn now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

#[function_component(TaskListPage)]
pub fn task_list_page() -> Html {
    let tasks = use_state(Vec::<Task>::new);
    let loading = use_state(|| true);
    let search = use_state(String::new);
    let status_filter = use_state(|| "all".to_string());
    let priority_filter = use_state(|| "all".to_string());

    {
        let tasks = tasks.clone();
        let loading = loading.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match api::list_tasks().await {
                    Ok(list) => tasks.set(list),
                    Err(err) => tracing::error!(error = %err, "task list fetch failed"),
                }
                loading.set(false);
            });
            || ()
        });
    }

    let on_search = {
        let search = search.clone();
        Callback::from(move |e: web_sys::InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            search.set(input.value());
        })
    };

    let on_status = {
        let status_filter = status_filter.clone();
        Callback::from(move |e: web_sys::Event| {
            if let Some(select) = e.target_dyn_into::<web_sys::HtmlSelectElement>() {
                status_filter.set(select.value());
            }
        })
    };

    let on_priority = {
        let priority_filter = priority_filter.clone();
        Callback::from(move |e: web_sys::Event| {
            if let Some(select) = e.target_dyn_into::<web_sys::HtmlSelectElement>() {
                priority_filter.set(select.value());
            }
        })
    };

    if *loading {
        return html! { <div class="loading">{ "Loading tasks..." }</div> };
    }

    let visible = filter_visible_tasks(
        &tasks,
        &search,
        status_from_value(&status_filter),
        priority_from_value(&priority_filter),
    );
    let now = now();

    html! {
        <div class="task-list-page">
            <div class="page-header">
                <h1>{ "Tasks" }</h1>
                <Link<Route> classes="btn primary" to={Route::NewTask}>{ "New Task" }</Link<Route>>
            </div>

            <div class="filter-bar">
                <input
                    type="search"
                    placeholder="Search tasks..."
                    value={(*search).clone()}
                    oninput={on_search}
                />
                <select onchange={on_status}>
                    <option value="all" selected={*status_filter == "all"}>{ "All statuses" }</option>
                    {
                        for TaskStatus::ALL.into_iter().map(|status| html! {
                            <option
                                value={status.as_wire()}
                                selected={*status_filter == status.as_wire()}
                            >
                                { status.label() }
                            </option>
                        })
                    }
                </select>
                <select onchange={on_priority}>
                    <option value="all" selected={*priority_filter == "all"}>{ "All priorities" }</option>
                    {
                        for TaskPriority::ALL.into_iter().map(|priority| html! {
                            <option
                                value={priority.as_wire()}
                                selected={*priority_filter == priority.as_wire()}
                            >
                                { priority.label() }
                            </option>
                        })
                    }
                </select>
            </div>

            {
                if tasks.is_empty() {
                    html! {
                        <div class="empty-state">
                            { "No tasks yet. " }
                            <Link<Route> to={Route::NewTask}>{ "Create your first task" }</Link<Route>>
                        </div>
                    }
                } else if visible.is_empty() {
                    html! { <div class="empty-state">{ "No tasks match your filters." }</div> }
                } else {
                    html! {
                        <div class="panel list">
                            { for visible.iter().map(|task| task_row(task, now)) }
                        </div>
                    }
                }
            }
        </div>
    }
}

fn task_row(task: &Task, now: DateTime<Utc>) -> Html {
    let overdue = task.status != TaskStatus::Completed
        && datetime::is_overdue(task.due_date.as_deref(), now);
    let due_class = if overdue { "badge due overdue" } else { "badge due" };

    html! {
        <Link<Route> classes="row" to={Route::TaskDetail { id: task.id }}>
            <div class="row-main">
                <div class="row-title">{ &task.title }</div>
                {
                    if task.description.is_empty() {
                        html! {}
                    } else {
                        html! { <div class="row-subtitle">{ &task.description }</div> }
                    }
                }
                <div class="row-meta">
                    <StatusBadge status={task.status} />
                    <PriorityBadge priority={task.priority} />
                    {
                        for task.tags.iter().take(4).map(|tag| html! {
                            <TagBadge name={tag.name.clone()} color={tag.color.clone()} />
                        })
                    }
                </div>
            </div>
            <div class="row-side">
                {
                    match task.due_date.as_deref() {
                        Some(due) => html! {
                            <span class={due_class}>
                                { format!("due: {}", datetime::format_timestamp(due)) }
                            </span>
                        },
                        None => html! {},
                    }
                }
            </div>
        </Link<Route>>
    }
}
