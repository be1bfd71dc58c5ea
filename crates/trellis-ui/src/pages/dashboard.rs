use yew::{Html, function_component, html, use_effect_with, use_state};
use yew_router::prelude::Link;

use trellis_core::model::{Task, TaskStatus};
use trellis_core::summary::{DashboardSummary, PREVIEW_LIMIT, bucket_preview};

use crate::api;
use crate::app::Route;
use crate::components::{PriorityBadge, StatusBadge};

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let tasks = use_state(Vec::<Task>::new);
    let loading = use_state(|| true);

    {
        let tasks = tasks.clone();
        let loading = loading.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match api::list_tasks().await {
                    Ok(list) => tasks.set(list),
                    Err(err) => tracing::error!(error = %err, "dashboard task fetch failed"),
                }
                loading.set(false);
            });
            || ()
        });
    }

    if *loading {
        return html! { <div class="loading">{ "Loading dashboard..." }</div> };
    }

    let summary = DashboardSummary::build(&tasks);

    html! {
        <div class="dashboard">
            <div class="page-header">
                <h1>{ "Dashboard" }</h1>
                <Link<Route> classes="btn primary" to={Route::NewTask}>{ "New Task" }</Link<Route>>
            </div>

            <div class="stat-grid">
                { stat_card("To Do", summary.todo.len()) }
                { stat_card("In Progress", summary.in_progress.len()) }
                { stat_card("Completed", summary.completed.len()) }
                { stat_card("High Priority", summary.high_priority_count) }
            </div>

            <div class="bucket-grid">
                {
                    for TaskStatus::ALL.into_iter().map(|status| {
                        status_section(status, bucket_preview(summary.bucket(status), PREVIEW_LIMIT))
                    })
                }
            </div>
        </div>
    }
}

fn stat_card(label: &str, count: usize) -> Html {
    html! {
        <div class="stat-card">
            <div class="stat-number">{ count }</div>
            <div class="stat-label">{ label }</div>
        </div>
    }
}

fn status_section(status: TaskStatus, preview: &[Task]) -> Html {
    html! {
        <div class="panel">
            <div class="header">{ status.label() }</div>
            {
                if preview.is_empty() {
                    html! { <div class="empty-state">{ "No items" }</div> }
                } else {
                    html! {
                        <div class="bucket-list">
                            {
                                for preview.iter().map(|task| html! {
                                    <Link<Route>
                                        classes="bucket-item"
                                        to={Route::TaskDetail { id: task.id }}
                                    >
                                        <div class="bucket-title">{ &task.title }</div>
                                        <div class="bucket-meta">
                                            <StatusBadge status={task.status} />
                                            <PriorityBadge priority={task.priority} />
                                        </div>
                                    </Link<Route>>
                                })
                            }
                        </div>
                    }
                }
            }
        </div>
    }
}
