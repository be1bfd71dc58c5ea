use yew::{
    Callback, Html, Properties, TargetCast, function_component, html, use_effect_with,
    use_force_update, use_mut_ref, use_state,
};
use yew_router::prelude::use_navigator;

use trellis_core::assist::{self, AssistExchange};
use trellis_core::datetime;
use trellis_core::forms::{self, TITLE_REQUIRED};
use trellis_core::model::Task;

use crate::api;
use crate::app::{Route, ui_debug};
use crate::components::{ErrorBanner, PriorityBadge, StatusBadge, TagBadge, TaskHierarchy};

#[derive(Properties, PartialEq)]
pub struct TaskDetailProps {
    pub id: u64,
}

#[function_component(TaskDetailPage)]
pub fn task_detail_page(props: &TaskDetailProps) -> Html {
    let navigator = use_navigator().expect("navigator missing");

    let task = use_state(|| None::<Task>);
    let loading = use_state(|| true);
    let refresh_tick = use_state(|| 0_u64);

    // The exchange lives in a ref so a completion can check its ticket
    // against the *current* counter, not a snapshot from submit time.
    let exchange = use_mut_ref(AssistExchange::default);
    let redraw = use_force_update();

    let action_error = use_state(|| None::<String>);
    let subtask_title = use_state(String::new);
    let subtask_description = use_state(String::new);
    let subtask_error = use_state(|| None::<String>);

    {
        let task = task.clone();
        let loading = loading.clone();
        use_effect_with((props.id, *refresh_tick), move |(id, tick)| {
            let id = *id;
            let tick = *tick;
            let task = task.clone();
            let loading = loading.clone();
            wasm_bindgen_futures::spawn_local(async move {
                tracing::info!(id, tick, "refreshing task detail");
                match api::get_task(id).await {
                    Ok(fetched) => task.set(Some(fetched)),
                    Err(err) => {
                        tracing::error!(error = %err, id, "task fetch failed");
                        task.set(None);
                    }
                }
                loading.set(false);
            });
            || ()
        });
    }

    let bump = {
        let refresh_tick = refresh_tick.clone();
        Callback::from(move |_: ()| {
            refresh_tick.set((*refresh_tick).saturating_add(1));
        })
    };

    if *loading {
        return html! { <div class="loading">{ "Loading task..." }</div> };
    }

    let Some(current) = (*task).clone() else {
        return html! { <div class="empty-state">{ "Task not found" }</div> };
    };

    let id = current.id;

    let on_back = {
        let navigator = navigator.clone();
        Callback::from(move |_| navigator.push(&Route::Tasks))
    };

    let on_edit = {
        let navigator = navigator.clone();
        Callback::from(move |_| navigator.push(&Route::EditTask { id }))
    };

    let on_delete = {
        let navigator = navigator.clone();
        let action_error = action_error.clone();
        Callback::from(move |_| {
            let confirmed = web_sys::window()
                .and_then(|window| {
                    window
                        .confirm_with_message("Are you sure you want to delete this task?")
                        .ok()
                })
                .unwrap_or(false);
            if !confirmed {
                return;
            }

            let navigator = navigator.clone();
            let action_error = action_error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::delete_task(id).await {
                    Ok(()) => navigator.push(&Route::Tasks),
                    Err(err) => action_error.set(Some(err.to_string())),
                }
            });
        })
    };

    let on_delete_subtask = {
        let bump = bump.clone();
        let action_error = action_error.clone();
        Callback::from(move |subtask_id: u64| {
            let bump = bump.clone();
            let action_error = action_error.clone();
            ui_debug("action.subtask.delete", "confirmed subtask deletion");
            wasm_bindgen_futures::spawn_local(async move {
                match api::delete_task(subtask_id).await {
                    Ok(()) => bump.emit(()),
                    Err(err) => {
                        tracing::error!(error = %err, subtask_id, "subtask deletion failed");
                        action_error.set(Some(err.to_string()));
                    }
                }
            });
        })
    };

    let on_ai_input = {
        let exchange = exchange.clone();
        let redraw = redraw.clone();
        Callback::from(move |e: web_sys::InputEvent| {
            let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
            exchange.borrow_mut().set_input(input.value());
            redraw.force_update();
        })
    };

    let on_ai_submit = {
        let exchange = exchange.clone();
        let redraw = redraw.clone();
        Callback::from(move |e: web_sys::SubmitEvent| {
            e.prevent_default();
            let Some((ticket, message)) = exchange.borrow_mut().begin() else {
                return;
            };
            redraw.force_update();
            ui_debug("action.ai_suggest", "assist request submitted");

            let exchange = exchange.clone();
            let redraw = redraw.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = api::ai_suggest(id, message)
                    .await
                    .map(|response| response.ai_response)
                    .map_err(|err| err.to_string());
                if exchange.borrow_mut().complete(ticket, result) {
                    redraw.force_update();
                }
            });
        })
    };

    let on_breakdown = {
        let task_snapshot = current.clone();
        let action_error = action_error.clone();
        let bump = bump.clone();
        Callback::from(move |_| {
            if let Err(message) = assist::breakdown_guard(&task_snapshot) {
                action_error.set(Some(message));
                return;
            }

            let action_error = action_error.clone();
            let bump = bump.clone();
            action_error.set(None);
            ui_debug("action.breakdown", "breakdown requested");
            wasm_bindgen_futures::spawn_local(async move {
                match api::breakdown_task(id).await {
                    Ok(()) => bump.emit(()),
                    Err(err) => action_error.set(Some(err.to_string())),
                }
            });
        })
    };

    let on_subtask_title = {
        let subtask_title = subtask_title.clone();
        Callback::from(move |e: web_sys::InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            subtask_title.set(input.value());
        })
    };

    let on_subtask_description = {
        let subtask_description = subtask_description.clone();
        Callback::from(move |e: web_sys::InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            subtask_description.set(input.value());
        })
    };

    let on_subtask_submit = {
        let subtask_title = subtask_title.clone();
        let subtask_description = subtask_description.clone();
        let subtask_error = subtask_error.clone();
        let bump = bump.clone();
        Callback::from(move |e: web_sys::SubmitEvent| {
            e.prevent_default();

            if subtask_title.trim().is_empty() {
                subtask_error.set(Some(TITLE_REQUIRED.to_string()));
                return;
            }

            let draft = forms::subtask_draft(id, &subtask_title, &subtask_description);
            let subtask_title = subtask_title.clone();
            let subtask_description = subtask_description.clone();
            let subtask_error = subtask_error.clone();
            let bump = bump.clone();

            subtask_error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match api::create_task(&draft).await {
                    Ok(created) => {
                        tracing::info!(id = created.id, "subtask created");
                        subtask_title.set(String::new());
                        subtask_description.set(String::new());
                        bump.emit(());
                    }
                    Err(err) => subtask_error.set(Some(err.to_string())),
                }
            });
        })
    };

    let assist_view = {
        let snapshot = exchange.borrow();
        let response = snapshot.response().map(|text| {
            let class = if assist::is_error_response(text) {
                "ai-response error"
            } else {
                "ai-response"
            };
            html! { <div {class}>{ text.to_string() }</div> }
        });
        html! {
            <div class="panel ai-section">
                <div class="header">{ "AI Assistant" }</div>
                <form onsubmit={on_ai_submit}>
                    <textarea
                        placeholder="Ask the AI assistant for help with this task..."
                        value={snapshot.input().to_string()}
                        oninput={on_ai_input}
                    />
                    <button
                        class="btn primary"
                        type="submit"
                        disabled={snapshot.is_pending() || snapshot.input().trim().is_empty()}
                    >
                        { if snapshot.is_pending() { "Getting AI Response..." } else { "Ask AI" } }
                    </button>
                </form>
                { response.unwrap_or_default() }
            </div>
        }
    };

    html! {
        <div class="task-detail">
            <div class="page-header">
                <button class="btn" onclick={on_back}>{ "← Back to Tasks" }</button>
                <h1>{ &current.title }</h1>
                <div class="actions">
                    <button class="btn" onclick={on_edit}>{ "Edit" }</button>
                    <button class="btn danger" onclick={on_delete}>{ "Delete" }</button>
                </div>
            </div>

            <ErrorBanner message={(*action_error).clone()} />

            <div class="panel details">
                <div class="detail-meta">
                    <StatusBadge status={current.status} />
                    <PriorityBadge priority={current.priority} />
                    {
                        for current.tags.iter().map(|tag| html! {
                            <TagBadge name={tag.name.clone()} color={tag.color.clone()} />
                        })
                    }
                </div>

                <div class="description">
                    {
                        if current.description.is_empty() {
                            html! { <em>{ "No description provided" }</em> }
                        } else {
                            html! { <span>{ &current.description }</span> }
                        }
                    }
                </div>

                {
                    match current.created_at.as_deref() {
                        Some(created) => html! {
                            <div class="kv">
                                <strong>{ "Created" }</strong>
                                <div>{ datetime::format_timestamp(created) }</div>
                            </div>
                        },
                        None => html! {},
                    }
                }
                {
                    match current.due_date.as_deref() {
                        Some(due) => html! {
                            <div class="kv">
                                <strong>{ "Due" }</strong>
                                <div>{ datetime::format_timestamp(due) }</div>
                            </div>
                        },
                        None => html! {},
                    }
                }
                {
                    match (current.updated_at.as_deref(), current.created_at.as_deref()) {
                        (Some(updated), created) if created != Some(updated) => html! {
                            <div class="kv">
                                <strong>{ "Updated" }</strong>
                                <div>{ datetime::format_timestamp(updated) }</div>
                            </div>
                        },
                        _ => html! {},
                    }
                }

                {
                    if current.notes.is_empty() {
                        html! {}
                    } else {
                        html! {
                            <div class="notes">
                                <strong>{ "Notes" }</strong>
                                <div class="notes-body">{ &current.notes }</div>
                            </div>
                        }
                    }
                }
            </div>

            <TaskHierarchy task={current.clone()} on_delete_subtask={Some(on_delete_subtask)} />

            <div class="panel">
                <div class="header">{ "Subtasks" }</div>
                <div class="subtask-actions">
                    <button class="btn" onclick={on_breakdown}>{ "AI Breakdown" }</button>
                </div>
                <form class="subtask-form" onsubmit={on_subtask_submit}>
                    <ErrorBanner message={(*subtask_error).clone()} />
                    <input
                        type="text"
                        placeholder="Subtask title"
                        value={(*subtask_title).clone()}
                        oninput={on_subtask_title}
                    />
                    <input
                        type="text"
                        placeholder="Description (optional)"
                        value={(*subtask_description).clone()}
                        oninput={on_subtask_description}
                    />
                    <button class="btn primary" type="submit">{ "Add Subtask" }</button>
                </form>
            </div>

            { assist_view }
        </div>
    }
}
