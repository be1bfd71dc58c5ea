use yew::{
    Callback, Html, Properties, TargetCast, function_component, html, use_effect_with, use_state,
};
use yew_router::prelude::use_navigator;

use trellis_core::forms::TaskForm;
use trellis_core::model::{Tag, TagDraft, TaskPriority, TaskStatus};

use crate::api;
use crate::app::{Route, ui_debug};
use crate::components::ErrorBanner;

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

#[derive(Properties, PartialEq)]
struct TaskFormFieldsProps {
    form: TaskForm,
    tags: Vec<Tag>,
    error: Option<String>,
    busy: bool,
    submit_label: String,
    on_change: Callback<TaskForm>,
    on_submit: Callback<()>,
    on_create_tag: Callback<String>,
}

#[function_component(TaskFormFields)]
fn task_form_fields(props: &TaskFormFieldsProps) -> Html {
    let new_tag = use_state(String::new);

    let update = |props: &TaskFormFieldsProps, apply: fn(&mut TaskForm, String)| {
        let form = props.form.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |value: String| {
            let mut next = form.clone();
            apply(&mut next, value);
            on_change.emit(next);
        })
    };

    let set_title = update(props, |form, value| form.title = value);
    let set_description = update(props, |form, value| form.description = value);
    let set_due_date = update(props, |form, value| form.due_date = value);

    let on_title = {
        let set_title = set_title.clone();
        Callback::from(move |e: web_sys::InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            set_title.emit(input.value());
        })
    };

    let on_description = {
        let set_description = set_description.clone();
        Callback::from(move |e: web_sys::InputEvent| {
            let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
            set_description.emit(input.value());
        })
    };

    let on_due_date = {
        let set_due_date = set_due_date.clone();
        Callback::from(move |e: web_sys::InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            set_due_date.emit(input.value());
        })
    };

    let on_status = {
        let form = props.form.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: web_sys::Event| {
            let Some(select) = e.target_dyn_into::<web_sys::HtmlSelectElement>() else {
                return;
            };
            if let Some(status) = status_from_value(&select.value()) {
                let mut next = form.clone();
                next.status = status;
                on_change.emit(next);
            }
        })
    };

    let on_priority = {
        let form = props.form.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: web_sys::Event| {
            let Some(select) = e.target_dyn_into::<web_sys::HtmlSelectElement>() else {
                return;
            };
            if let Some(priority) = priority_from_value(&select.value()) {
                let mut next = form.clone();
                next.priority = priority;
                on_change.emit(next);
            }
        })
    };

    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: web_sys::SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let on_new_tag = {
        let new_tag = new_tag.clone();
        Callback::from(move |e: web_sys::InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            new_tag.set(input.value());
        })
    };

    let on_add_tag = {
        let new_tag = new_tag.clone();
        let on_create_tag = props.on_create_tag.clone();
        Callback::from(move |_| {
            let name = new_tag.trim().to_string();
            if name.is_empty() {
                return;
            }
            on_create_tag.emit(name);
            new_tag.set(String::new());
        })
    };

    html! {
        <form class="panel task-form" onsubmit={on_submit}>
            <ErrorBanner message={props.error.clone()} />

            <label>
                { "Title" }
                <input type="text" value={props.form.title.clone()} oninput={on_title} />
            </label>

            <label>
                { "Description" }
                <textarea value={props.form.description.clone()} oninput={on_description} />
            </label>

            <div class="form-row">
                <label>
                    { "Status" }
                    <select onchange={on_status}>
                        {
                            for TaskStatus::ALL.into_iter().map(|status| html! {
                                <option
                                    value={status.as_wire()}
                                    selected={props.form.status == status}
                                >
                                    { status.label() }
                                </option>
                            })
                        }
                    </select>
                </label>

                <label>
                    { "Priority" }
                    <select onchange={on_priority}>
                        {
                            for TaskPriority::ALL.into_iter().map(|priority| html! {
                                <option
                                    value={priority.as_wire()}
                                    selected={props.form.priority == priority}
                                >
                                    { priority.label() }
                                </option>
                            })
                        }
                    </select>
                </label>

                <label>
                    { "Due date" }
                    <input
                        type="datetime-local"
                        value={props.form.due_date.clone()}
                        oninput={on_due_date}
                    />
                </label>
            </div>

            <div class="tag-picker">
                <span class="field-label">{ "Tags" }</span>
                {
                    for props.tags.iter().map(|tag| {
                        let checked = props.form.tag_ids.contains(&tag.id);
                        let form = props.form.clone();
                        let on_change = props.on_change.clone();
                        let tag_id = tag.id;
                        let onchange = Callback::from(move |_: web_sys::Event| {
                            let mut next = form.clone();
                            next.toggle_tag(tag_id);
                            on_change.emit(next);
                        });
                        html! {
                            <label class="tag-option">
                                <input type="checkbox" {checked} {onchange} />
                                { &tag.name }
                            </label>
                        }
                    })
                }
                <div class="tag-add">
                    <input
                        type="text"
                        placeholder="New tag"
                        value={(*new_tag).clone()}
                        oninput={on_new_tag}
                    />
                    <button class="btn" type="button" onclick={on_add_tag}>{ "Add tag" }</button>
                </div>
            </div>

            <button class="btn primary" type="submit" disabled={props.busy}>
                { &props.submit_label }
            </button>
        </form>
    }
}

#[function_component(CreateTaskPage)]
pub fn create_task_page() -> Html {
    let navigator = use_navigator().expect("navigator missing");

    let form = use_state(TaskForm::default);
    let tags = use_state(Vec::<Tag>::new);
    let tags_tick = use_state(|| 0_u64);
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    {
        let tags = tags.clone();
        use_effect_with(*tags_tick, move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match api::list_tags().await {
                    Ok(list) => tags.set(list),
                    Err(err) => tracing::error!(error = %err, "tag fetch failed"),
                }
            });
            || ()
        });
    }

    let on_change = {
        let form = form.clone();
        Callback::from(move |next: TaskForm| form.set(next))
    };

    let on_create_tag = {
        let form = form.clone();
        let tags_tick = tags_tick.clone();
        let error = error.clone();
        Callback::from(move |name: String| {
            let form = form.clone();
            let tags_tick = tags_tick.clone();
            let error = error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::create_tag(&TagDraft { name }).await {
                    Ok(created) => {
                        let mut next = (*form).clone();
                        if !next.tag_ids.contains(&created.id) {
                            next.tag_ids.push(created.id);
                        }
                        form.set(next);
                        tags_tick.set((*tags_tick).saturating_add(1));
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        })
    };

    let on_submit = {
        let form = form.clone();
        let error = error.clone();
        let busy = busy.clone();
        Callback::from(move |_: ()| {
            // Missing title is the only thing rejected before the request.
            if let Err(message) = form.validate() {
                error.set(Some(message));
                return;
            }

            let draft = form.draft();
            let error = error.clone();
            let busy = busy.clone();
            let navigator = navigator.clone();

            busy.set(true);
            error.set(None);
            ui_debug("action.task.create", "create form submitted");
            wasm_bindgen_futures::spawn_local(async move {
                match api::create_task(&draft).await {
                    Ok(created) => navigator.push(&Route::TaskDetail { id: created.id }),
                    Err(err) => {
                        busy.set(false);
                        error.set(Some(err.to_string()));
                    }
                }
            });
        })
    };

    html! {
        <div class="task-form-page">
            <div class="page-header">
                <h1>{ "New Task" }</h1>
            </div>
            <TaskFormFields
                form={(*form).clone()}
                tags={(*tags).clone()}
                error={(*error).clone()}
                busy={*busy}
                submit_label={"Create Task".to_string()}
                {on_change}
                {on_submit}
                {on_create_tag}
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct EditTaskProps {
    pub id: u64,
}

#[function_component(EditTaskPage)]
pub fn edit_task_page(props: &EditTaskProps) -> Html {
    let navigator = use_navigator().expect("navigator missing");

    let form = use_state(TaskForm::default);
    let loading = use_state(|| true);
    let tags = use_state(Vec::<Tag>::new);
    let tags_tick = use_state(|| 0_u64);
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);
    let id = props.id;

    {
        let form = form.clone();
        let loading = loading.clone();
        use_effect_with(id, move |id| {
            let id = *id;
            let form = form.clone();
            let loading = loading.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::get_task(id).await {
                    Ok(task) => form.set(TaskForm::from_task(&task)),
                    Err(err) => tracing::error!(error = %err, id, "task fetch failed"),
                }
                loading.set(false);
            });
            || ()
        });
    }

    {
        let tags = tags.clone();
        use_effect_with(*tags_tick, move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match api::list_tags().await {
                    Ok(list) => tags.set(list),
                    Err(err) => tracing::error!(error = %err, "tag fetch failed"),
                }
            });
            || ()
        });
    }

    let on_change = {
        let form = form.clone();
        Callback::from(move |next: TaskForm| form.set(next))
    };

    let on_create_tag = {
        let form = form.clone();
        let tags_tick = tags_tick.clone();
        let error = error.clone();
        Callback::from(move |name: String| {
            let form = form.clone();
            let tags_tick = tags_tick.clone();
            let error = error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::create_tag(&TagDraft { name }).await {
                    Ok(created) => {
                        let mut next = (*form).clone();
                        if !next.tag_ids.contains(&created.id) {
                            next.tag_ids.push(created.id);
                        }
                        form.set(next);
                        tags_tick.set((*tags_tick).saturating_add(1));
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        })
    };

    let on_submit = {
        let form = form.clone();
        let error = error.clone();
        let busy = busy.clone();
        Callback::from(move |_: ()| {
            if let Err(message) = form.validate() {
                error.set(Some(message));
                return;
            }

            let patch = form.patch();
            let error = error.clone();
            let busy = busy.clone();
            let navigator = navigator.clone();

            busy.set(true);
            error.set(None);
            ui_debug("action.task.update", "edit form submitted");
            wasm_bindgen_futures::spawn_local(async move {
                match api::update_task(id, &patch).await {
                    Ok(updated) => navigator.push(&Route::TaskDetail { id: updated.id }),
                    Err(err) => {
                        busy.set(false);
                        error.set(Some(err.to_string()));
                    }
                }
            });
        })
    };

    if *loading {
        return html! { <div class="loading">{ "Loading task..." }</div> };
    }

    html! {
        <div class="task-form-page">
            <div class="page-header">
                <h1>{ "Edit Task" }</h1>
            </div>
            <TaskFormFields
                form={(*form).clone()}
                tags={(*tags).clone()}
                error={(*error).clone()}
                busy={*busy}
                submit_label={"Save Changes".to_string()}
                {on_change}
                {on_submit}
                {on_create_tag}
            />
        </div>
    }
}
