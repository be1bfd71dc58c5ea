use yew::{Callback, Html, TargetCast, function_component, html, use_effect_with, use_state};

use trellis_core::model::{AiSettings, AiSettingsUpdate, Tag, TagDraft};

use crate::api;
use crate::app::ui_debug;
use crate::components::ErrorBanner;

#[function_component(AiSettingsPage)]
pub fn ai_settings_page() -> Html {
    let settings = use_state(|| None::<AiSettings>);
    let api_key = use_state(String::new);
    let model = use_state(String::new);
    let max_tokens = use_state(String::new);
    let temperature = use_state(String::new);

    let notice = use_state(|| None::<String>);
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let tags = use_state(Vec::<Tag>::new);
    let tags_tick = use_state(|| 0_u64);

    {
        let settings = settings.clone();
        let model = model.clone();
        let max_tokens = max_tokens.clone();
        let temperature = temperature.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match api::ai_settings().await {
                    Ok(fetched) => {
                        model.set(fetched.model.clone());
                        max_tokens.set(fetched.max_tokens.to_string());
                        temperature.set(fetched.temperature.to_string());
                        settings.set(Some(fetched));
                    }
                    Err(err) => tracing::error!(error = %err, "AI settings fetch failed"),
                }
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

    let bind_input = |state: &yew::UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: web_sys::InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };

    let on_api_key = bind_input(&api_key);
    let on_model = bind_input(&model);
    let on_max_tokens = bind_input(&max_tokens);
    let on_temperature = bind_input(&temperature);

    let on_save = {
        let api_key = api_key.clone();
        let model = model.clone();
        let max_tokens = max_tokens.clone();
        let temperature = temperature.clone();
        let settings = settings.clone();
        let notice = notice.clone();
        let error = error.clone();
        let busy = busy.clone();
        Callback::from(move |e: web_sys::SubmitEvent| {
            e.prevent_default();
            ui_debug("action.ai_settings.save", "settings form submitted");

            let update = AiSettingsUpdate {
                api_key: if api_key.is_empty() {
                    None
                } else {
                    Some((*api_key).clone())
                },
                model: Some((*model).clone()),
                max_tokens: max_tokens.parse().ok(),
                temperature: temperature.parse().ok(),
            };

            let api_key = api_key.clone();
            let settings = settings.clone();
            let notice = notice.clone();
            let error = error.clone();
            let busy = busy.clone();

            busy.set(true);
            notice.set(None);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match api::update_ai_settings(&update).await {
                    Ok(saved) => {
                        settings.set(Some(saved));
                        api_key.set(String::new());
                        notice.set(Some("Settings updated successfully".to_string()));
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
                busy.set(false);
            });
        })
    };

    let on_test = {
        let notice = notice.clone();
        let error = error.clone();
        let busy = busy.clone();
        Callback::from(move |_| {
            let notice = notice.clone();
            let error = error.clone();
            let busy = busy.clone();

            busy.set(true);
            notice.set(None);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match api::test_ai_connection().await {
                    Ok(result) if result.success => notice.set(Some(result.message)),
                    Ok(result) => error.set(Some(result.error)),
                    Err(err) => error.set(Some(err.to_string())),
                }
                busy.set(false);
            });
        })
    };

    let on_rename_tag = {
        let tags_tick = tags_tick.clone();
        let error = error.clone();
        Callback::from(move |tag: Tag| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let renamed = window
                .prompt_with_message_and_default("Rename tag", &tag.name)
                .ok()
                .flatten()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty() && *value != tag.name);
            let Some(name) = renamed else {
                return;
            };

            let tags_tick = tags_tick.clone();
            let error = error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::update_tag(tag.id, &TagDraft { name }).await {
                    Ok(_) => tags_tick.set((*tags_tick).saturating_add(1)),
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        })
    };

    let on_delete_tag = {
        let tags_tick = tags_tick.clone();
        let error = error.clone();
        Callback::from(move |tag: Tag| {
            let confirmed = web_sys::window()
                .and_then(|window| {
                    window
                        .confirm_with_message(&format!("Delete tag \"{}\"?", tag.name))
                        .ok()
                })
                .unwrap_or(false);
            if !confirmed {
                return;
            }

            let tags_tick = tags_tick.clone();
            let error = error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::delete_tag(tag.id).await {
                    Ok(()) => tags_tick.set((*tags_tick).saturating_add(1)),
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        })
    };

    let key_hint = match settings.as_ref() {
        Some(current) if current.has_api_key => {
            format!("Current key: {}", current.api_key_preview)
        }
        _ => "No API key stored yet".to_string(),
    };

    html! {
        <div class="settings-page">
            <div class="page-header">
                <h1>{ "AI Settings" }</h1>
            </div>

            {
                match &*notice {
                    Some(message) => html! { <div class="notice-banner">{ message }</div> },
                    None => html! {},
                }
            }
            <ErrorBanner message={(*error).clone()} />

            <form class="panel settings-form" onsubmit={on_save}>
                <label>
                    { "API key" }
                    <input
                        type="password"
                        placeholder="sk-ant-api03-..."
                        value={(*api_key).clone()}
                        oninput={on_api_key}
                    />
                    <span class="field-hint">{ key_hint }</span>
                </label>

                <div class="form-row">
                    <label>
                        { "Model" }
                        <input type="text" value={(*model).clone()} oninput={on_model} />
                    </label>
                    <label>
                        { "Max tokens" }
                        <input type="number" value={(*max_tokens).clone()} oninput={on_max_tokens} />
                    </label>
                    <label>
                        { "Temperature" }
                        <input
                            type="number"
                            step="0.1"
                            value={(*temperature).clone()}
                            oninput={on_temperature}
                        />
                    </label>
                </div>

                <div class="actions">
                    <button class="btn primary" type="submit" disabled={*busy}>
                        { "Save Settings" }
                    </button>
                    <button class="btn" type="button" onclick={on_test} disabled={*busy}>
                        { "Test Connection" }
                    </button>
                </div>
            </form>

            <div class="panel">
                <div class="header">{ "Tags" }</div>
                {
                    if tags.is_empty() {
                        html! { <div class="empty-state">{ "No tags yet" }</div> }
                    } else {
                        html! {
                            <div class="tag-manage-list">
                                {
                                    for tags.iter().map(|tag| {
                                        let rename = {
                                            let on_rename_tag = on_rename_tag.clone();
                                            let tag = tag.clone();
                                            Callback::from(move |_| on_rename_tag.emit(tag.clone()))
                                        };
                                        let delete = {
                                            let on_delete_tag = on_delete_tag.clone();
                                            let tag = tag.clone();
                                            Callback::from(move |_| on_delete_tag.emit(tag.clone()))
                                        };
                                        html! {
                                            <div class="tag-manage-row">
                                                <span class="tag-name">{ &tag.name }</span>
                                                <button class="btn small" onclick={rename}>{ "Rename" }</button>
                                                <button class="btn danger small" onclick={delete}>{ "Delete" }</button>
                                            </div>
                                        }
                                    })
                                }
                            </div>
                        }
                    }
                }
            </div>
        </div>
    }
}
