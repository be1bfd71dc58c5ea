use yew::{Callback, Html, Properties, TargetCast, function_component, html, use_context};
use yew_router::prelude::{Link, use_navigator};

use crate::api;
use crate::app::{Route, ui_debug};
use crate::session::SessionContext;
use crate::theme::{ThemeContext, ThemeMode};

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    #[prop_or_default]
    pub children: Html,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let session = use_context::<SessionContext>().expect("session context missing");
    let theme = use_context::<ThemeContext>().expect("theme context missing");
    let navigator = use_navigator().expect("navigator missing");

    let username = session
        .user()
        .map(|user| user.username)
        .unwrap_or_default();

    let on_theme_change = {
        let theme = theme.clone();
        Callback::from(move |e: web_sys::Event| {
            if let Some(select) = e.target_dyn_into::<web_sys::HtmlSelectElement>() {
                theme.set_theme(&select.value());
            }
        })
    };

    let on_logout = {
        let session = session.clone();
        Callback::from(move |_| {
            let session = session.clone();
            let navigator = navigator.clone();
            ui_debug("action.logout", "logout clicked");
            wasm_bindgen_futures::spawn_local(async move {
                // Best effort: the local session dies either way.
                if let Err(err) = api::logout().await {
                    tracing::warn!(error = %err, "logout request failed");
                }
                session.clear();
                navigator.push(&Route::Login);
            });
        })
    };

    html! {
        <div class="layout">
            <header class="topbar">
                <Link<Route> classes="brand" to={Route::Dashboard}>{ "Trellis" }</Link<Route>>
                <nav class="nav">
                    <Link<Route> to={Route::Dashboard}>{ "Dashboard" }</Link<Route>>
                    <Link<Route> to={Route::Tasks}>{ "Tasks" }</Link<Route>>
                    <Link<Route> to={Route::NewTask}>{ "New Task" }</Link<Route>>
                    <Link<Route> to={Route::AiSettings}>{ "AI Settings" }</Link<Route>>
                </nav>
                <div class="topbar-right">
                    <select class="theme-select" onchange={on_theme_change}>
                        {
                            for ThemeMode::ALL.into_iter().map(|mode| html! {
                                <option
                                    value={mode.storage_value()}
                                    selected={mode == theme.current()}
                                >
                                    { mode.label() }
                                </option>
                            })
                        }
                    </select>
                    <span class="username">{ username }</span>
                    <button class="btn" onclick={on_logout}>{ "Logout" }</button>
                </div>
            </header>
            <main class="content">
                { props.children.clone() }
            </main>
        </div>
    }
}
