use yew::{Callback, Html, TargetCast, function_component, html, use_context, use_state};
use yew_router::prelude::{Link, use_navigator};

use trellis_core::model::Registration;

use crate::api;
use crate::app::{Route, ui_debug};
use crate::components::ErrorBanner;
use crate::session::SessionContext;

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let session = use_context::<SessionContext>().expect("session context missing");
    let navigator = use_navigator().expect("navigator missing");

    let username = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let bind_input = |state: &yew::UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: web_sys::InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };

    let on_username = bind_input(&username);
    let on_email = bind_input(&email);
    let on_password = bind_input(&password);

    let on_submit = {
        let username = username.clone();
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let busy = busy.clone();
        let session = session.clone();
        Callback::from(move |e: web_sys::SubmitEvent| {
            e.prevent_default();
            ui_debug("action.register", "register form submitted");

            let registration = Registration {
                username: (*username).clone(),
                email: (*email).clone(),
                password: (*password).clone(),
            };
            let error = error.clone();
            let busy = busy.clone();
            let session = session.clone();
            let navigator = navigator.clone();

            busy.set(true);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match api::register(&registration).await {
                    Ok(auth) => {
                        session.establish(auth);
                        navigator.push(&Route::Dashboard);
                    }
                    Err(err) => {
                        busy.set(false);
                        error.set(Some(err.to_string()));
                    }
                }
            });
        })
    };

    html! {
        <div class="auth-page">
            <form class="auth-card" onsubmit={on_submit}>
                <h1>{ "Create your account" }</h1>
                <ErrorBanner message={(*error).clone()} />
                <label>
                    { "Username" }
                    <input type="text" value={(*username).clone()} oninput={on_username} />
                </label>
                <label>
                    { "Email" }
                    <input type="email" value={(*email).clone()} oninput={on_email} />
                </label>
                <label>
                    { "Password" }
                    <input type="password" value={(*password).clone()} oninput={on_password} />
                </label>
                <button class="btn primary" type="submit" disabled={*busy}>
                    { if *busy { "Creating account..." } else { "Register" } }
                </button>
                <div class="auth-alt">
                    { "Already registered? " }
                    <Link<Route> to={Route::Login}>{ "Sign in" }</Link<Route>>
                </div>
            </form>
        </div>
    }
}
