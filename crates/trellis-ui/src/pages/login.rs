use yew::{Callback, Html, TargetCast, function_component, html, use_context, use_state};
use yew_router::prelude::{Link, use_navigator};

use trellis_core::model::Credentials;

use crate::api;
use crate::app::{Route, ui_debug};
use crate::components::ErrorBanner;
use crate::session::SessionContext;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let session = use_context::<SessionContext>().expect("session context missing");
    let navigator = use_navigator().expect("navigator missing");

    let username = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let on_username = {
        let username = username.clone();
        Callback::from(move |e: web_sys::InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
        })
    };

    let on_password = {
        let password = password.clone();
        Callback::from(move |e: web_sys::InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let busy = busy.clone();
        let session = session.clone();
        Callback::from(move |e: web_sys::SubmitEvent| {
            e.prevent_default();
            ui_debug("action.login", "login form submitted");

            let credentials = Credentials {
                username: (*username).clone(),
                password: (*password).clone(),
            };
            let error = error.clone();
            let busy = busy.clone();
            let session = session.clone();
            let navigator = navigator.clone();

            busy.set(true);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match api::login(&credentials).await {
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
                <h1>{ "Sign in to Trellis" }</h1>
                <ErrorBanner message={(*error).clone()} />
                <label>
                    { "Username" }
                    <input type="text" value={(*username).clone()} oninput={on_username} />
                </label>
                <label>
                    { "Password" }
                    <input type="password" value={(*password).clone()} oninput={on_password} />
                </label>
                <button class="btn primary" type="submit" disabled={*busy}>
                    { if *busy { "Signing in..." } else { "Sign in" } }
                </button>
                <div class="auth-alt">
                    { "No account yet? " }
                    <Link<Route> to={Route::Register}>{ "Register" }</Link<Route>>
                </div>
            </form>
        </div>
    }
}
