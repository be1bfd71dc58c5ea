use gloo::console::log;
use yew::{ContextProvider, Html, function_component, html, use_context, use_effect_with, use_state};
use yew_router::prelude::{BrowserRouter, Redirect, Routable, Switch};

use crate::session::SessionContext;
use crate::theme::{self, ThemeContext};
use crate::{api, components, pages, session};
use trellis_core::model::User;

#[derive(Clone, Debug, PartialEq, Routable)]
pub enum Route {
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/")]
    Home,
    #[at("/dashboard")]
    Dashboard,
    #[at("/tasks")]
    Tasks,
    #[at("/tasks/new")]
    NewTask,
    #[at("/tasks/:id")]
    TaskDetail { id: u64 },
    #[at("/tasks/:id/edit")]
    EditTask { id: u64 },
    #[at("/settings/ai")]
    AiSettings,
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[function_component(App)]
pub fn app() -> Html {
    let user = use_state(|| None::<User>);
    let loading = use_state(|| true);
    let mode =
        use_state(|| theme::resolve_initial(theme::load_saved(), theme::system_prefers_dark()));

    let session_ctx = SessionContext {
        user: user.clone(),
        loading: loading.clone(),
    };
    let theme_ctx = ThemeContext { mode: mode.clone() };

    // Restore the session from the stored token before rendering anything
    // behind the login gate.
    {
        let user = user.clone();
        let loading = loading.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                if session::load_token().is_some() {
                    match api::profile().await {
                        Ok(profile) => {
                            tracing::info!(username = %profile.username, "session restored");
                            user.set(Some(profile));
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "session restore failed");
                            session::clear_token();
                        }
                    }
                }
                loading.set(false);
            });
            || ()
        });
    }

    {
        let mode = mode.clone();
        use_effect_with((), move |_| {
            theme::watch_system(mode);
            || ()
        });
    }

    {
        use_effect_with(*mode, move |mode| {
            theme::apply(*mode);
            || ()
        });
    }

    html! {
        <ContextProvider<SessionContext> context={session_ctx}>
            <ContextProvider<ThemeContext> context={theme_ctx}>
                <BrowserRouter>
                    <AppRoutes />
                </BrowserRouter>
            </ContextProvider<ThemeContext>>
        </ContextProvider<SessionContext>>
    }
}

#[function_component(AppRoutes)]
fn app_routes() -> Html {
    let session = use_context::<SessionContext>().expect("session context missing");

    if *session.loading {
        return html! { <div class="loading">{ "Loading..." }</div> };
    }

    let logged_in = session.is_authenticated();
    html! { <Switch<Route> render={move |route| switch(route, logged_in)} /> }
}

fn switch(route: Route, logged_in: bool) -> Html {
    match route {
        Route::Login if logged_in => html! { <Redirect<Route> to={Route::Dashboard} /> },
        Route::Register if logged_in => html! { <Redirect<Route> to={Route::Dashboard} /> },
        Route::Login => html! { <pages::LoginPage /> },
        Route::Register => html! { <pages::RegisterPage /> },
        _ if !logged_in => html! { <Redirect<Route> to={Route::Login} /> },
        Route::Home => html! { <Redirect<Route> to={Route::Dashboard} /> },
        Route::Dashboard => shell(html! { <pages::DashboardPage /> }),
        Route::Tasks => shell(html! { <pages::TaskListPage /> }),
        Route::NewTask => shell(html! { <pages::CreateTaskPage /> }),
        Route::TaskDetail { id } => shell(html! { <pages::TaskDetailPage {id} /> }),
        Route::EditTask { id } => shell(html! { <pages::EditTaskPage {id} /> }),
        Route::AiSettings => shell(html! { <pages::AiSettingsPage /> }),
        Route::NotFound => shell(html! {
            <div class="empty-state">{ "Page not found" }</div>
        }),
    }
}

fn shell(inner: Html) -> Html {
    html! { <components::Layout>{ inner }</components::Layout> }
}

pub fn ui_debug(event: &str, detail: &str) {
    tracing::debug!(event, detail, "ui-debug");
    log!(format!("[ui-debug] {event}: {detail}"));
}
