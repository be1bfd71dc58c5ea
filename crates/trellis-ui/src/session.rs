use tracing::info;
use trellis_core::model::{AuthResponse, User};
use yew::UseStateHandle;

pub const TOKEN_STORAGE_KEY: &str = "trellis.token";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

pub fn load_token() -> Option<String> {
    local_storage().and_then(|storage| storage.get_item(TOKEN_STORAGE_KEY).ok().flatten())
}

pub fn save_token(token: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(TOKEN_STORAGE_KEY, token);
    }
}

pub fn clear_token() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(TOKEN_STORAGE_KEY);
    }
}

/// Session expiry: drop the credential and send the whole app back to the
/// login view, whatever page triggered it.
pub fn expire() {
    clear_token();
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href("/login");
    }
}

/// Current identity plus the restoration flag, provided to the tree via
/// context so pages and tests can substitute their own.
#[derive(Clone, PartialEq)]
pub struct SessionContext {
    pub user: UseStateHandle<Option<User>>,
    pub loading: UseStateHandle<bool>,
}

impl SessionContext {
    pub fn user(&self) -> Option<User> {
        (*self.user).clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn establish(&self, auth: AuthResponse) {
        info!(username = %auth.user.username, "session established");
        save_token(&auth.token);
        self.user.set(Some(auth.user));
    }

    pub fn clear(&self) {
        info!("session cleared");
        clear_token();
        self.user.set(None);
    }
}
