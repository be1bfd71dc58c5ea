use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::UseStateHandle;

pub const THEME_STORAGE_KEY: &str = "trellis.theme";

const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
    Night,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 3] = [ThemeMode::Light, ThemeMode::Dark, ThemeMode::Night];

    pub fn storage_value(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::Night => "night",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            "night" => Some(ThemeMode::Night),
            _ => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Night,
            ThemeMode::Night => ThemeMode::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
            ThemeMode::Night => "Night",
        }
    }
}

/// Persisted choice wins; otherwise follow the OS; otherwise light.
pub fn resolve_initial(saved: Option<ThemeMode>, system_dark: bool) -> ThemeMode {
    match saved {
        Some(mode) => mode,
        None if system_dark => ThemeMode::Dark,
        None => ThemeMode::Light,
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

pub fn load_saved() -> Option<ThemeMode> {
    local_storage()
        .and_then(|storage| storage.get_item(THEME_STORAGE_KEY).ok().flatten())
        .and_then(|value| ThemeMode::from_key(&value))
}

pub fn save(mode: ThemeMode) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(THEME_STORAGE_KEY, mode.storage_value());
    }
}

pub fn system_prefers_dark() -> bool {
    web_sys::window()
        .and_then(|window| window.match_media(DARK_SCHEME_QUERY).ok().flatten())
        .map(|list| list.matches())
        .unwrap_or(false)
}

/// Writes the theme onto the document element for the stylesheet: a
/// `data-theme` attribute plus the `dark`/`night` classes.
pub fn apply(mode: ThemeMode) {
    let Some(root) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
    else {
        return;
    };

    let classes = root.class_list();
    let _ = classes.remove_2("dark", "night");
    match mode {
        ThemeMode::Light => {}
        ThemeMode::Dark => {
            let _ = classes.add_1("dark");
        }
        ThemeMode::Night => {
            let _ = classes.add_1("night");
        }
    }
    let _ = root.set_attribute("data-theme", mode.storage_value());
    debug!(theme = mode.storage_value(), "applied theme to document");
}

/// Follows OS dark-mode changes, but only while the user has never persisted
/// an explicit choice; once one exists the listener becomes a no-op.
pub fn watch_system(handle: UseStateHandle<ThemeMode>) {
    let Some(list) = web_sys::window()
        .and_then(|window| window.match_media(DARK_SCHEME_QUERY).ok().flatten())
    else {
        return;
    };

    let on_change = Closure::<dyn FnMut(web_sys::MediaQueryListEvent)>::new(
        move |event: web_sys::MediaQueryListEvent| {
            if load_saved().is_some() {
                return;
            }
            let mode = if event.matches() {
                ThemeMode::Dark
            } else {
                ThemeMode::Light
            };
            debug!(theme = mode.storage_value(), "following system scheme change");
            handle.set(mode);
        },
    );

    let _ = list
        .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref());
    // The listener lives for the whole app; leaking the closure is the
    // intended lifetime here.
    on_change.forget();
}

/// Theme preference handed to the tree via context.
#[derive(Clone, PartialEq)]
pub struct ThemeContext {
    pub mode: UseStateHandle<ThemeMode>,
}

impl ThemeContext {
    pub fn current(&self) -> ThemeMode {
        *self.mode
    }

    /// Invalid names are silently ignored.
    pub fn set_theme(&self, key: &str) {
        let Some(mode) = ThemeMode::from_key(key) else {
            return;
        };
        save(mode);
        self.mode.set(mode);
    }

    pub fn toggle(&self) {
        let next = self.mode.next();
        save(next);
        self.mode.set(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_and_invalid_names_are_rejected() {
        for mode in ThemeMode::ALL {
            assert_eq!(ThemeMode::from_key(mode.storage_value()), Some(mode));
        }
        assert_eq!(ThemeMode::from_key("not-a-theme"), None);
        assert_eq!(ThemeMode::from_key(""), None);
    }

    #[test]
    fn cycle_order_is_fixed() {
        assert_eq!(ThemeMode::Light.next(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.next(), ThemeMode::Night);
        assert_eq!(ThemeMode::Night.next(), ThemeMode::Light);
    }

    #[test]
    fn persisted_choice_beats_system_preference() {
        assert_eq!(
            resolve_initial(Some(ThemeMode::Dark), false),
            ThemeMode::Dark
        );
        assert_eq!(
            resolve_initial(Some(ThemeMode::Light), true),
            ThemeMode::Light
        );
        assert_eq!(resolve_initial(None, true), ThemeMode::Dark);
        assert_eq!(resolve_initial(None, false), ThemeMode::Light);
    }
}
