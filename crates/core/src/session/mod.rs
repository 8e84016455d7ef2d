//! Client-side application state: theme preference and the header search box.

mod store;
mod theme;

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use theme::{ThemeMode, ThemeState, THEME_KEY};

use tracing::warn;

/// App-wide state shared by every page.
pub struct AppSession<K> {
    theme: ThemeState,
    search_input: String,
    store: K,
}

impl<K: KeyValueStore> AppSession<K> {
    /// Restore the session from `store`, falling back to the OS preference
    /// when no theme was saved.
    pub fn new(store: K, prefers_dark: bool) -> Self {
        let stored = match store.get(THEME_KEY) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Failed to read stored theme");
                None
            }
        };

        Self {
            theme: ThemeState::initial(stored.as_deref(), prefers_dark),
            search_input: String::new(),
            store,
        }
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme.mode()
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    /// Flip the theme and persist it. A failed write keeps the new mode for
    /// this session.
    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme.toggle(&self.store)
    }

    pub fn set_search_input(&mut self, input: impl Into<String>) {
        self.search_input = input.into();
    }

    /// Submit the header search box.
    ///
    /// Returns the navigation target `/search?q=<input>` and clears the box,
    /// or `None` when the box holds only whitespace. The input is encoded as
    /// typed; surrounding whitespace is not trimmed.
    pub fn submit_search(&mut self) -> Option<String> {
        if self.search_input.trim().is_empty() {
            return None;
        }

        let target = format!("/search?q={}", urlencoding::encode(&self.search_input));
        self.search_input.clear();
        Some(target)
    }
}
