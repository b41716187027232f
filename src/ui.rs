//! First-visit tutorial overlay.
//!
//! The overlay is shown once per browser: a persistent flag records the
//! visit, and a one-shot timer hides the overlay again.

use std::collections::HashMap;

use tracing::info;

/// Persistent string key-value store, such as `localStorage`.
pub trait FlagStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Returns false when the value could not be stored.
    fn set(&mut self, key: &str, value: &str) -> bool;
}

/// In-process store for the headless build and tests.
#[derive(Debug, Default)]
pub struct MemoryFlagStore {
    values: HashMap<String, String>,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlagStore for MemoryFlagStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        self.values.insert(key.to_string(), value.to_string());
        true
    }
}

#[derive(Debug, Clone)]
pub struct Tutorial {
    visited_key: String,
    pub hide_after_ms: u32,
}

impl Tutorial {
    pub fn new(visited_key: impl Into<String>, hide_after_ms: u32) -> Self {
        Self { visited_key: visited_key.into(), hide_after_ms }
    }

    /// An empty stored value counts as not visited.
    pub fn is_visited(&self, store: &impl FlagStore) -> bool {
        store.get(&self.visited_key).is_some_and(|v| !v.is_empty())
    }

    pub fn should_show(&self, store: &impl FlagStore) -> bool {
        !self.is_visited(store)
    }

    pub fn record_visit(&self, store: &mut impl FlagStore) {
        if !store.set(&self.visited_key, "true") {
            tracing::warn!(key = %self.visited_key, "could not persist visited flag");
        }
    }

    /// On a first visit, run `show` and record the visit only once it succeeded.
    /// Returns whether the overlay was shown.
    pub fn show_on_first_visit<E>(
        &self,
        store: &mut impl FlagStore,
        show: impl FnOnce() -> Result<(), E>,
    ) -> Result<bool, E> {
        if !self.should_show(store) {
            return Ok(false);
        }
        show()?;
        info!("first visit, tutorial shown");
        self.record_visit(store);
        Ok(true)
    }
}

#[cfg(target_arch = "wasm32")]
pub use self::web::{show_overlay, LocalStorageFlagStore};

#[cfg(target_arch = "wasm32")]
mod web {
    use super::FlagStore;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::{HtmlElement, Storage, Window};

    use crate::error::GameError;

    /// `window.localStorage`; behaves as an empty, read-only store when unavailable.
    pub struct LocalStorageFlagStore {
        storage: Option<Storage>,
    }

    impl LocalStorageFlagStore {
        pub fn new(window: &Window) -> Self {
            Self { storage: window.local_storage().ok().flatten() }
        }
    }

    impl FlagStore for LocalStorageFlagStore {
        fn get(&self, key: &str) -> Option<String> {
            self.storage.as_ref()?.get_item(key).ok()?
        }

        fn set(&mut self, key: &str, value: &str) -> bool {
            let Some(storage) = &self.storage else {
                return false;
            };
            storage.set_item(key, value).is_ok()
        }
    }

    /// Display `overlay` and hide it after `hide_after_ms`. Not cancellable.
    pub fn show_overlay(window: &Window, overlay: &HtmlElement, hide_after_ms: u32) -> Result<(), GameError> {
        overlay.style().set_property("display", "block")?;

        let overlay = overlay.clone();
        let hide = Closure::once_into_js(move || {
            let _ = overlay.style().set_property("display", "none");
        });
        let delay = i32::try_from(hide_after_ms).unwrap_or(i32::MAX);
        window.set_timeout_with_callback_and_timeout_and_arguments_0(hide.unchecked_ref(), delay)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shown() -> Result<(), ()> {
        Ok(())
    }

    #[test]
    fn shows_once_then_remembers() {
        let tutorial = Tutorial::new("visited", 5000);
        let mut store = MemoryFlagStore::new();

        assert!(!tutorial.is_visited(&store));
        assert_eq!(tutorial.show_on_first_visit(&mut store, shown), Ok(true));
        assert_eq!(store.get("visited").as_deref(), Some("true"));

        let second = tutorial.show_on_first_visit(&mut store, || -> Result<(), ()> {
            panic!("second start must skip the overlay")
        });
        assert_eq!(second, Ok(false));
    }

    #[test]
    fn failed_overlay_leaves_visit_unrecorded() {
        let tutorial = Tutorial::new("visited", 5000);
        let mut store = MemoryFlagStore::new();

        let result = tutorial.show_on_first_visit(&mut store, || Err("no #tutorial element"));
        assert_eq!(result, Err("no #tutorial element"));
        assert_eq!(store.get("visited"), None, "a failed overlay must not mark the visit");
        assert!(tutorial.should_show(&store), "next start tries again");
    }

    #[test]
    fn empty_value_is_not_a_visit() {
        let tutorial = Tutorial::new("visited", 5000);
        let mut store = MemoryFlagStore::new();
        store.set("visited", "");
        assert!(tutorial.should_show(&store));
        assert_eq!(tutorial.show_on_first_visit(&mut store, shown), Ok(true));
    }

    #[test]
    fn any_non_empty_value_is_a_visit() {
        let tutorial = Tutorial::new("seen", 1000);
        let mut store = MemoryFlagStore::new();
        store.set("seen", "false");
        assert!(tutorial.is_visited(&store));
        assert_eq!(tutorial.show_on_first_visit(&mut store, shown), Ok(false));
    }

    struct ReadOnlyStore;

    impl FlagStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> bool {
            false
        }
    }

    #[test]
    fn unwritable_store_still_shows() {
        let tutorial = Tutorial::new("visited", 5000);
        let mut store = ReadOnlyStore;
        assert_eq!(tutorial.show_on_first_visit(&mut store, shown), Ok(true));
        assert_eq!(tutorial.show_on_first_visit(&mut store, shown), Ok(true), "nothing persisted, so shows again");
    }
}
