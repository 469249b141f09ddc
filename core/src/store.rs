//! App-wide state: a reducer over a small store, provided to a scope.
//!
//! # Design
//! Screens keep their own local state; the store only carries what has to
//! outlive a screen, which today is the last search text. `reduce` is a pure
//! transition. `AppProvider::scope` makes a store reachable through
//! [`use_app_state`] for the duration of a closure on the current thread.
//! Calling `use_app_state` outside any scope is a wiring bug and panics.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppState {
    pub search: String,
    pub cache: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetSearch(String),
    /// Upsert one cache entry; a later write to the same key wins.
    Cache {
        key: String,
        value: serde_json::Value,
    },
}

pub fn reduce(state: &AppState, action: Action) -> AppState {
    match action {
        Action::SetSearch(search) => AppState {
            search,
            ..state.clone()
        },
        Action::Cache { key, value } => {
            let mut cache = state.cache.clone();
            cache.insert(key, value);
            AppState {
                cache,
                ..state.clone()
            }
        }
    }
}

/// Shared handle to the app state. Clones point at the same store.
#[derive(Debug, Clone, Default)]
pub struct AppStore {
    state: Rc<RefCell<AppState>>,
}

impl AppStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AppState {
        self.state.borrow().clone()
    }

    pub fn search(&self) -> String {
        self.state.borrow().search.clone()
    }

    pub fn dispatch(&self, action: Action) {
        let next = reduce(&self.state.borrow(), action);
        *self.state.borrow_mut() = next;
    }
}

thread_local! {
    static PROVIDERS: RefCell<Vec<AppStore>> = const { RefCell::new(Vec::new()) };
}

/// Makes an [`AppStore`] reachable through [`use_app_state`].
#[derive(Debug, Clone, Default)]
pub struct AppProvider {
    store: AppStore,
}

impl AppProvider {
    pub fn new(store: AppStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &AppStore {
        &self.store
    }

    /// Run `f` with this provider's store in scope. Scopes nest; the
    /// innermost provider wins.
    pub fn scope<R>(&self, f: impl FnOnce() -> R) -> R {
        struct Pop;
        impl Drop for Pop {
            fn drop(&mut self) {
                PROVIDERS.with(|providers| {
                    providers.borrow_mut().pop();
                });
            }
        }

        PROVIDERS.with(|providers| providers.borrow_mut().push(self.store.clone()));
        let _pop = Pop;
        f()
    }
}

/// The store of the innermost enclosing [`AppProvider::scope`].
///
/// # Panics
/// When called outside every provider scope.
pub fn use_app_state() -> AppStore {
    PROVIDERS
        .with(|providers| providers.borrow().last().cloned())
        .unwrap_or_else(|| panic!("use_app_state must be used inside AppProvider"))
}
