//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Empty at
//! startup, filled by session establishment, emptied on logout.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::cache::TodoCache;
use crate::session::Session;
use crate::view_model::{self, DisplayList, SortKey};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Signed-in account + credential
    pub session: Session,
    /// False until the page-load session check has finished
    pub session_checked: bool,
    /// Todos of the signed-in account, server order
    pub todos: TodoCache,
    /// Search box contents
    pub query: String,
    /// Sort dropdown selection
    pub sort_key: SortKey,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_set_session(store: &AppStore, session: Session) {
    store.session().set(session);
    store.session_checked().set(true);
}

/// Back to the signed-out state
pub fn store_clear_session(store: &AppStore) {
    store.session().set(Session::anonymous());
    store.todos().write().clear();
    store.query().set(String::new());
    store.sort_key().set(SortKey::default());
}

pub fn store_replace_todos(store: &AppStore, cache: TodoCache) {
    store.todos().set(cache);
}

/// Derived list for the current query/sort
pub fn store_display_list(store: &AppStore) -> DisplayList {
    let query = store.query().get();
    let sort_key = store.sort_key().get();
    store.todos().with(|cache| view_model::display(cache.items(), &query, sort_key))
}

/// Server-side `completed` of one cached todo
pub fn store_todo_completed(store: &AppStore, id: u64) -> Option<bool> {
    store.todos().with(|cache| cache.get(id).map(|t| t.completed))
}

pub fn store_todo_count(store: &AppStore) -> usize {
    store.todos().with(|cache| cache.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let state = AppState::new();
        assert!(!state.session.is_authenticated());
        assert!(!state.session_checked);
        assert!(state.todos.is_empty());
        assert_eq!(state.sort_key, SortKey::Default);
    }
}
