//! Todo List Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Holds the last
//! fetched list; every mutation is followed by a full re-fetch, so nothing
//! here has to stay coherent with the backend on its own.

use leptos::prelude::*;
use reactive_stores::Store;
use todo_core::{Todo, TodoFilter};

/// Dashboard state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct TodoState {
    /// Todos as returned by the backend (newest first)
    pub todos: Vec<Todo>,
    /// Selected filter
    pub filter: TodoFilter,
    /// True while the list is being fetched for the first time
    pub loading: bool,
    /// Message of the last failed fetch
    pub error: Option<String>,
}

impl TodoState {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type TodoStore = Store<TodoState>;

/// Get the todo store from context
pub fn use_todo_store() -> TodoStore {
    expect_context::<TodoStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the list after a successful fetch
pub fn store_set_todos(store: &TodoStore, todos: Vec<Todo>) {
    store.todos().set(todos);
    store.error().set(None);
    store.loading().set(false);
}

/// Record a failed fetch; the previous list stays visible
pub fn store_set_error(store: &TodoStore, message: String) {
    store.error().set(Some(message));
    store.loading().set(false);
}
