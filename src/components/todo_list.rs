//! Todo List Component

use leptos::prelude::*;
use todo_core::TodoFilter;

use crate::components::{Loading, TodoItem};
use crate::context::use_app_context;
use crate::store::{use_todo_store, TodoStateStoreFields};

#[derive(Clone, PartialEq)]
enum ListState {
    Loading,
    Failed(String),
    Empty,
    NoMatch(TodoFilter),
    Ready,
}

/// Filtered list with its loading, error and empty states
#[component]
pub fn TodoList() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_todo_store();

    let filtered = Memo::new(move |_| {
        let filter = store.filter().get();
        let today = ctx.today.get();
        store.todos().with(|todos| filter.apply(todos, today))
    });
    let total = move || store.todos().with(|t| t.len());
    let completed = move || store.todos().with(|t| t.iter().filter(|t| t.completed).count());

    // Only a change of state rebuilds the list below
    let state = Memo::new(move |_| {
        if store.loading().get() {
            ListState::Loading
        } else if let Some(msg) = store.error().get() {
            ListState::Failed(msg)
        } else if total() == 0 {
            ListState::Empty
        } else if filtered.with(Vec::is_empty) {
            ListState::NoMatch(store.filter().get())
        } else {
            ListState::Ready
        }
    });

    view! {
        {move || match state.get() {
            ListState::Loading => view! { <Loading text="Loading todos..." /> }.into_any(),
            ListState::Failed(msg) => view! {
                <div class="list-error" role="alert">
                    <p>{format!("Failed to load todos: {}", msg)}</p>
                    <button type="button" class="btn secondary" on:click=move |_| ctx.reload()>
                        "Try Again"
                    </button>
                </div>
            }.into_any(),
            ListState::Empty => view! {
                <div class="empty-state">
                    <p class="empty-title">"No todos yet!"</p>
                    <p class="empty-hint">"Add your first todo above to get started."</p>
                </div>
            }.into_any(),
            ListState::NoMatch(filter) => view! {
                <div class="empty-state">
                    <p class="empty-title">"No todos match this filter."</p>
                    <p class="empty-hint">{format!("Nothing under \"{}\" right now.", filter.label())}</p>
                </div>
            }.into_any(),
            ListState::Ready => view! {
                <div class="todo-list">
                    <h3 class="list-header">
                        {move || format!("Your Todos ({}/{} completed)", completed(), total())}
                    </h3>
                    <ul class="todo-items">
                        <For
                            each=move || filtered.get()
                            key=|todo| todo.clone()
                            children=move |todo| view! { <TodoItem todo=todo /> }
                        />
                    </ul>
                </div>
            }.into_any(),
        }}
    }
}
