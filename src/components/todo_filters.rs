//! Todo Filters Component

use leptos::prelude::*;
use todo_core::{TodoCounts, TodoFilter};

use crate::context::use_app_context;
use crate::store::{use_todo_store, TodoStateStoreFields};

/// Filter buttons, each with the number of todos it would show
#[component]
pub fn TodoFilters() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_todo_store();

    let counts = Memo::new(move |_| {
        let today = ctx.today.get();
        store.todos().with(|todos| TodoCounts::from_todos(todos, today))
    });

    view! {
        <div class="todo-filters" role="tablist">
            {TodoFilter::ALL.iter().map(|&filter| {
                let is_active = move || store.filter().get() == filter;
                view! {
                    <button
                        type="button"
                        role="tab"
                        class=move || if is_active() { "filter-btn active" } else { "filter-btn" }
                        aria-selected=move || is_active().to_string()
                        on:click=move |_| store.filter().set(filter)
                    >
                        {filter.label()}
                        " "
                        <span class="filter-count">{move || counts.get().for_filter(filter)}</span>
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
