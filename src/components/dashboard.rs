//! Dashboard Component
//!
//! Signed-in view: header, create form, filters, bulk actions and the list.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands;
use crate::components::{BulkActions, TodoFilters, TodoForm, TodoList};
use crate::context::{use_app_context, use_toast};
use crate::store::{store_set_error, store_set_todos, TodoState, TodoStore};

#[component]
pub fn Dashboard() -> impl IntoView {
    let ctx = use_app_context();
    let toast = use_toast();

    let store: TodoStore = Store::new(TodoState::new());
    provide_context(store);

    // Load todos (re-runs on reload trigger and session change)
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        if ctx.session.with(Option::is_none) {
            return;
        }
        spawn_local(async move {
            match commands::list_todos(ctx).await {
                Ok(todos) => store_set_todos(&store, todos),
                Err(msg) => store_set_error(&store, msg),
            }
        });
    });

    let (signing_out, set_signing_out) = signal(false);
    let on_sign_out = move |_| {
        let Some(session) = ctx.session.get_untracked() else { return; };
        set_signing_out.set(true);
        let client = ctx.client();
        spawn_local(async move {
            // Local state goes regardless of the remote result
            let _ = commands::sign_out(&client, &session).await;
            ctx.set_session(None);
            toast.info("Signed out");
        });
    };

    let email = move || ctx.user().map(|u| u.email).unwrap_or_default();

    view! {
        <div class="dashboard">
            <header class="app-header">
                <h1 class="app-title">"📝 Todo App"</h1>
                <div class="header-user">
                    <span class="welcome">{move || format!("Welcome, {}!", email())}</span>
                    <button
                        type="button"
                        class="btn secondary"
                        disabled=move || signing_out.get()
                        on:click=on_sign_out
                    >
                        {move || if signing_out.get() { "Signing out..." } else { "Sign Out" }}
                    </button>
                </div>
            </header>

            <main class="dashboard-main">
                <TodoForm />
                <section class="card todo-section">
                    <TodoFilters />
                    <BulkActions />
                    <TodoList />
                </section>
            </main>
        </div>
    }
}
