//! Bulk Actions Component
//!
//! Toggle-all and delete-completed over the whole list.

use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_core::bulk::{delete_completed_prompt, toggle_all_label, BulkAction, BulkPlan};

use crate::commands;
use crate::components::DeleteConfirmButton;
use crate::context::{use_app_context, use_toast};
use crate::store::{use_todo_store, TodoStateStoreFields};

#[component]
pub fn BulkActions() -> impl IntoView {
    let ctx = use_app_context();
    let toast = use_toast();
    let store = use_todo_store();

    let (running, set_running) = signal(None::<BulkAction>);

    let is_empty = move || store.todos().with(|t| t.is_empty());
    let active_count = move || store.todos().with(|t| t.iter().filter(|t| t.is_active()).count());
    let completed_count = move || store.todos().with(|t| t.iter().filter(|t| t.completed).count());

    let run = move |plan: Option<BulkPlan>| {
        let Some(plan) = plan else { return; };
        set_running.set(Some(plan.action));
        spawn_local(async move {
            let outcome = commands::run_bulk(ctx, &plan).await;
            if outcome.is_complete_success() {
                toast.success(outcome.summary());
            } else {
                toast.error(outcome.summary());
            }
            set_running.set(None);
            ctx.reload();
        });
    };

    let toggle_label = move || match running.get() {
        Some(BulkAction::CompleteAll) | Some(BulkAction::ReopenAll) => "Updating...".to_string(),
        _ => store.todos().with(|t| toggle_all_label(t)),
    };
    let delete_label = Signal::derive(move || match running.get() {
        Some(BulkAction::DeleteCompleted) => "Deleting...".to_string(),
        _ => format!("🗑️ Delete Completed ({})", completed_count()),
    });

    view! {
        <Show when=move || !is_empty()>
            <div class="bulk-actions">
                <div class="bulk-buttons">
                    <button
                        type="button"
                        class="btn secondary"
                        disabled=move || running.get().is_some()
                        on:click=move |_| run(store.todos().with(|t| BulkPlan::toggle_all(t)))
                    >
                        {toggle_label}
                    </button>
                    <Show when=move || { completed_count() > 0 }>
                        <DeleteConfirmButton
                            label=delete_label
                            prompt=Signal::derive(move || store.todos().with(|t| delete_completed_prompt(t)))
                            disabled=Signal::derive(move || running.get().is_some())
                            on_confirm=move |_| run(store.todos().with(|t| BulkPlan::delete_completed(t)))
                        />
                    </Show>
                </div>
                <div class="bulk-stats">
                    {move || format!("{} active, {} completed", active_count(), completed_count())}
                </div>
            </div>
        </Show>
    }
}
