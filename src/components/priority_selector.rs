//! Priority Selector Component
//!
//! Reusable priority buttons.

use leptos::prelude::*;
use todo_core::Priority;

/// One button per priority level, the current one highlighted
#[component]
pub fn PrioritySelector(
    #[prop(into)] current: Signal<Option<Priority>>,
    #[prop(into)] on_change: Callback<Priority>,
) -> impl IntoView {
    view! {
        <div class="priority-selector" role="radiogroup">
            {Priority::ALL.iter().map(|&priority| {
                let is_selected = move || current.get() == Some(priority);
                view! {
                    <button
                        type="button"
                        class=move || if is_selected() { "priority-btn active" } else { "priority-btn" }
                        aria-pressed=move || is_selected().to_string()
                        on:click=move |_| on_change.run(priority)
                    >
                        {priority.emoji()} " " {priority.label()}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
