//! Toast Container Component
//!
//! Renders the toast queue; a click dismisses early.

use leptos::prelude::*;

use crate::context::use_toast;

#[component]
pub fn ToastContainer() -> impl IntoView {
    let toast = use_toast();

    view! {
        <div class="toast-container" aria-live="polite">
            <For
                each=move || toast.toasts()
                key=|t| t.id
                children=move |t| {
                    let id = t.id;
                    view! {
                        <div
                            class=format!("toast {}", t.kind.as_str())
                            role="status"
                            on:click=move |_| toast.dismiss(id)
                        >
                            <span class="toast-message">{t.message}</span>
                            <button type="button" class="toast-close" aria-label="Dismiss">"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
