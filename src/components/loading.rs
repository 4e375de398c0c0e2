//! Loading Indicator

use leptos::prelude::*;

#[component]
pub fn Loading(
    #[prop(into, default = "Loading...".to_string())] text: String,
    #[prop(optional)] small: bool,
) -> impl IntoView {
    view! {
        <div class=if small { "loading small" } else { "loading" }>
            <span class="spinner"></span>
            {(!text.is_empty()).then(|| view! { <span class="loading-text">{text}</span> })}
        </div>
    }
}
