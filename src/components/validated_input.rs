//! Validated Input Component
//!
//! Labelled input that shows its field error underneath.

use leptos::prelude::*;

#[component]
pub fn ValidatedInput(
    #[prop(into)] id: String,
    #[prop(into)] label: String,
    #[prop(into, default = "text".to_string())] input_type: String,
    #[prop(optional, into)] placeholder: String,
    #[prop(optional)] required: bool,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(into)] on_blur: Callback<()>,
) -> impl IntoView {
    let error_id = format!("{}-error", id);
    let described_by = error_id.clone();

    view! {
        <div class="form-field">
            <label for=id.clone() class="form-label">
                {label}
                {required.then(|| view! { <span class="required">" *"</span> })}
            </label>
            <input
                id=id
                type=input_type
                placeholder=placeholder
                required=required
                class=move || if error.with(Option::is_some) { "form-input invalid" } else { "form-input" }
                aria-invalid=move || error.with(Option::is_some).to_string()
                aria-describedby=described_by
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
                on:blur=move |_| on_blur.run(())
            />
            {move || error.get().map(|msg| view! {
                <p id=error_id.clone() class="field-error" role="alert">{msg}</p>
            })}
        </div>
    }
}
