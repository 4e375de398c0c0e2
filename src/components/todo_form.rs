//! Todo Form Component
//!
//! Form for creating new todos with per-field validation.

use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_core::form::{blank_todo_values, CreateTodoSchema, FormState, TodoField};
use todo_core::validation::{DESCRIPTION_MAX_LEN, TITLE_MAX_LEN};
use todo_core::Priority;

use crate::commands;
use crate::components::{Loading, PrioritySelector, ValidatedInput};
use crate::context::{use_app_context, use_toast};

#[component]
pub fn TodoForm() -> impl IntoView {
    let ctx = use_app_context();
    let toast = use_toast();

    let form = RwSignal::new(FormState::new(
        CreateTodoSchema { today: ctx.today.get_untracked() },
        blank_todo_values(),
    ));

    let value = move |field: TodoField| Signal::derive(move || form.with(|f| f.value(field).to_string()));
    let error = move |field: TodoField| Signal::derive(move || form.with(|f| f.error(field).map(str::to_string)));
    let on_input = move |field: TodoField| Callback::new(move |v: String| form.update(|f| f.set_value(field, v)));
    let on_blur = move |field: TodoField| Callback::new(move |_: ()| form.update(|f| f.touch(field)));

    let title_len = move || form.with(|f| f.value(TodoField::Title).chars().count());
    let description_len = move || form.with(|f| f.value(TodoField::Description).chars().count());
    let submit_disabled = move || {
        form.with(|f| f.is_submitting() || f.has_errors() || f.value(TodoField::Title).trim().is_empty())
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        // The page may have stayed open past midnight
        ctx.sync_today();
        let today = ctx.today.get_untracked();
        let mut parsed = None;
        form.update(|f| {
            f.set_schema(CreateTodoSchema { today });
            parsed = f.begin_submit();
        });
        let Some(input) = parsed else { return; };

        spawn_local(async move {
            match commands::create_todo(ctx, input).await {
                Ok(_) => {
                    form.update(|f| f.reset());
                    toast.success("Todo created successfully! 🎉");
                    ctx.reload();
                }
                Err(msg) => {
                    form.update(|f| f.finish_submit());
                    toast.error(format!("Failed to create todo: {}", msg));
                }
            }
        });
    };

    view! {
        <form class="card todo-form" on:submit=on_submit novalidate=true>
            <h3 class="card-title">"✨ Add New Todo"</h3>

            <div class="form-group">
                <ValidatedInput
                    id="todo-title"
                    label="Todo Title"
                    placeholder="What needs to be done?"
                    required=true
                    value=value(TodoField::Title)
                    error=error(TodoField::Title)
                    on_input=on_input(TodoField::Title)
                    on_blur=on_blur(TodoField::Title)
                />
                <div class={move || if title_len() > TITLE_MAX_LEN { "char-count over" } else { "char-count" }}>
                    {move || format!("{}/{} characters", title_len(), TITLE_MAX_LEN)}
                </div>
            </div>

            <div class="form-group">
                <ValidatedInput
                    id="todo-description"
                    label="Description"
                    placeholder="Add more details (optional)"
                    value=value(TodoField::Description)
                    error=error(TodoField::Description)
                    on_input=on_input(TodoField::Description)
                    on_blur=on_blur(TodoField::Description)
                />
                <Show when=move || { description_len() > 0 }>
                    <div class={move || if description_len() > DESCRIPTION_MAX_LEN { "char-count over" } else { "char-count" }}>
                        {move || format!("{}/{} characters", description_len(), DESCRIPTION_MAX_LEN)}
                    </div>
                </Show>
            </div>

            <div class="form-row">
                <ValidatedInput
                    id="todo-due-date"
                    label="Due Date"
                    input_type="date"
                    value=value(TodoField::DueDate)
                    error=error(TodoField::DueDate)
                    on_input=on_input(TodoField::DueDate)
                    on_blur=on_blur(TodoField::DueDate)
                />

                <div class="form-field">
                    <span class="form-label">"Priority Level"</span>
                    <PrioritySelector
                        current=Signal::derive(move || form.with(|f| Priority::parse(f.value(TodoField::Priority))))
                        on_change=move |p: Priority| form.update(|f| {
                            f.set_value(TodoField::Priority, p.as_str());
                            f.touch(TodoField::Priority);
                        })
                    />
                    {move || form.with(|f| f.error(TodoField::Priority).map(str::to_string)).map(|msg| view! {
                        <p class="field-error" role="alert">{msg}</p>
                    })}
                </div>
            </div>

            <button type="submit" class="btn primary full" disabled=submit_disabled>
                {move || if form.with(|f| f.is_submitting()) {
                    view! { <Loading text="Creating..." small=true /> }.into_any()
                } else {
                    view! { "+ Add Todo" }.into_any()
                }}
            </button>
        </form>
    }
}
