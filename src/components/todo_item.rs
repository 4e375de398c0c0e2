//! Todo Item Component
//!
//! One row of the list. Switches between a read view and an inline edit form.

use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_core::form::{todo_values, EditTodoSchema, FormState, TodoField};
use todo_core::{DueStatus, Priority, Todo};

use crate::commands;
use crate::components::{DeleteConfirmButton, PrioritySelector, ValidatedInput};
use crate::context::{use_app_context, use_toast};
use crate::time::format_date;

fn due_class(status: DueStatus) -> &'static str {
    match status {
        DueStatus::Overdue => "due overdue",
        DueStatus::Today => "due today",
        DueStatus::Upcoming => "due",
    }
}

#[component]
pub fn TodoItem(todo: Todo) -> impl IntoView {
    let ctx = use_app_context();
    let toast = use_toast();

    let id = todo.id;
    let completed = todo.completed;
    let todo = StoredValue::new(todo);

    let (editing, set_editing) = signal(false);
    let (busy, set_busy) = signal(false);
    let form = RwSignal::new(FormState::new(
        EditTodoSchema { today: ctx.today.get_untracked() },
        todo.with_value(todo_values),
    ));

    let on_toggle = move |_| {
        set_busy.set(true);
        spawn_local(async move {
            match commands::set_completed(ctx, id, !completed).await {
                Ok(_) => {
                    if completed {
                        toast.info("Todo marked as incomplete");
                    } else {
                        toast.success("Todo completed! 🎉");
                    }
                    ctx.reload();
                }
                Err(msg) => {
                    toast.error(format!("Failed to update todo: {}", msg));
                    set_busy.set(false);
                }
            }
        });
    };

    let on_delete = move |_: ()| {
        set_busy.set(true);
        spawn_local(async move {
            match commands::delete_todo(ctx, id).await {
                Ok(()) => {
                    toast.success("Todo deleted successfully");
                    ctx.reload();
                }
                Err(msg) => {
                    toast.error(format!("Failed to delete todo: {}", msg));
                    set_busy.set(false);
                }
            }
        });
    };

    let start_edit = move |_| {
        form.set(FormState::new(EditTodoSchema { today: ctx.today.get_untracked() }, todo.with_value(todo_values)));
        set_editing.set(true);
    };
    let cancel_edit = move |_| set_editing.set(false);

    let on_save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let mut parsed = None;
        form.update(|f| parsed = f.begin_submit());
        let Some(input) = parsed else {
            if !form.with_untracked(|f| f.is_submitting()) {
                toast.error("Please fix the highlighted fields");
            }
            return;
        };

        spawn_local(async move {
            match commands::save_todo(ctx, id, input).await {
                Ok(_) => {
                    form.update(|f| f.finish_submit());
                    set_editing.set(false);
                    toast.success("Todo updated successfully!");
                    ctx.reload();
                }
                Err(msg) => {
                    form.update(|f| f.finish_submit());
                    toast.error(format!("Failed to update todo: {}", msg));
                }
            }
        });
    };

    let field_value = move |field: TodoField| Signal::derive(move || form.with(|f| f.value(field).to_string()));
    let field_error = move |field: TodoField| Signal::derive(move || form.with(|f| f.error(field).map(str::to_string)));
    let on_input = move |field: TodoField| Callback::new(move |v: String| form.update(|f| f.set_value(field, v)));
    let on_blur = move |field: TodoField| Callback::new(move |_: ()| form.update(|f| f.touch(field)));

    let read_view = move || {
        let todo = todo.get_value();
        let due = todo.due_date.zip(todo.due_status(ctx.today.get())).map(|(date, status)| {
            view! {
                <span class=due_class(status)>
                    {format!("📅 Due: {}{}", format_date(date), status.suffix())}
                </span>
            }
        });

        view! {
            <div class="todo-body">
                <h4 class=if todo.completed { "todo-title done" } else { "todo-title" }>
                    {todo.completed.then_some("✅ ")}
                    {todo.title.clone()}
                </h4>
                {todo.description.clone().map(|d| view! { <p class="todo-description">{d}</p> })}
                <div class="todo-meta">
                    <span class=format!("priority {}", todo.priority.as_str())>
                        {format!("{} {} priority", todo.priority.emoji(), todo.priority.as_str())}
                    </span>
                    {due}
                </div>
            </div>
            <div class="todo-actions">
                <button
                    type="button"
                    class=if todo.completed { "btn secondary" } else { "btn primary" }
                    disabled=move || busy.get()
                    on:click=on_toggle
                >
                    {if todo.completed { "↩️ Undo" } else { "✓ Complete" }}
                </button>
                <button type="button" class="btn secondary" disabled=move || busy.get() on:click=start_edit>
                    "✏️ Edit"
                </button>
                <DeleteConfirmButton
                    label="🗑️ Delete".to_string()
                    prompt="Delete this todo?".to_string()
                    disabled=busy
                    on_confirm=on_delete
                />
            </div>
        }
    };

    let edit_view = move || {
        view! {
            <form class="todo-edit" on:submit=on_save novalidate=true>
                <ValidatedInput
                    id=format!("edit-title-{}", id)
                    label="Title"
                    required=true
                    value=field_value(TodoField::Title)
                    error=field_error(TodoField::Title)
                    on_input=on_input(TodoField::Title)
                    on_blur=on_blur(TodoField::Title)
                />
                <ValidatedInput
                    id=format!("edit-description-{}", id)
                    label="Description"
                    value=field_value(TodoField::Description)
                    error=field_error(TodoField::Description)
                    on_input=on_input(TodoField::Description)
                    on_blur=on_blur(TodoField::Description)
                />
                <ValidatedInput
                    id=format!("edit-due-{}", id)
                    label="Due Date"
                    input_type="date"
                    value=field_value(TodoField::DueDate)
                    error=field_error(TodoField::DueDate)
                    on_input=on_input(TodoField::DueDate)
                    on_blur=on_blur(TodoField::DueDate)
                />
                <PrioritySelector
                    current=Signal::derive(move || form.with(|f| Priority::parse(f.value(TodoField::Priority))))
                    on_change=move |p: Priority| form.update(|f| {
                        f.set_value(TodoField::Priority, p.as_str());
                        f.touch(TodoField::Priority);
                    })
                />
                <div class="todo-actions">
                    <button type="submit" class="btn primary" disabled=move || form.with(|f| f.is_submitting())>
                        {move || if form.with(|f| f.is_submitting()) { "Saving..." } else { "💾 Save" }}
                    </button>
                    <button
                        type="button"
                        class="btn secondary"
                        disabled=move || form.with(|f| f.is_submitting())
                        on:click=cancel_edit
                    >
                        "Cancel"
                    </button>
                </div>
            </form>
        }
    };

    view! {
        <li class=move || {
            let mut class = String::from("todo-item");
            if completed {
                class.push_str(" completed");
            }
            if busy.get() {
                class.push_str(" busy");
            }
            class
        }>
            <Show when=move || editing.get() fallback=read_view>
                {edit_view}
            </Show>
        </li>
    }
}
