//! UI Components
//!
//! Reusable Leptos components.

mod auth_form;
mod bulk_actions;
mod dashboard;
mod delete_confirm_button;
mod loading;
mod priority_selector;
mod toast_container;
mod todo_filters;
mod todo_form;
mod todo_item;
mod todo_list;
mod validated_input;

pub use auth_form::AuthForm;
pub use bulk_actions::BulkActions;
pub use dashboard::Dashboard;
pub use delete_confirm_button::DeleteConfirmButton;
pub use loading::Loading;
pub use priority_selector::PrioritySelector;
pub use toast_container::ToastContainer;
pub use todo_filters::TodoFilters;
pub use todo_form::TodoForm;
pub use todo_item::TodoItem;
pub use todo_list::TodoList;
pub use validated_input::ValidatedInput;
