//! Todo Core
//!
//! Everything the todo client does that is not rendering:
//! - domain: todo, user and session records
//! - validation / form: field rules and per-field form state
//! - filter / bulk: derived views and batch actions over the loaded list
//! - api: the hosted backend (auth + todos table) behind traits
//! - session / toast / config: startup, notifications, backend settings

pub mod api;
pub mod bulk;
pub mod config;
pub mod domain;
pub mod filter;
pub mod form;
pub mod session;
pub mod toast;
pub mod validation;

pub use api::{ApiError, ApiResult, AuthApi, SignUpOutcome, SupabaseClient, TodoRepository};
pub use config::{ConfigError, SupabaseConfig};
pub use domain::{DueStatus, NewTodo, Priority, Session, Todo, TodoPatch, User};
pub use filter::{TodoCounts, TodoFilter};
