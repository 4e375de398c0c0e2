//! Domain Layer
//!
//! Entities exchanged with the hosted backend.

mod todo;
mod user;

pub use todo::{DueStatus, NewTodo, Priority, Todo, TodoPatch};
pub use user::{Session, User};
