//! Backend Command Wrappers
//!
//! Frontend bindings to the hosted backend, organized by domain. Failures
//! come back as the text to show the user; the raw error is logged here.

mod auth;
mod storage;
mod todo;

// Re-export all public items
pub use auth::*;
pub use storage::*;
pub use todo::*;
