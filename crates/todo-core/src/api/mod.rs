//! Backend API Layer
//!
//! Abstract interfaces to the hosted auth service and the todos table.
//! Futures are `?Send` because in the browser they sit on top of `fetch`.

mod error;
mod supabase;

#[cfg(test)]
pub(crate) mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewTodo, Session, Todo, TodoPatch, User};

pub use error::{error_from_body, ApiError, ApiResult};
pub use supabase::SupabaseClient;

/// Result of a sign-up request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// Email confirmation is off; the user is signed in right away
    SignedIn(Session),
    /// A confirmation link was mailed; no session yet
    ConfirmationSent,
}

/// Hosted authentication service
#[async_trait(?Send)]
pub trait AuthApi {
    async fn sign_up(&self, email: &str, password: &str) -> ApiResult<SignUpOutcome>;

    async fn sign_in(&self, email: &str, password: &str) -> ApiResult<Session>;

    async fn sign_out(&self, session: &Session) -> ApiResult<()>;

    /// Resolve the user behind an access token
    async fn get_user(&self, access_token: &str) -> ApiResult<User>;

    /// Exchange a refresh token for a new session
    async fn refresh(&self, refresh_token: &str) -> ApiResult<Session>;
}

/// The `todos` table, scoped to the session's user
#[async_trait(?Send)]
pub trait TodoRepository {
    async fn insert(&self, session: &Session, todo: &NewTodo) -> ApiResult<Todo>;

    /// Newest first
    async fn list(&self, session: &Session) -> ApiResult<Vec<Todo>>;

    async fn update(&self, session: &Session, id: Uuid, patch: &TodoPatch) -> ApiResult<Todo>;

    async fn delete(&self, session: &Session, id: Uuid) -> ApiResult<()>;
}
