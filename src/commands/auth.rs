//! Auth Commands
//!
//! Sign-up, sign-in, sign-out and session restore.

use chrono::Utc;
use todo_core::form::Credentials;
use todo_core::session::restore_session;
use todo_core::{AuthApi, Session, SignUpOutcome, SupabaseClient};

use super::storage::load_session;

pub async fn sign_up(client: &SupabaseClient, creds: &Credentials) -> Result<SignUpOutcome, String> {
    client.sign_up(&creds.email, &creds.password).await.map_err(|e| {
        log::error!("sign up failed: {}", e);
        e.user_message()
    })
}

pub async fn sign_in(client: &SupabaseClient, creds: &Credentials) -> Result<Session, String> {
    client.sign_in(&creds.email, &creds.password).await.map_err(|e| {
        log::error!("sign in failed: {}", e);
        e.user_message()
    })
}

/// The caller clears local state whatever this returns
pub async fn sign_out(client: &SupabaseClient, session: &Session) -> Result<(), String> {
    client.sign_out(session).await.map_err(|e| {
        log::warn!("remote sign out failed: {}", e);
        e.user_message()
    })
}

/// Session from `localStorage`, checked (and if need be refreshed) remotely
pub async fn restore(client: &SupabaseClient) -> Option<Session> {
    let stored = load_session();
    if stored.is_none() {
        log::debug!("no stored session");
    }
    restore_session(client, stored, Utc::now()).await
}
