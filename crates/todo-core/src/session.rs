//! Session Lifecycle
//!
//! Turns a persisted session into a live one at startup, and keeps it live
//! afterwards by refreshing the access token when a call is rejected.

use chrono::{DateTime, Utc};
use std::future::Future;

use crate::api::{ApiError, ApiResult, AuthApi, TodoRepository};
use crate::bulk::{BulkOutcome, BulkPlan};
use crate::domain::Session;

/// `localStorage` key for the persisted session
pub const SESSION_STORAGE_KEY: &str = "todo-app.session";

pub fn encode_session(session: &Session) -> Result<String, serde_json::Error> {
    serde_json::to_string(session)
}

/// Unreadable data is treated as "no session"
pub fn decode_session(raw: &str) -> Option<Session> {
    match serde_json::from_str(raw) {
        Ok(session) => Some(session),
        Err(e) => {
            log::warn!("discarding unreadable stored session: {}", e);
            None
        }
    }
}

/// Validate a stored session against the auth service.
///
/// Expired or rejected tokens get one refresh attempt. A network failure
/// keeps the stored session so a flaky connection does not sign anyone out.
pub async fn restore_session<A: AuthApi + ?Sized>(
    api: &A,
    stored: Option<Session>,
    now: DateTime<Utc>,
) -> Option<Session> {
    let session = stored?;

    if session.is_expired(now) {
        log::info!("stored session expired, refreshing");
        return refresh(api, &session).await;
    }

    match api.get_user(&session.access_token).await {
        Ok(user) => Some(Session { user, ..session }),
        Err(err) if err.is_auth_failure() => {
            log::info!("stored session rejected ({}), refreshing", err);
            refresh(api, &session).await
        }
        Err(ApiError::Network(msg)) => {
            log::warn!("could not verify session, keeping it: {}", msg);
            Some(session)
        }
        Err(err) => {
            log::warn!("session check failed: {}", err);
            None
        }
    }
}

/// What an authorized call did to the session, besides its own result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    Unchanged,
    /// Token was refreshed; publish and persist the new session
    Refreshed(Session),
    /// Refresh token was rejected; the user has to sign in again
    Ended,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Authorized<T> {
    pub result: ApiResult<T>,
    pub change: SessionChange,
}

/// Refresh ahead of the call when the token is known to be expired
async fn ensure_fresh<A: AuthApi + ?Sized>(
    api: &A,
    session: &Session,
    now: DateTime<Utc>,
) -> Result<(Session, SessionChange), (ApiError, SessionChange)> {
    if !session.is_expired(now) {
        return Ok((session.clone(), SessionChange::Unchanged));
    }
    log::info!("access token expired, refreshing before request");
    renew(api, session)
        .await
        .map(|fresh| (fresh.clone(), SessionChange::Refreshed(fresh)))
}

/// One refresh attempt. A network failure leaves the session alone; any
/// other failure means the refresh token is gone.
async fn renew<A: AuthApi + ?Sized>(api: &A, session: &Session) -> Result<Session, (ApiError, SessionChange)> {
    match api.refresh(&session.refresh_token).await {
        Ok(fresh) => Ok(fresh),
        Err(err @ ApiError::Network(_)) => {
            log::warn!("session refresh failed: {}", err);
            Err((err, SessionChange::Unchanged))
        }
        Err(err) => {
            log::warn!("session refresh rejected, signing out: {}", err);
            Err((err, SessionChange::Ended))
        }
    }
}

/// Run `call` with a usable access token. An expired token is refreshed
/// first; an auth failure from the call gets one refresh and one retry.
pub async fn authorized<A, T, F, Fut>(api: &A, session: &Session, now: DateTime<Utc>, mut call: F) -> Authorized<T>
where
    A: AuthApi + ?Sized,
    F: FnMut(Session) -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    let (current, change) = match ensure_fresh(api, session, now).await {
        Ok(fresh) => fresh,
        Err((err, change)) => return Authorized { result: Err(err), change },
    };

    let result = call(current.clone()).await;
    match result {
        Err(err) if err.is_auth_failure() && change == SessionChange::Unchanged => {
            log::info!("request rejected ({}), refreshing session", err);
            match renew(api, &current).await {
                Ok(fresh) => Authorized {
                    result: call(fresh.clone()).await,
                    change: SessionChange::Refreshed(fresh),
                },
                Err((_, change)) => Authorized { result: Err(err), change },
            }
        }
        result => Authorized { result, change },
    }
}

/// Bulk counterpart of [`authorized`]: targets rejected for auth reasons
/// are retried once with a refreshed session.
pub async fn authorized_bulk<B>(
    backend: &B,
    session: &Session,
    now: DateTime<Utc>,
    plan: &BulkPlan,
) -> (BulkOutcome, SessionChange)
where
    B: AuthApi + TodoRepository + ?Sized,
{
    let (current, change) = match ensure_fresh(backend, session, now).await {
        Ok(fresh) => fresh,
        Err((err, change)) => return (BulkOutcome::all_failed(plan, err), change),
    };

    let mut outcome = plan.run(backend, &current).await;
    if change != SessionChange::Unchanged || !outcome.failed.iter().any(|(_, err)| err.is_auth_failure()) {
        return (outcome, change);
    }

    let (rejected, other): (Vec<_>, Vec<_>) = outcome.failed.drain(..).partition(|(_, err)| err.is_auth_failure());
    outcome.failed = other;
    match renew(backend, &current).await {
        Ok(fresh) => {
            let retry = BulkPlan {
                action: plan.action,
                targets: rejected.iter().map(|(id, _)| *id).collect(),
            };
            let second = retry.run(backend, &fresh).await;
            outcome.succeeded.extend(second.succeeded);
            outcome.failed.extend(second.failed);
            (outcome, SessionChange::Refreshed(fresh))
        }
        Err((_, change)) => {
            outcome.failed.extend(rejected);
            (outcome, change)
        }
    }
}

async fn refresh<A: AuthApi + ?Sized>(api: &A, session: &Session) -> Option<Session> {
    renew(api, session).await.ok()
}
