//! Todo Commands
//!
//! One remote call each; callers re-fetch the list afterwards. Every call
//! runs with the current session and publishes it again if the token had to
//! be refreshed along the way.

use std::future::Future;
use leptos::prelude::GetUntracked;

use chrono::Utc;
use todo_core::bulk::{BulkOutcome, BulkPlan};
use todo_core::form::TodoInput;
use todo_core::session::{authorized, authorized_bulk, Authorized, SessionChange};
use todo_core::{ApiError, ApiResult, Session, SupabaseClient, Todo, TodoPatch, TodoRepository};
use uuid::Uuid;

use crate::context::AppContext;

fn report(action: &str, err: ApiError) -> String {
    log::error!("{} failed: {}", action, err);
    err.user_message()
}

fn publish(ctx: AppContext, change: SessionChange) {
    match change {
        SessionChange::Unchanged => {}
        SessionChange::Refreshed(session) => ctx.set_session(Some(session)),
        SessionChange::Ended => ctx.set_session(None),
    }
}

async fn with_session<T, F, Fut>(ctx: AppContext, client: &SupabaseClient, action: &str, call: F) -> Result<T, String>
where
    F: FnMut(Session) -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    let Some(session) = ctx.session.get_untracked() else {
        return Err(report(action, ApiError::Unauthenticated));
    };
    let Authorized { result, change } = authorized(client, &session, Utc::now(), call).await;
    publish(ctx, change);
    result.map_err(|e| report(action, e))
}

pub async fn list_todos(ctx: AppContext) -> Result<Vec<Todo>, String> {
    let client = ctx.client();
    let repo = &client;
    let todos = with_session(ctx, repo, "list todos", |s| async move { repo.list(&s).await }).await?;
    log::debug!("loaded {} todos", todos.len());
    Ok(todos)
}

pub async fn create_todo(ctx: AppContext, input: TodoInput) -> Result<Todo, String> {
    let client = ctx.client();
    let repo = &client;
    let todo = input.into_new_todo();
    let todo = &todo;
    with_session(ctx, repo, "create todo", |s| async move { repo.insert(&s, todo).await }).await
}

pub async fn set_completed(ctx: AppContext, id: Uuid, completed: bool) -> Result<Todo, String> {
    let client = ctx.client();
    let repo = &client;
    let patch = TodoPatch::completed(completed);
    let patch = &patch;
    with_session(ctx, repo, "toggle todo", |s| async move { repo.update(&s, id, patch).await }).await
}

pub async fn save_todo(ctx: AppContext, id: Uuid, input: TodoInput) -> Result<Todo, String> {
    let client = ctx.client();
    let repo = &client;
    let patch = input.into_patch();
    let patch = &patch;
    with_session(ctx, repo, "update todo", |s| async move { repo.update(&s, id, patch).await }).await
}

pub async fn delete_todo(ctx: AppContext, id: Uuid) -> Result<(), String> {
    let client = ctx.client();
    let repo = &client;
    with_session(ctx, repo, "delete todo", |s| async move { repo.delete(&s, id).await }).await
}

/// Never fails as a whole; see `BulkOutcome` for per-item results
pub async fn run_bulk(ctx: AppContext, plan: &BulkPlan) -> BulkOutcome {
    log::info!("bulk {:?} on {} todos", plan.action, plan.len());
    let Some(session) = ctx.session.get_untracked() else {
        return BulkOutcome::all_failed(plan, ApiError::Unauthenticated);
    };
    let (outcome, change) = authorized_bulk(&ctx.client(), &session, Utc::now(), plan).await;
    publish(ctx, change);
    outcome
}
