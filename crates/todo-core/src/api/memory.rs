//! In-memory backend used by tests.
//!
//! Mimics the hosted service closely enough to exercise the flows: tokens
//! map to users, rows are scoped per user and error messages match the
//! real service's wording.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use super::{ApiError, ApiResult, AuthApi, SignUpOutcome, TodoRepository};
use crate::domain::{NewTodo, Session, Todo, TodoPatch, User};

#[derive(Default)]
pub(crate) struct MemoryBackend {
    accounts: RefCell<Vec<(User, String)>>,
    tokens: RefCell<HashMap<String, Uuid>>,
    refresh_tokens: RefCell<HashMap<String, Uuid>>,
    expired_tokens: RefCell<HashSet<String>>,
    todos: RefCell<Vec<Todo>>,
    failing: RefCell<HashSet<Uuid>>,
    next_id: Cell<u128>,
    pub(crate) require_confirmation: Cell<bool>,
    pub(crate) offline: Cell<bool>,
}

impl MemoryBackend {
    pub(crate) fn new() -> Self {
        Self {
            next_id: Cell::new(1),
            ..Default::default()
        }
    }

    fn next_uuid(&self) -> Uuid {
        let n = self.next_id.get();
        self.next_id.set(n + 1);
        Uuid::from_u128(n)
    }

    fn issue_session(&self, user: User) -> Session {
        let n = self.next_id.get();
        let access_token = format!("access-{}", n);
        let refresh_token = format!("refresh-{}", n);
        self.next_id.set(n + 1);
        self.tokens.borrow_mut().insert(access_token.clone(), user.id);
        self.refresh_tokens.borrow_mut().insert(refresh_token.clone(), user.id);
        Session {
            access_token,
            refresh_token,
            expires_at: Some(Utc::now().timestamp() + 3600),
            user,
        }
    }

    /// Sign up and return the session, for tests that only need a user
    pub(crate) fn register(&self, email: &str, password: &str) -> Session {
        let user = User { id: self.next_uuid(), email: email.to_string() };
        self.accounts.borrow_mut().push((user.clone(), password.to_string()));
        self.issue_session(user)
    }

    pub(crate) fn expire(&self, access_token: &str) {
        self.expired_tokens.borrow_mut().insert(access_token.to_string());
    }

    pub(crate) fn fail_on(&self, id: Uuid) {
        self.failing.borrow_mut().insert(id);
    }

    pub(crate) fn stored(&self) -> Vec<Todo> {
        self.todos.borrow().clone()
    }

    fn check_online(&self) -> ApiResult<()> {
        if self.offline.get() {
            return Err(ApiError::Network("connection refused".into()));
        }
        Ok(())
    }

    fn authorize(&self, access_token: &str) -> ApiResult<Uuid> {
        self.check_online()?;
        if self.expired_tokens.borrow().contains(access_token) {
            return Err(ApiError::http(401, "JWT expired"));
        }
        self.tokens
            .borrow()
            .get(access_token)
            .copied()
            .ok_or_else(|| ApiError::http(401, "invalid JWT"))
    }

    fn check_failing(&self, id: Uuid) -> ApiResult<()> {
        if self.failing.borrow().contains(&id) {
            return Err(ApiError::http(500, "simulated failure"));
        }
        Ok(())
    }
}

/// What the service does with a PATCH body
fn apply_patch(patch: &TodoPatch, todo: &mut Todo) {
    if let Some(title) = &patch.title {
        todo.title = title.clone();
    }
    if let Some(description) = &patch.description {
        todo.description = description.clone();
    }
    if let Some(due_date) = patch.due_date {
        todo.due_date = due_date;
    }
    if let Some(priority) = patch.priority {
        todo.priority = priority;
    }
    if let Some(completed) = patch.completed {
        todo.completed = completed;
    }
}

#[async_trait(?Send)]
impl AuthApi for MemoryBackend {
    async fn sign_up(&self, email: &str, password: &str) -> ApiResult<SignUpOutcome> {
        self.check_online()?;
        if self.accounts.borrow().iter().any(|(u, _)| u.email == email) {
            return Err(ApiError::http(422, "User already registered"));
        }
        let user = User { id: self.next_uuid(), email: email.to_string() };
        self.accounts.borrow_mut().push((user.clone(), password.to_string()));
        if self.require_confirmation.get() {
            Ok(SignUpOutcome::ConfirmationSent)
        } else {
            Ok(SignUpOutcome::SignedIn(self.issue_session(user)))
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> ApiResult<Session> {
        self.check_online()?;
        let user = self
            .accounts
            .borrow()
            .iter()
            .find(|(u, p)| u.email == email && p == password)
            .map(|(u, _)| u.clone());
        match user {
            Some(user) => Ok(self.issue_session(user)),
            None => Err(ApiError::http(400, "Invalid login credentials")),
        }
    }

    async fn sign_out(&self, session: &Session) -> ApiResult<()> {
        self.check_online()?;
        self.tokens.borrow_mut().remove(&session.access_token);
        self.refresh_tokens.borrow_mut().remove(&session.refresh_token);
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> ApiResult<User> {
        let user_id = self.authorize(access_token)?;
        self.accounts
            .borrow()
            .iter()
            .find(|(u, _)| u.id == user_id)
            .map(|(u, _)| u.clone())
            .ok_or_else(|| ApiError::http(404, "User not found"))
    }

    async fn refresh(&self, refresh_token: &str) -> ApiResult<Session> {
        self.check_online()?;
        let user_id = self
            .refresh_tokens
            .borrow_mut()
            .remove(refresh_token)
            .ok_or_else(|| ApiError::http(400, "Invalid Refresh Token: Refresh Token Not Found"))?;
        let user = self
            .accounts
            .borrow()
            .iter()
            .find(|(u, _)| u.id == user_id)
            .map(|(u, _)| u.clone())
            .ok_or_else(|| ApiError::http(404, "User not found"))?;
        Ok(self.issue_session(user))
    }
}

#[async_trait(?Send)]
impl TodoRepository for MemoryBackend {
    async fn insert(&self, session: &Session, todo: &NewTodo) -> ApiResult<Todo> {
        let user_id = self.authorize(&session.access_token)?;
        let n = self.next_id.get();
        let row = Todo {
            id: self.next_uuid(),
            title: todo.title.clone(),
            description: todo.description.clone(),
            due_date: todo.due_date,
            priority: todo.priority,
            completed: todo.completed,
            // Strictly increasing so ordering by created_at is deterministic
            created_at: Utc.timestamp_opt(1_700_000_000 + n as i64, 0).unwrap(),
            user_id,
        };
        self.todos.borrow_mut().push(row.clone());
        Ok(row)
    }

    async fn list(&self, session: &Session) -> ApiResult<Vec<Todo>> {
        let user_id = self.authorize(&session.access_token)?;
        let mut rows: Vec<Todo> = self
            .todos
            .borrow()
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn update(&self, session: &Session, id: Uuid, patch: &TodoPatch) -> ApiResult<Todo> {
        let user_id = self.authorize(&session.access_token)?;
        self.check_failing(id)?;
        let mut todos = self.todos.borrow_mut();
        let todo = todos
            .iter_mut()
            .find(|t| t.id == id && t.user_id == user_id)
            .ok_or(ApiError::NotFound)?;
        apply_patch(patch, todo);
        Ok(todo.clone())
    }

    async fn delete(&self, session: &Session, id: Uuid) -> ApiResult<()> {
        let user_id = self.authorize(&session.access_token)?;
        self.check_failing(id)?;
        // Row-level security: deleting someone else's row is a silent no-op
        self.todos.borrow_mut().retain(|t| !(t.id == id && t.user_id == user_id));
        Ok(())
    }
}
