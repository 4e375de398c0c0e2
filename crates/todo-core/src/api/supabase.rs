//! Supabase Client
//!
//! `AuthApi` over the GoTrue endpoints (`/auth/v1`) and `TodoRepository`
//! over PostgREST (`/rest/v1/todos`). Requests are single shots: no retry,
//! no timeout policy beyond what the transport does.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::{error_from_body, ApiError, ApiResult, AuthApi, SignUpOutcome, TodoRepository};
use crate::config::SupabaseConfig;
use crate::domain::{NewTodo, Session, Todo, TodoPatch, User};

const TODOS_TABLE: &str = "todos";

#[derive(Clone, Debug)]
pub struct SupabaseClient {
    http: reqwest::Client,
    config: SupabaseConfig,
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

#[derive(Serialize)]
struct InsertRow<'a> {
    #[serde(flatten)]
    todo: &'a NewTodo,
    user_id: Uuid,
}

/// Token endpoint response; sign-up without a session returns a bare user
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: Option<i64>,
    expires_in: Option<i64>,
    user: Option<User>,
}

impl TokenResponse {
    pub(crate) fn into_session(self, now: DateTime<Utc>) -> ApiResult<Option<Session>> {
        let (Some(access_token), Some(user)) = (self.access_token, self.user) else {
            return Ok(None);
        };
        let refresh_token = self
            .refresh_token
            .ok_or_else(|| ApiError::Decode("session without refresh_token".into()))?;
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| now.timestamp() + secs));
        Ok(Some(Session {
            access_token,
            refresh_token,
            expires_at,
            user,
        }))
    }
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.config
            .url
            .join(path)
            .map_err(|e| ApiError::Network(format!("bad endpoint {}: {}", path, e)))
    }

    pub(crate) fn auth_url(&self, path: &str, grant_type: Option<&str>) -> ApiResult<Url> {
        let mut url = self.endpoint(&format!("auth/v1/{}", path))?;
        if let Some(grant) = grant_type {
            url.query_pairs_mut().append_pair("grant_type", grant);
        }
        Ok(url)
    }

    pub(crate) fn todos_url(&self, query: &[(&str, String)]) -> ApiResult<Url> {
        let mut url = self.endpoint(&format!("rest/v1/{}", TODOS_TABLE))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url, access_token: Option<&str>) -> RequestBuilder {
        let bearer = access_token.unwrap_or(&self.config.anon_key);
        self.http
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .header("Authorization", format!("Bearer {}", bearer))
    }

    async fn send(&self, builder: RequestBuilder) -> ApiResult<String> {
        let response: Response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let err = error_from_body(status.as_u16(), &body);
            log::warn!("backend request failed: {}", err);
            return Err(err);
        }
        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let body = self.send(builder).await?;
        Ok(serde_json::from_str(&body)?)
    }

    fn token_request(&self, grant_type: &str, body: &impl Serialize) -> ApiResult<RequestBuilder> {
        let url = self.auth_url("token", Some(grant_type))?;
        Ok(self.request(Method::POST, url, None).json(body))
    }

    async fn token(&self, grant_type: &str, body: &impl Serialize) -> ApiResult<Session> {
        let resp: TokenResponse = self.send_json(self.token_request(grant_type, body)?).await?;
        resp.into_session(Utc::now())?
            .ok_or_else(|| ApiError::Decode("token response without session".into()))
    }

    /// PostgREST returns an array for representation writes
    fn single_row(rows: Vec<Todo>) -> ApiResult<Todo> {
        rows.into_iter().next().ok_or(ApiError::NotFound)
    }

    fn insert_request(&self, session: &Session, todo: &NewTodo) -> ApiResult<RequestBuilder> {
        let url = self.todos_url(&[])?;
        let row = InsertRow { todo, user_id: session.user_id() };
        Ok(self
            .request(Method::POST, url, Some(&session.access_token))
            .header("Prefer", "return=representation")
            .json(&row))
    }

    fn list_request(&self, session: &Session) -> ApiResult<RequestBuilder> {
        let url = self.todos_url(&[
            ("select", "*".to_string()),
            ("user_id", format!("eq.{}", session.user_id())),
            ("order", "created_at.desc".to_string()),
        ])?;
        Ok(self.request(Method::GET, url, Some(&session.access_token)))
    }

    fn update_request(&self, session: &Session, id: Uuid, patch: &TodoPatch) -> ApiResult<RequestBuilder> {
        let url = self.todos_url(&[("id", format!("eq.{}", id))])?;
        Ok(self
            .request(Method::PATCH, url, Some(&session.access_token))
            .header("Prefer", "return=representation")
            .json(patch))
    }

    fn delete_request(&self, session: &Session, id: Uuid) -> ApiResult<RequestBuilder> {
        let url = self.todos_url(&[("id", format!("eq.{}", id))])?;
        Ok(self.request(Method::DELETE, url, Some(&session.access_token)))
    }
}

#[async_trait(?Send)]
impl AuthApi for SupabaseClient {
    async fn sign_up(&self, email: &str, password: &str) -> ApiResult<SignUpOutcome> {
        let url = self.auth_url("signup", None)?;
        let body = PasswordGrant { email, password };
        let resp: TokenResponse = self.send_json(self.request(Method::POST, url, None).json(&body)).await?;
        Ok(match resp.into_session(Utc::now())? {
            Some(session) => SignUpOutcome::SignedIn(session),
            None => SignUpOutcome::ConfirmationSent,
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> ApiResult<Session> {
        self.token("password", &PasswordGrant { email, password }).await
    }

    async fn sign_out(&self, session: &Session) -> ApiResult<()> {
        let url = self.auth_url("logout", None)?;
        self.send(self.request(Method::POST, url, Some(&session.access_token)))
            .await
            .map(|_| ())
    }

    async fn get_user(&self, access_token: &str) -> ApiResult<User> {
        let url = self.auth_url("user", None)?;
        self.send_json(self.request(Method::GET, url, Some(access_token))).await
    }

    async fn refresh(&self, refresh_token: &str) -> ApiResult<Session> {
        self.token("refresh_token", &RefreshGrant { refresh_token }).await
    }
}

#[async_trait(?Send)]
impl TodoRepository for SupabaseClient {
    async fn insert(&self, session: &Session, todo: &NewTodo) -> ApiResult<Todo> {
        let rows: Vec<Todo> = self.send_json(self.insert_request(session, todo)?).await?;
        Self::single_row(rows)
    }

    async fn list(&self, session: &Session) -> ApiResult<Vec<Todo>> {
        self.send_json(self.list_request(session)?).await
    }

    async fn update(&self, session: &Session, id: Uuid, patch: &TodoPatch) -> ApiResult<Todo> {
        let rows: Vec<Todo> = self.send_json(self.update_request(session, id, patch)?).await?;
        Self::single_row(rows)
    }

    async fn delete(&self, session: &Session, id: Uuid) -> ApiResult<()> {
        self.send(self.delete_request(session, id)?).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn client() -> SupabaseClient {
        SupabaseClient::new(SupabaseConfig::new("https://proj.supabase.co", "anon-key").unwrap())
    }

    fn session() -> Session {
        Session {
            access_token: "user-token".into(),
            refresh_token: "rt".into(),
            expires_at: None,
            user: User { id: Uuid::from_u128(7), email: "ada@example.com".into() },
        }
    }

    fn header<'a>(req: &'a reqwest::Request, name: &str) -> Option<&'a str> {
        req.headers().get(name).and_then(|v| v.to_str().ok())
    }

    fn json_body(req: &reqwest::Request) -> serde_json::Value {
        let bytes = req.body().and_then(|b| b.as_bytes()).expect("buffered body");
        serde_json::from_slice(bytes).unwrap()
    }

    #[test]
    fn test_token_request_uses_anon_key_as_bearer() {
        let grant = PasswordGrant { email: "ada@example.com", password: "Secret1" };
        let req = client().token_request("password", &grant).unwrap().build().unwrap();
        assert_eq!(req.method(), Method::POST);
        assert_eq!(header(&req, "apikey"), Some("anon-key"));
        assert_eq!(header(&req, "authorization"), Some("Bearer anon-key"));
        assert_eq!(json_body(&req), json!({ "email": "ada@example.com", "password": "Secret1" }));
    }

    #[test]
    fn test_todo_requests_use_access_token() {
        let c = client();
        let s = session();
        let list = c.list_request(&s).unwrap().build().unwrap();
        assert_eq!(list.method(), Method::GET);
        assert_eq!(header(&list, "apikey"), Some("anon-key"));
        assert_eq!(header(&list, "authorization"), Some("Bearer user-token"));
        assert!(header(&list, "prefer").is_none());

        let delete = c.delete_request(&s, Uuid::nil()).unwrap().build().unwrap();
        assert_eq!(delete.method(), Method::DELETE);
        assert_eq!(delete.url().query(), Some("id=eq.00000000-0000-0000-0000-000000000000"));
        assert_eq!(header(&delete, "authorization"), Some("Bearer user-token"));
    }

    #[test]
    fn test_insert_request_asks_for_representation() {
        let todo = NewTodo::new("Water plants", crate::domain::Priority::Low);
        let req = client().insert_request(&session(), &todo).unwrap().build().unwrap();
        assert_eq!(req.method(), Method::POST);
        assert_eq!(header(&req, "prefer"), Some("return=representation"));
        assert_eq!(header(&req, "content-type"), Some("application/json"));
        assert_eq!(json_body(&req)["user_id"], json!(Uuid::from_u128(7)));
    }

    #[test]
    fn test_update_request_sends_patch_body() {
        let id = Uuid::from_u128(42);
        let patch = TodoPatch { due_date: Some(None), ..TodoPatch::completed(true) };
        let req = client().update_request(&session(), id, &patch).unwrap().build().unwrap();
        assert_eq!(req.method(), Method::PATCH);
        assert_eq!(req.url().query(), Some(format!("id=eq.{}", id).as_str()));
        assert_eq!(header(&req, "prefer"), Some("return=representation"));
        assert_eq!(json_body(&req), json!({ "due_date": null, "completed": true }));
    }

    #[test]
    fn test_empty_representation_is_not_found() {
        assert_eq!(SupabaseClient::single_row(Vec::new()), Err(ApiError::NotFound));
    }

    #[test]
    fn test_auth_urls() {
        let c = client();
        assert_eq!(
            c.auth_url("token", Some("password")).unwrap().as_str(),
            "https://proj.supabase.co/auth/v1/token?grant_type=password"
        );
        assert_eq!(c.auth_url("signup", None).unwrap().as_str(), "https://proj.supabase.co/auth/v1/signup");
    }

    #[test]
    fn test_todos_list_url() {
        let c = client();
        let url = c
            .todos_url(&[
                ("select", "*".to_string()),
                ("user_id", format!("eq.{}", Uuid::nil())),
                ("order", "created_at.desc".to_string()),
            ])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://proj.supabase.co/rest/v1/todos?select=*&user_id=eq.00000000-0000-0000-0000-000000000000&order=created_at.desc"
        );
    }

    #[test]
    fn test_insert_row_carries_user_id() {
        let todo = NewTodo::new("Water plants", crate::domain::Priority::Low);
        let row = InsertRow { todo: &todo, user_id: Uuid::nil() };
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            json!({
                "title": "Water plants",
                "priority": "low",
                "completed": false,
                "user_id": "00000000-0000-0000-0000-000000000000"
            })
        );
    }

    #[test]
    fn test_token_response_to_session() {
        let now = Utc.timestamp_opt(1_000, 0).unwrap();
        let resp: TokenResponse = serde_json::from_value(json!({
            "access_token": "at",
            "refresh_token": "rt",
            "expires_in": 3600,
            "user": { "id": "00000000-0000-0000-0000-000000000001", "email": "ada@example.com" }
        }))
        .unwrap();
        let session = resp.into_session(now).unwrap().unwrap();
        assert_eq!(session.expires_at, Some(4_600));
        assert_eq!(session.user.email, "ada@example.com");
    }

    #[test]
    fn test_sign_up_without_session() {
        // Confirmation-required sign-ups return the user object at top level
        let resp: TokenResponse = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "email": "ada@example.com",
            "confirmation_sent_at": "2026-10-19T10:00:00Z"
        }))
        .unwrap();
        assert!(resp.into_session(Utc::now()).unwrap().is_none());
    }
}
