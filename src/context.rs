//! Application Context
//!
//! Shared state provided via Leptos Context API: the backend client, the
//! auth session every view subscribes to, and the toast queue.

use chrono::NaiveDate;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_core::toast::{Toast, ToastKind, ToastQueue, TOAST_DURATION_MS};
use todo_core::{Session, SupabaseClient, User};

use crate::commands;
use crate::time;

/// App-wide auth signals and backend handle
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Backend client (not `Send`, kept in local storage of the arena)
    client: StoredValue<SupabaseClient, LocalStorage>,
    /// Current session - read
    pub session: ReadSignal<Option<Session>>,
    /// Current session - write
    set_session: WriteSignal<Option<Session>>,
    /// True until the stored session has been checked - read
    pub auth_loading: ReadSignal<bool>,
    /// True until the stored session has been checked - write
    set_auth_loading: WriteSignal<bool>,
    /// Trigger to reload todos from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload todos from backend - write
    set_reload_trigger: WriteSignal<u32>,
    /// Local calendar day; "due today" and overdue views follow it
    pub today: RwSignal<NaiveDate>,
}

impl AppContext {
    pub fn new(client: SupabaseClient) -> Self {
        let (session, set_session) = signal(None);
        let (auth_loading, set_auth_loading) = signal(true);
        let (reload_trigger, set_reload_trigger) = signal(0u32);
        Self {
            client: StoredValue::new_local(client),
            session,
            set_session,
            auth_loading,
            set_auth_loading,
            reload_trigger,
            set_reload_trigger,
            today: RwSignal::new(time::today()),
        }
    }

    /// Cheap clone of the client for use inside a spawned task
    pub fn client(&self) -> SupabaseClient {
        self.client.get_value()
    }

    pub fn user(&self) -> Option<User> {
        self.session.with(|s| s.as_ref().map(|s| s.user.clone()))
    }

    /// Auth state change: publish to subscribers and persist
    pub fn set_session(&self, session: Option<Session>) {
        match &session {
            Some(s) => {
                log::info!("signed in as {}", s.user.email);
                commands::save_session(s);
            }
            None => {
                log::info!("signed out");
                commands::clear_session();
            }
        }
        self.set_session.set(session);
    }

    pub fn finish_auth_loading(&self) {
        self.set_auth_loading.set(false);
    }

    /// Trigger a reload of todos
    pub fn reload(&self) {
        self.sync_today();
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Move `today` forward once midnight has passed
    pub fn sync_today(&self) {
        let now = time::today();
        if self.today.get_untracked() != now {
            log::debug!("day rolled over to {}", now);
            self.today.set(now);
        }
    }

    /// Keep `today` current for as long as the page is open
    pub fn watch_day_rollover(&self) {
        let ctx = *self;
        spawn_local(async move {
            loop {
                TimeoutFuture::new(time::ms_until_tomorrow()).await;
                ctx.sync_today();
            }
        });
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}

/// Transient notifications shown in the corner
#[derive(Clone, Copy)]
pub struct ToastContext {
    queue: RwSignal<ToastQueue>,
}

impl ToastContext {
    pub fn new() -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::new()),
        }
    }

    /// Show a toast and schedule its dismissal
    pub fn show(&self, message: impl Into<String>, kind: ToastKind) {
        let mut id = 0;
        let message = message.into();
        if kind == ToastKind::Error {
            log::warn!("toast: {}", message);
        }
        self.queue.update(|q| id = q.push(message, kind));

        let queue = self.queue;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_DURATION_MS).await;
            let _ = queue.try_update(|q| q.dismiss(id));
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Error);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Info);
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|q| q.dismiss(id));
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.queue.with(|q| q.iter().cloned().collect())
    }
}

/// Get the toast context
pub fn use_toast() -> ToastContext {
    use_context::<ToastContext>().expect("ToastContext should be provided")
}
