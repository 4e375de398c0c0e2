//! Todo Frontend App
//!
//! Root component: restores the session, then shows either the auth form or
//! the dashboard.

use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_core::{SupabaseClient, SupabaseConfig};

use crate::commands;
use crate::components::{AuthForm, Dashboard, Loading, ToastContainer};
use crate::context::{AppContext, ToastContext};

#[component]
pub fn App() -> impl IntoView {
    provide_context(ToastContext::new());

    let body = match SupabaseConfig::from_build_env() {
        Ok(config) => view! { <Authenticated client=SupabaseClient::new(config) /> }.into_any(),
        Err(e) => {
            log::error!("backend not configured: {}", e);
            view! {
                <div class="config-error card" role="alert">
                    <h2>"Configuration error"</h2>
                    <p>{e.to_string()}</p>
                    <p>"Set SUPABASE_URL and SUPABASE_ANON_KEY when building the app."</p>
                </div>
            }
            .into_any()
        }
    };

    view! {
        <div class="app">
            {body}
            <ToastContainer />
        </div>
    }
}

/// Everything below a configured backend
#[component]
fn Authenticated(client: SupabaseClient) -> impl IntoView {
    let ctx = AppContext::new(client);
    provide_context(ctx);

    // Restore the stored session once on mount
    spawn_local(async move {
        let session = commands::restore(&ctx.client()).await;
        match session {
            Some(session) => ctx.set_session(Some(session)),
            None => commands::clear_session(),
        }
        ctx.finish_auth_loading();
    });

    ctx.watch_day_rollover();

    let signed_in = Memo::new(move |_| ctx.session.with(Option::is_some));

    view! {
        {move || {
            if ctx.auth_loading.get() {
                view! { <div class="auth-loading"><Loading /></div> }.into_any()
            } else if signed_in.get() {
                view! { <Dashboard /> }.into_any()
            } else {
                view! { <AuthForm /> }.into_any()
            }
        }}
    }
}
