//! Auth Form Component
//!
//! One form for both sign-in and sign-up; the mode toggle swaps the
//! validation rules and keeps what was typed.

use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_core::form::{blank_auth_values, AuthField, AuthSchema, FormState};
use todo_core::SignUpOutcome;

use crate::commands;
use crate::components::{Loading, ValidatedInput};
use crate::context::{use_app_context, use_toast};

const CONFIRMATION_NOTICE: &str = "Check your email to confirm your account, then sign in.";

#[component]
pub fn AuthForm() -> impl IntoView {
    let ctx = use_app_context();
    let toast = use_toast();

    let form = RwSignal::new(FormState::new(AuthSchema::default(), blank_auth_values()));
    let (error, set_error) = signal(None::<String>);
    let (notice, set_notice) = signal(None::<String>);

    let mode = move || form.with(|f| *f.schema());
    let is_submitting = move || form.with(|f| f.is_submitting());

    let field_value = move |field: AuthField| Signal::derive(move || form.with(|f| f.value(field).to_string()));
    let field_error = move |field: AuthField| Signal::derive(move || form.with(|f| f.error(field).map(str::to_string)));
    let on_input = move |field: AuthField| {
        Callback::new(move |v: String| {
            set_error.set(None);
            form.update(|f| f.set_value(field, v));
        })
    };
    let on_blur = move |field: AuthField| Callback::new(move |_: ()| form.update(|f| f.touch(field)));

    let toggle_mode = move |_| {
        set_error.set(None);
        set_notice.set(None);
        form.update(|f| {
            let next = f.schema().toggled();
            f.set_schema(next);
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);
        set_notice.set(None);

        let mut parsed = None;
        form.update(|f| parsed = f.begin_submit());
        let Some(creds) = parsed else { return; };
        let schema = mode();

        let client = ctx.client();
        spawn_local(async move {
            let result = match schema {
                AuthSchema::SignIn => commands::sign_in(&client, &creds).await.map(Some),
                AuthSchema::SignUp => commands::sign_up(&client, &creds).await.map(|outcome| match outcome {
                    SignUpOutcome::SignedIn(session) => Some(session),
                    SignUpOutcome::ConfirmationSent => None,
                }),
            };
            form.update(|f| f.finish_submit());

            match result {
                Ok(Some(session)) => {
                    toast.success(format!("Welcome, {}!", session.user.email));
                    ctx.set_session(Some(session));
                }
                Ok(None) => {
                    set_notice.set(Some(CONFIRMATION_NOTICE.to_string()));
                    form.update(|f| f.set_schema(AuthSchema::SignIn));
                }
                Err(msg) => set_error.set(Some(msg)),
            }
        });
    };

    view! {
        <div class="auth-page">
            <form class="card auth-form" on:submit=on_submit novalidate=true>
                <h2 class="card-title">{move || mode().title()}</h2>

                {move || notice.get().map(|msg| view! { <div class="notice" role="status">{msg}</div> })}
                {move || error.get().map(|msg| view! { <div class="form-error" role="alert">{msg}</div> })}

                <ValidatedInput
                    id="auth-email"
                    label="Email"
                    input_type="email"
                    placeholder="you@example.com"
                    required=true
                    value=field_value(AuthField::Email)
                    error=field_error(AuthField::Email)
                    on_input=on_input(AuthField::Email)
                    on_blur=on_blur(AuthField::Email)
                />
                <ValidatedInput
                    id="auth-password"
                    label="Password"
                    input_type="password"
                    required=true
                    value=field_value(AuthField::Password)
                    error=field_error(AuthField::Password)
                    on_input=on_input(AuthField::Password)
                    on_blur=on_blur(AuthField::Password)
                />

                <button type="submit" class="btn primary full" disabled=is_submitting>
                    {move || if is_submitting() {
                        view! { <Loading small=true /> }.into_any()
                    } else {
                        mode().title().into_any()
                    }}
                </button>

                <p class="auth-toggle">
                    {move || match mode() {
                        AuthSchema::SignIn => "Don't have an account? ",
                        AuthSchema::SignUp => "Already have an account? ",
                    }}
                    <button type="button" class="link-btn" on:click=toggle_mode disabled=is_submitting>
                        {move || mode().toggled().title()}
                    </button>
                </p>
            </form>
        </div>
    }
}
