//! Sign-in view

use dioxus::prelude::*;

use hive_core::auth_screen::{
    AuthForm, AuthOutcome, SIGN_IN_MISSING_MESSAGE, SIGN_UP_MISSING_MESSAGE,
};
use hive_core::backend::AuthBackend;

use crate::state::{AppState, Route};
use crate::theme::palette;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthAction {
    SignIn,
    SignUp,
}

impl AuthAction {
    const fn missing_message(self) -> &'static str {
        match self {
            Self::SignIn => SIGN_IN_MISSING_MESSAGE,
            Self::SignUp => SIGN_UP_MISSING_MESSAGE,
        }
    }
}

/// Email and password card with the sign-in and sign-up buttons
#[component]
pub fn Login() -> Element {
    let mut state = use_context::<AppState>();
    let colors = palette();
    let form = state.auth_form.read().clone();
    let loading = form.is_loading();

    let mut run = move |action: AuthAction| {
        let Some(backend) = state.require_backend() else {
            return;
        };
        let credentials = state.auth_form.write().begin(action.missing_message());
        let (email, password) = match credentials {
            Ok(credentials) => credentials,
            Err(error) => {
                state.show_notice(error.to_string());
                return;
            }
        };

        spawn(async move {
            let outcome = match action {
                AuthAction::SignIn => backend
                    .sign_in(&email, &password)
                    .await
                    .map(|_| AuthOutcome::Enter),
                AuthAction::SignUp => backend
                    .sign_up(&email, &password)
                    .await
                    .map(AuthForm::sign_up_outcome),
            };
            state.auth_form.write().finish();

            match outcome {
                Ok(AuthOutcome::Enter) => {
                    tracing::info!("Signed in");
                    state.notice.set(None);
                    state.go_to(Route::Notes);
                }
                Ok(AuthOutcome::Notice(message)) => state.show_notice(message),
                Err(error) => {
                    tracing::warn!("Authentication failed: {}", error);
                    state.show_notice(error.to_string());
                }
            }
        });
    };

    let field_style = format!(
        "
        width: 100%;
        box-sizing: border-box;
        padding: 16px;
        border: 4px solid {ink};
        border-radius: 16px;
        box-shadow: 4px 4px 0 0 {ink};
        color: {ink};
        font-weight: 700;
        outline: none;
        ",
        ink = colors.ink_login
    );

    rsx! {
        div {
            class: "login-view",
            style: "
                min-height: 100vh;
                display: flex;
                flex-direction: column;
                align-items: center;
                justify-content: center;
                padding: 24px;
                box-sizing: border-box;
                background: {colors.page_login};
                color: {colors.ink_login};
            ",

            div {
                class: "login-card",
                style: "
                    width: 100%;
                    max-width: 420px;
                    padding: 40px;
                    box-sizing: border-box;
                    background: {colors.panel};
                    border: 4px solid {colors.ink_login};
                    border-radius: 32px;
                    box-shadow: 12px 12px 0 0 {colors.ink_login};
                ",

                div {
                    style: "text-align: center; margin-bottom: 32px;",
                    div {
                        style: "
                            display: inline-block;
                            padding: 16px;
                            margin-bottom: 16px;
                            font-size: 56px;
                            background: {colors.footer};
                            border: 4px solid {colors.ink_login};
                            border-radius: 16px;
                        ",
                        "🐻"
                    }
                    h1 {
                        style: "
                            margin: 0;
                            font-size: 34px;
                            font-weight: 900;
                            font-style: italic;
                            text-transform: uppercase;
                        ",
                        "Hive Notes"
                    }
                    p {
                        style: "
                            margin: 8px 0 0;
                            font-size: 12px;
                            font-weight: 700;
                            letter-spacing: 0.2em;
                            text-transform: uppercase;
                            opacity: 0.8;
                        ",
                        "Forest Authentication"
                    }
                }

                div {
                    style: "display: flex; flex-direction: column; gap: 16px;",
                    input {
                        r#type: "email",
                        placeholder: "Email Address",
                        value: "{form.email}",
                        disabled: loading,
                        style: "{field_style}",
                        oninput: move |evt: FormEvent| state.auth_form.write().email = evt.value(),
                    }
                    input {
                        r#type: "password",
                        placeholder: "Secret Paw-word",
                        value: "{form.password}",
                        disabled: loading,
                        style: "{field_style}",
                        oninput: move |evt: FormEvent| state.auth_form.write().password = evt.value(),
                    }
                }

                div {
                    style: "
                        display: grid;
                        grid-template-columns: 1fr 1fr;
                        gap: 16px;
                        padding-top: 24px;
                    ",
                    button {
                        disabled: loading,
                        onclick: move |_| run(AuthAction::SignIn),
                        style: "
                            padding: 16px;
                            border: none;
                            border-radius: 16px;
                            background: {colors.ink_login};
                            color: {colors.footer};
                            font-weight: 900;
                            text-transform: uppercase;
                        ",
                        "Login 🍯"
                    }
                    button {
                        disabled: loading,
                        onclick: move |_| run(AuthAction::SignUp),
                        style: "
                            padding: 16px;
                            border: 4px solid {colors.ink_login};
                            border-radius: 16px;
                            background: {colors.panel};
                            color: {colors.ink_login};
                            font-weight: 900;
                            text-transform: uppercase;
                        ",
                        "Sign Up 🐾"
                    }
                }
            }

            p {
                style: "
                    margin-top: 32px;
                    font-size: 10px;
                    font-weight: 900;
                    letter-spacing: 0.3em;
                    text-transform: uppercase;
                ",
                "Strictly for Bears Only 🐝"
            }
        }
    }
}
