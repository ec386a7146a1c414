use crate::auth::{use_auth, use_services};
use crate::routes::Route;
use dioxus::prelude::*;
use shared_types::Role;

/// Sign-in page for one portal, e.g. `/instructor/login`.
#[component]
pub fn Login(role: String) -> Element {
    let auth = use_auth();
    let services = use_services();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);
    let parsed = Role::parse(&role);

    // Already signed in to this portal
    use_effect(move || {
        if let Some(role) = parsed {
            if auth.role() == Some(role) {
                navigator().replace(Route::dashboard(role));
            }
        }
    });

    let Some(role) = parsed else {
        return rsx! {
            super::not_found::NotFound { route: vec![role, "login".to_string()] }
        };
    };

    let handle_login = move |evt: FormEvent| {
        let services = services.clone();
        async move {
            evt.prevent_default();
            loading.set(true);
            error_msg.set(None);

            let result = match services.api.login(role, &email(), &password()).await {
                Ok(token) => services.session.login_with(token),
                Err(e) => Err(e),
            };
            match result {
                Ok(session) => {
                    navigator().push(Route::dashboard(session.role));
                }
                Err(e) => {
                    tracing::warn!(role = %role, error = %e, "login failed");
                    error_msg.set(Some(e.message));
                }
            }
            loading.set(false);
        }
    };

    rsx! {
        div { class: "auth-page",
            div { class: "card auth-card",
                h2 { "{role.title()} sign in" }
                if let Some(err) = error_msg() {
                    div { class: "auth-error", "{err}" }
                }
                form { onsubmit: handle_login,
                    input {
                        r#type: "email",
                        placeholder: "Email",
                        required: true,
                        value: "{email}",
                        oninput: move |e| email.set(e.value()),
                    }
                    input {
                        r#type: "password",
                        placeholder: "Password",
                        required: true,
                        value: "{password}",
                        oninput: move |e| password.set(e.value()),
                    }
                    button { r#type: "submit", disabled: loading(),
                        if loading() { "Signing in..." } else { "Sign in" }
                    }
                }
                if role == Role::Student {
                    p { class: "muted",
                        "No account? "
                        Link { to: Route::StudentSignup {}, "Sign up" }
                    }
                }
                Link { to: Route::Home {}, "Back to home" }
            }
        }
    }
}
