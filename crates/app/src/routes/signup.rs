use crate::auth::use_services;
use crate::routes::Route;
use dioxus::prelude::*;
use shared_types::{AppError, StudentSignupRequest, SKILL_LEVELS, STUDENT_CATEGORIES};

/// Self-service student account creation. Signs the new student in.
#[component]
pub fn StudentSignup() -> Element {
    let services = use_services();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut age = use_signal(String::new);
    let mut skill_level = use_signal(|| SKILL_LEVELS[0].to_string());
    let mut category = use_signal(|| STUDENT_CATEGORIES[0].to_string());
    let mut country = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        let services = services.clone();
        async move {
            evt.prevent_default();
            error_msg.set(None);

            let request = match age().trim().parse::<i32>() {
                Ok(age) => StudentSignupRequest {
                    email_id: email().trim().to_string(),
                    password: password(),
                    age,
                    skill_level: skill_level(),
                    category: category(),
                    country: country().trim().to_string(),
                },
                Err(_) => {
                    error_msg.set(Some("Enter your age".to_string()));
                    return;
                }
            };
            if let Err(e) = request.validate() {
                error_msg.set(Some(e.message));
                return;
            }

            loading.set(true);
            let result: Result<_, AppError> = async {
                let token = services.api.signup_student(&request).await?;
                services.session.login_with(token)
            }
            .await;
            loading.set(false);

            match result {
                Ok(_) => {
                    navigator().push(Route::StudentDashboard {});
                }
                Err(e) => error_msg.set(Some(e.message)),
            }
        }
    };

    rsx! {
        div { class: "auth-page",
            div { class: "card auth-card",
                h2 { "Create student account" }
                if let Some(err) = error_msg() {
                    div { class: "auth-error", "{err}" }
                }
                form { onsubmit: handle_submit,
                    input {
                        r#type: "email",
                        placeholder: "you@example.com",
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
                    input {
                        r#type: "number",
                        placeholder: "Age",
                        value: "{age}",
                        oninput: move |e| age.set(e.value()),
                    }
                    select {
                        value: "{skill_level}",
                        onchange: move |e| skill_level.set(e.value()),
                        for level in SKILL_LEVELS {
                            option { value: *level, "{level}" }
                        }
                    }
                    select {
                        value: "{category}",
                        onchange: move |e| category.set(e.value()),
                        for c in STUDENT_CATEGORIES {
                            option { value: *c, "{c}" }
                        }
                    }
                    input {
                        placeholder: "Country",
                        value: "{country}",
                        oninput: move |e| country.set(e.value()),
                    }
                    button { r#type: "submit", disabled: loading(),
                        if loading() { "Creating account..." } else { "Sign up" }
                    }
                }
                p { class: "muted",
                    "Already registered? "
                    Link { to: Route::login(shared_types::Role::Student), "Sign in" }
                }
            }
        }
    }
}
