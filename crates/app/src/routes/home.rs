use dioxus::prelude::*;
use shared_types::Role;

use crate::routes::Route;

fn portal_blurb(role: Role) -> &'static str {
    match role {
        Role::Student => "Browse courses, enroll, and follow your grades.",
        Role::Instructor => "Manage course content and grade your students.",
        Role::Admin => "Create courses and instructors, manage students.",
        Role::Analyst => "Explore platform statistics and performance.",
    }
}

/// Public landing page with one entry per portal.
#[component]
pub fn Home() -> Element {
    rsx! {
        div { class: "landing",
            h1 { "Quintet" }
            p { class: "muted", "Online courses for students, instructors, administrators and analysts." }
            div { class: "grid",
                for role in Role::ALL {
                    div { key: "{role}", class: "card",
                        div { class: "card-title", "{role.title()}" }
                        p { class: "muted", "{portal_blurb(role)}" }
                        div { class: "row",
                            Link { to: Route::login(role), "Sign in" }
                            if role == Role::Student {
                                Link { to: Route::StudentSignup {}, "Sign up" }
                            }
                        }
                    }
                }
            }
        }
    }
}
