pub mod admin;
pub mod analyst;
pub mod course;
pub mod home;
pub mod instructor;
pub mod login;
pub mod not_found;
pub mod signup;
pub mod student;

use crate::auth::{use_auth, use_services};
use crate::role_gate::RoleGate;
use dioxus::prelude::*;
use shared_types::Role;

use admin::AdminDashboard;
use analyst::AnalystDashboard;
use course::CourseDetail;
use home::Home;
use instructor::InstructorDashboard;
use login::Login;
use not_found::NotFound;
use signup::StudentSignup;
use student::StudentDashboard;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[layout(AppFrame)]
    #[route("/")]
    Home {},
    #[route("/student/signup")]
    StudentSignup {},
    #[route("/:role/login")]
    Login { role: String },
    #[route("/student/dashboard")]
    StudentDashboard {},
    #[route("/instructor/dashboard")]
    InstructorDashboard {},
    #[route("/admin/dashboard")]
    AdminDashboard {},
    #[route("/analyst/dashboard")]
    AnalystDashboard {},
    #[route("/courses/:id")]
    CourseDetail { id: i64 },
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

impl Route {
    pub fn dashboard(role: Role) -> Self {
        match role {
            Role::Student => Route::StudentDashboard {},
            Role::Instructor => Route::InstructorDashboard {},
            Role::Admin => Route::AdminDashboard {},
            Role::Analyst => Route::AnalystDashboard {},
        }
    }

    pub fn login(role: Role) -> Self {
        Route::Login {
            role: role.as_str().to_string(),
        }
    }
}

/// Root layout. Owns the logout navigation, which needs the router.
#[component]
fn AppFrame() -> Element {
    let services = use_services();
    use_hook(move || {
        let nav = navigator();
        services.session.on_logout(move || {
            nav.push(Route::Home {});
        });
    });

    rsx! { Outlet::<Route> {} }
}

/// Header and role guard shared by the four dashboards and the course page.
#[component]
pub fn DashboardShell(role: Role, title: String, children: Element) -> Element {
    rsx! {
        ShellHeader { title: title.clone() }
        RoleGate { required: role,
            div { class: "shell-body", {children} }
        }
    }
}

#[component]
pub fn ShellHeader(title: String) -> Element {
    let auth = use_auth();
    let services = use_services();
    let session = auth.session();

    rsx! {
        header { class: "shell-header",
            div { class: "row",
                Link { to: Route::Home {}, class: "shell-title", "Quintet" }
                span { class: "muted", "{title}" }
            }
            if let Some(session) = session {
                div { class: "row",
                    Link { to: Route::dashboard(session.role), "{session.role.title()} dashboard" }
                    span { class: "muted", "#{session.user_id}" }
                    button {
                        class: "secondary",
                        onclick: move |_| services.session.logout(),
                        "Log out"
                    }
                }
            }
        }
    }
}
