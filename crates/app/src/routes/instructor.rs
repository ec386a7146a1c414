use crate::auth::use_services;
use crate::components::load_placeholder;
use crate::hooks::use_loader;
use crate::routes::{DashboardShell, Route};
use dioxus::prelude::*;
use shared_types::{Course, InstructorProfile, Role};
use view_state::FetchSet;

#[derive(Debug, Clone, Default, PartialEq)]
struct InstructorData {
    profile: Option<InstructorProfile>,
    courses: Vec<Course>,
}

#[component]
pub fn InstructorDashboard() -> Element {
    rsx! {
        DashboardShell { role: Role::Instructor, title: "Instructor Dashboard",
            InstructorHome {}
        }
    }
}

#[component]
fn InstructorHome() -> Element {
    let services = use_services();
    let (_, state) = use_loader("instructor-dashboard", || {
        let (a, b) = (services.api.clone(), services.api.clone());
        FetchSet::new()
            .slot(
                "profile",
                move || {
                    let api = a.clone();
                    async move { api.instructor_profile().await }
                },
                |d: &mut InstructorData, p| d.profile = Some(p),
            )
            .slot(
                "courses",
                move || {
                    let api = b.clone();
                    async move { api.instructor_courses().await }
                },
                |d: &mut InstructorData, v| d.courses = v,
            )
    });

    let current = state.read().clone();
    if let Some(placeholder) = load_placeholder(&current, "your courses") {
        return placeholder;
    }
    let data = current.data.unwrap_or_default();

    rsx! {
        if let Some(profile) = data.profile {
            div { class: "section card",
                div { class: "card-title", "{profile.name}" }
                p { "{profile.email_id}" }
                p { class: "muted", "Expertise: {profile.expertise}" }
            }
        }

        div { class: "section",
            h2 { "My courses ({data.courses.len()})" }
            if data.courses.is_empty() {
                p { class: "empty-state", "No courses are assigned to you yet." }
            }
            div { class: "grid",
                for course in data.courses {
                    Link {
                        key: "{course.course_id}",
                        to: Route::CourseDetail { id: course.course_id },
                        div { class: "card clickable",
                            div { class: "card-title", "{course.course_name}" }
                            p { class: "muted", "{course.program_type} · {course.duration}" }
                            p { class: "muted", "Manage content, roster and grades" }
                        }
                    }
                }
            }
        }
    }
}
