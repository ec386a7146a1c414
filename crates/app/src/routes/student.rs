use crate::auth::use_services;
use crate::components::{load_placeholder, ScoreText};
use crate::hooks::{use_loader, use_pending};
use crate::routes::{DashboardShell, Route};
use api_client::ApiClient;
use dioxus::prelude::*;
use shared_types::{Course, Enrollment, Role, StudentProfile};
use view_state::catalog::partition_courses;
use view_state::{FetchSet, MutationRequest, PendingKey};

pub const ENROLL: &str = "enroll";
pub const UNENROLL: &str = "unenroll";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentData {
    pub profile: Option<StudentProfile>,
    pub courses: Vec<Course>,
    pub enrollments: Vec<Enrollment>,
}

fn student_fetches(api: &ApiClient) -> FetchSet<StudentData> {
    let (a, b, c) = (api.clone(), api.clone(), api.clone());
    FetchSet::new()
        .slot(
            "profile",
            move || {
                let api = a.clone();
                async move { api.student_profile().await }
            },
            |d: &mut StudentData, p| d.profile = Some(p),
        )
        .slot(
            "courses",
            move || {
                let api = b.clone();
                async move { api.browse_courses().await }
            },
            |d: &mut StudentData, v| d.courses = v,
        )
        .slot(
            "enrollments",
            move || {
                let api = c.clone();
                async move { api.my_enrolled_courses().await }
            },
            |d: &mut StudentData, v| d.enrollments = v,
        )
}

#[component]
pub fn StudentDashboard() -> Element {
    rsx! {
        DashboardShell { role: Role::Student, title: "Student Dashboard",
            StudentHome {}
        }
    }
}

#[component]
fn StudentHome() -> Element {
    let services = use_services();
    let (loader, state) = use_loader("student-dashboard", || student_fetches(&services.api));
    let pending = use_pending();
    let mut query = use_signal(String::new);

    let enroll = use_callback({
        let services = services.clone();
        let loader = loader.clone();
        move |course_id: i64| {
            let student_id = state
                .read()
                .data
                .as_ref()
                .and_then(|d| d.profile.as_ref())
                .map(|p| p.student_id);
            let Some(student_id) = student_id else {
                return;
            };
            let services = services.clone();
            let loader = loader.clone();
            spawn(async move {
                let api = services.api.clone();
                services
                    .dispatcher
                    .dispatch(
                        MutationRequest::new(ENROLL, course_id).success("Enrolled successfully"),
                        move || async move { api.enroll_in_course(student_id, course_id).await },
                        &loader,
                    )
                    .await;
            });
        }
    });

    let unenroll = use_callback({
        let services = services.clone();
        let loader = loader.clone();
        move |course_id: i64| {
            let services = services.clone();
            let loader = loader.clone();
            spawn(async move {
                let api = services.api.clone();
                services
                    .dispatcher
                    .dispatch(
                        MutationRequest::new(UNENROLL, course_id)
                            .confirm("Are you sure you want to unenroll from this course?")
                            .success("Unenrolled"),
                        move || async move { api.unenroll_from_course(course_id).await },
                        &loader,
                    )
                    .await;
            });
        }
    });

    let current = state.read().clone();
    if let Some(placeholder) = load_placeholder(&current, "your courses") {
        return placeholder;
    }
    let Some(data) = current.data else {
        return rsx! {};
    };

    let partition = partition_courses(&data.courses, &data.enrollments, &query());
    let scores: Vec<(i64, Option<f64>)> = data
        .enrollments
        .iter()
        .map(|e| (e.course_id, e.evaluation_score))
        .collect();
    let score_for = move |course_id: i64| {
        scores
            .iter()
            .find(|(id, _)| *id == course_id)
            .and_then(|(_, s)| *s)
    };

    rsx! {
        if let Some(profile) = data.profile {
            div { class: "section card",
                div { class: "card-title", "My profile" }
                p { "{profile.email_id}" }
                p { class: "muted",
                    "Age {profile.age} · {profile.skill_level} · {profile.category} · {profile.country}"
                }
            }
        }

        div { class: "section row",
            input {
                placeholder: "Search courses by name",
                value: "{query}",
                oninput: move |e| query.set(e.value()),
            }
        }

        div { class: "section",
            h2 { "My courses ({partition.enrolled.len()})" }
            if partition.enrolled.is_empty() {
                p { class: "empty-state", "You are not enrolled in any course yet." }
            }
            div { class: "grid",
                for course in partition.enrolled {
                    div { key: "{course.course_id}", class: "card",
                        div { class: "card-title",
                            Link { to: Route::CourseDetail { id: course.course_id }, "{course.course_name}" }
                        }
                        p { class: "muted", "{course.program_type} · {course.duration}" }
                        p {
                            "Score: "
                            if let Some(score) = score_for(course.course_id) {
                                ScoreText { score }
                            } else {
                                span { class: "muted", "not graded" }
                            }
                        }
                        button {
                            class: "secondary",
                            disabled: pending.read().contains(&PendingKey::new(UNENROLL, course.course_id)),
                            onclick: move |_| unenroll.call(course.course_id),
                            "Unenroll"
                        }
                    }
                }
            }
        }

        div { class: "section",
            h2 { "Browse courses ({partition.available.len()})" }
            if partition.available.is_empty() {
                p { class: "empty-state", "No courses match." }
            }
            div { class: "grid",
                for course in partition.available {
                    div { key: "{course.course_id}", class: "card",
                        div { class: "card-title",
                            Link { to: Route::CourseDetail { id: course.course_id }, "{course.course_name}" }
                        }
                        p { class: "muted", "{course.program_type} · {course.duration}" }
                        button {
                            disabled: pending.read().contains(&PendingKey::new(ENROLL, course.course_id)),
                            onclick: move |_| enroll.call(course.course_id),
                            "Enroll"
                        }
                    }
                }
            }
        }
    }
}
