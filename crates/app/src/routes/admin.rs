use crate::auth::use_services;
use crate::components::{load_placeholder, StatCard};
use crate::hooks::{use_loader, use_pending, LoaderHandle};
use crate::routes::DashboardShell;
use api_client::ApiClient;
use dioxus::prelude::*;
use shared_types::{
    AdminInstructor, AdminStudent, Course, CreateCourseRequest, CreateInstructorRequest, Role,
    PROGRAM_TYPES,
};
use view_state::{DispatchOutcome, FetchSet, MutationRequest, PendingKey};

pub const DELETE_COURSE: &str = "delete-course";
pub const DELETE_STUDENT: &str = "delete-student";
const CREATE_COURSE: &str = "create-course";
const CREATE_INSTRUCTOR: &str = "create-instructor";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminData {
    pub instructors: Vec<AdminInstructor>,
    pub students: Vec<AdminStudent>,
    pub courses: Vec<Course>,
}

pub fn admin_fetches(api: &ApiClient) -> FetchSet<AdminData> {
    let (a, b, c) = (api.clone(), api.clone(), api.clone());
    FetchSet::new()
        .slot(
            "instructors",
            move || {
                let api = a.clone();
                async move { api.admin_instructors().await }
            },
            |d: &mut AdminData, v| d.instructors = v,
        )
        .slot(
            "students",
            move || {
                let api = b.clone();
                async move { api.admin_students().await }
            },
            |d: &mut AdminData, v| d.students = v,
        )
        .slot(
            "courses",
            move || {
                let api = c.clone();
                async move { api.public_courses().await }
            },
            |d: &mut AdminData, v| d.courses = v,
        )
}

#[component]
pub fn AdminDashboard() -> Element {
    rsx! {
        DashboardShell { role: Role::Admin, title: "Admin Dashboard",
            AdminHome {}
        }
    }
}

#[component]
fn AdminHome() -> Element {
    let services = use_services();
    let (loader, state) = use_loader("admin-dashboard", || admin_fetches(&services.api));
    let pending = use_pending();

    let delete_course = use_callback({
        let services = services.clone();
        let loader = loader.clone();
        move |course_id: i64| {
            let name = state
                .read()
                .data
                .as_ref()
                .and_then(|d| d.courses.iter().find(|c| c.course_id == course_id))
                .map(|c| c.course_name.clone())
                .unwrap_or_else(|| format!("#{course_id}"));
            let services = services.clone();
            let loader = loader.clone();
            spawn(async move {
                let api = services.api.clone();
                services
                    .dispatcher
                    .dispatch(
                        MutationRequest::new(DELETE_COURSE, course_id)
                            .confirm(format!("Delete course \"{name}\"?"))
                            .success("Course deleted"),
                        move || async move { api.admin_delete_course(course_id).await },
                        &loader,
                    )
                    .await;
            });
        }
    });

    let delete_student = use_callback({
        let services = services.clone();
        let loader = loader.clone();
        move |student_id: i64| {
            let services = services.clone();
            let loader = loader.clone();
            spawn(async move {
                let api = services.api.clone();
                services
                    .dispatcher
                    .dispatch(
                        MutationRequest::new(DELETE_STUDENT, student_id)
                            .confirm(format!("Remove student #{student_id}?"))
                            .success("Student removed"),
                        move || async move { api.admin_delete_student(student_id).await },
                        &loader,
                    )
                    .await;
            });
        }
    });

    let current = state.read().clone();
    if let Some(placeholder) = load_placeholder(&current, "admin data") {
        return placeholder;
    }
    let data = current.data.unwrap_or_default();
    let instructor_options = data.instructors.clone();

    rsx! {
        div { class: "stat-row",
            StatCard { label: "Instructors", value: "{data.instructors.len()}" }
            StatCard { label: "Courses", value: "{data.courses.len()}" }
            StatCard { label: "Students", value: "{data.students.len()}" }
        }

        div { class: "section",
            h2 { "Instructors" }
            CreateInstructorForm { loader: LoaderHandle(loader.clone()) }
            div { class: "grid",
                for instructor in data.instructors {
                    div { key: "{instructor.instructor_id}", class: "card",
                        div { class: "card-title", "{instructor.name}" }
                        p { class: "muted", "#{instructor.instructor_id} · {instructor.expertise}" }
                    }
                }
            }
        }

        div { class: "section",
            h2 { "Courses" }
            CreateCourseForm { loader: LoaderHandle(loader.clone()), instructors: instructor_options }
            if data.courses.is_empty() {
                p { class: "empty-state", "No courses yet." }
            }
            div { class: "grid",
                for course in data.courses {
                    div { key: "{course.course_id}", class: "card",
                        div { class: "card-title", "{course.course_name}" }
                        p { class: "muted",
                            "{course.program_type} · {course.duration} · instructor #{course.instructor_id}"
                        }
                        button {
                            class: "danger",
                            disabled: pending.read().contains(&PendingKey::new(DELETE_COURSE, course.course_id)),
                            onclick: move |_| delete_course.call(course.course_id),
                            "Delete"
                        }
                    }
                }
            }
        }

        div { class: "section",
            h2 { "Students" }
            if data.students.is_empty() {
                p { class: "empty-state", "No students registered." }
            }
            div { class: "grid",
                for student in data.students {
                    div { key: "{student.student_id}", class: "card",
                        div { class: "card-title", "Student #{student.student_id}" }
                        p { class: "muted",
                            "{student.age} · {student.skill_level} · {student.category} · {student.country}"
                        }
                        button {
                            class: "danger",
                            disabled: pending.read().contains(&PendingKey::new(DELETE_STUDENT, student.student_id)),
                            onclick: move |_| delete_student.call(student.student_id),
                            "Remove"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn CreateInstructorForm(loader: LoaderHandle<AdminData>) -> Element {
    let services = use_services();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut name = use_signal(String::new);
    let mut expertise = use_signal(String::new);
    let pending = use_pending();

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let request = CreateInstructorRequest {
            email_id: email().trim().to_string(),
            password: password(),
            name: name().trim().to_string(),
            expertise: expertise().trim().to_string(),
        };
        let services = services.clone();
        let loader = loader.clone();
        spawn(async move {
            let api = services.api.clone();
            let outcome = services
                .dispatcher
                .dispatch(
                    MutationRequest::new(CREATE_INSTRUCTOR, 0).success("Instructor created"),
                    move || async move { api.admin_create_instructor(&request).await },
                    &loader.0,
                )
                .await;
            if outcome == DispatchOutcome::Succeeded {
                email.set(String::new());
                password.set(String::new());
                name.set(String::new());
                expertise.set(String::new());
            }
        });
    };

    rsx! {
        form { class: "row section", onsubmit: handle_submit,
            input { r#type: "email", placeholder: "Email", required: true, value: "{email}", oninput: move |e| email.set(e.value()) }
            input { r#type: "password", placeholder: "Password", required: true, value: "{password}", oninput: move |e| password.set(e.value()) }
            input { placeholder: "Name", required: true, value: "{name}", oninput: move |e| name.set(e.value()) }
            input { placeholder: "Expertise", required: true, value: "{expertise}", oninput: move |e| expertise.set(e.value()) }
            button {
                r#type: "submit",
                disabled: pending.read().contains(&PendingKey::new(CREATE_INSTRUCTOR, 0)),
                "Add instructor"
            }
        }
    }
}

#[component]
fn CreateCourseForm(loader: LoaderHandle<AdminData>, instructors: Vec<AdminInstructor>) -> Element {
    let services = use_services();
    let mut course_name = use_signal(String::new);
    let mut duration = use_signal(String::new);
    let mut program_type = use_signal(|| PROGRAM_TYPES[0].to_string());
    let mut instructor_id = use_signal(String::new);
    let mut university_id = use_signal(|| "1".to_string());
    let mut form_error = use_signal(|| Option::<String>::None);
    let pending = use_pending();

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        form_error.set(None);
        let (Ok(instructor), Ok(university)) = (
            instructor_id().parse::<i64>(),
            university_id().trim().parse::<i64>(),
        ) else {
            form_error.set(Some("Choose an instructor and a university id".to_string()));
            return;
        };
        let request = CreateCourseRequest {
            course_name: course_name().trim().to_string(),
            duration: duration().trim().to_string(),
            program_type: program_type(),
            instructor_id: instructor,
            university_id: university,
        };
        let services = services.clone();
        let loader = loader.clone();
        spawn(async move {
            let api = services.api.clone();
            let outcome = services
                .dispatcher
                .dispatch(
                    MutationRequest::new(CREATE_COURSE, 0).success("Course created"),
                    move || async move { api.admin_create_course(&request).await },
                    &loader.0,
                )
                .await;
            if outcome == DispatchOutcome::Succeeded {
                course_name.set(String::new());
                duration.set(String::new());
            }
        });
    };

    rsx! {
        form { class: "row section", onsubmit: handle_submit,
            input { placeholder: "Course name", required: true, value: "{course_name}", oninput: move |e| course_name.set(e.value()) }
            input { placeholder: "Duration (e.g. 8 weeks)", required: true, value: "{duration}", oninput: move |e| duration.set(e.value()) }
            select {
                value: "{program_type}",
                onchange: move |e| program_type.set(e.value()),
                for p in PROGRAM_TYPES {
                    option { value: *p, "{p}" }
                }
            }
            select {
                value: "{instructor_id}",
                onchange: move |e| instructor_id.set(e.value()),
                option { value: "", "Instructor..." }
                for i in instructors {
                    option { key: "{i.instructor_id}", value: "{i.instructor_id}", "{i.name}" }
                }
            }
            input {
                r#type: "number",
                placeholder: "University id",
                value: "{university_id}",
                oninput: move |e| university_id.set(e.value()),
            }
            button {
                r#type: "submit",
                disabled: pending.read().contains(&PendingKey::new(CREATE_COURSE, 0)),
                "Add course"
            }
            if let Some(err) = form_error() {
                span { class: "auth-error", "{err}" }
            }
        }
    }
}
