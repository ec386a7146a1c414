use crate::auth::{use_auth, use_services};
use crate::components::{load_placeholder, DetailBody, Overlay, ScoreText};
use crate::hooks::{use_drilldown, use_loader, use_pending, LoaderHandle};
use crate::role_gate::RoleGate;
use crate::routes::student::{ENROLL, UNENROLL};
use crate::routes::ShellHeader;
use api_client::ApiClient;
use dioxus::prelude::*;
use shared_types::{
    AppError, ContentItem, Course, CourseStudent, Enrollment, Role, StudentDetail,
    StudentProfile, Textbook, CONTENT_TYPES,
};
use view_state::catalog::is_enrolled;
use view_state::content::{content_label, youtube_embed_url, ContentPlayer};
use view_state::grading::parse_score;
use view_state::{DetailDrilldown, DispatchOutcome, FetchSet, MutationRequest, PendingKey};

const ADD_CONTENT: &str = "add-content";
const DELETE_CONTENT: &str = "delete-content";
const GRADE: &str = "grade";

#[derive(Debug, Clone, Default, PartialEq)]
struct CourseData {
    course: Option<Course>,
    content: Vec<ContentItem>,
    textbooks: Vec<Textbook>,
    // Instructor only.
    roster: Vec<CourseStudent>,
    // Student only.
    enrollments: Vec<Enrollment>,
    profile: Option<StudentProfile>,
}

/// Side lists degrade to empty instead of failing the whole page.
fn or_empty<T: Default>(slot: &'static str, result: Result<T, AppError>) -> Result<T, AppError> {
    Ok(result.unwrap_or_else(|err| {
        tracing::warn!(slot, error = %err, "course side list unavailable");
        T::default()
    }))
}

fn course_fetches(api: &ApiClient, course_id: i64, role: Role) -> FetchSet<CourseData> {
    let (a, b, c) = (api.clone(), api.clone(), api.clone());
    let set = FetchSet::new()
        .slot(
            "course",
            move || {
                let api = a.clone();
                async move {
                    let courses = api.public_courses().await?;
                    Ok(courses.into_iter().find(|c| c.course_id == course_id))
                }
            },
            |d: &mut CourseData, v| d.course = v,
        )
        .slot(
            "content",
            move || {
                let api = b.clone();
                async move { or_empty("content", api.course_content(course_id).await) }
            },
            |d: &mut CourseData, v| d.content = v,
        )
        .slot(
            "textbooks",
            move || {
                let api = c.clone();
                async move { or_empty("textbooks", api.course_textbooks(course_id).await) }
            },
            |d: &mut CourseData, v| d.textbooks = v,
        );

    if role == Role::Instructor {
        let api = api.clone();
        return set.slot(
            "roster",
            move || {
                let api = api.clone();
                async move { api.course_students(course_id).await }
            },
            |d: &mut CourseData, v| d.roster = v,
        );
    }

    let (d, e) = (api.clone(), api.clone());
    set.slot(
        "enrollments",
        move || {
            let api = d.clone();
            async move { api.my_enrolled_courses().await }
        },
        |data: &mut CourseData, v| data.enrollments = v,
    )
    .slot(
        "profile",
        move || {
            let api = e.clone();
            async move { api.student_profile().await }
        },
        |data: &mut CourseData, p| data.profile = Some(p),
    )
}

/// Course page, open to students and instructors. The gate follows the
/// signed-in role; anyone else is sent to the student login.
#[component]
pub fn CourseDetail(id: i64) -> Element {
    let auth = use_auth();
    let role = match auth.role() {
        Some(Role::Instructor) => Role::Instructor,
        _ => Role::Student,
    };

    rsx! {
        ShellHeader { title: "Course" }
        RoleGate { required: role,
            div { class: "shell-body",
                CourseHome { key: "{id}-{role.as_str()}", id, role }
            }
        }
    }
}

#[component]
fn CourseHome(id: i64, role: Role) -> Element {
    let services = use_services();
    let (loader, state) = use_loader("course-page", || course_fetches(&services.api, id, role));
    let pending = use_pending();
    let mut player = use_signal(ContentPlayer::default);

    use_effect(move || {
        if let Some(data) = state.read().ready() {
            player.write().load(&data.content);
        }
    });

    let enroll = use_callback({
        let services = services.clone();
        let loader = loader.clone();
        move |_: ()| {
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
                        MutationRequest::new(ENROLL, id).success("Enrolled successfully"),
                        move || async move { api.enroll_in_course(student_id, id).await },
                        &loader,
                    )
                    .await;
            });
        }
    });

    let unenroll = use_callback({
        let services = services.clone();
        let loader = loader.clone();
        move |_: ()| {
            let services = services.clone();
            let loader = loader.clone();
            spawn(async move {
                let api = services.api.clone();
                services
                    .dispatcher
                    .dispatch(
                        MutationRequest::new(UNENROLL, id)
                            .confirm("Are you sure you want to unenroll from this course?")
                            .success("Unenrolled"),
                        move || async move { api.unenroll_from_course(id).await },
                        &loader,
                    )
                    .await;
            });
        }
    });

    let delete_content = use_callback({
        let services = services.clone();
        let loader = loader.clone();
        move |content_id: i64| {
            let services = services.clone();
            let loader = loader.clone();
            spawn(async move {
                let api = services.api.clone();
                services
                    .dispatcher
                    .dispatch(
                        MutationRequest::new(DELETE_CONTENT, content_id)
                            .confirm("Delete this content item?")
                            .success("Content deleted"),
                        move || async move { api.delete_course_content(id, content_id).await },
                        &loader,
                    )
                    .await;
            });
        }
    });

    let current = state.read().clone();
    if let Some(placeholder) = load_placeholder(&current, "course") {
        return placeholder;
    }
    let data = current.data.unwrap_or_default();
    let Some(course) = data.course.clone() else {
        return rsx! { p { class: "empty-state", "Course not found." } };
    };

    let videos: Vec<ContentItem> = data.content.iter().filter(|c| c.is_video()).cloned().collect();
    let materials: Vec<ContentItem> = data.content.iter().filter(|c| !c.is_video()).cloned().collect();
    let active = player.read().active_item(&data.content).cloned();
    let active_id = player.read().active();
    let enrolled = is_enrolled(&data.enrollments, id);
    let is_instructor = role == Role::Instructor;

    rsx! {
        div { class: "section card",
            div { class: "card-title", "{course.course_name}" }
            p { class: "muted", "{course.program_type} · {course.duration}" }
            if role == Role::Student {
                if enrolled {
                    button {
                        class: "secondary",
                        disabled: pending.read().contains(&PendingKey::new(UNENROLL, id)),
                        onclick: move |_| unenroll.call(()),
                        "Unenroll"
                    }
                } else {
                    button {
                        disabled: pending.read().contains(&PendingKey::new(ENROLL, id)),
                        onclick: move |_| enroll.call(()),
                        "Enroll"
                    }
                }
            }
        }

        div { class: "section",
            h2 { "Videos" }
            if videos.is_empty() {
                p { class: "empty-state", "No videos for this course yet." }
            }
            if let Some(item) = active {
                div { class: "player",
                    if let Some(embed) = youtube_embed_url(&item.content_url) {
                        iframe {
                            src: "{embed}",
                            width: "100%",
                            height: "360",
                            allowfullscreen: true,
                        }
                    } else {
                        a { href: "{item.content_url}", target: "_blank", "Open video" }
                    }
                }
            }
            ul { class: "video-list",
                for (n, video) in videos.into_iter().enumerate() {
                    li {
                        key: "{video.content_id}",
                        class: if active_id == Some(video.content_id) { "active" } else { "" },
                        onclick: move |_| player.write().select(video.content_id),
                        "Video {n + 1}"
                        if is_instructor {
                            button {
                                class: "danger",
                                disabled: pending.read().contains(&PendingKey::new(DELETE_CONTENT, video.content_id)),
                                onclick: move |evt| {
                                    evt.stop_propagation();
                                    delete_content.call(video.content_id);
                                },
                                "Delete"
                            }
                        }
                    }
                }
            }
        }

        div { class: "section",
            h2 { "Materials" }
            if materials.is_empty() {
                p { class: "empty-state", "No other materials." }
            }
            for item in materials {
                div { key: "{item.content_id}", class: "row",
                    span { class: "muted", "{content_label(&item.content_type)}" }
                    a { href: "{item.content_url}", target: "_blank", "{item.content_url}" }
                    if is_instructor {
                        button {
                            class: "danger",
                            disabled: pending.read().contains(&PendingKey::new(DELETE_CONTENT, item.content_id)),
                            onclick: move |_| delete_content.call(item.content_id),
                            "Delete"
                        }
                    }
                }
            }
            if is_instructor {
                AddContentForm { course_id: id, loader: LoaderHandle(loader.clone()) }
            }
        }

        div { class: "section",
            h2 { "Textbooks" }
            if data.textbooks.is_empty() {
                p { class: "empty-state", "No textbooks listed." }
            }
            ul {
                for tb in data.textbooks.clone() {
                    li { key: "{tb.textbook_id}",
                        if let Some(link) = tb.link.clone() {
                            a { href: "{link}", target: "_blank", "{tb.title}" }
                        } else {
                            "{tb.title}"
                        }
                        span { class: "muted", " by {tb.author}" }
                    }
                }
            }
        }

        if is_instructor {
            Roster {
                course_id: id,
                students: data.roster.clone(),
                loader: LoaderHandle(loader.clone()),
            }
        }
    }
}

#[component]
fn AddContentForm(course_id: i64, loader: LoaderHandle<CourseData>) -> Element {
    let services = use_services();
    let mut content_type = use_signal(|| CONTENT_TYPES[0].to_string());
    let mut url = use_signal(String::new);
    let pending = use_pending();

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let kind = content_type();
        let link = url().trim().to_string();
        let services = services.clone();
        let loader = loader.clone();
        spawn(async move {
            let api = services.api.clone();
            let outcome = services
                .dispatcher
                .dispatch(
                    MutationRequest::new(ADD_CONTENT, course_id).success("Content added"),
                    move || async move { api.add_course_content(course_id, &kind, &link).await },
                    &loader.0,
                )
                .await;
            if outcome == DispatchOutcome::Succeeded {
                url.set(String::new());
            }
        });
    };

    rsx! {
        form { class: "row section", onsubmit: handle_submit,
            select {
                value: "{content_type}",
                onchange: move |e| content_type.set(e.value()),
                for t in CONTENT_TYPES {
                    option { value: *t, "{content_label(t)}" }
                }
            }
            input {
                r#type: "url",
                placeholder: "Content URL",
                required: true,
                value: "{url}",
                oninput: move |e| url.set(e.value()),
            }
            button {
                r#type: "submit",
                disabled: pending.read().contains(&PendingKey::new(ADD_CONTENT, course_id)),
                "Add content"
            }
        }
    }
}

#[component]
fn Roster(course_id: i64, students: Vec<CourseStudent>, loader: LoaderHandle<CourseData>) -> Element {
    let services = use_services();
    let (drill, profile) = use_drilldown::<StudentDetail>("student-profile");

    let open_profile = use_callback({
        let api = services.api.clone();
        let drill = drill.clone();
        move |student_id: i64| {
            let api = api.clone();
            let drill = drill.clone();
            spawn(async move {
                drill
                    .open(async move { api.instructor_student_profile(student_id).await })
                    .await;
            });
        }
    });

    let overlay = profile.read().clone();

    rsx! {
        div { class: "section",
            h2 { "Students ({students.len()})" }
            if students.is_empty() {
                p { class: "empty-state", "No students enrolled." }
            }
            for student in students.clone() {
                GradeRow {
                    key: "{student.student_id}",
                    course_id,
                    student: student.clone(),
                    loader: loader.clone(),
                    on_profile: move |sid| open_profile.call(sid),
                }
            }
        }

        if overlay.visible {
            ProfileOverlay {
                status: overlay.status(),
                entity: overlay.entity().cloned(),
                drill: ProfileDrill(drill.clone()),
            }
        }
    }
}

#[component]
fn GradeRow(
    course_id: i64,
    student: CourseStudent,
    loader: LoaderHandle<CourseData>,
    on_profile: EventHandler<i64>,
) -> Element {
    let services = use_services();
    let pending = use_pending();
    let mut score = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let student_id = student.student_id;

    let submit = move |_: MouseEvent| {
        error.set(None);
        let value = match parse_score(&score()) {
            Ok(value) => value,
            Err(err) => {
                error.set(Some(err.message));
                return;
            }
        };
        let services = services.clone();
        let loader = loader.clone();
        spawn(async move {
            let api = services.api.clone();
            let outcome = services
                .dispatcher
                .dispatch(
                    MutationRequest::new(GRADE, student_id).success("Grade saved"),
                    move || async move { api.grade_student(course_id, student_id, value).await },
                    &loader.0,
                )
                .await;
            if outcome == DispatchOutcome::Succeeded {
                score.set(String::new());
            }
        });
    };

    let label = student
        .student_name
        .clone()
        .or_else(|| student.student_email.clone())
        .unwrap_or_else(|| format!("Student #{student_id}"));

    rsx! {
        div { class: "card row",
            a { class: "clickable", onclick: move |_| on_profile.call(student_id), "{label}" }
            span {
                "Score: "
                if let Some(current) = student.evaluation_score {
                    ScoreText { score: current }
                } else {
                    span { class: "muted", "not graded" }
                }
            }
            input {
                r#type: "number",
                min: "0",
                max: "100",
                placeholder: "0-100",
                value: "{score}",
                oninput: move |e| score.set(e.value()),
            }
            button {
                disabled: pending.read().contains(&PendingKey::new(GRADE, student_id)),
                onclick: submit,
                "Save grade"
            }
            if let Some(err) = error() {
                span { class: "auth-error", "{err}" }
            }
        }
    }
}

#[derive(Clone)]
struct ProfileDrill(DetailDrilldown<StudentDetail>);

impl PartialEq for ProfileDrill {
    fn eq(&self, _: &Self) -> bool {
        // One drilldown per roster instance.
        true
    }
}

#[component]
fn ProfileOverlay(
    status: Option<view_state::DetailStatus>,
    entity: Option<StudentDetail>,
    drill: ProfileDrill,
) -> Element {
    let title = entity
        .as_ref()
        .map(|s| format!("Student #{}", s.student_id))
        .unwrap_or_else(|| "Student".to_string());

    rsx! {
        Overlay { title, on_close: move |_| drill.0.close(),
            DetailBody { status, not_found: "Student not found.",
                if let Some(student) = entity {
                    if let Some(email) = student.email_id.clone() {
                        p { "{email}" }
                    }
                    p { class: "muted",
                        "Age {student.age} · {student.skill_level} · {student.category} · {student.country}"
                    }
                    h4 { "Courses" }
                    for e in student.enrollments.clone() {
                        div { key: "{e.course_id}", class: "row",
                            if let Some(name) = e.course_name.clone() {
                                span { "{name}" }
                            } else {
                                span { "Course #{e.course_id}" }
                            }
                            if let Some(s) = e.evaluation_score {
                                ScoreText { score: s }
                            } else {
                                span { class: "muted", "not graded" }
                            }
                        }
                    }
                }
            }
        }
    }
}
