use crate::auth::use_services;
use crate::components::{load_placeholder, Bar, DetailBody, Overlay, ScoreText, StatCard};
use crate::hooks::{use_drilldown, use_loader};
use crate::routes::DashboardShell;
use dioxus::prelude::*;
use shared_types::{
    AnalystCourseDetail, AnalystStudentDetail, CourseSummary, EnrollmentsSummary, Role,
    Statistics,
};
use view_state::analytics::{format_score, pass_rate, ScoreBand};
use view_state::{DetailDrilldown, FetchSet};

#[derive(Debug, Clone, Default, PartialEq)]
struct AnalystData {
    stats: Statistics,
    courses: Vec<CourseSummary>,
    enrollments: EnrollmentsSummary,
}

/// The analyst's single overlay shows either record kind; opening one
/// replaces the other.
#[derive(Debug, Clone, PartialEq)]
enum AnalystDetail {
    Course(AnalystCourseDetail),
    Student(AnalystStudentDetail),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Overview,
    Courses,
    Students,
    Performance,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Overview, Tab::Courses, Tab::Students, Tab::Performance];

    fn label(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Courses => "Courses",
            Tab::Students => "Student Insights",
            Tab::Performance => "Performance",
        }
    }
}

#[component]
pub fn AnalystDashboard() -> Element {
    rsx! {
        DashboardShell { role: Role::Analyst, title: "Analyst Dashboard",
            AnalystHome {}
        }
    }
}

#[component]
fn AnalystHome() -> Element {
    let services = use_services();
    let (_, state) = use_loader("analyst-dashboard", || {
        let (a, b, c) = (
            services.api.clone(),
            services.api.clone(),
            services.api.clone(),
        );
        FetchSet::new()
            .slot(
                "statistics",
                move || {
                    let api = a.clone();
                    async move { api.statistics().await }
                },
                |d: &mut AnalystData, v| d.stats = v,
            )
            .slot(
                "courses",
                move || {
                    let api = b.clone();
                    async move { api.courses_summary().await }
                },
                |d: &mut AnalystData, v| d.courses = v,
            )
            .slot(
                "enrollments",
                move || {
                    let api = c.clone();
                    async move { api.enrollments_summary().await }
                },
                |d: &mut AnalystData, v| d.enrollments = v,
            )
    });
    let (drill, detail) = use_drilldown::<AnalystDetail>("analyst-detail");
    let mut tab = use_signal(|| Tab::Overview);

    let open_course = use_callback({
        let api = services.api.clone();
        let drill = drill.clone();
        move |course_id: i64| {
            let api = api.clone();
            let drill = drill.clone();
            spawn(async move {
                drill
                    .open(async move {
                        api.analyst_course_detail(course_id)
                            .await
                            .map(AnalystDetail::Course)
                    })
                    .await;
            });
        }
    });

    let open_student = use_callback({
        let api = services.api.clone();
        let drill = drill.clone();
        move |student_id: i64| {
            let api = api.clone();
            let drill = drill.clone();
            spawn(async move {
                drill
                    .open(async move {
                        api.analyst_student_detail(student_id)
                            .await
                            .map(AnalystDetail::Student)
                    })
                    .await;
            });
        }
    });

    let current = state.read().clone();
    if let Some(placeholder) = load_placeholder(&current, "analytics") {
        return placeholder;
    }
    let data = current.data.unwrap_or_default();
    let stats = data.stats.clone();
    let overall_pass_rate = pass_rate(stats.pass_count, stats.total_enrollments);
    let avg_band = ScoreBand::of(stats.average_evaluation_score);
    let overlay = detail.read().clone();

    rsx! {
        div { class: "stat-row",
            StatCard { label: "Students", value: "{stats.total_students}" }
            StatCard { label: "Courses", value: "{stats.total_courses}" }
            StatCard { label: "Enrollments", value: "{stats.total_enrollments}" }
            StatCard {
                label: "Avg score / pass rate",
                value: "{format_score(stats.average_evaluation_score)} / {overall_pass_rate}%",
                class: avg_band.css_class().to_string(),
            }
        }
        p { class: "muted section",
            "{stats.pass_count} passed · {stats.fail_count} failed (40 or more is a pass)"
        }

        div { class: "tabs",
            for t in Tab::ALL {
                button {
                    key: "{t.label()}",
                    class: if tab() == t { "tab active" } else { "tab" },
                    onclick: move |_| tab.set(t),
                    "{t.label()}"
                }
            }
        }

        {match tab() {
            Tab::Overview => rsx! { OverviewTab { stats: stats.clone(), enrollments: data.enrollments.clone() } },
            Tab::Courses => rsx! {
                div { class: "grid",
                    for c in data.courses.clone() {
                        div {
                            key: "{c.course_id}",
                            class: "card clickable",
                            onclick: move |_| open_course.call(c.course_id),
                            div { class: "card-title", "{c.course_name}" }
                            p { class: "muted", "{c.program_type} · {c.duration}" }
                            p { "{c.enrollment_count} enrolled · avg " ScoreText { score: c.average_score } }
                            p { class: "muted", "Pass rate {pass_rate(c.pass_count, c.enrollment_count)}%" }
                        }
                    }
                }
            },
            Tab::Students => rsx! { StudentsTab { stats: stats.clone() } },
            Tab::Performance => rsx! {
                PerformanceTab {
                    courses: data.courses.clone(),
                    enrollments: data.enrollments.clone(),
                    on_open: move |id| open_course.call(id),
                }
            },
        }}

        if overlay.visible {
            DetailOverlay {
                status: overlay.status(),
                entity: overlay.entity().cloned(),
                drill: DrillHandle(drill.clone()),
                on_course: move |id| open_course.call(id),
                on_student: move |id| open_student.call(id),
            }
        }
    }
}

#[component]
fn OverviewTab(stats: Statistics, enrollments: EnrollmentsSummary) -> Element {
    let max_bucket = stats.score_distribution.iter().map(|b| b.count).max().unwrap_or(0);
    let max_top = enrollments
        .top_5_courses_by_enrollment
        .iter()
        .map(|c| c.enrollment_count)
        .max()
        .unwrap_or(0);
    let max_uni = stats
        .courses_per_university
        .iter()
        .map(|u| u.course_count)
        .max()
        .unwrap_or(0);

    rsx! {
        div { class: "grid",
            div { class: "card",
                div { class: "card-title", "Score distribution" }
                for b in stats.score_distribution {
                    Bar { key: "{b.range}", label: b.range.clone(), value: b.count, max: max_bucket }
                }
            }
            div { class: "card",
                div { class: "card-title", "Most popular courses" }
                for c in enrollments.top_5_courses_by_enrollment {
                    Bar { key: "{c.course_name}", label: c.course_name.clone(), value: c.enrollment_count, max: max_top }
                }
            }
            div { class: "card",
                div { class: "card-title", "Courses per university" }
                for u in stats.courses_per_university {
                    Bar { key: "{u.university}", label: u.university.clone(), value: u.course_count, max: max_uni }
                }
            }
            div { class: "card",
                div { class: "card-title", "Average score by program type" }
                for p in stats.avg_score_per_program_type {
                    div { key: "{p.program_type}", class: "bar",
                        span { class: "bar-label", "{p.program_type}" }
                        ScoreText { score: p.avg_score }
                    }
                }
            }
        }
    }
}

#[component]
fn StudentsTab(stats: Statistics) -> Element {
    let max_country = stats.students_per_country.iter().map(|c| c.student_count).max().unwrap_or(0);
    let max_skill = stats.students_per_skill_level.iter().map(|s| s.count).max().unwrap_or(0);
    let max_category = stats.students_per_category.iter().map(|c| c.count).max().unwrap_or(0);
    let max_program = stats.courses_per_program_type.iter().map(|p| p.count).max().unwrap_or(0);

    rsx! {
        div { class: "grid",
            div { class: "card",
                div { class: "card-title", "Students by country" }
                for c in stats.students_per_country {
                    Bar { key: "{c.country}", label: c.country.clone(), value: c.student_count, max: max_country }
                }
            }
            div { class: "card",
                div { class: "card-title", "Students by skill level" }
                for s in stats.students_per_skill_level {
                    Bar { key: "{s.skill_level}", label: s.skill_level.clone(), value: s.count, max: max_skill }
                }
            }
            div { class: "card",
                div { class: "card-title", "Students by category" }
                for c in stats.students_per_category {
                    Bar { key: "{c.category}", label: c.category.clone(), value: c.count, max: max_category }
                }
            }
            div { class: "card",
                div { class: "card-title", "Courses by program type" }
                for p in stats.courses_per_program_type {
                    Bar { key: "{p.program_type}", label: p.program_type.clone(), value: p.count, max: max_program }
                }
            }
        }
    }
}

#[component]
fn PerformanceTab(
    courses: Vec<CourseSummary>,
    enrollments: EnrollmentsSummary,
    on_open: EventHandler<i64>,
) -> Element {
    let spread = enrollments.max_score - enrollments.min_score;

    rsx! {
        div { class: "stat-row",
            StatCard {
                label: "Average",
                value: format_score(enrollments.average_score),
                class: ScoreBand::of(enrollments.average_score).css_class().to_string(),
            }
            StatCard { label: "Highest", value: format_score(enrollments.max_score), class: "score-high".to_string() }
            StatCard { label: "Lowest", value: format_score(enrollments.min_score), class: "score-low".to_string() }
            StatCard { label: "Spread", value: format_score(spread) }
        }
        div { class: "card",
            div { class: "card-title", "Course details" }
            table {
                thead {
                    tr {
                        th { "Course" }
                        th { "Enrolled" }
                        th { "Avg" }
                        th { "Max" }
                        th { "Min" }
                        th { "Pass rate" }
                        th { "Content" }
                    }
                }
                tbody {
                    for c in courses {
                        tr {
                            key: "{c.course_id}",
                            class: "clickable",
                            onclick: move |_| on_open.call(c.course_id),
                            td { "{c.course_name}" }
                            td { "{c.enrollment_count}" }
                            td { ScoreText { score: c.average_score } }
                            td { "{format_score(c.max_score)}" }
                            td { "{format_score(c.min_score)}" }
                            td { "{pass_rate(c.pass_count, c.enrollment_count)}%" }
                            td { "{c.content_count}" }
                        }
                    }
                }
            }
        }
    }
}

#[derive(Clone)]
struct DrillHandle(DetailDrilldown<AnalystDetail>);

impl PartialEq for DrillHandle {
    fn eq(&self, _: &Self) -> bool {
        // One drilldown per dashboard instance.
        true
    }
}

#[component]
fn DetailOverlay(
    status: Option<view_state::DetailStatus>,
    entity: Option<AnalystDetail>,
    drill: DrillHandle,
    on_course: EventHandler<i64>,
    on_student: EventHandler<i64>,
) -> Element {
    let title = match &entity {
        Some(AnalystDetail::Course(c)) => c.course_name.clone(),
        Some(AnalystDetail::Student(s)) => format!("Student #{}", s.student_id),
        None => "Details".to_string(),
    };
    rsx! {
        Overlay { title, on_close: move |_| drill.0.close(),
            DetailBody { status, not_found: "Record not found.",
                {match entity {
                    Some(AnalystDetail::Course(course)) => rsx! { CourseDetailView { course, on_student } },
                    Some(AnalystDetail::Student(student)) => rsx! { StudentDetailView { student, on_course } },
                    None => rsx! {},
                }}
            }
        }
    }
}

#[component]
fn CourseDetailView(course: AnalystCourseDetail, on_student: EventHandler<i64>) -> Element {
    let topics = course.topics.join(", ");
    let textbooks = course.textbooks.clone();
    let content_by_type = course.content_by_type.clone();
    let enrolled = course.enrolled_students.clone();

    rsx! {
        p { class: "muted",
            "{course.program_type} · {course.duration}"
            if let Some(uni) = course.university_name.clone() { " · {uni}" }
        }
        if let Some(name) = course.instructor_name.clone() {
            p {
                "Instructor: {name}"
                if let Some(exp) = course.instructor_expertise.clone() { span { class: "muted", " ({exp})" } }
            }
        }
        div { class: "stat-row",
            StatCard { label: "Enrolled", value: "{course.enrollment_count}" }
            StatCard {
                label: "Average",
                value: format_score(course.average_score),
                class: ScoreBand::of(course.average_score).css_class().to_string(),
            }
            StatCard { label: "Pass rate", value: "{pass_rate(course.pass_count, course.enrollment_count)}%" }
        }
        if !topics.is_empty() {
            p { class: "muted", "Topics: {topics}" }
        }
        if !textbooks.is_empty() {
            h4 { "Textbooks" }
            ul {
                for tb in textbooks {
                    li { key: "{tb.title}", "{tb.title} by {tb.author}" }
                }
            }
        }
        if !content_by_type.is_empty() {
            p { class: "muted",
                for ct in content_by_type {
                    span { key: "{ct.content_type}", "{ct.content_type}: {ct.count}  " }
                }
            }
        }
        h4 { "Enrolled students ({enrolled.len()})" }
        if enrolled.is_empty() {
            p { class: "empty-state", "No students enrolled." }
        }
        for s in enrolled.clone() {
            div {
                key: "{s.student_id}",
                class: "card clickable",
                onclick: move |_| on_student.call(s.student_id),
                div { class: "row",
                    span { "#{s.student_id} {s.email}" }
                    span { class: "muted", "{s.country} · {s.skill_level}" }
                    ScoreText { score: s.evaluation_score }
                }
            }
        }
    }
}

#[component]
fn StudentDetailView(student: AnalystStudentDetail, on_course: EventHandler<i64>) -> Element {
    rsx! {
        p { "{student.email}" }
        p { class: "muted",
            "Age {student.age} · {student.country} · {student.skill_level} · {student.category}"
        }
        div { class: "stat-row",
            StatCard { label: "Courses", value: "{student.total_courses_enrolled}" }
            StatCard {
                label: "Average",
                value: format_score(student.average_score),
                class: ScoreBand::of(student.average_score).css_class().to_string(),
            }
            StatCard { label: "Passed", value: "{student.pass_count}" }
            StatCard {
                label: "Pass rate",
                value: "{pass_rate(student.pass_count, student.total_courses_enrolled)}%",
            }
        }
        h4 { "Enrollments" }
        for e in student.enrollments.clone() {
            div {
                key: "{e.course_id}",
                class: "card clickable",
                onclick: move |_| on_course.call(e.course_id),
                div { class: "row",
                    span { "{e.course_name}" }
                    span { class: "muted", "{e.program_type} · {e.duration}" }
                    ScoreText { score: e.evaluation_score }
                }
            }
        }
    }
}
