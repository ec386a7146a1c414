use api_client::ApiClient;
use pretty_assertions::assert_eq;
use shared_types::{Course, Enrollment, Role, StudentProfile};
use view_state::catalog::partition_courses;
use view_state::{DispatchOutcome, FetchSet, LoadStatus, MutationRequest, Notice, ResourceLoader};

use crate::common;

#[derive(Debug, Clone, Default, PartialEq)]
struct StudentView {
    profile: Option<StudentProfile>,
    courses: Vec<Course>,
    enrollments: Vec<Enrollment>,
}

fn student_view(api: &ApiClient) -> FetchSet<StudentView> {
    let (a, b, c) = (api.clone(), api.clone(), api.clone());
    FetchSet::new()
        .slot(
            "profile",
            move || {
                let api = a.clone();
                async move { api.student_profile().await }
            },
            |v: &mut StudentView, p| v.profile = Some(p),
        )
        .slot(
            "courses",
            move || {
                let api = b.clone();
                async move { api.browse_courses().await }
            },
            |v: &mut StudentView, c| v.courses = c,
        )
        .slot(
            "enrollments",
            move || {
                let api = c.clone();
                async move { api.my_enrolled_courses().await }
            },
            |v: &mut StudentView, e| v.enrollments = e,
        )
}

fn ids(courses: &[Course]) -> Vec<i64> {
    courses.iter().map(|c| c.course_id).collect()
}

#[tokio::test]
async fn dashboard_loads_every_slot() {
    let (base, _backend) = common::spawn_backend(common::seeded()).await;
    let (_session, api) = common::signed_in(&base, Role::Student).await;
    let loader = ResourceLoader::new("student-dashboard", student_view(&api));

    loader.refresh().await;

    let state = loader.state();
    assert_eq!(state.status, LoadStatus::Ready);
    let view = state.ready().unwrap();
    assert_eq!(view.profile.as_ref().map(|p| p.student_id), Some(common::STUDENT_ID));
    assert_eq!(ids(&view.courses), vec![3, 5, 7]);

    let partition = partition_courses(&view.courses, &view.enrollments, "");
    assert_eq!(ids(&partition.enrolled), vec![5]);
    assert_eq!(ids(&partition.available), vec![3, 7]);
}

#[tokio::test]
async fn enrolling_moves_the_course_to_enrolled() {
    let (base, backend) = common::spawn_backend(common::seeded()).await;
    let (_session, api) = common::signed_in(&base, Role::Student).await;
    let loader = ResourceLoader::new("student-dashboard", student_view(&api));
    loader.refresh().await;

    let confirm = common::ScriptedConfirm::answering(true);
    let notify = std::rc::Rc::new(common::RecordingNotify::default());
    let dispatcher = common::dispatcher(&confirm, &notify);

    let outcome = dispatcher
        .dispatch(
            MutationRequest::new("enroll", 3).success("Enrolled successfully"),
            || {
                let api = api.clone();
                async move { api.enroll_in_course(common::STUDENT_ID, 3).await }
            },
            &loader,
        )
        .await;

    assert_eq!(outcome, DispatchOutcome::Succeeded);
    assert!(confirm.prompts.borrow().is_empty());
    assert_eq!(
        *notify.notices.borrow(),
        vec![Notice::success("Enrolled successfully")]
    );
    assert_eq!(common::count_calls(&backend, "POST /api/students/enroll"), 1);

    let state = loader.state();
    let view = state.ready().unwrap();
    let partition = partition_courses(&view.courses, &view.enrollments, "");
    assert_eq!(ids(&partition.enrolled), vec![3, 5]);
    assert_eq!(ids(&partition.available), vec![7]);
}

#[tokio::test]
async fn declined_unenroll_sends_nothing() {
    let (base, backend) = common::spawn_backend(common::seeded()).await;
    let (_session, api) = common::signed_in(&base, Role::Student).await;
    let loader = ResourceLoader::new("student-dashboard", student_view(&api));
    loader.refresh().await;

    let confirm = common::ScriptedConfirm::answering(false);
    let notify = std::rc::Rc::new(common::RecordingNotify::default());
    let dispatcher = common::dispatcher(&confirm, &notify);

    let outcome = dispatcher
        .dispatch(
            MutationRequest::new("unenroll", 5)
                .confirm("Are you sure you want to unenroll from this course?"),
            || {
                let api = api.clone();
                async move { api.unenroll_from_course(5).await }
            },
            &loader,
        )
        .await;

    assert_eq!(outcome, DispatchOutcome::Declined);
    assert_eq!(confirm.prompts.borrow().len(), 1);
    assert_eq!(common::count_calls(&backend, "DELETE /api/students/enroll/5"), 0);
    assert!(notify.notices.borrow().is_empty());
    assert_eq!(common::count_calls(&backend, "GET /api/students/my-courses"), 1);
}

#[tokio::test]
async fn confirmed_unenroll_accepts_no_content() {
    let (base, _backend) = common::spawn_backend(common::seeded()).await;
    let (_session, api) = common::signed_in(&base, Role::Student).await;
    let loader = ResourceLoader::new("student-dashboard", student_view(&api));
    loader.refresh().await;

    let confirm = common::ScriptedConfirm::answering(true);
    let notify = std::rc::Rc::new(common::RecordingNotify::default());
    let dispatcher = common::dispatcher(&confirm, &notify);

    let outcome = dispatcher
        .dispatch(
            MutationRequest::new("unenroll", 5)
                .confirm("Are you sure you want to unenroll from this course?")
                .success("Unenrolled"),
            || {
                let api = api.clone();
                async move { api.unenroll_from_course(5).await }
            },
            &loader,
        )
        .await;

    assert_eq!(outcome, DispatchOutcome::Succeeded);
    let state = loader.state();
    assert!(state.ready().unwrap().enrollments.is_empty());
}

#[tokio::test]
async fn overlapping_refreshes_settle_on_one_ready_state() {
    let (base, backend) = common::spawn_backend(common::seeded()).await;
    let (_session, api) = common::signed_in(&base, Role::Student).await;
    let loader = ResourceLoader::new("student-dashboard", student_view(&api));

    futures::join!(loader.refresh(), loader.refresh());

    let state = loader.state();
    assert_eq!(state.status, LoadStatus::Ready);
    assert_eq!(ids(&state.ready().unwrap().courses), vec![3, 5, 7]);
    // Neither refresh was cancelled; the older one just could not publish.
    assert_eq!(common::count_calls(&backend, "GET /api/students/courses"), 2);
}

#[tokio::test]
async fn signed_out_dashboard_shows_the_api_detail() {
    let (base, _backend) = common::spawn_backend(common::seeded()).await;
    let session = common::session_store();
    let api = common::client(&base, &session);
    let loader = ResourceLoader::new("student-dashboard", student_view(&api));

    loader.refresh().await;

    let state = loader.state();
    assert_eq!(state.status, LoadStatus::Error);
    assert_eq!(state.error_message.as_deref(), Some("Not authenticated"));
    assert!(state.ready().is_none());
}
