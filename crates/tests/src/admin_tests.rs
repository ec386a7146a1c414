use api_client::ApiClient;
use pretty_assertions::assert_eq;
use shared_types::{AdminInstructor, AdminStudent, Course, Role};
use std::rc::Rc;
use view_state::{DispatchOutcome, FetchSet, MutationRequest, Notice, PendingKey, ResourceLoader};

use crate::common;

#[derive(Debug, Clone, Default, PartialEq)]
struct AdminView {
    instructors: Vec<AdminInstructor>,
    students: Vec<AdminStudent>,
    courses: Vec<Course>,
}

fn admin_view(api: &ApiClient) -> FetchSet<AdminView> {
    let (a, b, c) = (api.clone(), api.clone(), api.clone());
    FetchSet::new()
        .slot(
            "instructors",
            move || {
                let api = a.clone();
                async move { api.admin_instructors().await }
            },
            |v: &mut AdminView, i| v.instructors = i,
        )
        .slot(
            "students",
            move || {
                let api = b.clone();
                async move { api.admin_students().await }
            },
            |v: &mut AdminView, s| v.students = s,
        )
        .slot(
            "courses",
            move || {
                let api = c.clone();
                async move { api.public_courses().await }
            },
            |v: &mut AdminView, c| v.courses = c,
        )
}

fn delete_course_request(course_id: i64, name: &str) -> MutationRequest {
    MutationRequest::new("delete-course", course_id)
        .confirm(format!("Delete course \"{name}\"?"))
        .success("Course deleted")
}

fn course_ids(loader: &ResourceLoader<AdminView>) -> Vec<i64> {
    loader
        .state()
        .data
        .map(|v| v.courses.iter().map(|c| c.course_id).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn admin_dashboard_loads_lists() {
    let (base, _backend) = common::spawn_backend(common::seeded()).await;
    let (_session, api) = common::signed_in(&base, Role::Admin).await;
    let loader = ResourceLoader::new("admin-dashboard", admin_view(&api));

    loader.refresh().await;

    let state = loader.state();
    let view = state.ready().unwrap();
    assert_eq!(view.instructors[0].name, "Ada Byron");
    assert_eq!(view.students[0].student_id, common::STUDENT_ID);
    assert_eq!(view.courses.len(), 3);
}

#[tokio::test]
async fn confirmed_delete_refreshes_then_notifies() {
    let (base, backend) = common::spawn_backend(common::seeded()).await;
    let (_session, api) = common::signed_in(&base, Role::Admin).await;
    let loader = ResourceLoader::new("admin-dashboard", admin_view(&api));
    loader.refresh().await;

    let confirm = common::ScriptedConfirm::answering(true);
    let notify = Rc::new(common::RecordingNotify::default());
    let dispatcher = common::dispatcher(&confirm, &notify);

    let outcome = dispatcher
        .dispatch(
            delete_course_request(7, "Distributed Systems"),
            || {
                let api = api.clone();
                async move { api.admin_delete_course(7).await }
            },
            &loader,
        )
        .await;

    assert_eq!(outcome, DispatchOutcome::Succeeded);
    assert_eq!(
        *confirm.prompts.borrow(),
        vec!["Delete course \"Distributed Systems\"?".to_string()]
    );
    assert_eq!(*notify.notices.borrow(), vec![Notice::success("Course deleted")]);
    assert_eq!(course_ids(&loader), vec![3, 5]);
    assert_eq!(common::count_calls(&backend, "GET /api/courses"), 2);
    assert!(!dispatcher.is_pending(PendingKey::new("delete-course", 7)));
}

#[tokio::test]
async fn failed_delete_keeps_the_list_and_reports_the_detail() {
    let mut seed = common::seeded();
    seed.failing_deletes.push(7);
    let (base, backend) = common::spawn_backend(seed).await;
    let (_session, api) = common::signed_in(&base, Role::Admin).await;
    let loader = ResourceLoader::new("admin-dashboard", admin_view(&api));
    loader.refresh().await;

    let confirm = common::ScriptedConfirm::answering(true);
    let notify = Rc::new(common::RecordingNotify::default());
    let dispatcher = common::dispatcher(&confirm, &notify);

    let outcome = dispatcher
        .dispatch(
            delete_course_request(7, "Distributed Systems"),
            || {
                let api = api.clone();
                async move { api.admin_delete_course(7).await }
            },
            &loader,
        )
        .await;

    match outcome {
        DispatchOutcome::Failed(err) => {
            assert_eq!(err.status, Some(500));
            assert_eq!(err.message, "Database error");
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(*notify.notices.borrow(), vec![Notice::error("Database error")]);
    assert_eq!(course_ids(&loader), vec![3, 5, 7]);
    // No refresh after a failure.
    assert_eq!(common::count_calls(&backend, "GET /api/courses"), 1);
    assert!(!dispatcher.is_pending(PendingKey::new("delete-course", 7)));
}

#[tokio::test]
async fn declined_delete_never_reaches_the_api() {
    let (base, backend) = common::spawn_backend(common::seeded()).await;
    let (_session, api) = common::signed_in(&base, Role::Admin).await;
    let loader = ResourceLoader::new("admin-dashboard", admin_view(&api));
    loader.refresh().await;

    let confirm = common::ScriptedConfirm::answering(false);
    let notify = Rc::new(common::RecordingNotify::default());
    let dispatcher = common::dispatcher(&confirm, &notify);

    let outcome = dispatcher
        .dispatch(
            delete_course_request(7, "Distributed Systems"),
            || {
                let api = api.clone();
                async move { api.admin_delete_course(7).await }
            },
            &loader,
        )
        .await;

    assert_eq!(outcome, DispatchOutcome::Declined);
    assert_eq!(common::count_calls(&backend, "DELETE /api/admin/courses/7"), 0);
    assert!(notify.notices.borrow().is_empty());
    assert_eq!(course_ids(&loader), vec![3, 5, 7]);
}

#[tokio::test]
async fn student_token_cannot_delete_courses() {
    let (base, _backend) = common::spawn_backend(common::seeded()).await;
    let (_session, api) = common::signed_in(&base, Role::Student).await;

    let err = api.admin_delete_course(3).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.message, "Not authenticated");
}
