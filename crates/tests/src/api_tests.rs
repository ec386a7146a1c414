use pretty_assertions::assert_eq;
use shared_types::{ApiConfig, AppErrorKind, Role};
use std::rc::Rc;

use crate::common;

#[tokio::test]
async fn non_json_error_body_falls_back_to_status() {
    let mut seed = common::seeded();
    seed.statistics_down = true;
    let (base, _backend) = common::spawn_backend(seed).await;
    let (_session, api) = common::signed_in(&base, Role::Analyst).await;

    let err = api.statistics().await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Api);
    assert_eq!(err.status, Some(503));
    assert_eq!(err.message, "API error 503");
}

#[tokio::test]
async fn statistics_tolerate_missing_breakdowns() {
    let (base, _backend) = common::spawn_backend(common::seeded()).await;
    let (_session, api) = common::signed_in(&base, Role::Analyst).await;

    let stats = api.statistics().await.unwrap();

    assert_eq!(stats.total_courses, 3);
    assert_eq!(stats.total_enrollments, 1);
    assert!(stats.score_distribution.is_empty());
}

#[tokio::test]
async fn slow_response_times_out_as_transport_error() {
    let mut seed = common::seeded();
    seed.detail_delay_ms.insert(3, 2_500);
    let (base, _backend) = common::spawn_backend(seed).await;
    let (session, _) = common::signed_in(&base, Role::Analyst).await;
    let config = ApiConfig {
        base_url: base.clone(),
        timeout_secs: 1,
    };
    let api = api_client::ApiClient::new(&config).with_token_source(Rc::new(session));

    let err = api.analyst_course_detail(3).await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Transport);
    assert_eq!(err.status, None);
}

#[tokio::test]
async fn unreachable_api_is_a_transport_error() {
    let session = common::session_store();
    // Port 9 (discard) is not served by the mock.
    let api = common::client("http://127.0.0.1:9", &session);

    let err = api.public_courses().await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Transport);
}

#[tokio::test]
async fn public_catalog_needs_no_session() {
    let (base, backend) = common::spawn_backend(common::seeded()).await;
    let session = common::session_store();
    let api = common::client(&base, &session);

    let courses = api.public_courses().await.unwrap();

    assert_eq!(courses.len(), 3);
    assert_eq!(backend.lock().unwrap().last_authorization, None);
}
