use pretty_assertions::assert_eq;
use shared_types::{Role, StudentSignupRequest};
use std::cell::Cell;
use std::rc::Rc;
use view_state::{GateState, MemoryStore, SessionState, SessionStore};

use crate::common;

#[tokio::test]
async fn each_role_opens_only_its_own_portal() {
    let (base, _backend) = common::spawn_backend(common::seeded()).await;

    for role in Role::ALL {
        let (session, _api) = common::signed_in(&base, role).await;
        for required in Role::ALL {
            let gate = GateState::evaluate(required, &session.state());
            assert_eq!(
                gate.is_permitted(),
                required == role,
                "{role} session visiting the {required} portal"
            );
        }
    }
}

#[tokio::test]
async fn wrong_password_leaves_session_signed_out() {
    let (base, _backend) = common::spawn_backend(common::seeded()).await;
    let session = common::session_store();
    let api = common::client(&base, &session);

    let err = api
        .login(Role::Instructor, "instructor@example.com", "wrong")
        .await
        .unwrap_err();

    assert_eq!(err.status, Some(401));
    assert_eq!(err.message, "Incorrect email or password");
    assert_eq!(session.state(), SessionState::Ready(None));
}

#[tokio::test]
async fn bearer_token_follows_login_and_logout() {
    let (base, backend) = common::spawn_backend(common::seeded()).await;
    let session = common::session_store();
    let api = common::client(&base, &session);

    let err = api.student_profile().await.unwrap_err();
    assert_eq!(err.message, "Not authenticated");
    assert_eq!(backend.lock().unwrap().last_authorization, None);

    let response = api
        .login(Role::Student, "student@example.com", "secret")
        .await
        .unwrap();
    session.login_with(response).unwrap();

    let profile = api.student_profile().await.unwrap();
    assert_eq!(profile.student_id, common::STUDENT_ID);
    assert_eq!(
        backend.lock().unwrap().last_authorization.as_deref(),
        Some("Bearer token-student")
    );

    session.logout();
    let err = api.student_profile().await.unwrap_err();
    assert_eq!(err.status, Some(401));
    assert_eq!(backend.lock().unwrap().last_authorization, None);
}

#[tokio::test]
async fn logout_denies_the_dashboard_and_runs_the_hook() {
    let (base, _backend) = common::spawn_backend(common::seeded()).await;
    let (session, _api) = common::signed_in(&base, Role::Student).await;

    let navigated = Rc::new(Cell::new(0));
    session.on_logout({
        let navigated = navigated.clone();
        move || navigated.set(navigated.get() + 1)
    });

    assert!(GateState::evaluate(Role::Student, &session.state()).is_permitted());

    session.logout();

    assert_eq!(navigated.get(), 1);
    assert_eq!(
        GateState::evaluate(Role::Student, &session.state()),
        GateState::Denied {
            required: Role::Student,
            login_route: "/student/login".to_string(),
        }
    );
}

#[tokio::test]
async fn session_survives_a_restart() {
    let (base, _backend) = common::spawn_backend(common::seeded()).await;
    let storage = Rc::new(MemoryStore::new());

    let first = SessionStore::new(storage.clone());
    first.rehydrate();
    let api = common::client(&base, &first);
    let response = api
        .login(Role::Analyst, "analyst@example.com", "secret")
        .await
        .unwrap();
    let session = first.login_with(response).unwrap();

    let second = SessionStore::new(storage);
    assert_eq!(second.state(), SessionState::Rehydrating);
    assert_eq!(
        GateState::evaluate(Role::Analyst, &second.state()),
        GateState::Loading
    );

    let restored = second.rehydrate();
    assert_eq!(restored, Some(session));
    assert!(GateState::evaluate(Role::Analyst, &second.state()).is_permitted());
}

#[tokio::test]
async fn signup_reports_validation_details_then_signs_in() {
    let (base, _backend) = common::spawn_backend(common::seeded()).await;
    let session = common::session_store();
    let api = common::client(&base, &session);

    let mut request = StudentSignupRequest {
        email_id: String::new(),
        password: "secret".to_string(),
        age: 21,
        skill_level: "Beginner".to_string(),
        category: "Undergraduate".to_string(),
        country: "Norway".to_string(),
    };
    let err = api.signup_student(&request).await.unwrap_err();
    assert_eq!(err.status, Some(422));
    assert_eq!(
        err.message,
        "field required; value is not a valid email address"
    );

    request.email_id = "new@example.com".to_string();
    request.validate().unwrap();
    let response = api.signup_student(&request).await.unwrap();
    let session = session.login_with(response).unwrap();
    assert_eq!(session.role, Role::Student);
}

#[tokio::test]
async fn logout_clears_storage_for_the_next_start() {
    let (base, _backend) = common::spawn_backend(common::seeded()).await;
    let storage = Rc::new(MemoryStore::new());

    let first = SessionStore::new(storage.clone());
    first.rehydrate();
    let api = common::client(&base, &first);
    let response = api
        .login(Role::Admin, "admin@example.com", "secret")
        .await
        .unwrap();
    first.login_with(response).unwrap();
    first.logout();
    assert!(storage.is_empty());

    let second = SessionStore::new(storage);
    assert_eq!(second.rehydrate(), None);
    for role in Role::ALL {
        assert!(matches!(
            GateState::evaluate(role, &second.state()),
            GateState::Denied { .. }
        ));
    }
}
