use api_client::ApiClient;
use axum::{
    extract::{Path, Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use serde_json::{json, Value};
use shared_types::{ApiConfig, Course, EnrollRequest, Enrollment, Role};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use view_state::{Confirm, MemoryStore, MutationDispatcher, Notice, Notify, SessionStore};

/// Student id the mock API assigns to the signed-in student.
pub const STUDENT_ID: i64 = 42;

/// In-memory state behind the mock API.
#[derive(Debug, Default)]
pub struct Backend {
    pub courses: Vec<Course>,
    pub enrollments: Vec<Enrollment>,
    /// Course ids whose admin delete answers 500.
    pub failing_deletes: Vec<i64>,
    /// Latency of `GET /api/analyst/courses/{id}`, per course id.
    pub detail_delay_ms: HashMap<i64, u64>,
    /// Answer the statistics endpoint with a non-JSON 503.
    pub statistics_down: bool,
    /// `"METHOD /path"` of every request, in arrival order.
    pub calls: Vec<String>,
    /// `Authorization` header of the latest request.
    pub last_authorization: Option<String>,
}

pub type SharedBackend = Arc<Mutex<Backend>>;

/// Three courses; student 42 is enrolled in course 5 only.
pub fn seeded() -> Backend {
    Backend {
        courses: vec![
            course(3, "Rust Fundamentals"),
            course(5, "Data Engineering"),
            course(7, "Distributed Systems"),
        ],
        enrollments: vec![Enrollment {
            student_id: STUDENT_ID,
            course_id: 5,
            evaluation_score: Some(72.5),
        }],
        ..Backend::default()
    }
}

pub fn course(course_id: i64, name: &str) -> Course {
    Course {
        course_id,
        course_name: name.to_string(),
        duration: "8 weeks".to_string(),
        program_type: "Certificate".to_string(),
        instructor_id: 1,
        university_id: 1,
    }
}

/// Serve the mock API on an ephemeral port. Returns its base URL.
pub async fn spawn_backend(backend: Backend) -> (String, SharedBackend) {
    let shared = Arc::new(Mutex::new(backend));
    let app = router(shared.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock API");
    let addr = listener.local_addr().expect("Mock API has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock API stopped");
    });

    (format!("http://{addr}"), shared)
}

/// How many times `call` (e.g. `"GET /api/courses"`) reached the mock API.
pub fn count_calls(backend: &SharedBackend, call: &str) -> usize {
    backend
        .lock()
        .unwrap()
        .calls
        .iter()
        .filter(|c| c.as_str() == call)
        .count()
}

// ── Client side ─────────────────────────────────────────────────────

/// A rehydrated, signed-out session store over fresh memory storage.
pub fn session_store() -> SessionStore {
    let session = SessionStore::new(Rc::new(MemoryStore::new()));
    session.rehydrate();
    session
}

pub fn client(base_url: &str, session: &SessionStore) -> ApiClient {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
    };
    ApiClient::new(&config).with_token_source(Rc::new(session.clone()))
}

/// Session store and client already signed in to `role`'s portal.
pub async fn signed_in(base_url: &str, role: Role) -> (SessionStore, ApiClient) {
    let session = session_store();
    let api = client(base_url, &session);
    let response = api
        .login(role, "user@example.com", "secret")
        .await
        .expect("Mock login failed");
    session.login_with(response).expect("Mock login role unknown");
    (session, api)
}

/// Confirmation that always gives the same answer and records prompts.
pub struct ScriptedConfirm {
    answer: bool,
    pub prompts: RefCell<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn answering(answer: bool) -> Rc<Self> {
        Rc::new(Self {
            answer,
            prompts: RefCell::new(Vec::new()),
        })
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, prompt: &str) -> LocalBoxFuture<'_, bool> {
        self.prompts.borrow_mut().push(prompt.to_string());
        let answer = self.answer;
        async move { answer }.boxed_local()
    }
}

#[derive(Default)]
pub struct RecordingNotify {
    pub notices: RefCell<Vec<Notice>>,
}

impl Notify for RecordingNotify {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

pub fn dispatcher(confirm: &Rc<ScriptedConfirm>, notify: &Rc<RecordingNotify>) -> MutationDispatcher {
    MutationDispatcher::new(confirm.clone(), notify.clone())
}

// ── Mock API ────────────────────────────────────────────────────────

fn router(backend: SharedBackend) -> Router {
    Router::new()
        .route("/api/auth/student/signup", post(signup))
        .route("/api/auth/{role}/login", post(login))
        .route("/api/students/profile", get(student_profile))
        .route("/api/students/courses", get(student_courses))
        .route("/api/students/my-courses", get(my_courses))
        .route("/api/students/enroll", post(enroll))
        .route("/api/students/enroll/{course_id}", delete(unenroll))
        .route("/api/courses", get(public_courses))
        .route("/api/admin/instructors", get(admin_instructors))
        .route("/api/admin/students", get(admin_students))
        .route("/api/admin/courses/{course_id}", delete(admin_delete_course))
        .route("/api/analyst/statistics", get(statistics))
        .route("/api/analyst/courses/{course_id}", get(analyst_course))
        .layer(middleware::from_fn_with_state(backend.clone(), record))
        .with_state(backend)
}

async fn record(State(backend): State<SharedBackend>, req: Request, next: Next) -> Response {
    {
        let mut b = backend.lock().unwrap();
        b.calls.push(format!("{} {}", req.method(), req.uri().path()));
        b.last_authorization = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
    }
    next.run(req).await
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn require(headers: &HeaderMap, role: &str) -> Result<(), Response> {
    let expected = format!("Bearer token-{role}");
    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(detail(StatusCode::UNAUTHORIZED, "Not authenticated")),
    }
}

fn token(role: &str, user_id: i64) -> Value {
    json!({
        "access_token": format!("token-{role}"),
        "token_type": "bearer",
        "role": role,
        "user_id": user_id,
    })
}

async fn login(Path(role): Path<String>, Json(body): Json<Value>) -> Response {
    if body["password"] == "wrong" {
        return detail(StatusCode::UNAUTHORIZED, "Incorrect email or password");
    }
    let user_id = match role.as_str() {
        "student" => 1,
        "instructor" => 2,
        "admin" => 3,
        "analyst" => 4,
        _ => return detail(StatusCode::NOT_FOUND, "Not Found"),
    };
    Json(token(&role, user_id)).into_response()
}

async fn signup(Json(body): Json<Value>) -> Response {
    if body["email_id"].as_str().unwrap_or_default().is_empty() {
        let errors = json!({
            "detail": [
                { "loc": ["body", "email_id"], "msg": "field required" },
                { "loc": ["body", "email_id"], "msg": "value is not a valid email address" },
            ]
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response();
    }
    Json(token("student", 1)).into_response()
}

async fn student_profile(headers: HeaderMap) -> Response {
    if let Err(denied) = require(&headers, "student") {
        return denied;
    }
    Json(json!({
        "student_id": STUDENT_ID,
        "user_id": 1,
        "email_id": "student@example.com",
        "age": 21,
        "skill_level": "Beginner",
        "category": "Undergraduate",
        "country": "Norway",
    }))
    .into_response()
}

async fn student_courses(State(backend): State<SharedBackend>, headers: HeaderMap) -> Response {
    if let Err(denied) = require(&headers, "student") {
        return denied;
    }
    Json(backend.lock().unwrap().courses.clone()).into_response()
}

async fn my_courses(State(backend): State<SharedBackend>, headers: HeaderMap) -> Response {
    if let Err(denied) = require(&headers, "student") {
        return denied;
    }
    let mine: Vec<Enrollment> = backend
        .lock()
        .unwrap()
        .enrollments
        .iter()
        .filter(|e| e.student_id == STUDENT_ID)
        .cloned()
        .collect();
    Json(mine).into_response()
}

async fn enroll(
    State(backend): State<SharedBackend>,
    headers: HeaderMap,
    Json(body): Json<EnrollRequest>,
) -> Response {
    if let Err(denied) = require(&headers, "student") {
        return denied;
    }
    let mut b = backend.lock().unwrap();
    if b
        .enrollments
        .iter()
        .any(|e| e.student_id == body.student_id && e.course_id == body.course_id)
    {
        return detail(StatusCode::BAD_REQUEST, "Already enrolled in this course");
    }
    b.enrollments.push(Enrollment {
        student_id: body.student_id,
        course_id: body.course_id,
        evaluation_score: None,
    });
    Json(json!({ "message": "Enrolled successfully" })).into_response()
}

async fn unenroll(
    State(backend): State<SharedBackend>,
    headers: HeaderMap,
    Path(course_id): Path<i64>,
) -> Response {
    if let Err(denied) = require(&headers, "student") {
        return denied;
    }
    backend
        .lock()
        .unwrap()
        .enrollments
        .retain(|e| !(e.student_id == STUDENT_ID && e.course_id == course_id));
    StatusCode::NO_CONTENT.into_response()
}

async fn public_courses(State(backend): State<SharedBackend>) -> Response {
    Json(backend.lock().unwrap().courses.clone()).into_response()
}

async fn admin_instructors(headers: HeaderMap) -> Response {
    if let Err(denied) = require(&headers, "admin") {
        return denied;
    }
    Json(json!([
        { "instructor_id": 1, "user_id": 2, "name": "Ada Byron", "expertise": "Systems" }
    ]))
    .into_response()
}

async fn admin_students(headers: HeaderMap) -> Response {
    if let Err(denied) = require(&headers, "admin") {
        return denied;
    }
    Json(json!([
        {
            "student_id": STUDENT_ID, "user_id": 1, "age": 21,
            "skill_level": "Beginner", "category": "Undergraduate", "country": "Norway"
        }
    ]))
    .into_response()
}

async fn admin_delete_course(
    State(backend): State<SharedBackend>,
    headers: HeaderMap,
    Path(course_id): Path<i64>,
) -> Response {
    if let Err(denied) = require(&headers, "admin") {
        return denied;
    }
    let mut b = backend.lock().unwrap();
    if b.failing_deletes.contains(&course_id) {
        return detail(StatusCode::INTERNAL_SERVER_ERROR, "Database error");
    }
    b.courses.retain(|c| c.course_id != course_id);
    Json(json!({ "message": "Course deleted" })).into_response()
}

async fn statistics(State(backend): State<SharedBackend>, headers: HeaderMap) -> Response {
    if let Err(denied) = require(&headers, "analyst") {
        return denied;
    }
    let b = backend.lock().unwrap();
    if b.statistics_down {
        return (StatusCode::SERVICE_UNAVAILABLE, "upstream unavailable").into_response();
    }
    Json(json!({
        "total_students": 1,
        "total_instructors": 1,
        "total_courses": b.courses.len(),
        "total_enrollments": b.enrollments.len(),
        "pass_count": 1,
        "fail_count": 0,
    }))
    .into_response()
}

async fn analyst_course(
    State(backend): State<SharedBackend>,
    headers: HeaderMap,
    Path(course_id): Path<i64>,
) -> Response {
    if let Err(denied) = require(&headers, "analyst") {
        return denied;
    }
    let (found, delay, enrolled) = {
        let b = backend.lock().unwrap();
        let found = b.courses.iter().find(|c| c.course_id == course_id).cloned();
        let delay = b.detail_delay_ms.get(&course_id).copied().unwrap_or(0);
        let enrolled: Vec<Value> = b
            .enrollments
            .iter()
            .filter(|e| e.course_id == course_id)
            .map(|e| {
                json!({
                    "student_id": e.student_id,
                    "email": "student@example.com",
                    "age": 21,
                    "country": "Norway",
                    "skill_level": "Beginner",
                    "category": "Undergraduate",
                    "evaluation_score": e.evaluation_score.unwrap_or(0.0),
                })
            })
            .collect();
        (found, delay, enrolled)
    };

    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    match found {
        Some(course) => Json(json!({
            "course_id": course.course_id,
            "course_name": course.course_name,
            "program_type": course.program_type,
            "duration": course.duration,
            "enrollment_count": enrolled.len(),
            "enrolled_students": enrolled,
        }))
        .into_response(),
        None => detail(StatusCode::NOT_FOUND, "Course not found"),
    }
}
