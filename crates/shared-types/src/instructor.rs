use serde::{Deserialize, Serialize};

/// The signed-in instructor's own profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructorProfile {
    pub instructor_id: i64,
    pub user_id: i64,
    pub email_id: String,
    pub name: String,
    pub expertise: String,
}

/// An instructor row on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminInstructor {
    pub instructor_id: i64,
    pub user_id: i64,
    pub name: String,
    pub expertise: String,
}

/// Request body for `POST /api/admin/instructors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateInstructorRequest {
    pub email_id: String,
    pub password: String,
    pub name: String,
    pub expertise: String,
}
