use serde::{Deserialize, Serialize};

// ── Student profile ─────────────────────────────────────────────────

/// The signed-in student's own profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub student_id: i64,
    pub user_id: i64,
    pub email_id: String,
    pub age: i32,
    pub skill_level: String,
    pub category: String,
    pub country: String,
}

// ── Enrollment ──────────────────────────────────────────────────────

/// A student's enrollment in one course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub student_id: i64,
    pub course_id: i64,
    /// `None` until an instructor grades the enrollment.
    #[serde(default)]
    pub evaluation_score: Option<f64>,
}

/// Request body for `POST /api/students/enroll`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollRequest {
    pub student_id: i64,
    pub course_id: i64,
}

/// An enrollment row on the instructor's course roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseStudent {
    pub student_id: i64,
    pub course_id: i64,
    #[serde(default)]
    pub evaluation_score: Option<f64>,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub student_email: Option<String>,
}

/// Student profile as seen by an instructor, with every enrollment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentDetail {
    pub student_id: i64,
    #[serde(default)]
    pub email_id: Option<String>,
    pub age: i32,
    pub skill_level: String,
    pub category: String,
    pub country: String,
    #[serde(default)]
    pub enrollments: Vec<StudentCourseScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentCourseScore {
    pub course_id: i64,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default)]
    pub evaluation_score: Option<f64>,
}

/// Request body for grading a student in a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRequest {
    pub student_id: i64,
    pub score: f64,
}

/// A student row on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminStudent {
    pub student_id: i64,
    pub user_id: i64,
    pub age: i32,
    pub skill_level: String,
    pub category: String,
    pub country: String,
}
