use shared_types::{AppError, Course, EnrollRequest, Enrollment, StudentProfile};

use crate::ApiClient;

impl ApiClient {
    pub async fn student_profile(&self) -> Result<StudentProfile, AppError> {
        self.get("/api/students/profile").await
    }

    /// Courses open to the signed-in student.
    pub async fn browse_courses(&self) -> Result<Vec<Course>, AppError> {
        self.get("/api/students/courses").await
    }

    pub async fn my_enrolled_courses(&self) -> Result<Vec<Enrollment>, AppError> {
        self.get("/api/students/my-courses").await
    }

    pub async fn enroll_in_course(&self, student_id: i64, course_id: i64) -> Result<(), AppError> {
        let body = EnrollRequest {
            student_id,
            course_id,
        };
        self.post_unit("/api/students/enroll", &body).await
    }

    pub async fn unenroll_from_course(&self, course_id: i64) -> Result<(), AppError> {
        self.delete(&format!("/api/students/enroll/{course_id}")).await
    }
}
