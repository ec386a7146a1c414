use shared_types::{AppError, Course, CourseStudent, GradeRequest, InstructorProfile, StudentDetail};

use crate::ApiClient;

impl ApiClient {
    pub async fn instructor_profile(&self) -> Result<InstructorProfile, AppError> {
        self.get("/api/instructors/profile").await
    }

    pub async fn instructor_courses(&self) -> Result<Vec<Course>, AppError> {
        self.get("/api/instructors/my-courses").await
    }

    /// Roster of a course the instructor teaches.
    pub async fn course_students(&self, course_id: i64) -> Result<Vec<CourseStudent>, AppError> {
        self.get(&format!("/api/instructors/courses/{course_id}/students"))
            .await
    }

    pub async fn grade_student(
        &self,
        course_id: i64,
        student_id: i64,
        score: f64,
    ) -> Result<(), AppError> {
        let body = GradeRequest { student_id, score };
        self.put_unit(&format!("/api/instructors/courses/{course_id}/grade"), &body)
            .await
    }

    pub async fn instructor_student_profile(
        &self,
        student_id: i64,
    ) -> Result<StudentDetail, AppError> {
        self.get(&format!("/api/instructors/students/{student_id}"))
            .await
    }
}
