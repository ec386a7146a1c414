use shared_types::{AdminInstructor, AdminStudent, AppError, CreateCourseRequest, CreateInstructorRequest};

use crate::ApiClient;

impl ApiClient {
    pub async fn admin_instructors(&self) -> Result<Vec<AdminInstructor>, AppError> {
        self.get("/api/admin/instructors").await
    }

    pub async fn admin_create_instructor(
        &self,
        request: &CreateInstructorRequest,
    ) -> Result<(), AppError> {
        self.post_unit("/api/admin/instructors", request).await
    }

    pub async fn admin_students(&self) -> Result<Vec<AdminStudent>, AppError> {
        self.get("/api/admin/students").await
    }

    pub async fn admin_delete_student(&self, student_id: i64) -> Result<(), AppError> {
        self.delete(&format!("/api/admin/students/{student_id}")).await
    }

    pub async fn admin_create_course(&self, request: &CreateCourseRequest) -> Result<(), AppError> {
        self.post_unit("/api/admin/courses", request).await
    }

    pub async fn admin_delete_course(&self, course_id: i64) -> Result<(), AppError> {
        self.delete(&format!("/api/admin/courses/{course_id}")).await
    }
}
