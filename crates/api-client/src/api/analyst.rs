use shared_types::{
    AnalystCourseDetail, AnalystStudentDetail, AppError, CourseSummary, EnrollmentsSummary,
    Statistics,
};

use crate::ApiClient;

impl ApiClient {
    pub async fn statistics(&self) -> Result<Statistics, AppError> {
        self.get("/api/analyst/statistics").await
    }

    pub async fn courses_summary(&self) -> Result<Vec<CourseSummary>, AppError> {
        self.get("/api/analyst/courses/summary").await
    }

    pub async fn enrollments_summary(&self) -> Result<EnrollmentsSummary, AppError> {
        self.get("/api/analyst/enrollments/summary").await
    }

    pub async fn analyst_course_detail(
        &self,
        course_id: i64,
    ) -> Result<AnalystCourseDetail, AppError> {
        self.get(&format!("/api/analyst/courses/{course_id}")).await
    }

    pub async fn analyst_student_detail(
        &self,
        student_id: i64,
    ) -> Result<AnalystStudentDetail, AppError> {
        self.get(&format!("/api/analyst/students/{student_id}")).await
    }
}
