use shared_types::{AppError, ContentItem, Course, NewContentRequest, Textbook};

use crate::ApiClient;

impl ApiClient {
    /// Public catalog; no session required.
    pub async fn public_courses(&self) -> Result<Vec<Course>, AppError> {
        self.get("/api/courses").await
    }

    pub async fn course_content(&self, course_id: i64) -> Result<Vec<ContentItem>, AppError> {
        self.get(&format!("/api/courses/{course_id}/content")).await
    }

    pub async fn add_course_content(
        &self,
        course_id: i64,
        content_type: &str,
        content_url: &str,
    ) -> Result<(), AppError> {
        let body = NewContentRequest {
            content_type: content_type.to_string(),
            content_url: content_url.to_string(),
        };
        self.post_unit(&format!("/api/courses/{course_id}/content"), &body)
            .await
    }

    pub async fn delete_course_content(
        &self,
        course_id: i64,
        content_id: i64,
    ) -> Result<(), AppError> {
        self.delete(&format!("/api/courses/{course_id}/content/{content_id}"))
            .await
    }

    pub async fn course_textbooks(&self, course_id: i64) -> Result<Vec<Textbook>, AppError> {
        self.get(&format!("/api/courses/{course_id}/textbooks")).await
    }
}
