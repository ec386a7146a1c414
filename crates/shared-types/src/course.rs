use serde::{Deserialize, Serialize};

// ── Course ──────────────────────────────────────────────────────────

/// A course as listed by the public catalog and the portal endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub course_id: i64,
    pub course_name: String,
    pub duration: String,
    pub program_type: String,
    pub instructor_id: i64,
    pub university_id: i64,
}

/// Request body for `POST /api/admin/courses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCourseRequest {
    pub course_name: String,
    pub duration: String,
    pub program_type: String,
    pub instructor_id: i64,
    pub university_id: i64,
}

/// Program types offered on the create-course form.
pub const PROGRAM_TYPES: &[&str] = &["Certificate", "Degree", "Diploma"];

// ── Content ─────────────────────────────────────────────────────────

/// One piece of course material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub content_id: i64,
    pub course_id: i64,
    /// One of [`CONTENT_TYPES`].
    #[serde(rename = "type")]
    pub content_type: String,
    pub content_url: String,
}

impl ContentItem {
    pub fn is_video(&self) -> bool {
        self.content_type == "video"
    }
}

/// Content types an instructor can attach.
pub const CONTENT_TYPES: &[&str] = &["video", "pdf", "article", "link", "quiz"];

/// Request body for adding course content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContentRequest {
    #[serde(rename = "type")]
    pub content_type: String,
    pub content_url: String,
}

// ── Textbooks ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Textbook {
    pub textbook_id: i64,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub link: Option<String>,
}
