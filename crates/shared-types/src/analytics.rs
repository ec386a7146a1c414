use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Platform statistics
// ---------------------------------------------------------------------------

/// Pre-aggregated platform statistics from `GET /api/analyst/statistics`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_students: i64,
    pub total_instructors: i64,
    pub total_courses: i64,
    pub total_enrollments: i64,
    #[serde(default)]
    pub total_universities: i64,
    #[serde(default)]
    pub total_contents: i64,
    #[serde(default)]
    pub average_evaluation_score: f64,
    #[serde(default)]
    pub pass_count: i64,
    #[serde(default)]
    pub fail_count: i64,
    #[serde(default)]
    pub courses_per_university: Vec<UniversityCourseCount>,
    #[serde(default)]
    pub students_per_country: Vec<CountryStudentCount>,
    #[serde(default)]
    pub students_per_skill_level: Vec<SkillLevelCount>,
    #[serde(default)]
    pub students_per_category: Vec<CategoryCount>,
    #[serde(default)]
    pub score_distribution: Vec<ScoreBucket>,
    #[serde(default)]
    pub courses_per_program_type: Vec<ProgramTypeCount>,
    #[serde(default)]
    pub avg_score_per_program_type: Vec<ProgramTypeScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversityCourseCount {
    pub university: String,
    pub course_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryStudentCount {
    pub country: String,
    pub student_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillLevelCount {
    pub skill_level: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// Count of scores falling in a labelled range such as `"80-100"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBucket {
    pub range: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramTypeCount {
    pub program_type: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramTypeScore {
    pub program_type: String,
    pub avg_score: f64,
}

// ---------------------------------------------------------------------------
// Summaries
// ---------------------------------------------------------------------------

/// One row of `GET /api/analyst/courses/summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSummary {
    pub course_id: i64,
    pub course_name: String,
    pub program_type: String,
    pub duration: String,
    #[serde(default)]
    pub instructor_name: Option<String>,
    #[serde(default)]
    pub university_name: Option<String>,
    pub enrollment_count: i64,
    #[serde(default)]
    pub average_score: f64,
    #[serde(default)]
    pub max_score: f64,
    #[serde(default)]
    pub min_score: f64,
    #[serde(default)]
    pub pass_count: i64,
    #[serde(default)]
    pub fail_count: i64,
    #[serde(default)]
    pub content_count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentsSummary {
    pub total_enrollments: i64,
    #[serde(default)]
    pub average_score: f64,
    #[serde(default)]
    pub max_score: f64,
    #[serde(default)]
    pub min_score: f64,
    #[serde(default)]
    pub top_5_courses_by_enrollment: Vec<CourseEnrollmentCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseEnrollmentCount {
    pub course_name: String,
    pub enrollment_count: i64,
}

// ---------------------------------------------------------------------------
// Drill-down records
// ---------------------------------------------------------------------------

/// Expanded course record shown in the analyst's course overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalystCourseDetail {
    pub course_id: i64,
    pub course_name: String,
    pub program_type: String,
    pub duration: String,
    #[serde(default)]
    pub instructor_name: Option<String>,
    #[serde(default)]
    pub instructor_expertise: Option<String>,
    #[serde(default)]
    pub university_name: Option<String>,
    pub enrollment_count: i64,
    #[serde(default)]
    pub average_score: f64,
    #[serde(default)]
    pub max_score: f64,
    #[serde(default)]
    pub min_score: f64,
    #[serde(default)]
    pub pass_count: i64,
    #[serde(default)]
    pub fail_count: i64,
    #[serde(default)]
    pub pass_rate: f64,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub textbooks: Vec<CourseTextbookRef>,
    #[serde(default)]
    pub content_by_type: Vec<ContentTypeCount>,
    #[serde(default)]
    pub score_distribution: Vec<ScoreBucket>,
    #[serde(default)]
    pub skill_level_breakdown: Vec<SkillLevelCount>,
    #[serde(default)]
    pub enrolled_students: Vec<EnrolledStudent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseTextbookRef {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeCount {
    #[serde(rename = "type")]
    pub content_type: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrolledStudent {
    pub student_id: i64,
    pub email: String,
    pub age: i32,
    pub country: String,
    pub skill_level: String,
    pub category: String,
    #[serde(default)]
    pub evaluation_score: f64,
}

/// Expanded student record shown in the analyst's student overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalystStudentDetail {
    pub student_id: i64,
    pub email: String,
    pub age: i32,
    pub country: String,
    pub skill_level: String,
    pub category: String,
    pub total_courses_enrolled: i64,
    #[serde(default)]
    pub average_score: f64,
    #[serde(default)]
    pub highest_score: f64,
    #[serde(default)]
    pub lowest_score: f64,
    #[serde(default)]
    pub pass_count: i64,
    #[serde(default)]
    pub fail_count: i64,
    #[serde(default)]
    pub enrollments: Vec<StudentEnrollmentDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentEnrollmentDetail {
    pub course_id: i64,
    pub course_name: String,
    pub program_type: String,
    pub duration: String,
    #[serde(default)]
    pub university_name: Option<String>,
    #[serde(default)]
    pub instructor_name: Option<String>,
    #[serde(default)]
    pub evaluation_score: f64,
}
