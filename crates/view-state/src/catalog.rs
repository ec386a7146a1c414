use shared_types::{Course, Enrollment};
use std::collections::HashSet;

/// The student dashboard's two course lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoursePartition {
    /// "My courses": the student has an enrollment for these.
    pub enrolled: Vec<Course>,
    /// "Browse": everything else.
    pub available: Vec<Course>,
}

/// Split `courses` by enrollment. A non-empty `query` keeps only courses
/// whose name starts with it, ignoring case, in both lists.
pub fn partition_courses(
    courses: &[Course],
    enrollments: &[Enrollment],
    query: &str,
) -> CoursePartition {
    let enrolled_ids: HashSet<i64> = enrollments.iter().map(|e| e.course_id).collect();
    let query = query.trim().to_lowercase();

    let mut partition = CoursePartition::default();
    for course in courses {
        if !query.is_empty() && !course.course_name.to_lowercase().starts_with(&query) {
            continue;
        }
        if enrolled_ids.contains(&course.course_id) {
            partition.enrolled.push(course.clone());
        } else {
            partition.available.push(course.clone());
        }
    }
    partition
}

pub fn is_enrolled(enrollments: &[Enrollment], course_id: i64) -> bool {
    enrollments.iter().any(|e| e.course_id == course_id)
}
