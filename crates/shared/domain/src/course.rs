//! Course domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    DEFAULT_COURSE_CAPACITY, MAX_COURSE_CREDITS, MIN_COURSE_CAPACITY, MIN_COURSE_CREDITS,
};
use crate::error::{DomainError, DomainResult};

/// Course domain entity.
///
/// `enrolled` mirrors the number of enrollments referencing the course and
/// is only changed by the enrollment workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub course_code: String,
    pub course_name: String,
    pub instructor: String,
    pub credits: i32,
    pub capacity: i32,
    pub enrolled: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// True when no seat is left
    pub fn is_full(&self) -> bool {
        self.enrolled >= self.capacity
    }

    /// Seats still available (never negative)
    pub fn seats_remaining(&self) -> i32 {
        (self.capacity - self.enrolled).max(0)
    }
}

/// Normalize a course code for storage and lookup.
pub fn normalize_course_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Course creation data.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewCourse {
    pub course_code: String,
    pub course_name: String,
    pub instructor: String,
    pub credits: i32,
    pub capacity: Option<i32>,
}

impl NewCourse {
    /// Trim text fields, upper-case the code, apply the default capacity and
    /// check numeric bounds.
    pub fn normalized(self) -> DomainResult<Self> {
        let course_code = normalize_course_code(&self.course_code);
        let course_name = self.course_name.trim().to_string();
        let instructor = self.instructor.trim().to_string();

        if course_code.is_empty() {
            return Err(DomainError::validation("Course code is required"));
        }
        if course_name.is_empty() {
            return Err(DomainError::validation("Course name is required"));
        }
        if instructor.is_empty() {
            return Err(DomainError::validation("Instructor is required"));
        }
        if !(MIN_COURSE_CREDITS..=MAX_COURSE_CREDITS).contains(&self.credits) {
            return Err(DomainError::validation(format!(
                "Credits must be between {} and {}",
                MIN_COURSE_CREDITS, MAX_COURSE_CREDITS
            )));
        }

        let capacity = self.capacity.unwrap_or(DEFAULT_COURSE_CAPACITY);
        if capacity < MIN_COURSE_CAPACITY {
            return Err(DomainError::validation(format!(
                "Capacity must be at least {}",
                MIN_COURSE_CAPACITY
            )));
        }

        Ok(Self {
            course_code,
            course_name,
            instructor,
            credits: self.credits,
            capacity: Some(capacity),
        })
    }
}

/// Course response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    /// Unique course identifier
    pub id: Uuid,
    /// Upper-cased course code
    pub course_code: String,
    pub course_name: String,
    pub instructor: String,
    /// Credit count (1-6)
    pub credits: i32,
    /// Maximum number of enrolled students
    pub capacity: i32,
    /// Current number of enrolled students
    pub enrolled: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            course_code: course.course_code,
            course_name: course.course_name,
            instructor: course.instructor,
            credits: course.credits,
            capacity: course.capacity,
            enrolled: course.enrolled,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}
