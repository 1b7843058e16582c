//! Enrollment domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{STATUS_ACTIVE, STATUS_COMPLETED, STATUS_DROPPED};
use crate::course::{Course, CourseResponse};
use crate::student::{Student, StudentResponse};

/// Enrollment status enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    #[default]
    Active,
    Completed,
    Dropped,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Active => STATUS_ACTIVE,
            EnrollmentStatus::Completed => STATUS_COMPLETED,
            EnrollmentStatus::Dropped => STATUS_DROPPED,
        }
    }
}

impl From<&str> for EnrollmentStatus {
    fn from(s: &str) -> Self {
        match s {
            STATUS_COMPLETED => EnrollmentStatus::Completed,
            STATUS_DROPPED => EnrollmentStatus::Dropped,
            _ => EnrollmentStatus::Active,
        }
    }
}

impl From<String> for EnrollmentStatus {
    fn from(s: String) -> Self {
        EnrollmentStatus::from(s.as_str())
    }
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Join record linking one student to one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub status: EnrollmentStatus,
    pub enrollment_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Enrollment {
    /// Create an active enrollment dated now
    pub fn new(id: Uuid, student_id: Uuid, course_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            student_id,
            course_id,
            status: EnrollmentStatus::Active,
            enrollment_date: now,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Enrollment joined with the records it references.
///
/// Either side is `None` when the referenced record has been deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentDetails {
    pub enrollment: Enrollment,
    pub student: Option<Student>,
    pub course: Option<Course>,
}

/// Enrollment response joined with student and course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    pub id: Uuid,
    /// Enrolled student (null if the student was deleted)
    pub student: Option<StudentResponse>,
    /// Course enrolled in (null if the course was deleted)
    pub course: Option<CourseResponse>,
    pub status: EnrollmentStatus,
    pub enrollment_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EnrollmentDetails> for EnrollmentResponse {
    fn from(details: EnrollmentDetails) -> Self {
        let EnrollmentDetails {
            enrollment,
            student,
            course,
        } = details;
        Self {
            id: enrollment.id,
            student: student.map(StudentResponse::from),
            course: course.map(CourseResponse::from),
            status: enrollment.status,
            enrollment_date: enrollment.enrollment_date,
            created_at: enrollment.created_at,
            updated_at: enrollment.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_strings() {
        for status in [
            EnrollmentStatus::Active,
            EnrollmentStatus::Completed,
            EnrollmentStatus::Dropped,
        ] {
            assert_eq!(EnrollmentStatus::from(status.to_string()), status);
        }
    }

    #[test]
    fn test_unknown_status_defaults_to_active() {
        assert_eq!(EnrollmentStatus::from("pending"), EnrollmentStatus::Active);
    }

    #[test]
    fn test_new_enrollment_is_active() {
        let enrollment = Enrollment::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(enrollment.status, EnrollmentStatus::Active);
        assert_eq!(enrollment.enrollment_date, enrollment.created_at);
    }

    #[test]
    fn test_dangling_sides_serialize_as_null() {
        let details = EnrollmentDetails {
            enrollment: Enrollment::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()),
            student: None,
            course: None,
        };

        let json = serde_json::to_value(EnrollmentResponse::from(details)).unwrap();
        assert!(json["student"].is_null());
        assert!(json["course"].is_null());
        assert_eq!(json["status"], "active");
    }
}
