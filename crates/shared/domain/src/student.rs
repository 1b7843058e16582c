//! Student domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::course::{Course, CourseResponse};
use crate::error::{DomainError, DomainResult};

/// Student domain entity.
///
/// `student_number` is the school-issued identifier (`studentId` on the wire);
/// `id` is the record identifier enrollments point at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub student_number: String,
    /// Courses this student holds an enrollment in (set semantics)
    pub enrolled_courses: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// Check whether the course is in the enrolled set
    pub fn is_enrolled_in(&self, course_id: Uuid) -> bool {
        self.enrolled_courses.contains(&course_id)
    }

    /// Add a course to the enrolled set.
    ///
    /// Returns false if it was already present.
    pub fn add_course(&mut self, course_id: Uuid) -> bool {
        if self.is_enrolled_in(course_id) {
            return false;
        }
        self.enrolled_courses.push(course_id);
        self.updated_at = Utc::now();
        true
    }

    /// Remove every occurrence of a course from the enrolled set.
    ///
    /// Returns false if it was not present.
    pub fn remove_course(&mut self, course_id: Uuid) -> bool {
        let before = self.enrolled_courses.len();
        self.enrolled_courses.retain(|id| *id != course_id);
        let removed = self.enrolled_courses.len() != before;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }
}

/// Student registration data.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub student_number: String,
}

impl NewStudent {
    /// Trim every field and lower-case the email.
    pub fn normalized(self) -> DomainResult<Self> {
        let name = self.name.trim().to_string();
        let email = self.email.trim().to_lowercase();
        let student_number = self.student_number.trim().to_string();

        if name.is_empty() {
            return Err(DomainError::validation("Name is required"));
        }
        if email.is_empty() {
            return Err(DomainError::validation("Email is required"));
        }
        if student_number.is_empty() {
            return Err(DomainError::validation("Student ID is required"));
        }

        Ok(Self {
            name,
            email,
            student_number,
        })
    }
}

/// Student together with the course records behind `enrolled_courses`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDetails {
    pub student: Student,
    pub courses: Vec<Course>,
}

/// Student record as stored (course references as ids)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// School-issued student identifier
    #[serde(rename = "studentId")]
    pub student_number: String,
    /// Ids of the courses the student is enrolled in
    pub enrolled_courses: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            name: student.name,
            email: student.email,
            student_number: student.student_number,
            enrolled_courses: student.enrolled_courses,
            created_at: student.created_at,
            updated_at: student.updated_at,
        }
    }
}

/// Student with enrolled courses resolved to course records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct StudentProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// School-issued student identifier
    #[serde(rename = "studentId")]
    pub student_number: String,
    pub enrolled_courses: Vec<CourseResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StudentDetails> for StudentProfileResponse {
    fn from(details: StudentDetails) -> Self {
        let StudentDetails { student, courses } = details;
        Self {
            id: student.id,
            name: student.name,
            email: student.email,
            student_number: student.student_number,
            enrolled_courses: courses.into_iter().map(CourseResponse::from).collect(),
            created_at: student.created_at,
            updated_at: student.updated_at,
        }
    }
}
