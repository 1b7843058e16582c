//! Repository layer for data access.

pub mod entities;
mod account_repository;
mod course_repository;
mod enrollment_repository;
mod student_repository;

pub use account_repository::{AccountRepository, AccountStore};
pub use course_repository::{CourseRepository, CourseStore};
pub use enrollment_repository::{EnrollmentRepository, EnrollmentStore, WithdrawReport};
pub use student_repository::{StudentRepository, StudentStore};

#[cfg(any(test, feature = "test-utils"))]
pub use account_repository::MockAccountRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use course_repository::MockCourseRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use enrollment_repository::MockEnrollmentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use student_repository::MockStudentRepository;

use common::AppError;
use sea_orm::{DbErr, SqlErr};

/// Map a unique-index violation to `conflict`, anything else to a database error.
pub(crate) fn on_unique_violation(err: DbErr, conflict: impl FnOnce() -> AppError) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!("Unique constraint violated: {}", detail);
            conflict()
        }
        _ => AppError::from(err),
    }
}
