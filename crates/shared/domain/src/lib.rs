//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Accounts, students, courses and enrollments are shared across the
//! registrar, auth and gateway crates.

pub mod account;
pub mod constants;
pub mod course;
pub mod enrollment;
pub mod error;
pub mod password;
pub mod student;

pub use account::{Account, AccountResponse};
pub use constants::*;
pub use course::{Course, CourseResponse, NewCourse};
pub use enrollment::{Enrollment, EnrollmentDetails, EnrollmentResponse, EnrollmentStatus};
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use student::{NewStudent, Student, StudentDetails, StudentProfileResponse, StudentResponse};
