//! Service layer - business logic.

mod account_service;
mod course_service;
mod enrollment_service;
mod student_service;

pub use account_service::{AccountManager, AccountService};
pub use course_service::{CourseManager, CourseService};
pub use enrollment_service::{EnrollmentManager, EnrollmentService};
pub use student_service::{StudentManager, StudentService};
