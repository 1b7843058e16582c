//! gRPC protocol buffer definitions.
//!
//! This crate contains the generated gRPC service definitions for:
//! - AuthService: account authentication (register, login, verify)
//! - AccountService, StudentService, CourseService, EnrollmentService:
//!   the registrar that owns the course-management database
//! - HealthService: registrar and database reachability

/// Authentication service definitions.
pub mod auth {
    tonic::include_proto!("auth");
}

/// Registrar service definitions.
pub mod registrar {
    tonic::include_proto!("registrar");
}

// Re-export commonly used items
pub use auth::auth_service_client::AuthServiceClient;
pub use auth::auth_service_server::{AuthService, AuthServiceServer};
pub use registrar::account_service_client::AccountServiceClient;
pub use registrar::account_service_server::{AccountService, AccountServiceServer};
pub use registrar::course_service_client::CourseServiceClient;
pub use registrar::course_service_server::{CourseService, CourseServiceServer};
pub use registrar::enrollment_service_client::EnrollmentServiceClient;
pub use registrar::enrollment_service_server::{EnrollmentService, EnrollmentServiceServer};
pub use registrar::health_service_client::HealthServiceClient;
pub use registrar::health_service_server::{HealthService, HealthServiceServer};
pub use registrar::student_service_client::StudentServiceClient;
pub use registrar::student_service_server::{StudentService, StudentServiceServer};
