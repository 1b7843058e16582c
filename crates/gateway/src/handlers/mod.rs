//! HTTP handlers, one module per resource.

pub mod auth_handler;
pub mod course_handler;
pub mod enrollment_handler;
pub mod health_handler;
pub mod student_handler;

pub use auth_handler::auth_routes;
pub use course_handler::course_routes;
pub use enrollment_handler::enrollment_routes;
pub use health_handler::health_routes;
pub use student_handler::student_routes;

use serde::Serialize;
use utoipa::ToSchema;

/// Confirmation body for deletes.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Student deleted successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
