//! Unified error handling for HTTP and gRPC.
//!
//! Provides a single error type that can be converted to:
//! - Axum HTTP responses (for API gateway)
//! - Tonic gRPC status codes (for microservices)
//!
//! Errors that cross a gRPC hop are rebuilt from the status on the calling
//! side, so the gateway answers with the same HTTP status and message the
//! registrar produced.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;
use tonic::Status;

const CAPACITY_EXCEEDED_MESSAGE: &str = "Course is full";
const DUPLICATE_ENROLLMENT_MESSAGE: &str = "Already enrolled in this course";
const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";
const NOT_FOUND_SUFFIX: &str = " not found";

/// Application error types with support for both HTTP and gRPC.
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Resource errors
    #[error("{0} not found")]
    NotFound(String),

    // Enrollment admission
    #[error("Course is full")]
    CapacityExceeded,

    #[error("Already enrolled in this course")]
    DuplicateEnrollment,

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // Rate limiting
    #[error("Too many requests")]
    TooManyRequests,

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[cfg(feature = "jwt")]
    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[cfg(feature = "cache")]
    #[error("Cache error")]
    Cache(#[from] redis::RedisError),

    // gRPC specific
    #[error("Service unavailable")]
    ServiceUnavailable(String),

    #[error("gRPC error: {0}")]
    Grpc(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    code: &'static str,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::CapacityExceeded => "COURSE_FULL",
            AppError::DuplicateEnrollment => "DUPLICATE_ENROLLMENT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::TooManyRequests => "TOO_MANY_REQUESTS",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            #[cfg(feature = "jwt")]
            AppError::Jwt(_) => "AUTH_ERROR",
            #[cfg(feature = "cache")]
            AppError::Cache(_) => "CACHE_ERROR",
            AppError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            AppError::Grpc(_) => "GRPC_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            #[cfg(feature = "jwt")]
            AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::CapacityExceeded
            | AppError::DuplicateEnrollment
            | AppError::Validation(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),

            // Hide details for internal/security errors
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            #[cfg(feature = "jwt")]
            AppError::Jwt(e) => {
                tracing::error!("JWT error: {:?}", e);
                "Invalid or expired token".to_string()
            }
            #[cfg(feature = "cache")]
            AppError::Cache(e) => {
                tracing::error!("Cache error: {:?}", e);
                "A cache error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            AppError::ServiceUnavailable(service) => {
                tracing::error!("Service unavailable: {}", service);
                format!("Service {} is unavailable", service)
            }
            AppError::Grpc(msg) => {
                tracing::error!("gRPC error: {}", msg);
                "A service communication error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            code: self.code(),
            message: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// gRPC Status (Tonic)
// =============================================================================

impl From<AppError> for Status {
    fn from(err: AppError) -> Self {
        let code = match &err {
            AppError::Unauthorized | AppError::InvalidCredentials => tonic::Code::Unauthenticated,
            #[cfg(feature = "jwt")]
            AppError::Jwt(_) => tonic::Code::Unauthenticated,
            AppError::NotFound(_) => tonic::Code::NotFound,
            AppError::CapacityExceeded => tonic::Code::FailedPrecondition,
            AppError::DuplicateEnrollment => tonic::Code::AlreadyExists,
            AppError::Validation(_) | AppError::BadRequest(_) => tonic::Code::InvalidArgument,
            AppError::TooManyRequests => tonic::Code::ResourceExhausted,
            AppError::ServiceUnavailable(_) => tonic::Code::Unavailable,
            _ => tonic::Code::Internal,
        };

        Status::new(code, err.user_message())
    }
}

impl From<Status> for AppError {
    fn from(status: Status) -> Self {
        let message = status.message();
        match status.code() {
            tonic::Code::Unauthenticated if message == INVALID_CREDENTIALS_MESSAGE => {
                AppError::InvalidCredentials
            }
            tonic::Code::Unauthenticated => AppError::Unauthorized,
            tonic::Code::NotFound => AppError::NotFound(
                message
                    .strip_suffix(NOT_FOUND_SUFFIX)
                    .unwrap_or(message)
                    .to_string(),
            ),
            tonic::Code::FailedPrecondition if message == CAPACITY_EXCEEDED_MESSAGE => {
                AppError::CapacityExceeded
            }
            tonic::Code::AlreadyExists if message == DUPLICATE_ENROLLMENT_MESSAGE => {
                AppError::DuplicateEnrollment
            }
            tonic::Code::FailedPrecondition | tonic::Code::AlreadyExists => {
                AppError::BadRequest(message.to_string())
            }
            tonic::Code::InvalidArgument => AppError::Validation(message.to_string()),
            tonic::Code::ResourceExhausted => AppError::TooManyRequests,
            tonic::Code::Unavailable => AppError::ServiceUnavailable(message.to_string()),
            _ => AppError::Grpc(message.to_string()),
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::Password(msg) => AppError::Validation(msg),
            DomainError::NotFound(entity) => AppError::NotFound(entity),
            DomainError::CapacityExceeded => AppError::CapacityExceeded,
            DomainError::DuplicateEnrollment => AppError::DuplicateEnrollment,
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::NotFound(entity.to_string()))
    }
}

/// Convenience constructors
impl AppError {
    pub fn not_found(entity: impl Into<String>) -> Self {
        AppError::NotFound(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn grpc(msg: impl Into<String>) -> Self {
        AppError::Grpc(msg.into())
    }

    pub fn service_unavailable(service: impl Into<String>) -> Self {
        AppError::ServiceUnavailable(service.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn through_grpc(err: AppError) -> AppError {
        AppError::from(Status::from(err))
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(AppError::not_found("Student").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::CapacityExceeded.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::DuplicateEnrollment.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::validation("bad").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(AppError::not_found("Course").user_message(), "Course not found");
        assert_eq!(AppError::CapacityExceeded.user_message(), "Course is full");
        assert_eq!(
            AppError::DuplicateEnrollment.user_message(),
            "Already enrolled in this course"
        );
        assert_eq!(
            AppError::internal("connection reset").user_message(),
            "An internal error occurred"
        );
    }

    #[test]
    fn test_enrollment_errors_survive_grpc() {
        assert!(matches!(
            through_grpc(AppError::CapacityExceeded),
            AppError::CapacityExceeded
        ));
        assert!(matches!(
            through_grpc(AppError::DuplicateEnrollment),
            AppError::DuplicateEnrollment
        ));
        match through_grpc(AppError::not_found("Enrollment")) {
            AppError::NotFound(entity) => assert_eq!(entity, "Enrollment"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_auth_errors_survive_grpc() {
        assert!(matches!(
            through_grpc(AppError::InvalidCredentials),
            AppError::InvalidCredentials
        ));
        assert!(matches!(
            through_grpc(AppError::Unauthorized),
            AppError::Unauthorized
        ));
    }

    #[test]
    fn test_validation_message_survives_grpc() {
        match through_grpc(AppError::validation("Email is already registered")) {
            AppError::Validation(msg) => assert_eq!(msg, "Email is already registered"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_internal_details_hidden_after_grpc() {
        let err = through_grpc(AppError::internal("pool exhausted"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.user_message().contains("pool exhausted"));
    }

    #[test]
    fn test_domain_error_conversion() {
        assert!(matches!(
            AppError::from(DomainError::CapacityExceeded),
            AppError::CapacityExceeded
        ));
        assert!(matches!(
            AppError::from(DomainError::password("too short")),
            AppError::Validation(_)
        ));
    }

    #[test]
    fn test_ok_or_not_found() {
        let missing: Option<u8> = None;
        match missing.ok_or_not_found("Course") {
            Err(AppError::NotFound(entity)) => assert_eq!(entity, "Course"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = AppError::CapacityExceeded.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "COURSE_FULL");
        assert_eq!(body["message"], "Course is full");
    }
}
