//! Enrollment handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get},
    Extension, Router,
};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::EnrollmentResponse;

use super::MessageResponse;
use crate::extractors::ValidatedJson;
use crate::middleware::CurrentAccount;
use crate::state::AppState;

/// Enrollment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnrollmentRequest {
    pub student_id: Uuid,
    pub course_id: Uuid,
}

/// Create enrollment routes
pub fn enrollment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_enrollments).post(create_enrollment))
        .route("/:id", delete(delete_enrollment))
}

/// List enrollments joined with their student and course
#[utoipa::path(
    get,
    path = "/api/enrollments",
    tag = "Enrollments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All enrollments, newest first", body = Vec<EnrollmentResponse>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_enrollments(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<EnrollmentResponse>>> {
    let enrollments = state.registrar.list_enrollments().await?;
    Ok(Json(enrollments.into_iter().map(Into::into).collect()))
}

/// Enroll a student in a course
#[utoipa::path(
    post,
    path = "/api/enrollments",
    tag = "Enrollments",
    security(("bearer_auth" = [])),
    request_body = CreateEnrollmentRequest,
    responses(
        (status = 201, description = "Student enrolled", body = EnrollmentResponse),
        (status = 400, description = "Course is full or already enrolled"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Student or course not found")
    )
)]
pub async fn create_enrollment(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
    ValidatedJson(payload): ValidatedJson<CreateEnrollmentRequest>,
) -> AppResult<(StatusCode, Json<EnrollmentResponse>)> {
    let details = state
        .registrar
        .create_enrollment(payload.student_id, payload.course_id)
        .await?;

    info!(
        account = %account.username,
        enrollment_id = %details.enrollment.id,
        "Enrollment created"
    );

    Ok((StatusCode::CREATED, Json(details.into())))
}

/// Withdraw an enrollment
#[utoipa::path(
    delete,
    path = "/api/enrollments/{id}",
    tag = "Enrollments",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Enrollment id")),
    responses(
        (status = 200, description = "Enrollment deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Enrollment not found")
    )
)]
pub async fn delete_enrollment(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.registrar.delete_enrollment(id).await?;
    info!(account = %account.username, enrollment_id = %id, "Enrollment deleted");
    Ok(Json(MessageResponse::new("Enrollment deleted successfully")))
}
