//! Student handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::{NewStudent, StudentProfileResponse, StudentResponse};

use super::MessageResponse;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Student creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// School-issued student identifier
    #[validate(length(min = 1, message = "Student ID is required"))]
    #[schema(example = "S-2024-001")]
    pub student_id: String,
}

impl From<CreateStudentRequest> for NewStudent {
    fn from(request: CreateStudentRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            student_number: request.student_id,
        }
    }
}

/// Create student routes
pub fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_students).post(create_student))
        .route("/:id", get(get_student).delete(delete_student))
}

/// List students with their enrolled courses
#[utoipa::path(
    get,
    path = "/api/students",
    tag = "Students",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All students", body = Vec<StudentProfileResponse>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_students(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<StudentProfileResponse>>> {
    let students = state.registrar.list_students().await?;
    Ok(Json(students.into_iter().map(Into::into).collect()))
}

/// Get a student with their enrolled courses
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    tag = "Students",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student found", body = StudentProfileResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<StudentProfileResponse>> {
    let student = state.registrar.get_student(id).await?;
    Ok(Json(student.into()))
}

/// Create a student
#[utoipa::path(
    post,
    path = "/api/students",
    tag = "Students",
    security(("bearer_auth" = [])),
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 400, description = "Validation error or email/student id taken"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateStudentRequest>,
) -> AppResult<(StatusCode, Json<StudentResponse>)> {
    let student = state.registrar.create_student(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(student.into())))
}

/// Delete a student
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    tag = "Students",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.registrar.delete_student(id).await?;
    Ok(Json(MessageResponse::new("Student deleted successfully")))
}
