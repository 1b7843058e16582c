//! Course handlers.

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
use domain::{CourseResponse, NewCourse, MAX_COURSE_CREDITS, MIN_COURSE_CAPACITY, MIN_COURSE_CREDITS};

use super::MessageResponse;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Course creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, message = "Course code is required"))]
    #[schema(example = "CS101")]
    pub course_code: String,
    #[validate(length(min = 1, message = "Course name is required"))]
    #[schema(example = "Introduction to Programming")]
    pub course_name: String,
    #[validate(length(min = 1, message = "Instructor is required"))]
    #[schema(example = "Dr. Smith")]
    pub instructor: String,
    #[validate(range(
        min = MIN_COURSE_CREDITS,
        max = MAX_COURSE_CREDITS,
        message = "Credits must be between 1 and 6"
    ))]
    #[schema(example = 3, minimum = 1, maximum = 6)]
    pub credits: i32,
    /// Seats offered; defaults to 30
    #[validate(range(min = MIN_COURSE_CAPACITY, message = "Capacity must be at least 1"))]
    #[schema(example = 30, minimum = 1)]
    pub capacity: Option<i32>,
}

impl From<CreateCourseRequest> for NewCourse {
    fn from(request: CreateCourseRequest) -> Self {
        Self {
            course_code: request.course_code,
            course_name: request.course_name,
            instructor: request.instructor,
            credits: request.credits,
            capacity: request.capacity,
        }
    }
}

/// Create course routes
pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route("/:id", get(get_course).delete(delete_course))
}

/// List courses
#[utoipa::path(
    get,
    path = "/api/courses",
    tag = "Courses",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All courses", body = Vec<CourseResponse>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_courses(State(state): State<AppState>) -> AppResult<Json<Vec<CourseResponse>>> {
    let courses = state.registrar.list_courses().await?;
    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

/// Get a course
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    tag = "Courses",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course found", body = CourseResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CourseResponse>> {
    let course = state.registrar.get_course(id).await?;
    Ok(Json(course.into()))
}

/// Create a course
#[utoipa::path(
    post,
    path = "/api/courses",
    tag = "Courses",
    security(("bearer_auth" = [])),
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Validation error or course code taken"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCourseRequest>,
) -> AppResult<(StatusCode, Json<CourseResponse>)> {
    let course = state.registrar.create_course(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(course.into())))
}

/// Delete a course
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    tag = "Courses",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.registrar.delete_course(id).await?;
    Ok(Json(MessageResponse::new("Course deleted successfully")))
}
