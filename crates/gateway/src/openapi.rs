//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::clients::AuthResponse;
use crate::handlers::auth_handler::{LoginRequest, RegisterRequest};
use crate::handlers::course_handler::CreateCourseRequest;
use crate::handlers::enrollment_handler::CreateEnrollmentRequest;
use crate::handlers::student_handler::CreateStudentRequest;
use crate::handlers::MessageResponse;
use domain::{
    AccountResponse, CourseResponse, EnrollmentResponse, EnrollmentStatus,
    StudentProfileResponse, StudentResponse,
};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth_handler::register,
        crate::handlers::auth_handler::login,
        crate::handlers::student_handler::list_students,
        crate::handlers::student_handler::get_student,
        crate::handlers::student_handler::create_student,
        crate::handlers::student_handler::delete_student,
        crate::handlers::course_handler::list_courses,
        crate::handlers::course_handler::get_course,
        crate::handlers::course_handler::create_course,
        crate::handlers::course_handler::delete_course,
        crate::handlers::enrollment_handler::list_enrollments,
        crate::handlers::enrollment_handler::create_enrollment,
        crate::handlers::enrollment_handler::delete_enrollment,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            AccountResponse,
            CreateStudentRequest,
            StudentResponse,
            StudentProfileResponse,
            CreateCourseRequest,
            CourseResponse,
            CreateEnrollmentRequest,
            EnrollmentResponse,
            EnrollmentStatus,
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Account registration and login"),
        (name = "Students", description = "Student records"),
        (name = "Courses", description = "Course catalogue"),
        (name = "Enrollments", description = "Enrolling students in courses"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/register",
            "/api/auth/login",
            "/api/students",
            "/api/students/{id}",
            "/api/courses",
            "/api/courses/{id}",
            "/api/enrollments",
            "/api/enrollments/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
