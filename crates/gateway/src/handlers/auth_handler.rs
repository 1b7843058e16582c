//! Authentication handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;

use crate::clients::AuthResponse;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

static USERNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("valid username pattern"));

/// Account registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Login name (letters, digits, `_`, `.`, `-`)
    #[validate(
        length(min = 3, max = 32, message = "Username must be 3-32 characters"),
        regex(path = *USERNAME_REGEX, message = "Username may only contain letters, digits, '_', '.' and '-'")
    )]
    #[schema(example = "jdoe", min_length = 3, max_length = 32)]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jdoe@example.com")]
    pub email: String,
    /// Password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "jdoe")]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account registered", body = AuthResponse),
        (status = 400, description = "Validation error or username/email taken"),
        (status = 429, description = "Too many requests")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let response = state
        .auth
        .register(payload.username, payload.email, payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Login and get a JWT
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 429, description = "Too many requests")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let response = state.auth.login(payload.username, payload.password).await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(username: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: "jdoe@example.com".to_string(),
            password: "SecurePass123!".to_string(),
        }
    }

    #[test]
    fn test_username_rules() {
        assert!(register("jdoe").validate().is_ok());
        assert!(register("j.doe-2_x").validate().is_ok());
        assert!(register("jd").validate().is_err());
        assert!(register("j doe").validate().is_err());
        assert!(register(&"a".repeat(33)).validate().is_err());
    }

    #[test]
    fn test_short_password_rejected() {
        let mut request = register("jdoe");
        request.password = "short".to_string();
        assert!(request.validate().is_err());
    }
}
