//! Authentication middleware.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use uuid::Uuid;

use common::AppError;

use crate::state::AppState;

/// Account behind the bearer token of the current request.
#[derive(Debug, Clone)]
pub struct CurrentAccount {
    pub id: Uuid,
    pub username: String,
}

/// Validates the bearer token via auth-service and stores the
/// [`CurrentAccount`] in the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(AppError::Unauthorized)?;

    let claims = state
        .auth
        .verify_token(bearer.token())
        .await?
        .ok_or(AppError::Unauthorized)?;

    request.extensions_mut().insert(CurrentAccount {
        id: claims.account_id,
        username: claims.username,
    });

    Ok(next.run(request).await)
}
