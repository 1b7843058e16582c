//! Rate limiting middleware.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use tracing::{error, warn};

use common::{AppError, RateLimitConfig};

use crate::state::AppState;

/// Rate limit middleware for general endpoints.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let limit = state.config.rate_limit;
    rate_limit_internal(state, connect_info, request, next, limit).await
}

/// Rate limit middleware for auth endpoints (stricter).
pub async fn rate_limit_auth_middleware(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let limit = state.config.auth_rate_limit;
    rate_limit_internal(state, connect_info, request, next, limit).await
}

async fn rate_limit_internal(
    state: AppState,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request<Body>,
    next: Next,
    limit: RateLimitConfig,
) -> Response {
    let ip = get_client_ip(&request, connect_info);
    let identifier = format!("{}:{}", request.uri().path(), ip);

    let (count, allowed) = match state
        .limiter
        .check_rate_limit(&identifier, limit.max_requests, limit.window_seconds)
        .await
    {
        Ok(result) => result,
        Err(e) => {
            // Fail closed
            error!("Rate limit check failed for {}: {}", identifier, e);
            return rate_limit_exceeded_response(limit);
        }
    };

    if !allowed {
        warn!("Rate limit exceeded for {}", identifier);
        return rate_limit_exceeded_response(limit);
    }

    let mut response = next.run(request).await;
    set_limit_headers(
        response.headers_mut(),
        limit.max_requests,
        limit.max_requests.saturating_sub(count),
    );
    response
}

fn get_client_ip(request: &Request<Body>, connect_info: Option<ConnectInfo<SocketAddr>>) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
    {
        if let Some(ip) = forwarded.split(',').next() {
            return ip.trim().to_string();
        }
    }

    if let Some(real_ip) = request
        .headers()
        .get("X-Real-IP")
        .and_then(|h| h.to_str().ok())
    {
        return real_ip.to_string();
    }

    connect_info
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn set_limit_headers(headers: &mut HeaderMap, limit: u64, remaining: u64) {
    headers.insert("X-RateLimit-Limit", HeaderValue::from(limit));
    headers.insert("X-RateLimit-Remaining", HeaderValue::from(remaining));
}

fn rate_limit_exceeded_response(limit: RateLimitConfig) -> Response {
    let mut response = AppError::TooManyRequests.into_response();

    let headers = response.headers_mut();
    headers.insert("Retry-After", HeaderValue::from(limit.window_seconds));
    set_limit_headers(headers, limit.max_requests, 0);

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_ip_prefers_forwarded_for() {
        let request = Request::builder()
            .header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
            .header("X-Real-IP", "10.0.0.2")
            .body(Body::empty())
            .unwrap();
        assert_eq!(get_client_ip(&request, None), "203.0.113.7");
    }

    #[test]
    fn test_client_ip_falls_back_to_socket() {
        let request = Request::builder().body(Body::empty()).unwrap();
        let addr: SocketAddr = "192.0.2.4:5000".parse().unwrap();
        assert_eq!(get_client_ip(&request, Some(ConnectInfo(addr))), "192.0.2.4");
        assert_eq!(get_client_ip(&request, None), "unknown");
    }

    #[test]
    fn test_exceeded_response_headers() {
        let response = rate_limit_exceeded_response(RateLimitConfig {
            max_requests: 5,
            window_seconds: 60,
        });
        assert_eq!(response.status(), axum::http::StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()["Retry-After"], "60");
        assert_eq!(response.headers()["X-RateLimit-Limit"], "5");
        assert_eq!(response.headers()["X-RateLimit-Remaining"], "0");
    }
}
