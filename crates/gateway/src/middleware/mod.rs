//! Middleware for authentication and rate limiting.

mod auth;
mod cache;
mod rate_limit;

pub use auth::{auth_middleware, CurrentAccount};
pub use cache::{Cache, RateLimitStore};
pub use rate_limit::{rate_limit_auth_middleware, rate_limit_middleware};

#[cfg(any(test, feature = "test-utils"))]
pub use cache::MockRateLimitStore;
