//! Application state for dependency injection.

use std::sync::Arc;

use crate::clients::{AuthApi, RegistrarApi};
use crate::config::GatewayConfig;
use crate::middleware::RateLimitStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthApi>,
    pub registrar: Arc<dyn RegistrarApi>,
    pub limiter: Arc<dyn RateLimitStore>,
    pub config: GatewayConfig,
}

impl AppState {
    pub fn new(
        auth: Arc<dyn AuthApi>,
        registrar: Arc<dyn RegistrarApi>,
        limiter: Arc<dyn RateLimitStore>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            auth,
            registrar,
            limiter,
            config,
        }
    }
}
