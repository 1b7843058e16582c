//! Gateway configuration.

use common::{env_first, env_or, env_parse, ConfigError, GrpcClientConfig, RateLimitConfig};

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Auth service gRPC endpoint
    pub auth_service: GrpcClientConfig,
    /// Registrar service gRPC endpoint
    pub registrar_service: GrpcClientConfig,
    /// Redis URL for rate limiting
    pub redis_url: String,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Limit for authenticated API routes
    pub rate_limit: RateLimitConfig,
    /// Stricter limit for register/login
    pub auth_rate_limit: RateLimitConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            auth_service: GrpcClientConfig::from_env(
                &["AUTH_SERVICE_URL"],
                &defaults.auth_service.endpoint,
            )?,
            registrar_service: GrpcClientConfig::from_env(
                &["REGISTRAR_SERVICE_URL"],
                &defaults.registrar_service.endpoint,
            )?,
            redis_url: env_first(&["GATEWAY_REDIS_URL", "REDIS_URL"])
                .unwrap_or(defaults.redis_url),
            host: env_or("GATEWAY_HOST", &defaults.host),
            port: env_parse("GATEWAY_PORT", defaults.port)?,
            rate_limit: RateLimitConfig::from_env(
                "RATE_LIMIT_REQUESTS",
                "RATE_LIMIT_WINDOW_SECONDS",
                defaults.rate_limit,
            )?,
            auth_rate_limit: RateLimitConfig::from_env(
                "RATE_LIMIT_AUTH_REQUESTS",
                "RATE_LIMIT_AUTH_WINDOW_SECONDS",
                defaults.auth_rate_limit,
            )?,
        })
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            auth_service: GrpcClientConfig {
                endpoint: "http://localhost:50051".to_string(),
                ..GrpcClientConfig::default()
            },
            registrar_service: GrpcClientConfig {
                endpoint: "http://localhost:50052".to_string(),
                ..GrpcClientConfig::default()
            },
            redis_url: "redis://127.0.0.1:6379".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            rate_limit: RateLimitConfig::default(),
            auth_rate_limit: RateLimitConfig {
                max_requests: 10,
                window_seconds: 60,
            },
        }
    }
}
