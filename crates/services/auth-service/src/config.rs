//! Auth service configuration.

use common::{env_or, env_parse, ConfigError, GrpcClientConfig, JwtConfig};
use domain::{DEFAULT_JWT_EXPIRATION_HOURS, MIN_JWT_SECRET_LENGTH};

/// Auth service configuration.
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Token signing settings
    pub jwt: JwtConfig,
    /// Registrar service gRPC endpoint (accounts live there)
    pub registrar: GrpcClientConfig,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
}

impl AuthServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Fails when `JWT_SECRET` is missing or shorter than 32 characters.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            jwt: JwtConfig::from_env(MIN_JWT_SECRET_LENGTH, DEFAULT_JWT_EXPIRATION_HOURS)?,
            registrar: GrpcClientConfig::from_env(
                &["REGISTRAR_SERVICE_URL", "AUTH_SERVICE_REGISTRAR_URL"],
                "http://localhost:50052",
            )?,
            host: env_or("AUTH_SERVICE_HOST", "0.0.0.0"),
            port: env_parse("AUTH_SERVICE_PORT", 50051)?,
        })
    }
}
