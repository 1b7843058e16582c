//! gRPC client for auth-service.

use async_trait::async_trait;
use serde::Serialize;
use tonic::transport::Channel;
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;

use common::{AppError, AppResult, GrpcClientConfig};
use domain::AccountResponse;
use proto::auth::{
    auth_service_client::AuthServiceClient as ProtoAuthServiceClient, AuthResponse as ProtoAuth,
    LoginRequest, RegisterRequest, VerifyTokenRequest,
};

use super::convert::{parse_time, parse_uuid};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Issued token together with the signed-in account.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// JWT access token
    pub token: String,
    /// Always "Bearer"
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user: AccountResponse,
}

/// Verified token claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub account_id: Uuid,
    pub username: String,
}

/// Authentication operations used by the HTTP layer.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn register(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> AppResult<AuthResponse>;

    async fn login(&self, username: String, password: String) -> AppResult<AuthResponse>;

    /// `None` when the token is invalid or expired
    async fn verify_token(&self, token: &str) -> AppResult<Option<Claims>>;
}

/// gRPC client wrapper for auth-service.
pub struct AuthClient {
    client: ProtoAuthServiceClient<Channel>,
}

impl AuthClient {
    /// Connect to auth-service.
    pub async fn connect(config: &GrpcClientConfig) -> Result<Self, tonic::transport::Error> {
        debug!("Connecting to auth-service at {}", config.endpoint);
        let channel = super::open_channel(config).await?;
        Ok(Self {
            client: ProtoAuthServiceClient::new(channel),
        })
    }
}

fn proto_to_auth(proto: ProtoAuth) -> AppResult<AuthResponse> {
    let account = proto
        .account
        .ok_or_else(|| AppError::internal("auth-service returned no account"))?;

    Ok(AuthResponse {
        token: proto.access_token,
        token_type: proto.token_type,
        expires_in: proto.expires_in,
        user: AccountResponse {
            id: parse_uuid(&account.id)?,
            username: account.username,
            email: account.email,
            created_at: parse_time(&account.created_at)?,
        },
    })
}

#[async_trait]
impl AuthApi for AuthClient {
    async fn register(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> AppResult<AuthResponse> {
        let request = tonic::Request::new(RegisterRequest {
            username,
            email,
            password,
        });

        let mut client = self.client.clone();
        let response = client.register(request).await.map_err(AppError::from)?;
        proto_to_auth(response.into_inner())
    }

    async fn login(&self, username: String, password: String) -> AppResult<AuthResponse> {
        let request = tonic::Request::new(LoginRequest { username, password });

        let mut client = self.client.clone();
        let response = client.login(request).await.map_err(AppError::from)?;
        proto_to_auth(response.into_inner())
    }

    async fn verify_token(&self, token: &str) -> AppResult<Option<Claims>> {
        let request = tonic::Request::new(VerifyTokenRequest {
            token: token.to_string(),
        });

        let mut client = self.client.clone();
        let response = client.verify_token(request).await.map_err(AppError::from)?;
        let proto = response.into_inner();

        if !proto.valid {
            return Ok(None);
        }

        Ok(Some(Claims {
            account_id: parse_uuid(&proto.account_id)?,
            username: proto.username,
        }))
    }
}
