//! gRPC implementation for AuthService.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::service::{AuthService, AuthSession};
use proto::auth::{
    auth_service_server::AuthService as AuthServiceProto, AccountInfo, AuthResponse,
    LoginRequest, RegisterRequest, VerifyTokenRequest, VerifyTokenResponse,
};

/// gRPC service wrapper for AuthService.
pub struct AuthGrpcService {
    service: Arc<dyn AuthService>,
}

impl AuthGrpcService {
    pub fn new(service: Arc<dyn AuthService>) -> Self {
        Self { service }
    }
}

fn session_to_proto(session: AuthSession) -> AuthResponse {
    let AuthSession { token, account } = session;
    AuthResponse {
        access_token: token.access_token,
        token_type: token.token_type,
        expires_in: token.expires_in,
        account: Some(AccountInfo {
            id: account.id.to_string(),
            username: account.username,
            email: account.email,
            created_at: account.created_at.to_rfc3339(),
        }),
    }
}

#[tonic::async_trait]
impl AuthServiceProto for AuthGrpcService {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<AuthResponse>, Status> {
        let req = request.into_inner();

        let session = self
            .service
            .register(req.username, req.email, req.password)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(session_to_proto(session)))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<AuthResponse>, Status> {
        let req = request.into_inner();

        let session = self
            .service
            .login(req.username, req.password)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(session_to_proto(session)))
    }

    async fn verify_token(
        &self,
        request: Request<VerifyTokenRequest>,
    ) -> Result<Response<VerifyTokenResponse>, Status> {
        let req = request.into_inner();

        match self.service.verify_token(&req.token) {
            Ok(claims) => Ok(Response::new(VerifyTokenResponse {
                account_id: claims.sub.to_string(),
                username: claims.username,
                valid: true,
            })),
            Err(_) => Ok(Response::new(VerifyTokenResponse {
                account_id: String::new(),
                username: String::new(),
                valid: false,
            })),
        }
    }
}
