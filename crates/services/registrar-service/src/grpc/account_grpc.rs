//! gRPC implementation for AccountService.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use super::convert::{account_to_proto, internal_account_to_proto};
use crate::service::AccountService;
use proto::registrar::{
    account_service_server::AccountService as AccountServiceProto, AccountResponse,
    CreateAccountRequest, GetAccountByUsernameRequest, InternalAccountResponse,
};

/// gRPC service wrapper for AccountService.
pub struct AccountGrpcService {
    service: Arc<dyn AccountService>,
}

impl AccountGrpcService {
    pub fn new(service: Arc<dyn AccountService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl AccountServiceProto for AccountGrpcService {
    async fn get_account_by_username_internal(
        &self,
        request: Request<GetAccountByUsernameRequest>,
    ) -> Result<Response<InternalAccountResponse>, Status> {
        let req = request.into_inner();

        let account = self
            .service
            .get_account_by_username(&req.username)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(internal_account_to_proto(&account)))
    }

    async fn create_account(
        &self,
        request: Request<CreateAccountRequest>,
    ) -> Result<Response<AccountResponse>, Status> {
        let req = request.into_inner();

        let account = self
            .service
            .create_account(req.username, req.email, req.password_hash)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(account_to_proto(&account)))
    }
}
