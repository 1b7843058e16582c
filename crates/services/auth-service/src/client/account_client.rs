//! gRPC client for the registrar's account service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tonic::transport::{Channel, Endpoint};
use tracing::debug;

use common::{AppError, AppResult, GrpcClientConfig};
use domain::Account;
use proto::registrar::{
    account_service_client::AccountServiceClient as ProtoAccountServiceClient,
    CreateAccountRequest, GetAccountByUsernameRequest, InternalAccountResponse,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Account operations needed by auth-service.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AccountServiceClient: Send + Sync {
    /// Find account by username, including its password hash
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>>;

    /// Create a new account.
    ///
    /// The returned account carries no password hash.
    async fn create(
        &self,
        username: String,
        email: String,
        password_hash: String,
    ) -> AppResult<Account>;
}

/// gRPC client wrapper for the registrar account service.
pub struct AccountClient {
    client: ProtoAccountServiceClient<Channel>,
}

impl AccountClient {
    /// Connect to the registrar service.
    pub async fn connect(config: &GrpcClientConfig) -> Result<Self, tonic::transport::Error> {
        debug!("Connecting to registrar-service at {}", config.endpoint);
        let channel = Endpoint::from_shared(config.endpoint.clone())?
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .connect()
            .await?;
        Ok(Self {
            client: ProtoAccountServiceClient::new(channel),
        })
    }
}

#[async_trait]
impl AccountServiceClient for AccountClient {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        let request = tonic::Request::new(GetAccountByUsernameRequest {
            username: username.to_string(),
        });

        let mut client = self.client.clone();
        match client.get_account_by_username_internal(request).await {
            Ok(response) => Ok(Some(internal_proto_to_account(response.into_inner())?)),
            Err(status) if status.code() == tonic::Code::NotFound => Ok(None),
            Err(status) => Err(AppError::from(status)),
        }
    }

    async fn create(
        &self,
        username: String,
        email: String,
        password_hash: String,
    ) -> AppResult<Account> {
        let request = tonic::Request::new(CreateAccountRequest {
            username,
            email,
            password_hash,
        });

        let mut client = self.client.clone();
        let proto = client
            .create_account(request)
            .await
            .map_err(AppError::from)?
            .into_inner();

        Ok(Account {
            id: parse_id(&proto.id)?,
            username: proto.username,
            email: proto.email,
            password_hash: String::new(),
            created_at: parse_time(&proto.created_at, "created_at")?,
            updated_at: parse_time(&proto.updated_at, "updated_at")?,
        })
    }
}

fn parse_id(raw: &str) -> AppResult<uuid::Uuid> {
    raw.parse()
        .map_err(|_| AppError::internal("Invalid UUID from registrar-service"))
}

fn parse_time(raw: &str, field: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::internal(format!("Invalid {} from registrar-service", field)))
}

/// Convert proto InternalAccountResponse to domain Account (includes password hash).
fn internal_proto_to_account(proto: InternalAccountResponse) -> AppResult<Account> {
    Ok(Account {
        id: parse_id(&proto.id)?,
        username: proto.username,
        email: proto.email,
        password_hash: proto.password_hash,
        created_at: parse_time(&proto.created_at, "created_at")?,
        updated_at: parse_time(&proto.updated_at, "updated_at")?,
    })
}
