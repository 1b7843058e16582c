//! gRPC clients for calling microservices.

mod auth_client;
mod convert;
mod registrar_client;

pub use auth_client::{AuthApi, AuthClient, AuthResponse, Claims};
pub use registrar_client::{RegistrarApi, RegistrarClient};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_client::MockAuthApi;
#[cfg(any(test, feature = "test-utils"))]
pub use registrar_client::MockRegistrarApi;

use tonic::transport::{Channel, Endpoint};

use common::GrpcClientConfig;

/// Open a channel with the configured timeouts.
async fn open_channel(config: &GrpcClientConfig) -> Result<Channel, tonic::transport::Error> {
    Endpoint::from_shared(config.endpoint.clone())?
        .connect_timeout(config.connect_timeout())
        .timeout(config.request_timeout())
        .connect()
        .await
}
