//! Auth Service Library
//!
//! Registers and signs in accounts over gRPC. Accounts are stored by the
//! registrar service; this crate hashes passwords and issues JWTs.

pub mod client;
pub mod config;
pub mod grpc;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tracing::info;

use crate::client::AccountClient;
use crate::config::AuthServiceConfig;
use crate::grpc::AuthGrpcService;
use crate::service::Authenticator;

/// Run the auth service as an embedded component (for combined binary).
///
/// The registrar is reached on the loopback interface.
pub async fn run_embedded(
    host: &str,
    port: u16,
    registrar_port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AuthServiceConfig::from_env()?;
    let service_host = if host == "0.0.0.0" { "127.0.0.1" } else { host };
    config.registrar.endpoint = format!("http://{}:{}", service_host, registrar_port);
    run_server_with_config(host, port, config).await
}

/// Run the auth service against the registrar endpoint from the environment.
pub async fn run(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = AuthServiceConfig::from_env()?;
    run_server_with_config(host, port, config).await
}

/// Run the gRPC server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: AuthServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let account_client = AccountClient::connect(&config.registrar).await?;

    let auth_service = Arc::new(Authenticator::new(Arc::new(account_client), config.jwt)?);
    let grpc_service = AuthGrpcService::new(auth_service);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Auth service listening on {}", addr);

    Server::builder()
        .add_service(proto::AuthServiceServer::new(grpc_service))
        .serve(addr)
        .await?;

    Ok(())
}
