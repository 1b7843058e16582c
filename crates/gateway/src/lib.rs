//! API Gateway Library
//!
//! HTTP/JSON API for the course manager. Requests are authenticated against
//! auth-service and translated to gRPC calls on registrar-service.

pub mod clients;
pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::clients::{AuthClient, RegistrarClient};
use crate::config::GatewayConfig;
use crate::middleware::Cache;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the gateway as an embedded component (for combined binary).
///
/// The sibling services are reached on the loopback interface.
pub async fn run_embedded(
    host: &str,
    port: u16,
    auth_port: u16,
    registrar_port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = GatewayConfig::from_env()?;
    let service_host = if host == "0.0.0.0" { "127.0.0.1" } else { host };
    config.auth_service.endpoint = format!("http://{}:{}", service_host, auth_port);
    config.registrar_service.endpoint = format!("http://{}:{}", service_host, registrar_port);

    run_server_with_config(host, port, config).await
}

/// Run the gateway against the service endpoints from the environment.
pub async fn run(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = GatewayConfig::from_env()?;
    run_server_with_config(host, port, config).await
}

/// Run the HTTP server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: GatewayConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let auth = Arc::new(AuthClient::connect(&config.auth_service).await?);
    let registrar = Arc::new(RegistrarClient::connect(&config.registrar_service).await?);
    let limiter = Arc::new(Cache::connect(&config.redis_url).await?);

    let state = AppState::new(auth, registrar, limiter, config);

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
