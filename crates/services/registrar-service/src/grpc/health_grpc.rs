//! gRPC implementation for HealthService.

use tonic::{Request, Response, Status};
use tracing::warn;

use crate::infra::Database;
use proto::registrar::{
    health_service_server::HealthService as HealthServiceProto, HealthCheckRequest,
    HealthCheckResponse,
};

/// Reports whether the database behind the registrar answers.
pub struct HealthGrpcService {
    db: Database,
}

impl HealthGrpcService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[tonic::async_trait]
impl HealthServiceProto for HealthGrpcService {
    async fn check(
        &self,
        _request: Request<HealthCheckRequest>,
    ) -> Result<Response<HealthCheckResponse>, Status> {
        let database = match self.db.ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Database ping failed: {}", e);
                false
            }
        };

        Ok(Response::new(HealthCheckResponse { database }))
    }
}
