//! gRPC implementation for EnrollmentService.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use super::convert::{details_to_proto, parse_uuid};
use crate::service::EnrollmentService;
use proto::registrar::{
    enrollment_service_server::EnrollmentService as EnrollmentServiceProto,
    CreateEnrollmentRequest, DeleteResponse, EnrollmentDetails, IdRequest, ListEnrollmentsResponse,
    ListRequest,
};

/// gRPC service wrapper for EnrollmentService.
pub struct EnrollmentGrpcService {
    service: Arc<dyn EnrollmentService>,
}

impl EnrollmentGrpcService {
    pub fn new(service: Arc<dyn EnrollmentService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl EnrollmentServiceProto for EnrollmentGrpcService {
    async fn list_enrollments(
        &self,
        _request: Request<ListRequest>,
    ) -> Result<Response<ListEnrollmentsResponse>, Status> {
        let enrollments = self.service.list_enrollments().await.map_err(Status::from)?;
        let total = enrollments.len() as i32;
        let enrollments = enrollments.iter().map(details_to_proto).collect();

        Ok(Response::new(ListEnrollmentsResponse { enrollments, total }))
    }

    async fn create_enrollment(
        &self,
        request: Request<CreateEnrollmentRequest>,
    ) -> Result<Response<EnrollmentDetails>, Status> {
        let req = request.into_inner();
        let student_id = parse_uuid(&req.student_id)?;
        let course_id = parse_uuid(&req.course_id)?;

        let details = self
            .service
            .create_enrollment(student_id, course_id)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(details_to_proto(&details)))
    }

    async fn delete_enrollment(
        &self,
        request: Request<IdRequest>,
    ) -> Result<Response<DeleteResponse>, Status> {
        let id = parse_uuid(&request.into_inner().id)?;

        self.service.delete_enrollment(id).await.map_err(Status::from)?;
        Ok(Response::new(DeleteResponse { success: true }))
    }
}
