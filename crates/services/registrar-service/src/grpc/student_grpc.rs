//! gRPC implementation for StudentService.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use super::convert::{parse_uuid, profile_to_proto, student_to_proto};
use crate::service::StudentService;
use domain::NewStudent;
use proto::registrar::{
    student_service_server::StudentService as StudentServiceProto, CreateStudentRequest,
    DeleteResponse, IdRequest, ListRequest, ListStudentsResponse, Student, StudentProfile,
};

/// gRPC service wrapper for StudentService.
pub struct StudentGrpcService {
    service: Arc<dyn StudentService>,
}

impl StudentGrpcService {
    pub fn new(service: Arc<dyn StudentService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl StudentServiceProto for StudentGrpcService {
    async fn list_students(
        &self,
        _request: Request<ListRequest>,
    ) -> Result<Response<ListStudentsResponse>, Status> {
        let students = self.service.list_students().await.map_err(Status::from)?;
        let total = students.len() as i32;
        let students = students.iter().map(profile_to_proto).collect();

        Ok(Response::new(ListStudentsResponse { students, total }))
    }

    async fn get_student(
        &self,
        request: Request<IdRequest>,
    ) -> Result<Response<StudentProfile>, Status> {
        let id = parse_uuid(&request.into_inner().id)?;

        let details = self.service.get_student(id).await.map_err(Status::from)?;
        Ok(Response::new(profile_to_proto(&details)))
    }

    async fn create_student(
        &self,
        request: Request<CreateStudentRequest>,
    ) -> Result<Response<Student>, Status> {
        let req = request.into_inner();

        let student = self
            .service
            .create_student(NewStudent {
                name: req.name,
                email: req.email,
                student_number: req.student_number,
            })
            .await
            .map_err(Status::from)?;
        Ok(Response::new(student_to_proto(&student)))
    }

    async fn delete_student(
        &self,
        request: Request<IdRequest>,
    ) -> Result<Response<DeleteResponse>, Status> {
        let id = parse_uuid(&request.into_inner().id)?;

        self.service.delete_student(id).await.map_err(Status::from)?;
        Ok(Response::new(DeleteResponse { success: true }))
    }
}
