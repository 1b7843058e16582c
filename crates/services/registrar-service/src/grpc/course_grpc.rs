//! gRPC implementation for CourseService.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use super::convert::{course_to_proto, parse_uuid};
use crate::service::CourseService;
use domain::NewCourse;
use proto::registrar::{
    course_service_server::CourseService as CourseServiceProto, Course, CreateCourseRequest,
    DeleteResponse, IdRequest, ListCoursesResponse, ListRequest,
};

/// gRPC service wrapper for CourseService.
pub struct CourseGrpcService {
    service: Arc<dyn CourseService>,
}

impl CourseGrpcService {
    pub fn new(service: Arc<dyn CourseService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl CourseServiceProto for CourseGrpcService {
    async fn list_courses(
        &self,
        _request: Request<ListRequest>,
    ) -> Result<Response<ListCoursesResponse>, Status> {
        let courses = self.service.list_courses().await.map_err(Status::from)?;
        let total = courses.len() as i32;
        let courses = courses.iter().map(course_to_proto).collect();

        Ok(Response::new(ListCoursesResponse { courses, total }))
    }

    async fn get_course(&self, request: Request<IdRequest>) -> Result<Response<Course>, Status> {
        let id = parse_uuid(&request.into_inner().id)?;

        let course = self.service.get_course(id).await.map_err(Status::from)?;
        Ok(Response::new(course_to_proto(&course)))
    }

    async fn create_course(
        &self,
        request: Request<CreateCourseRequest>,
    ) -> Result<Response<Course>, Status> {
        let req = request.into_inner();

        let course = self
            .service
            .create_course(NewCourse {
                course_code: req.course_code,
                course_name: req.course_name,
                instructor: req.instructor,
                credits: req.credits,
                capacity: req.capacity,
            })
            .await
            .map_err(Status::from)?;
        Ok(Response::new(course_to_proto(&course)))
    }

    async fn delete_course(
        &self,
        request: Request<IdRequest>,
    ) -> Result<Response<DeleteResponse>, Status> {
        let id = parse_uuid(&request.into_inner().id)?;

        self.service.delete_course(id).await.map_err(Status::from)?;
        Ok(Response::new(DeleteResponse { success: true }))
    }
}
