//! gRPC client for registrar-service.

use async_trait::async_trait;
use tonic::transport::Channel;
use tracing::debug;
use uuid::Uuid;

use common::{AppError, AppResult, GrpcClientConfig};
use domain::{Course, EnrollmentDetails, NewCourse, NewStudent, Student, StudentDetails};
use proto::registrar::{
    CreateCourseRequest, CreateEnrollmentRequest, CreateStudentRequest, HealthCheckRequest,
    IdRequest, ListRequest,
};
use proto::{CourseServiceClient, EnrollmentServiceClient, HealthServiceClient, StudentServiceClient};

use super::convert::{course_from_proto, details_from_proto, profile_from_proto, student_from_proto};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Registrar operations used by the HTTP layer.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RegistrarApi: Send + Sync {
    async fn list_students(&self) -> AppResult<Vec<StudentDetails>>;
    async fn get_student(&self, id: Uuid) -> AppResult<StudentDetails>;
    async fn create_student(&self, new: NewStudent) -> AppResult<Student>;
    async fn delete_student(&self, id: Uuid) -> AppResult<()>;

    async fn list_courses(&self) -> AppResult<Vec<Course>>;
    async fn get_course(&self, id: Uuid) -> AppResult<Course>;
    async fn create_course(&self, new: NewCourse) -> AppResult<Course>;
    async fn delete_course(&self, id: Uuid) -> AppResult<()>;

    async fn list_enrollments(&self) -> AppResult<Vec<EnrollmentDetails>>;
    async fn create_enrollment(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> AppResult<EnrollmentDetails>;
    async fn delete_enrollment(&self, id: Uuid) -> AppResult<()>;

    /// Fails when the registrar or its database cannot be reached.
    async fn check_health(&self) -> AppResult<()>;
}

/// gRPC client wrapper for registrar-service.
///
/// All service clients share one channel.
pub struct RegistrarClient {
    students: StudentServiceClient<Channel>,
    courses: CourseServiceClient<Channel>,
    enrollments: EnrollmentServiceClient<Channel>,
    health: HealthServiceClient<Channel>,
}

impl RegistrarClient {
    /// Connect to registrar-service.
    pub async fn connect(config: &GrpcClientConfig) -> Result<Self, tonic::transport::Error> {
        debug!("Connecting to registrar-service at {}", config.endpoint);
        let channel = super::open_channel(config).await?;
        Ok(Self {
            students: StudentServiceClient::new(channel.clone()),
            courses: CourseServiceClient::new(channel.clone()),
            enrollments: EnrollmentServiceClient::new(channel.clone()),
            health: HealthServiceClient::new(channel),
        })
    }
}

fn id_request(id: Uuid) -> tonic::Request<IdRequest> {
    tonic::Request::new(IdRequest { id: id.to_string() })
}

#[async_trait]
impl RegistrarApi for RegistrarClient {
    async fn list_students(&self) -> AppResult<Vec<StudentDetails>> {
        let mut client = self.students.clone();
        let response = client
            .list_students(tonic::Request::new(ListRequest {}))
            .await
            .map_err(AppError::from)?;

        response
            .into_inner()
            .students
            .into_iter()
            .map(profile_from_proto)
            .collect()
    }

    async fn get_student(&self, id: Uuid) -> AppResult<StudentDetails> {
        let mut client = self.students.clone();
        let response = client
            .get_student(id_request(id))
            .await
            .map_err(AppError::from)?;
        profile_from_proto(response.into_inner())
    }

    async fn create_student(&self, new: NewStudent) -> AppResult<Student> {
        let request = tonic::Request::new(CreateStudentRequest {
            name: new.name,
            email: new.email,
            student_number: new.student_number,
        });

        let mut client = self.students.clone();
        let response = client
            .create_student(request)
            .await
            .map_err(AppError::from)?;
        student_from_proto(response.into_inner())
    }

    async fn delete_student(&self, id: Uuid) -> AppResult<()> {
        let mut client = self.students.clone();
        client
            .delete_student(id_request(id))
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn list_courses(&self) -> AppResult<Vec<Course>> {
        let mut client = self.courses.clone();
        let response = client
            .list_courses(tonic::Request::new(ListRequest {}))
            .await
            .map_err(AppError::from)?;

        response
            .into_inner()
            .courses
            .into_iter()
            .map(course_from_proto)
            .collect()
    }

    async fn get_course(&self, id: Uuid) -> AppResult<Course> {
        let mut client = self.courses.clone();
        let response = client
            .get_course(id_request(id))
            .await
            .map_err(AppError::from)?;
        course_from_proto(response.into_inner())
    }

    async fn create_course(&self, new: NewCourse) -> AppResult<Course> {
        let request = tonic::Request::new(CreateCourseRequest {
            course_code: new.course_code,
            course_name: new.course_name,
            instructor: new.instructor,
            credits: new.credits,
            capacity: new.capacity,
        });

        let mut client = self.courses.clone();
        let response = client
            .create_course(request)
            .await
            .map_err(AppError::from)?;
        course_from_proto(response.into_inner())
    }

    async fn delete_course(&self, id: Uuid) -> AppResult<()> {
        let mut client = self.courses.clone();
        client
            .delete_course(id_request(id))
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn list_enrollments(&self) -> AppResult<Vec<EnrollmentDetails>> {
        let mut client = self.enrollments.clone();
        let response = client
            .list_enrollments(tonic::Request::new(ListRequest {}))
            .await
            .map_err(AppError::from)?;

        response
            .into_inner()
            .enrollments
            .into_iter()
            .map(details_from_proto)
            .collect()
    }

    async fn create_enrollment(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> AppResult<EnrollmentDetails> {
        let request = tonic::Request::new(CreateEnrollmentRequest {
            student_id: student_id.to_string(),
            course_id: course_id.to_string(),
        });

        let mut client = self.enrollments.clone();
        let response = client
            .create_enrollment(request)
            .await
            .map_err(AppError::from)?;
        details_from_proto(response.into_inner())
    }

    async fn delete_enrollment(&self, id: Uuid) -> AppResult<()> {
        let mut client = self.enrollments.clone();
        client
            .delete_enrollment(id_request(id))
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn check_health(&self) -> AppResult<()> {
        let mut client = self.health.clone();
        let response = client
            .check(tonic::Request::new(HealthCheckRequest {}))
            .await
            .map_err(AppError::from)?;

        if response.into_inner().database {
            Ok(())
        } else {
            Err(AppError::service_unavailable("database"))
        }
    }
}
