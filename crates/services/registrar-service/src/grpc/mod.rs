//! gRPC layer - tonic servers wrapping the services.

mod account_grpc;
mod convert;
mod course_grpc;
mod enrollment_grpc;
mod health_grpc;
mod student_grpc;

pub use account_grpc::AccountGrpcService;
pub use course_grpc::CourseGrpcService;
pub use enrollment_grpc::EnrollmentGrpcService;
pub use health_grpc::HealthGrpcService;
pub use student_grpc::StudentGrpcService;
