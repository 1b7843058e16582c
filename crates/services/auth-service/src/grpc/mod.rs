//! gRPC server implementation.

mod auth_grpc;

pub use auth_grpc::AuthGrpcService;
