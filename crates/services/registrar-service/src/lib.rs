//! Registrar Service Library
//!
//! Owns the course-management database (accounts, students, courses and
//! enrollments) and exposes it over gRPC. It can be run as a standalone
//! service or embedded in the combined binary.

pub mod config;
pub mod grpc;
pub mod infra;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tracing::info;

use crate::config::RegistrarServiceConfig;
use crate::grpc::{
    AccountGrpcService, CourseGrpcService, EnrollmentGrpcService, HealthGrpcService,
    StudentGrpcService,
};
use crate::infra::Database;
use crate::repository::{AccountStore, CourseStore, EnrollmentStore, StudentStore};
use crate::service::{AccountManager, CourseManager, EnrollmentManager, StudentManager};

/// Run the registrar service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = RegistrarServiceConfig::from_env()?;
    run_server_with_config(host, port, config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = RegistrarServiceConfig::from_env()?;
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Run the gRPC server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: RegistrarServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    let conn = db.get_connection();

    // Repositories
    let accounts = Arc::new(AccountStore::new(conn.clone()));
    let students = Arc::new(StudentStore::new(conn.clone()));
    let courses = Arc::new(CourseStore::new(conn.clone()));
    let enrollments = Arc::new(EnrollmentStore::new(conn));

    // Services
    let account_service = Arc::new(AccountManager::new(accounts));
    let student_service = Arc::new(StudentManager::new(students.clone(), courses.clone()));
    let course_service = Arc::new(CourseManager::new(courses.clone()));
    let enrollment_service = Arc::new(EnrollmentManager::new(students, courses, enrollments));

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Registrar service listening on {}", addr);

    Server::builder()
        .add_service(proto::AccountServiceServer::new(AccountGrpcService::new(
            account_service,
        )))
        .add_service(proto::StudentServiceServer::new(StudentGrpcService::new(
            student_service,
        )))
        .add_service(proto::CourseServiceServer::new(CourseGrpcService::new(
            course_service,
        )))
        .add_service(proto::EnrollmentServiceServer::new(
            EnrollmentGrpcService::new(enrollment_service),
        ))
        .add_service(proto::HealthServiceServer::new(HealthGrpcService::new(db)))
        .serve(addr)
        .await?;

    Ok(())
}
