//! Student repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::student::{self, ActiveModel, Entity as StudentEntity};
use super::on_unique_violation;
use common::{AppError, AppResult};
use domain::{NewStudent, Student};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Student repository trait for dependency injection.
///
/// `enrolled_courses` is never written here; see `EnrollmentRepository`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Student>>;

    /// Fetch every student whose id is in `ids` (missing ids are skipped)
    async fn find_many(&self, ids: &[Uuid]) -> AppResult<Vec<Student>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Student>>;

    /// Find by school-issued student identifier
    async fn find_by_number(&self, student_number: &str) -> AppResult<Option<Student>>;

    /// List all students, oldest first
    async fn list(&self) -> AppResult<Vec<Student>>;

    /// Insert a normalized student with an empty course set
    async fn create(&self, student: NewStudent) -> AppResult<Student>;

    /// Delete student by ID
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed student repository
pub struct StudentStore {
    db: DatabaseConnection,
}

impl StudentStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentRepository for StudentStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Student>> {
        let result = StudentEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Student::from))
    }

    async fn find_many(&self, ids: &[Uuid]) -> AppResult<Vec<Student>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = StudentEntity::find()
            .filter(student::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Student::from).collect())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Student>> {
        let result = StudentEntity::find()
            .filter(student::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(result.map(Student::from))
    }

    async fn find_by_number(&self, student_number: &str) -> AppResult<Option<Student>> {
        let result = StudentEntity::find()
            .filter(student::Column::StudentNumber.eq(student_number))
            .one(&self.db)
            .await?;

        Ok(result.map(Student::from))
    }

    async fn list(&self) -> AppResult<Vec<Student>> {
        let models = StudentEntity::find()
            .order_by_asc(student::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Student::from).collect())
    }

    async fn create(&self, student: NewStudent) -> AppResult<Student> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(student.name),
            email: Set(student.email),
            student_number: Set(student.student_number),
            enrolled_courses: Set(Vec::new()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(|e| {
            on_unique_violation(e, || {
                AppError::validation("A student with this email or student ID already exists")
            })
        })?;
        Ok(Student::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = StudentEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Student"));
        }

        Ok(())
    }
}
