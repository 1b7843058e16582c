//! Course repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::course::{self, ActiveModel, Entity as CourseEntity};
use super::on_unique_violation;
use common::{AppError, AppResult};
use domain::{Course, NewCourse, DEFAULT_COURSE_CAPACITY};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Course repository trait for dependency injection.
///
/// `enrolled` is never written here; see `EnrollmentRepository`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Course>>;

    /// Fetch every course whose id is in `ids` (missing ids are skipped)
    async fn find_many(&self, ids: &[Uuid]) -> AppResult<Vec<Course>>;

    /// Find by normalized course code
    async fn find_by_code(&self, course_code: &str) -> AppResult<Option<Course>>;

    /// List all courses ordered by code
    async fn list(&self) -> AppResult<Vec<Course>>;

    /// Insert a normalized course with no enrollments
    async fn create(&self, course: NewCourse) -> AppResult<Course>;

    /// Delete course by ID
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed course repository
pub struct CourseStore {
    db: DatabaseConnection,
}

impl CourseStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseRepository for CourseStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Course>> {
        let result = CourseEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Course::from))
    }

    async fn find_many(&self, ids: &[Uuid]) -> AppResult<Vec<Course>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = CourseEntity::find()
            .filter(course::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Course::from).collect())
    }

    async fn find_by_code(&self, course_code: &str) -> AppResult<Option<Course>> {
        let result = CourseEntity::find()
            .filter(course::Column::CourseCode.eq(course_code))
            .one(&self.db)
            .await?;

        Ok(result.map(Course::from))
    }

    async fn list(&self) -> AppResult<Vec<Course>> {
        let models = CourseEntity::find()
            .order_by_asc(course::Column::CourseCode)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Course::from).collect())
    }

    async fn create(&self, course: NewCourse) -> AppResult<Course> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            course_code: Set(course.course_code),
            course_name: Set(course.course_name),
            instructor: Set(course.instructor),
            credits: Set(course.credits),
            capacity: Set(course.capacity.unwrap_or(DEFAULT_COURSE_CAPACITY)),
            enrolled: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(|e| {
            on_unique_violation(e, || {
                AppError::validation("A course with this code already exists")
            })
        })?;
        Ok(Course::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = CourseEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Course"));
        }

        Ok(())
    }
}
