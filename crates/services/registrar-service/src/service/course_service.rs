//! Course service - catalogue management.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{Course, NewCourse};

use crate::repository::CourseRepository;

#[async_trait]
pub trait CourseService: Send + Sync {
    async fn list_courses(&self) -> AppResult<Vec<Course>>;

    async fn get_course(&self, id: Uuid) -> AppResult<Course>;

    /// Validate and create a course; `enrolled` starts at 0
    async fn create_course(&self, course: NewCourse) -> AppResult<Course>;

    /// Delete a course. Enrollments referencing it are left in place.
    async fn delete_course(&self, id: Uuid) -> AppResult<()>;
}

pub struct CourseManager {
    repo: Arc<dyn CourseRepository>,
}

impl CourseManager {
    pub fn new(repo: Arc<dyn CourseRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl CourseService for CourseManager {
    async fn list_courses(&self) -> AppResult<Vec<Course>> {
        self.repo.list().await
    }

    async fn get_course(&self, id: Uuid) -> AppResult<Course> {
        self.repo.find_by_id(id).await?.ok_or_not_found("Course")
    }

    async fn create_course(&self, course: NewCourse) -> AppResult<Course> {
        let course = course.normalized()?;

        if self.repo.find_by_code(&course.course_code).await?.is_some() {
            return Err(AppError::validation(format!(
                "Course code {} already exists",
                course.course_code
            )));
        }

        let course = self.repo.create(course).await?;
        tracing::info!(course_id = %course.id, code = %course.course_code, "Course created");
        Ok(course)
    }

    async fn delete_course(&self, id: Uuid) -> AppResult<()> {
        self.repo.delete(id).await?;
        tracing::info!(course_id = %id, "Course deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockCourseRepository;
    use chrono::Utc;
    use domain::DEFAULT_COURSE_CAPACITY;

    fn stored(course: NewCourse) -> Course {
        Course {
            id: Uuid::new_v4(),
            course_code: course.course_code,
            course_name: course.course_name,
            instructor: course.instructor,
            credits: course.credits,
            capacity: course.capacity.unwrap_or(DEFAULT_COURSE_CAPACITY),
            enrolled: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn input(code: &str) -> NewCourse {
        NewCourse {
            course_code: code.to_string(),
            course_name: "Databases".to_string(),
            instructor: "Edgar Codd".to_string(),
            credits: 4,
            capacity: None,
        }
    }

    #[tokio::test]
    async fn test_create_course_normalizes_before_lookup() {
        let mut repo = MockCourseRepository::new();
        repo.expect_find_by_code()
            .withf(|code| code == "DB201")
            .returning(|_| Ok(None));
        repo.expect_create().returning(|c| Ok(stored(c)));

        let service = CourseManager::new(Arc::new(repo));
        let course = service.create_course(input(" db201 ")).await.unwrap();

        assert_eq!(course.course_code, "DB201");
        assert_eq!(course.capacity, DEFAULT_COURSE_CAPACITY);
        assert_eq!(course.enrolled, 0);
    }

    #[tokio::test]
    async fn test_create_course_rejects_duplicate_code() {
        let mut repo = MockCourseRepository::new();
        repo.expect_find_by_code()
            .returning(|_| Ok(Some(stored(input("DB201")))));
        repo.expect_create().times(0);

        let service = CourseManager::new(Arc::new(repo));
        let result = service.create_course(input("db201")).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_course_rejects_bad_credits() {
        let mut repo = MockCourseRepository::new();
        repo.expect_find_by_code().times(0);

        let mut bad = input("DB201");
        bad.credits = 9;

        let service = CourseManager::new(Arc::new(repo));
        let result = service.create_course(bad).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_missing_course() {
        let mut repo = MockCourseRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = CourseManager::new(Arc::new(repo));
        let err = service.get_course(Uuid::new_v4()).await.unwrap_err();

        assert_eq!(err.to_string(), "Course not found");
    }
}
