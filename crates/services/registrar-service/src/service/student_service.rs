//! Student service - registration and profile reads.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{Course, NewStudent, Student, StudentDetails};

use crate::repository::{CourseRepository, StudentRepository};

#[async_trait]
pub trait StudentService: Send + Sync {
    /// Every student with enrolled courses resolved
    async fn list_students(&self) -> AppResult<Vec<StudentDetails>>;

    async fn get_student(&self, id: Uuid) -> AppResult<StudentDetails>;

    /// Validate and register a student with no courses
    async fn create_student(&self, student: NewStudent) -> AppResult<Student>;

    /// Delete a student. Enrollments referencing it are left in place.
    async fn delete_student(&self, id: Uuid) -> AppResult<()>;
}

pub struct StudentManager {
    students: Arc<dyn StudentRepository>,
    courses: Arc<dyn CourseRepository>,
}

impl StudentManager {
    pub fn new(students: Arc<dyn StudentRepository>, courses: Arc<dyn CourseRepository>) -> Self {
        Self { students, courses }
    }

    /// Resolve course ids for a batch of students with a single course query.
    ///
    /// Ids whose course no longer exists are skipped.
    async fn with_courses(&self, students: Vec<Student>) -> AppResult<Vec<StudentDetails>> {
        let ids: Vec<Uuid> = students
            .iter()
            .flat_map(|s| s.enrolled_courses.iter().copied())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let by_id: HashMap<Uuid, Course> = self
            .courses
            .find_many(&ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        Ok(students
            .into_iter()
            .map(|student| {
                let courses = student
                    .enrolled_courses
                    .iter()
                    .filter_map(|id| by_id.get(id).cloned())
                    .collect();
                StudentDetails { student, courses }
            })
            .collect())
    }
}

#[async_trait]
impl StudentService for StudentManager {
    async fn list_students(&self) -> AppResult<Vec<StudentDetails>> {
        let students = self.students.list().await?;
        self.with_courses(students).await
    }

    async fn get_student(&self, id: Uuid) -> AppResult<StudentDetails> {
        let student = self.students.find_by_id(id).await?.ok_or_not_found("Student")?;
        let mut details = self.with_courses(vec![student]).await?;
        details
            .pop()
            .ok_or_else(|| AppError::internal("student lost while resolving courses"))
    }

    async fn create_student(&self, student: NewStudent) -> AppResult<Student> {
        let student = student.normalized()?;

        if self.students.find_by_email(&student.email).await?.is_some() {
            return Err(AppError::validation("A student with this email already exists"));
        }
        if self
            .students
            .find_by_number(&student.student_number)
            .await?
            .is_some()
        {
            return Err(AppError::validation(
                "A student with this student ID already exists",
            ));
        }

        let student = self.students.create(student).await?;
        tracing::info!(student_id = %student.id, "Student registered");
        Ok(student)
    }

    async fn delete_student(&self, id: Uuid) -> AppResult<()> {
        self.students.delete(id).await?;
        tracing::info!(student_id = %id, "Student deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockCourseRepository, MockStudentRepository};
    use chrono::Utc;

    fn student(courses: Vec<Uuid>) -> Student {
        Student {
            id: Uuid::new_v4(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            student_number: "S-001".to_string(),
            enrolled_courses: courses,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn course(id: Uuid, code: &str) -> Course {
        Course {
            id,
            course_code: code.to_string(),
            course_name: "Course".to_string(),
            instructor: "Staff".to_string(),
            credits: 3,
            capacity: 30,
            enrolled: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn new_student() -> NewStudent {
        NewStudent {
            name: "Ada Lovelace".to_string(),
            email: "ADA@example.com".to_string(),
            student_number: "S-001".to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_student_skips_deleted_courses() {
        let kept = Uuid::new_v4();
        let gone = Uuid::new_v4();
        let stored = student(vec![kept, gone]);
        let student_id = stored.id;

        let mut students = MockStudentRepository::new();
        students
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));

        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_many()
            .times(1)
            .returning(move |_| Ok(vec![course(kept, "CS101")]));

        let service = StudentManager::new(Arc::new(students), Arc::new(courses));
        let details = service.get_student(student_id).await.unwrap();

        assert_eq!(details.student.enrolled_courses.len(), 2);
        assert_eq!(details.courses.len(), 1);
        assert_eq!(details.courses[0].course_code, "CS101");
    }

    #[tokio::test]
    async fn test_get_missing_student() {
        let mut students = MockStudentRepository::new();
        students.expect_find_by_id().returning(|_| Ok(None));
        let courses = MockCourseRepository::new();

        let service = StudentManager::new(Arc::new(students), Arc::new(courses));
        let err = service.get_student(Uuid::new_v4()).await.unwrap_err();

        assert_eq!(err.to_string(), "Student not found");
    }

    #[tokio::test]
    async fn test_create_student_rejects_duplicate_email() {
        let mut students = MockStudentRepository::new();
        students
            .expect_find_by_email()
            .withf(|email| email == "ada@example.com")
            .returning(|_| Ok(Some(student(vec![]))));
        students.expect_create().times(0);

        let service =
            StudentManager::new(Arc::new(students), Arc::new(MockCourseRepository::new()));
        let result = service.create_student(new_student()).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_student_rejects_duplicate_number() {
        let mut students = MockStudentRepository::new();
        students.expect_find_by_email().returning(|_| Ok(None));
        students
            .expect_find_by_number()
            .returning(|_| Ok(Some(student(vec![]))));
        students.expect_create().times(0);

        let service =
            StudentManager::new(Arc::new(students), Arc::new(MockCourseRepository::new()));
        let result = service.create_student(new_student()).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_student_starts_with_no_courses() {
        let mut students = MockStudentRepository::new();
        students.expect_find_by_email().returning(|_| Ok(None));
        students.expect_find_by_number().returning(|_| Ok(None));
        students.expect_create().returning(|input| {
            let mut created = student(vec![]);
            created.email = input.email;
            Ok(created)
        });

        let service =
            StudentManager::new(Arc::new(students), Arc::new(MockCourseRepository::new()));
        let created = service.create_student(new_student()).await.unwrap();

        assert_eq!(created.email, "ada@example.com");
        assert!(created.enrolled_courses.is_empty());
    }
}
