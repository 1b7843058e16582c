//! Enrollment repository.
//!
//! Owns every write to the denormalized enrollment state: the enrollment
//! row, `courses.enrolled` and `students.enrolled_courses`. Each workflow
//! runs in a single transaction.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait, Unchanged,
};
use uuid::Uuid;

use super::entities::course::{self, Entity as CourseEntity};
use super::entities::enrollment::{self, ActiveModel, Entity as EnrollmentEntity};
use super::entities::student::{self, Entity as StudentEntity};
use super::on_unique_violation;
use common::{AppError, AppResult};
use domain::{Enrollment, EnrollmentStatus, Student};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Outcome of removing an enrollment.
///
/// A `false` flag means the referenced record no longer existed and its
/// side of the bookkeeping was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawReport {
    pub enrollment: Enrollment,
    pub course_found: bool,
    pub student_found: bool,
}

/// Enrollment repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Enrollment>>;

    /// Find the enrollment linking a student to a course
    async fn find_by_pair(&self, student_id: Uuid, course_id: Uuid)
        -> AppResult<Option<Enrollment>>;

    /// List all enrollments, newest first
    async fn list(&self) -> AppResult<Vec<Enrollment>>;

    /// Insert the enrollment, take a seat and add the course to the student.
    ///
    /// Fails with `CapacityExceeded` when no seat is left at write time and
    /// `DuplicateEnrollment` when the pair already exists; nothing is written
    /// in either case.
    async fn enroll(&self, student_id: Uuid, course_id: Uuid) -> AppResult<Enrollment>;

    /// Release the seat, drop the course from the student and delete the
    /// enrollment. Missing student or course records are tolerated.
    async fn withdraw(&self, enrollment_id: Uuid) -> AppResult<WithdrawReport>;
}

/// SeaORM-backed enrollment repository
pub struct EnrollmentStore {
    db: DatabaseConnection,
}

impl EnrollmentStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lock a student row for the rest of the transaction.
    async fn lock_student(txn: &DatabaseTransaction, id: Uuid) -> AppResult<Option<Student>> {
        let model = StudentEntity::find_by_id(id)
            .lock_exclusive()
            .one(txn)
            .await?;
        Ok(model.map(Student::from))
    }

    async fn save_courses(txn: &DatabaseTransaction, student: Student) -> AppResult<()> {
        let active = student::ActiveModel {
            id: Unchanged(student.id),
            enrolled_courses: Set(student.enrolled_courses),
            updated_at: Set(student.updated_at),
            ..Default::default()
        };
        active.update(txn).await?;
        Ok(())
    }
}

#[async_trait]
impl EnrollmentRepository for EnrollmentStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Enrollment>> {
        let result = EnrollmentEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Enrollment::from))
    }

    async fn find_by_pair(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> AppResult<Option<Enrollment>> {
        let result = EnrollmentEntity::find()
            .filter(enrollment::Column::StudentId.eq(student_id))
            .filter(enrollment::Column::CourseId.eq(course_id))
            .one(&self.db)
            .await?;

        Ok(result.map(Enrollment::from))
    }

    async fn list(&self) -> AppResult<Vec<Enrollment>> {
        let models = EnrollmentEntity::find()
            .order_by_desc(enrollment::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Enrollment::from).collect())
    }

    async fn enroll(&self, student_id: Uuid, course_id: Uuid) -> AppResult<Enrollment> {
        let txn = self.db.begin().await?;

        // 1. Enrollment row; the (student_id, course_id) index rejects duplicates
        let record = Enrollment::new(Uuid::new_v4(), student_id, course_id);
        let active_model = ActiveModel {
            id: Set(record.id),
            student_id: Set(record.student_id),
            course_id: Set(record.course_id),
            status: Set(EnrollmentStatus::Active.as_str().to_string()),
            enrollment_date: Set(record.enrollment_date),
            created_at: Set(record.created_at),
            updated_at: Set(record.updated_at),
        };
        let model = active_model
            .insert(&txn)
            .await
            .map_err(|e| on_unique_violation(e, || AppError::DuplicateEnrollment))?;

        // 2. Take a seat only while one is free
        let seat = CourseEntity::update_many()
            .col_expr(course::Column::Enrolled, Expr::col(course::Column::Enrolled).add(1))
            .col_expr(course::Column::UpdatedAt, Expr::value(record.updated_at))
            .filter(course::Column::Id.eq(course_id))
            .filter(Expr::col(course::Column::Enrolled).lt(Expr::col(course::Column::Capacity)))
            .exec(&txn)
            .await?;

        if seat.rows_affected == 0 {
            let exists = CourseEntity::find_by_id(course_id).one(&txn).await?.is_some();
            return Err(if exists {
                AppError::CapacityExceeded
            } else {
                AppError::not_found("Course")
            });
        }

        // 3. Student's course set
        let mut student = Self::lock_student(&txn, student_id)
            .await?
            .ok_or_else(|| AppError::not_found("Student"))?;
        if student.add_course(course_id) {
            Self::save_courses(&txn, student).await?;
        }

        txn.commit().await?;
        Ok(Enrollment::from(model))
    }

    async fn withdraw(&self, enrollment_id: Uuid) -> AppResult<WithdrawReport> {
        let txn = self.db.begin().await?;

        let enrollment = EnrollmentEntity::find_by_id(enrollment_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .map(Enrollment::from)
            .ok_or_else(|| AppError::not_found("Enrollment"))?;

        // Release the seat, never below zero
        let released = CourseEntity::update_many()
            .col_expr(course::Column::Enrolled, Expr::col(course::Column::Enrolled).sub(1))
            .col_expr(course::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
            .filter(course::Column::Id.eq(enrollment.course_id))
            .filter(course::Column::Enrolled.gt(0))
            .exec(&txn)
            .await?;
        let course_found = released.rows_affected > 0
            || CourseEntity::find_by_id(enrollment.course_id)
                .one(&txn)
                .await?
                .is_some();

        let student_found = match Self::lock_student(&txn, enrollment.student_id).await? {
            Some(mut student) => {
                if student.remove_course(enrollment.course_id) {
                    Self::save_courses(&txn, student).await?;
                }
                true
            }
            None => false,
        };

        EnrollmentEntity::delete_by_id(enrollment.id).exec(&txn).await?;

        txn.commit().await?;
        Ok(WithdrawReport {
            enrollment,
            course_found,
            student_found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn enrollment_model(student_id: Uuid, course_id: Uuid) -> enrollment::Model {
        let now = Utc::now();
        enrollment::Model {
            id: Uuid::new_v4(),
            student_id,
            course_id,
            status: "active".to_string(),
            enrollment_date: now,
            created_at: now,
            updated_at: now,
        }
    }

    fn course_model(id: Uuid, capacity: i32, enrolled: i32) -> course::Model {
        let now = Utc::now();
        course::Model {
            id,
            course_code: "CS101".to_string(),
            course_name: "Introduction to Programming".to_string(),
            instructor: "Dr. Smith".to_string(),
            credits: 3,
            capacity,
            enrolled,
            created_at: now,
            updated_at: now,
        }
    }

    fn student_model(id: Uuid, enrolled_courses: Vec<Uuid>) -> student::Model {
        let now = Utc::now();
        student::Model {
            id,
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            student_number: "S-1".to_string(),
            enrolled_courses,
            created_at: now,
            updated_at: now,
        }
    }

    fn rows(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    fn postgres() -> MockDatabase {
        MockDatabase::new(DatabaseBackend::Postgres)
    }

    #[tokio::test]
    async fn test_enroll_takes_seat_and_records_course() {
        let (student_id, course_id) = (Uuid::new_v4(), Uuid::new_v4());
        let inserted = enrollment_model(student_id, course_id);
        let db = postgres()
            .append_query_results([vec![inserted.clone()]])
            .append_exec_results([rows(1)])
            .append_query_results([
                vec![student_model(student_id, vec![])],
                vec![student_model(student_id, vec![course_id])],
            ])
            .into_connection();

        let enrollment = EnrollmentStore::new(db.clone())
            .enroll(student_id, course_id)
            .await
            .unwrap();

        assert_eq!(enrollment.id, inserted.id);
        assert_eq!(enrollment.status, EnrollmentStatus::Active);
        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("UPDATE \\\"students\\\""));
    }

    #[tokio::test]
    async fn test_enroll_full_course_is_capacity_exceeded() {
        let (student_id, course_id) = (Uuid::new_v4(), Uuid::new_v4());
        let db = postgres()
            .append_query_results([vec![enrollment_model(student_id, course_id)]])
            .append_exec_results([rows(0)])
            .append_query_results([vec![course_model(course_id, 1, 1)]])
            .into_connection();

        let err = EnrollmentStore::new(db.clone())
            .enroll(student_id, course_id)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::CapacityExceeded));
        let log = format!("{:?}", db.into_transaction_log());
        assert!(!log.contains("UPDATE \\\"students\\\""));
    }

    #[tokio::test]
    async fn test_enroll_missing_course_is_not_found() {
        let (student_id, course_id) = (Uuid::new_v4(), Uuid::new_v4());
        let db = postgres()
            .append_query_results([vec![enrollment_model(student_id, course_id)]])
            .append_exec_results([rows(0)])
            .append_query_results([Vec::<course::Model>::new()])
            .into_connection();

        let err = EnrollmentStore::new(db)
            .enroll(student_id, course_id)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(ref entity) if entity == "Course"));
    }

    #[tokio::test]
    async fn test_enroll_missing_student_is_not_found() {
        let (student_id, course_id) = (Uuid::new_v4(), Uuid::new_v4());
        let db = postgres()
            .append_query_results([vec![enrollment_model(student_id, course_id)]])
            .append_exec_results([rows(1)])
            .append_query_results([Vec::<student::Model>::new()])
            .into_connection();

        let err = EnrollmentStore::new(db)
            .enroll(student_id, course_id)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(ref entity) if entity == "Student"));
    }

    #[tokio::test]
    async fn test_withdraw_with_deleted_course_still_deletes() {
        let (student_id, course_id) = (Uuid::new_v4(), Uuid::new_v4());
        let existing = enrollment_model(student_id, course_id);
        let db = postgres()
            .append_query_results([vec![existing.clone()]])
            // seat release touches nothing, then the delete
            .append_exec_results([rows(0), rows(1)])
            .append_query_results([Vec::<course::Model>::new()])
            .append_query_results([
                vec![student_model(student_id, vec![course_id])],
                vec![student_model(student_id, vec![])],
            ])
            .into_connection();

        let report = EnrollmentStore::new(db.clone())
            .withdraw(existing.id)
            .await
            .unwrap();

        assert_eq!(report.enrollment.id, existing.id);
        assert!(!report.course_found);
        assert!(report.student_found);
        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("DELETE FROM \\\"enrollments\\\""));
    }

    #[tokio::test]
    async fn test_withdraw_with_deleted_student_releases_seat() {
        let (student_id, course_id) = (Uuid::new_v4(), Uuid::new_v4());
        let existing = enrollment_model(student_id, course_id);
        let db = postgres()
            .append_query_results([vec![existing.clone()]])
            .append_exec_results([rows(1), rows(1)])
            .append_query_results([Vec::<student::Model>::new()])
            .into_connection();

        let report = EnrollmentStore::new(db.clone())
            .withdraw(existing.id)
            .await
            .unwrap();

        assert!(report.course_found);
        assert!(!report.student_found);
        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("DELETE FROM \\\"enrollments\\\""));
        assert!(!log.contains("UPDATE \\\"students\\\""));
    }

    #[tokio::test]
    async fn test_withdraw_unknown_enrollment_is_not_found() {
        let db = postgres()
            .append_query_results([Vec::<enrollment::Model>::new()])
            .into_connection();

        let err = EnrollmentStore::new(db)
            .withdraw(Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(ref entity) if entity == "Enrollment"));
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let newer = enrollment_model(Uuid::new_v4(), Uuid::new_v4());
        let older = enrollment_model(Uuid::new_v4(), Uuid::new_v4());
        let db = postgres()
            .append_query_results([vec![newer.clone(), older.clone()]])
            .into_connection();

        let listed = EnrollmentStore::new(db.clone()).list().await.unwrap();

        let ids: Vec<Uuid> = listed.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("ORDER BY \\\"enrollments\\\".\\\"created_at\\\" DESC"));
    }
}
