//! Enrollment service - admission workflow across students and courses.
//!
//! Checks run in a fixed order so callers get a stable error: unknown
//! student, unknown course, full course, duplicate enrollment. The writes
//! themselves happen in `EnrollmentRepository`, which re-checks capacity and
//! uniqueness atomically.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{Course, Enrollment, EnrollmentDetails, Student};

use crate::repository::{CourseRepository, EnrollmentRepository, StudentRepository};

#[async_trait]
pub trait EnrollmentService: Send + Sync {
    /// Every enrollment joined with its student and course
    async fn list_enrollments(&self) -> AppResult<Vec<EnrollmentDetails>>;

    /// Enroll a student in a course
    async fn create_enrollment(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> AppResult<EnrollmentDetails>;

    /// Remove an enrollment and release its seat
    async fn delete_enrollment(&self, id: Uuid) -> AppResult<()>;
}

pub struct EnrollmentManager {
    students: Arc<dyn StudentRepository>,
    courses: Arc<dyn CourseRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
}

impl EnrollmentManager {
    pub fn new(
        students: Arc<dyn StudentRepository>,
        courses: Arc<dyn CourseRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
    ) -> Self {
        Self {
            students,
            courses,
            enrollments,
        }
    }

    async fn join(&self, enrollments: Vec<Enrollment>) -> AppResult<Vec<EnrollmentDetails>> {
        let student_ids: Vec<Uuid> = enrollments
            .iter()
            .map(|e| e.student_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let course_ids: Vec<Uuid> = enrollments
            .iter()
            .map(|e| e.course_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let (students, courses) = futures::try_join!(
            self.students.find_many(&student_ids),
            self.courses.find_many(&course_ids),
        )?;

        let students: HashMap<Uuid, Student> = students.into_iter().map(|s| (s.id, s)).collect();
        let courses: HashMap<Uuid, Course> = courses.into_iter().map(|c| (c.id, c)).collect();

        Ok(enrollments
            .into_iter()
            .map(|enrollment| EnrollmentDetails {
                student: students.get(&enrollment.student_id).cloned(),
                course: courses.get(&enrollment.course_id).cloned(),
                enrollment,
            })
            .collect())
    }
}

#[async_trait]
impl EnrollmentService for EnrollmentManager {
    async fn list_enrollments(&self) -> AppResult<Vec<EnrollmentDetails>> {
        let enrollments = self.enrollments.list().await?;
        self.join(enrollments).await
    }

    async fn create_enrollment(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> AppResult<EnrollmentDetails> {
        self.students
            .find_by_id(student_id)
            .await?
            .ok_or_not_found("Student")?;
        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or_not_found("Course")?;

        if course.is_full() {
            return Err(AppError::CapacityExceeded);
        }
        if self
            .enrollments
            .find_by_pair(student_id, course_id)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateEnrollment);
        }

        let enrollment = self.enrollments.enroll(student_id, course_id).await?;
        tracing::info!(
            enrollment_id = %enrollment.id,
            %student_id,
            %course_id,
            "Student enrolled"
        );

        // Re-read so the response carries the updated counter and course set
        let (student, course) = futures::try_join!(
            self.students.find_by_id(student_id),
            self.courses.find_by_id(course_id),
        )?;

        Ok(EnrollmentDetails {
            enrollment,
            student,
            course,
        })
    }

    async fn delete_enrollment(&self, id: Uuid) -> AppResult<()> {
        let report = self.enrollments.withdraw(id).await?;
        let enrollment = &report.enrollment;

        if !report.course_found {
            tracing::warn!(
                enrollment_id = %enrollment.id,
                course_id = %enrollment.course_id,
                "Course for enrollment no longer exists; seat count not updated"
            );
        }
        if !report.student_found {
            tracing::warn!(
                enrollment_id = %enrollment.id,
                student_id = %enrollment.student_id,
                "Student for enrollment no longer exists; course set not updated"
            );
        }

        tracing::info!(enrollment_id = %enrollment.id, "Enrollment deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{
        MockCourseRepository, MockEnrollmentRepository, MockStudentRepository, WithdrawReport,
    };
    use chrono::Utc;

    fn student(id: Uuid) -> Student {
        Student {
            id,
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            student_number: "S-001".to_string(),
            enrolled_courses: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn course(id: Uuid, capacity: i32, enrolled: i32) -> Course {
        Course {
            id,
            course_code: "CS101".to_string(),
            course_name: "Intro".to_string(),
            instructor: "Grace Hopper".to_string(),
            credits: 3,
            capacity,
            enrolled,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn manager(
        students: MockStudentRepository,
        courses: MockCourseRepository,
        enrollments: MockEnrollmentRepository,
    ) -> EnrollmentManager {
        EnrollmentManager::new(Arc::new(students), Arc::new(courses), Arc::new(enrollments))
    }

    #[tokio::test]
    async fn test_unknown_student_checked_before_course() {
        let mut students = MockStudentRepository::new();
        students.expect_find_by_id().returning(|_| Ok(None));
        let mut courses = MockCourseRepository::new();
        courses.expect_find_by_id().times(0);
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments.expect_enroll().times(0);

        let err = manager(students, courses, enrollments)
            .create_enrollment(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Student not found");
    }

    #[tokio::test]
    async fn test_unknown_course() {
        let mut students = MockStudentRepository::new();
        students.expect_find_by_id().returning(|id| Ok(Some(student(id))));
        let mut courses = MockCourseRepository::new();
        courses.expect_find_by_id().returning(|_| Ok(None));
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments.expect_enroll().times(0);

        let err = manager(students, courses, enrollments)
            .create_enrollment(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Course not found");
    }

    #[tokio::test]
    async fn test_full_course_checked_before_duplicate() {
        let mut students = MockStudentRepository::new();
        students.expect_find_by_id().returning(|id| Ok(Some(student(id))));
        let mut courses = MockCourseRepository::new();
        courses.expect_find_by_id().returning(|id| Ok(Some(course(id, 1, 1))));
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments.expect_find_by_pair().times(0);
        enrollments.expect_enroll().times(0);

        let result = manager(students, courses, enrollments)
            .create_enrollment(Uuid::new_v4(), Uuid::new_v4())
            .await;

        assert!(matches!(result, Err(AppError::CapacityExceeded)));
    }

    #[tokio::test]
    async fn test_duplicate_enrollment_writes_nothing() {
        let mut students = MockStudentRepository::new();
        students.expect_find_by_id().returning(|id| Ok(Some(student(id))));
        let mut courses = MockCourseRepository::new();
        courses.expect_find_by_id().returning(|id| Ok(Some(course(id, 30, 3))));
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments
            .expect_find_by_pair()
            .returning(|s, c| Ok(Some(Enrollment::new(Uuid::new_v4(), s, c))));
        enrollments.expect_enroll().times(0);

        let result = manager(students, courses, enrollments)
            .create_enrollment(Uuid::new_v4(), Uuid::new_v4())
            .await;

        assert!(matches!(result, Err(AppError::DuplicateEnrollment)));
    }

    #[tokio::test]
    async fn test_create_returns_re_read_records() {
        let student_id = Uuid::new_v4();
        let course_id = Uuid::new_v4();

        let mut students = MockStudentRepository::new();
        students.expect_find_by_id().returning(move |id| {
            let mut s = student(id);
            s.enrolled_courses = vec![course_id];
            Ok(Some(s))
        });
        // First read sees the pre-write counter, second the post-write one
        let mut courses = MockCourseRepository::new();
        let mut reads = 0;
        courses.expect_find_by_id().times(2).returning(move |id| {
            reads += 1;
            Ok(Some(course(id, 30, if reads == 1 { 3 } else { 4 })))
        });
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments.expect_find_by_pair().returning(|_, _| Ok(None));
        enrollments
            .expect_enroll()
            .times(1)
            .returning(|s, c| Ok(Enrollment::new(Uuid::new_v4(), s, c)));

        let details = manager(students, courses, enrollments)
            .create_enrollment(student_id, course_id)
            .await
            .unwrap();

        assert_eq!(details.enrollment.student_id, student_id);
        assert_eq!(details.course.map(|c| c.enrolled), Some(4));
        assert_eq!(
            details.student.map(|s| s.enrolled_courses),
            Some(vec![course_id])
        );
    }

    #[tokio::test]
    async fn test_delete_tolerates_missing_course() {
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments.expect_withdraw().times(1).returning(|id| {
            Ok(WithdrawReport {
                enrollment: Enrollment::new(id, Uuid::new_v4(), Uuid::new_v4()),
                course_found: false,
                student_found: true,
            })
        });

        let result = manager(
            MockStudentRepository::new(),
            MockCourseRepository::new(),
            enrollments,
        )
        .delete_enrollment(Uuid::new_v4())
        .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_enrollment() {
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments
            .expect_withdraw()
            .returning(|_| Err(AppError::not_found("Enrollment")));

        let err = manager(
            MockStudentRepository::new(),
            MockCourseRepository::new(),
            enrollments,
        )
        .delete_enrollment(Uuid::new_v4())
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "Enrollment not found");
    }

    #[tokio::test]
    async fn test_list_resolves_dangling_sides_to_none() {
        let live_student = Uuid::new_v4();
        let live_course = Uuid::new_v4();

        let mut enrollments = MockEnrollmentRepository::new();
        enrollments.expect_list().returning(move || {
            Ok(vec![
                Enrollment::new(Uuid::new_v4(), live_student, live_course),
                Enrollment::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()),
            ])
        });
        let mut students = MockStudentRepository::new();
        students
            .expect_find_many()
            .returning(move |_| Ok(vec![student(live_student)]));
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_many()
            .returning(move |_| Ok(vec![course(live_course, 30, 1)]));

        let details = manager(students, courses, enrollments)
            .list_enrollments()
            .await
            .unwrap();

        assert_eq!(details.len(), 2);
        assert!(details[0].student.is_some() && details[0].course.is_some());
        assert!(details[1].student.is_none() && details[1].course.is_none());
    }
}
