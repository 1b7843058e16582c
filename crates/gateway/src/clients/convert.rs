//! Protobuf -> domain conversions for registrar and auth responses.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{Course, Enrollment, EnrollmentDetails, EnrollmentStatus, Student, StudentDetails};
use proto::registrar as pb;

pub(crate) fn parse_uuid(s: &str) -> AppResult<Uuid> {
    Uuid::parse_str(s).map_err(|_| AppError::internal(format!("Malformed id from service: {s}")))
}

pub(crate) fn parse_time(s: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::internal(format!("Malformed timestamp from service: {s}")))
}

pub(crate) fn course_from_proto(proto: pb::Course) -> AppResult<Course> {
    Ok(Course {
        id: parse_uuid(&proto.id)?,
        course_code: proto.course_code,
        course_name: proto.course_name,
        instructor: proto.instructor,
        credits: proto.credits,
        capacity: proto.capacity,
        enrolled: proto.enrolled,
        created_at: parse_time(&proto.created_at)?,
        updated_at: parse_time(&proto.updated_at)?,
    })
}

pub(crate) fn student_from_proto(proto: pb::Student) -> AppResult<Student> {
    let enrolled_courses = proto
        .enrolled_course_ids
        .iter()
        .map(|id| parse_uuid(id))
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Student {
        id: parse_uuid(&proto.id)?,
        name: proto.name,
        email: proto.email,
        student_number: proto.student_number,
        enrolled_courses,
        created_at: parse_time(&proto.created_at)?,
        updated_at: parse_time(&proto.updated_at)?,
    })
}

pub(crate) fn profile_from_proto(proto: pb::StudentProfile) -> AppResult<StudentDetails> {
    let student = proto
        .student
        .ok_or_else(|| AppError::internal("Student profile without student"))?;

    Ok(StudentDetails {
        student: student_from_proto(student)?,
        courses: proto
            .enrolled_courses
            .into_iter()
            .map(course_from_proto)
            .collect::<AppResult<Vec<_>>>()?,
    })
}

fn enrollment_from_proto(proto: pb::Enrollment) -> AppResult<Enrollment> {
    Ok(Enrollment {
        id: parse_uuid(&proto.id)?,
        student_id: parse_uuid(&proto.student_id)?,
        course_id: parse_uuid(&proto.course_id)?,
        status: EnrollmentStatus::from(proto.status),
        enrollment_date: parse_time(&proto.enrollment_date)?,
        created_at: parse_time(&proto.created_at)?,
        updated_at: parse_time(&proto.updated_at)?,
    })
}

/// Missing student/course messages become `None` (dangling references).
pub(crate) fn details_from_proto(proto: pb::EnrollmentDetails) -> AppResult<EnrollmentDetails> {
    let enrollment = proto
        .enrollment
        .ok_or_else(|| AppError::internal("Enrollment details without enrollment"))?;

    Ok(EnrollmentDetails {
        enrollment: enrollment_from_proto(enrollment)?,
        student: proto.student.map(student_from_proto).transpose()?,
        course: proto.course.map(course_from_proto).transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: &str = "2024-09-01T08:30:00+00:00";

    fn proto_course(id: Uuid) -> pb::Course {
        pb::Course {
            id: id.to_string(),
            course_code: "CS101".to_string(),
            course_name: "Intro".to_string(),
            instructor: "Dr. Smith".to_string(),
            credits: 3,
            capacity: 30,
            enrolled: 2,
            created_at: TS.to_string(),
            updated_at: TS.to_string(),
        }
    }

    #[test]
    fn test_course_from_proto() {
        let id = Uuid::new_v4();
        let course = course_from_proto(proto_course(id)).unwrap();
        assert_eq!(course.id, id);
        assert_eq!(course.enrolled, 2);
        assert_eq!(course.created_at.to_rfc3339(), TS);
    }

    #[test]
    fn test_malformed_id_is_internal() {
        let mut proto = proto_course(Uuid::new_v4());
        proto.id = "not-a-uuid".to_string();
        let err = course_from_proto(proto).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn test_details_with_dangling_course() {
        let student_id = Uuid::new_v4();
        let proto = pb::EnrollmentDetails {
            enrollment: Some(pb::Enrollment {
                id: Uuid::new_v4().to_string(),
                student_id: student_id.to_string(),
                course_id: Uuid::new_v4().to_string(),
                status: "active".to_string(),
                enrollment_date: TS.to_string(),
                created_at: TS.to_string(),
                updated_at: TS.to_string(),
            }),
            student: Some(pb::Student {
                id: student_id.to_string(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                student_number: "S-1".to_string(),
                enrolled_course_ids: vec![],
                created_at: TS.to_string(),
                updated_at: TS.to_string(),
            }),
            course: None,
        };

        let details = details_from_proto(proto).unwrap();
        assert_eq!(details.enrollment.status, EnrollmentStatus::Active);
        assert_eq!(details.student.map(|s| s.id), Some(student_id));
        assert!(details.course.is_none());
    }
}
