//! Domain <-> protobuf conversions.

use tonic::Status;
use uuid::Uuid;

use domain::{Account, Course, Enrollment, EnrollmentDetails, Student, StudentDetails};
use proto::registrar as pb;

/// Parse UUID from string.
pub fn parse_uuid(s: &str) -> Result<Uuid, Status> {
    Uuid::parse_str(s).map_err(|_| Status::invalid_argument("Invalid UUID format"))
}

/// Public account view (no password hash).
pub fn account_to_proto(account: &Account) -> pb::AccountResponse {
    pb::AccountResponse {
        id: account.id.to_string(),
        username: account.username.clone(),
        email: account.email.clone(),
        created_at: account.created_at.to_rfc3339(),
        updated_at: account.updated_at.to_rfc3339(),
    }
}

/// Internal account view (includes password hash).
pub fn internal_account_to_proto(account: &Account) -> pb::InternalAccountResponse {
    pb::InternalAccountResponse {
        id: account.id.to_string(),
        username: account.username.clone(),
        email: account.email.clone(),
        password_hash: account.password_hash.clone(),
        created_at: account.created_at.to_rfc3339(),
        updated_at: account.updated_at.to_rfc3339(),
    }
}

pub fn course_to_proto(course: &Course) -> pb::Course {
    pb::Course {
        id: course.id.to_string(),
        course_code: course.course_code.clone(),
        course_name: course.course_name.clone(),
        instructor: course.instructor.clone(),
        credits: course.credits,
        capacity: course.capacity,
        enrolled: course.enrolled,
        created_at: course.created_at.to_rfc3339(),
        updated_at: course.updated_at.to_rfc3339(),
    }
}

pub fn student_to_proto(student: &Student) -> pb::Student {
    pb::Student {
        id: student.id.to_string(),
        name: student.name.clone(),
        email: student.email.clone(),
        student_number: student.student_number.clone(),
        enrolled_course_ids: student
            .enrolled_courses
            .iter()
            .map(Uuid::to_string)
            .collect(),
        created_at: student.created_at.to_rfc3339(),
        updated_at: student.updated_at.to_rfc3339(),
    }
}

pub fn profile_to_proto(details: &StudentDetails) -> pb::StudentProfile {
    pb::StudentProfile {
        student: Some(student_to_proto(&details.student)),
        enrolled_courses: details.courses.iter().map(course_to_proto).collect(),
    }
}

pub fn enrollment_to_proto(enrollment: &Enrollment) -> pb::Enrollment {
    pb::Enrollment {
        id: enrollment.id.to_string(),
        student_id: enrollment.student_id.to_string(),
        course_id: enrollment.course_id.to_string(),
        status: enrollment.status.to_string(),
        enrollment_date: enrollment.enrollment_date.to_rfc3339(),
        created_at: enrollment.created_at.to_rfc3339(),
        updated_at: enrollment.updated_at.to_rfc3339(),
    }
}

pub fn details_to_proto(details: &EnrollmentDetails) -> pb::EnrollmentDetails {
    pb::EnrollmentDetails {
        enrollment: Some(enrollment_to_proto(&details.enrollment)),
        student: details.student.as_ref().map(student_to_proto),
        course: details.course.as_ref().map(course_to_proto),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_parse_uuid_rejects_garbage() {
        let status = parse_uuid("not-a-uuid").unwrap_err();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
    }

    #[test]
    fn test_dangling_details_leave_sides_unset() {
        let details = EnrollmentDetails {
            enrollment: Enrollment::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()),
            student: None,
            course: None,
        };

        let message = details_to_proto(&details);
        assert!(message.enrollment.is_some());
        assert!(message.student.is_none());
        assert!(message.course.is_none());
        assert_eq!(message.enrollment.unwrap().status, "active");
    }

    #[test]
    fn test_student_course_ids_are_strings() {
        let course_id = Uuid::new_v4();
        let student = Student {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            student_number: "S-001".to_string(),
            enrolled_courses: vec![course_id],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let message = student_to_proto(&student);
        assert_eq!(message.enrolled_course_ids, vec![course_id.to_string()]);
        assert_eq!(message.student_number, "S-001");
    }
}
