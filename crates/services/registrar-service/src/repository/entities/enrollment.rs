//! Enrollment database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{Enrollment, EnrollmentStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub status: String,
    pub enrollment_date: DateTimeUtc,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Enrollment {
    fn from(model: Model) -> Self {
        Enrollment {
            id: model.id,
            student_id: model.student_id,
            course_id: model.course_id,
            status: EnrollmentStatus::from(model.status),
            enrollment_date: model.enrollment_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
