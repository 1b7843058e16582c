//! Student database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Student;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub student_number: String,
    /// Postgres `uuid[]`
    pub enrolled_courses: Vec<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Student {
    fn from(model: Model) -> Self {
        Student {
            id: model.id,
            name: model.name,
            email: model.email,
            student_number: model.student_number,
            enrolled_courses: model.enrolled_courses,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
