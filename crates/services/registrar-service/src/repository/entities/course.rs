//! Course database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Course;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub course_code: String,
    pub course_name: String,
    pub instructor: String,
    pub credits: i32,
    pub capacity: i32,
    pub enrolled: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Course {
    fn from(model: Model) -> Self {
        Course {
            id: model.id,
            course_code: model.course_code,
            course_name: model.course_name,
            instructor: model.instructor,
            credits: model.credits,
            capacity: model.capacity,
            enrolled: model.enrolled,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
