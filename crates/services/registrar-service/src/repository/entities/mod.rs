//! SeaORM entity definitions.

pub mod account;
pub mod course;
pub mod enrollment;
pub mod student;
