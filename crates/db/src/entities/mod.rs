//! `SeaORM` entities.

pub mod prelude;

pub mod author;
pub mod budget;
pub mod sea_orm_active_enums;
