//! Bag entity (fixed-capacity container)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub volume: i64,    // Capacity, never stored as remaining space
    pub disabled: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cuboid::Entity")]
    Cuboids,
}

impl Related<super::cuboid::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cuboids.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
