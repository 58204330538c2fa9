//! Cuboid entity (item owned by exactly one bag)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cuboids")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub width: i64,
    pub height: i64,
    pub depth: i64,
    pub bag_id: i32,    // FK to bags
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bag::Entity",
        from = "Column::BagId",
        to = "super::bag::Column::Id",
        on_delete = "Cascade"
    )]
    Bag,
}

impl Related<super::bag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bag.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
