use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "prizes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub id: i64,
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub title: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::level_prize::Entity")]
    LevelPrize,
}

impl Related<super::level_prize::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LevelPrize.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
