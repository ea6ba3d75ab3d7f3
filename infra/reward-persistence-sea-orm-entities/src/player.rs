use chrono::Utc;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "players")]
pub struct Model {
    #[sea_orm(
        primary_key,
        auto_increment = false,
        column_type = "String(StringLen::N(100))"
    )]
    pub player_id: String,
    #[sea_orm(unique, column_type = "String(StringLen::N(255))")]
    pub username: String,
    pub first_login: chrono::DateTime<Utc>,
    pub last_login: Option<chrono::DateTime<Utc>>,
    pub points: u32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::player_boost::Entity")]
    PlayerBoost,
    #[sea_orm(has_many = "super::player_level::Entity")]
    PlayerLevel,
}

impl Related<super::player_boost::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlayerBoost.def()
    }
}

impl Related<super::player_level::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlayerLevel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
