use chrono::Utc;
use sea_orm::entity::prelude::*;

/// One row per (player, boost) pair, enforced by the composite key.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "player_boosts")]
pub struct Model {
    #[sea_orm(
        primary_key,
        auto_increment = false,
        column_type = "String(StringLen::N(100))"
    )]
    pub player_id: String,
    #[sea_orm(
        primary_key,
        auto_increment = false,
        column_type = "String(StringLen::N(255))"
    )]
    pub boost_name: String,
    pub quantity: u32,
    pub boost_add_time: chrono::DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::player::Entity",
        from = "Column::PlayerId",
        to = "super::player::Column::PlayerId",
        on_delete = "Cascade"
    )]
    Player,
    #[sea_orm(
        belongs_to = "super::boost::Entity",
        from = "Column::BoostName",
        to = "super::boost::Column::Name",
        on_delete = "Cascade"
    )]
    Boost,
}

impl Related<super::player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Player.def()
    }
}

impl Related<super::boost::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Boost.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
