use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "boosts")]
pub struct Model {
    #[sea_orm(
        primary_key,
        auto_increment = false,
        column_type = "String(StringLen::N(255))"
    )]
    pub name: String,
    #[sea_orm(column_type = "String(StringLen::N(20))")]
    pub boost_type: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::player_boost::Entity")]
    PlayerBoost,
}

impl Related<super::player_boost::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlayerBoost.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
