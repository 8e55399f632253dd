//! A link between a country and a piece of advice.

use sea_orm::entity::prelude::*;

pub type CountryAdviceModel = Model;

/// A link between a country and a piece of advice.
#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "country_advice")]
pub struct Model {
    /// ID of the country the advice applies to.
    #[sea_orm(primary_key, auto_increment = false)]
    pub country_id: i64,

    /// ID of the advice.
    #[sea_orm(primary_key, auto_increment = false)]
    pub advice_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::country::Entity",
        from = "Column::CountryId",
        to = "super::country::Column::Id"
    )]
    Country,

    #[sea_orm(
        belongs_to = "super::advice::Entity",
        from = "Column::AdviceId",
        to = "super::advice::Column::Id"
    )]
    Advice,
}

impl Related<super::country::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Country.def()
    }
}

impl Related<super::advice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Advice.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
