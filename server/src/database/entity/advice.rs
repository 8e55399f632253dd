//! A piece of travel advice.
//!
//! Advice covers a topic such as crime, disasters or health, and
//! is attached to countries through `country_advice`.

use sea_orm::entity::prelude::*;
use serde::Serialize;

pub type AdviceModel = Model;

/// A piece of travel advice.
#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "advice")]
pub struct Model {
    /// Unique numeric ID of the advice.
    #[sea_orm(primary_key)]
    pub id: i64,

    /// The topic of the advice.
    ///
    /// Topics are unique, but this is only checked before
    /// insertion.
    #[sea_orm(column_type = "String(StringLen::N(64))", indexed)]
    pub topic: String,

    /// Description of the topic.
    #[sea_orm(column_type = "String(StringLen::N(512))")]
    pub description: String,

    /// Link to a helpful video.
    #[sea_orm(column_type = "String(StringLen::N(256))", nullable)]
    pub link: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::country_advice::Entity")]
    CountryAdvice,
}

impl Related<super::country_advice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CountryAdvice.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
