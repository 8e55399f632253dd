//! A country and its risk metrics.

use std::hash::{Hash, Hasher};

use sea_orm::entity::prelude::*;

use advisory::risk::RiskIndices;

pub type CountryModel = Model;

/// A country.
///
/// Names are not unique. Two countries are the same if and only if
/// they have the same ID.
#[derive(Debug, Clone, DeriveEntityModel)]
#[sea_orm(table_name = "countries")]
pub struct Model {
    /// Unique numeric ID of the country.
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Name of the country.
    #[sea_orm(column_type = "String(StringLen::N(64))", indexed)]
    pub name: String,

    /// Information about the country.
    #[sea_orm(column_type = "String(StringLen::N(2048))")]
    pub description: String,

    /// Summary of whether the country should be travelled to.
    #[sea_orm(column_type = "String(StringLen::N(256))")]
    pub travel_advice: String,

    /// Level of crime (higher means more crime).
    pub crime_index: f64,

    /// Severity and risk of disasters (higher means worse).
    pub disaster_risk: f64,

    /// Level of corruption (higher means more).
    pub corruption_index: f64,

    /// Level of healthcare (higher means better).
    pub health: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_vote::Entity")]
    UserVote,

    #[sea_orm(has_many = "super::country_advice::Entity")]
    CountryAdvice,
}

impl Model {
    pub fn indices(&self) -> RiskIndices {
        RiskIndices {
            crime_index: self.crime_index,
            disaster_risk: self.disaster_risk,
            corruption_index: self.corruption_index,
            health: self.health,
        }
    }

    pub fn set_indices(&mut self, indices: RiskIndices) {
        self.crime_index = indices.crime_index;
        self.disaster_risk = indices.disaster_risk;
        self.corruption_index = indices.corruption_index;
        self.health = indices.health;
    }
}

impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Model {}

impl Hash for Model {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Related<super::user_vote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserVote.def()
    }
}

impl Related<super::country_advice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CountryAdvice.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
