//! A vote cast by a user on a country.

use sea_orm::entity::prelude::*;

pub type UserVoteModel = Model;

/// The direction of a vote.
#[derive(EnumIter, DeriveActiveEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum VoteType {
    #[sea_orm(num_value = 1)]
    Upvote,

    #[sea_orm(num_value = 2)]
    Downvote,
}

/// A vote cast by a user on the information of a country.
///
/// A user has at most one vote per country. Changing a vote means
/// removing the old one and adding a new one.
#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_votes")]
pub struct Model {
    /// ID of the user who voted.
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,

    /// ID of the country voted on.
    #[sea_orm(primary_key, auto_increment = false)]
    pub country_id: i64,

    /// The direction of the vote.
    pub vote_id: VoteType,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,

    #[sea_orm(
        belongs_to = "super::country::Entity",
        from = "Column::CountryId",
        to = "super::country::Column::Id"
    )]
    Country,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::country::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Country.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
