//! A user account.

use sea_orm::entity::prelude::*;
use serde::Serialize;

pub type UserModel = Model;

/// The role of a user, used for access control.
#[derive(EnumIter, DeriveActiveEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A regular user.
    ///
    /// Guests can vote on countries.
    #[sea_orm(string_value = "guest")]
    Guest,

    /// An administrator.
    ///
    /// Administrators can additionally edit country records.
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique numeric ID of the user.
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Name the user logs in with.
    ///
    /// Uniqueness is checked before insertion rather than
    /// enforced by the database.
    #[sea_orm(column_type = "String(StringLen::N(32))", indexed)]
    pub username: String,

    /// The bcrypt hash of the password.
    #[sea_orm(column_type = "String(StringLen::N(64))")]
    pub password: String,

    /// The role of the user.
    pub role: Role,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_vote::Entity")]
    UserVote,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Admin => "admin",
        }
    }
}

impl Related<super::user_vote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserVote.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
