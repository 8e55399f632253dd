//! User accounts.

use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;

use super::entity::user::{self, Entity as User, Role, UserModel};
use crate::access::password;
use crate::error::{ServerError, ServerResult};

/// A user account that has not been inserted yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,

    /// The bcrypt hash of the password.
    pub password: String,

    pub role: Role,
}

impl NewUser {
    /// Creates an account, hashing the password with a fresh salt.
    pub async fn new(username: String, password: &str, role: Role) -> ServerResult<Self> {
        Ok(Self {
            username,
            password: password::hash_password(password).await?,
            role,
        })
    }
}

#[async_trait]
pub trait UserDatabase: Send + Sync {
    /// Adds a user.
    ///
    /// Fails if the username is already taken.
    async fn add_user(&self, user: NewUser) -> ServerResult<UserModel>;

    /// Removes a user, doing nothing if it does not exist.
    async fn remove_user(&self, user: &UserModel) -> ServerResult<()>;

    /// Retrieves a user by username.
    async fn get_user_by_name(&self, username: &str) -> ServerResult<Option<UserModel>>;

    /// Retrieves a user by ID.
    async fn get_user_by_id(&self, id: i64) -> ServerResult<Option<UserModel>>;

    /// Returns whether the password is correct for the user.
    ///
    /// Unknown users are never valid.
    async fn validate_user(&self, username: &str, password: &str) -> ServerResult<bool>;

    /// Changes the role of a user.
    async fn set_role(&self, user: &UserModel, role: Role) -> ServerResult<UserModel>;
}

#[async_trait]
impl UserDatabase for DatabaseConnection {
    async fn add_user(&self, user: NewUser) -> ServerResult<UserModel> {
        if self.get_user_by_name(&user.username).await?.is_some() {
            return Err(ServerError::UserAlreadyExists {
                username: user.username,
            });
        }

        let model = user::ActiveModel {
            username: Set(user.username),
            password: Set(user.password),
            role: Set(user.role),
            ..Default::default()
        }
        .insert(self)
        .await
        .map_err(ServerError::database_error)?;

        tracing::info!("Created user {} ({})", model.username, model.role.as_str());

        Ok(model)
    }

    async fn remove_user(&self, user: &UserModel) -> ServerResult<()> {
        if self.get_user_by_id(user.id).await?.is_some() {
            User::delete_by_id(user.id)
                .exec(self)
                .await
                .map_err(ServerError::database_error)?;

            tracing::info!("Deleted user {}", user.username);
        }

        Ok(())
    }

    async fn get_user_by_name(&self, username: &str) -> ServerResult<Option<UserModel>> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(self)
            .await
            .map_err(ServerError::database_error)
    }

    async fn get_user_by_id(&self, id: i64) -> ServerResult<Option<UserModel>> {
        User::find_by_id(id)
            .one(self)
            .await
            .map_err(ServerError::database_error)
    }

    async fn validate_user(&self, username: &str, password: &str) -> ServerResult<bool> {
        let user = match self.get_user_by_name(username).await? {
            Some(user) => user,
            None => return Ok(false),
        };

        password::verify_password(password, &user.password).await
    }

    async fn set_role(&self, user: &UserModel, role: Role) -> ServerResult<UserModel> {
        let model = User::update(user::ActiveModel {
            id: Set(user.id),
            role: Set(role),
            ..Default::default()
        })
        .exec(self)
        .await
        .map_err(ServerError::database_error)?;

        tracing::info!("Set role of {} to {}", model.username, role.as_str());

        Ok(model)
    }
}
