//! Votes on countries.

use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;

use super::entity::country::CountryModel;
use super::entity::user::UserModel;
use super::entity::user_vote::{self, Entity as UserVote, UserVoteModel, VoteType};
use crate::error::{ServerError, ServerResult};

#[async_trait]
pub trait VoteDatabase: Send + Sync {
    /// Adds a vote.
    ///
    /// Fails if the user has already voted on the country, in
    /// either direction.
    async fn add_vote(&self, vote: UserVoteModel) -> ServerResult<()>;

    /// Removes the vote of the user on the country, if any.
    async fn remove_vote(&self, vote: &UserVoteModel) -> ServerResult<()>;

    /// Retrieves the vote of a user on a country.
    async fn get_user_vote(
        &self,
        user: &UserModel,
        country: &CountryModel,
    ) -> ServerResult<Option<UserVoteModel>>;

    /// Retrieves all votes in one direction for a country.
    async fn get_votes(
        &self,
        country: &CountryModel,
        vote_type: VoteType,
    ) -> ServerResult<Vec<UserVoteModel>>;

    /// Retrieves all votes for a country.
    async fn get_all_votes(&self, country: &CountryModel) -> ServerResult<Vec<UserVoteModel>>;
}

async fn find_vote(
    database: &DatabaseConnection,
    user_id: i64,
    country_id: i64,
) -> ServerResult<Option<UserVoteModel>> {
    UserVote::find_by_id((user_id, country_id))
        .one(database)
        .await
        .map_err(ServerError::database_error)
}

#[async_trait]
impl VoteDatabase for DatabaseConnection {
    async fn add_vote(&self, vote: UserVoteModel) -> ServerResult<()> {
        if find_vote(self, vote.user_id, vote.country_id).await?.is_some() {
            return Err(ServerError::VoteAlreadyExists);
        }

        UserVote::insert(user_vote::ActiveModel {
            user_id: Set(vote.user_id),
            country_id: Set(vote.country_id),
            vote_id: Set(vote.vote_id),
        })
        .exec_without_returning(self)
        .await
        .map_err(ServerError::database_error)?;

        tracing::debug!(
            "User #{} voted {:?} on country #{}",
            vote.user_id,
            vote.vote_id,
            vote.country_id
        );

        Ok(())
    }

    async fn remove_vote(&self, vote: &UserVoteModel) -> ServerResult<()> {
        if find_vote(self, vote.user_id, vote.country_id).await?.is_some() {
            UserVote::delete_by_id((vote.user_id, vote.country_id))
                .exec(self)
                .await
                .map_err(ServerError::database_error)?;

            tracing::debug!(
                "Removed vote of user #{} on country #{}",
                vote.user_id,
                vote.country_id
            );
        }

        Ok(())
    }

    async fn get_user_vote(
        &self,
        user: &UserModel,
        country: &CountryModel,
    ) -> ServerResult<Option<UserVoteModel>> {
        find_vote(self, user.id, country.id).await
    }

    async fn get_votes(
        &self,
        country: &CountryModel,
        vote_type: VoteType,
    ) -> ServerResult<Vec<UserVoteModel>> {
        UserVote::find()
            .filter(user_vote::Column::CountryId.eq(country.id))
            .filter(user_vote::Column::VoteId.eq(vote_type))
            .all(self)
            .await
            .map_err(ServerError::database_error)
    }

    async fn get_all_votes(&self, country: &CountryModel) -> ServerResult<Vec<UserVoteModel>> {
        UserVote::find()
            .filter(user_vote::Column::CountryId.eq(country.id))
            .all(self)
            .await
            .map_err(ServerError::database_error)
    }
}
