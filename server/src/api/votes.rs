//! Votes on country information.

use axum::extract::{Extension, Form};
use axum::response::Redirect;
use tracing::instrument;

use super::forms::VoteForm;
use super::{country_path, display_name};
use crate::access::http::CurrentUser;
use crate::access::FlashLevel;
use crate::database::entity::country::CountryModel;
use crate::database::entity::user_vote::{UserVoteModel, VoteType};
use crate::database::{CountryDatabase, VoteDatabase};
use crate::error::{ServerError, ServerResult};
use crate::{RequestState, State};

#[instrument(skip_all)]
pub(crate) async fn upvote(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Form(form): Form<VoteForm>,
) -> ServerResult<Redirect> {
    cast_vote(&state, &req_state, user.id, &form.country_name, VoteType::Upvote).await
}

#[instrument(skip_all)]
pub(crate) async fn downvote(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Form(form): Form<VoteForm>,
) -> ServerResult<Redirect> {
    cast_vote(&state, &req_state, user.id, &form.country_name, VoteType::Downvote).await
}

/// Removes the vote of the current user.
#[instrument(skip_all)]
pub(crate) async fn reset_vote(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Form(form): Form<VoteForm>,
) -> ServerResult<Redirect> {
    let database = state.database().await?;
    let country = find_country(&state, &form.country_name).await?;
    let name = display_name(&country.name);

    match database.get_user_vote(&user, &country).await? {
        Some(vote) => {
            database.remove_vote(&vote).await?;
            req_state
                .flash(
                    FlashLevel::Success,
                    format!("You have removed your vote for {}.", name),
                )
                .await;
        }
        None => {
            req_state
                .flash(
                    FlashLevel::Warning,
                    format!("You have not voted for {}.", name),
                )
                .await;
        }
    }

    Ok(Redirect::to(&country_path(&country.name)))
}

/// Handles a vote request without a form body.
///
/// The country is only read from a submitted form, so links cannot
/// cast or remove votes.
pub(crate) async fn no_country() -> ServerResult<Redirect> {
    Err(ServerError::NotFound)
}

async fn find_country(state: &State, name: &str) -> ServerResult<CountryModel> {
    let database = state.database().await?;

    database
        .get_country_by_name(name)
        .await?
        .ok_or(ServerError::NotFound)
}

async fn cast_vote(
    state: &State,
    req_state: &RequestState,
    user_id: i64,
    country_name: &str,
    vote_type: VoteType,
) -> ServerResult<Redirect> {
    let database = state.database().await?;
    let country = find_country(state, country_name).await?;
    let name = display_name(&country.name);

    let vote = UserVoteModel {
        user_id,
        country_id: country.id,
        vote_id: vote_type,
    };

    match database.add_vote(vote).await {
        Ok(()) => {
            let verb = match vote_type {
                VoteType::Upvote => "upvoted",
                VoteType::Downvote => "downvoted",
            };
            req_state
                .flash(
                    FlashLevel::Success,
                    format!("You have {} {}'s information.", verb, name),
                )
                .await;
        }
        Err(ServerError::VoteAlreadyExists) => {
            req_state
                .flash(
                    FlashLevel::Warning,
                    format!("You have already voted for {}.", name),
                )
                .await;
        }
        Err(e) => return Err(e),
    }

    Ok(Redirect::to(&country_path(&country.name)))
}
