//! Country search and details.

use axum::extract::{Extension, Form, Path};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Serialize;
use serde_json::json;
use tracing::instrument;
use validator::Validate;

use super::forms::{field_errors, SearchForm};
use super::{country_path, display_name, render_page};
use crate::access::FlashLevel;
use crate::database::entity::advice::AdviceModel;
use crate::database::entity::user_vote::VoteType;
use crate::database::{CountryAdviceDatabase, CountryDatabase, VoteDatabase};
use crate::error::{ServerError, ServerResult};
use crate::{RequestState, State};

#[derive(Debug, Serialize)]
struct CountryView {
    name: String,
    display_name: String,
    description: String,
    travel_advice: String,
    crime_index: f64,
    disaster_risk: f64,
    corruption_index: f64,
    health: f64,
}

#[instrument(skip_all)]
pub(crate) async fn get_search(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
) -> ServerResult<Html<String>> {
    render_page(
        &state,
        &req_state,
        "search",
        json!({ "form": SearchForm::default() }),
    )
    .await
}

/// Looks up a country, redirecting to its page if found.
#[instrument(skip_all)]
pub(crate) async fn post_search(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
    Form(form): Form<SearchForm>,
) -> ServerResult<Response> {
    if let Err(errors) = form.validate() {
        let data = json!({ "form": form, "errors": field_errors(&errors) });
        return Ok(render_page(&state, &req_state, "search", data)
            .await?
            .into_response());
    }

    let database = state.database().await?;

    if let Some(country) = database
        .get_country_by_name(&form.search.trim().to_lowercase())
        .await?
    {
        return Ok(Redirect::to(&country_path(&country.name)).into_response());
    }

    req_state
        .flash(
            FlashLevel::Warning,
            format!("Country \"{}\" not found. Please try again.", form.search),
        )
        .await;

    Ok(render_page(&state, &req_state, "search", json!({ "form": form }))
        .await?
        .into_response())
}

/// Shows a country with its votes, aggregated risk and advice.
#[instrument(skip_all, fields(name))]
pub(crate) async fn show_country(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
    Path(name): Path<String>,
) -> ServerResult<Html<String>> {
    tracing::Span::current().record("name", name.as_str());

    let database = state.database().await?;
    let country = database
        .get_country_by_name(&name)
        .await?
        .ok_or(ServerError::NotFound)?;

    let upvotes = database.get_votes(&country, VoteType::Upvote).await?.len();
    let downvotes = database.get_votes(&country, VoteType::Downvote).await?.len();
    let total_index = country.indices().aggregate();
    let advice: Vec<AdviceModel> = database.get_advice(&country).await?;

    let view = CountryView {
        display_name: display_name(&country.name),
        name: country.name,
        description: country.description,
        travel_advice: country.travel_advice,
        crime_index: country.crime_index,
        disaster_risk: country.disaster_risk,
        corruption_index: country.corruption_index,
        health: country.health,
    };

    render_page(
        &state,
        &req_state,
        "country",
        json!({
            "country": view,
            "upvotes": upvotes,
            "downvotes": downvotes,
            "total_index": total_index,
            "advice": advice,
        }),
    )
    .await
}
