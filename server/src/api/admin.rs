//! Country editor for administrators.
//!
//! Editing happens in two phases. The admin first searches for a
//! country by name, then submits the prefilled edit form. The country
//! being edited travels with the form in the hidden `country_id`
//! field, so concurrent editors do not interfere with each other.

use axum::extract::{Extension, Form};
use axum::response::Html;
use serde_json::json;
use tracing::instrument;
use validator::Validate;

use super::forms::{field_errors, AdminSubmission, CountryForm, SearchForm};
use super::render_page;
use crate::access::http::CurrentUser;
use crate::access::FlashLevel;
use crate::database::CountryDatabase;
use crate::error::{ServerError, ServerResult};
use crate::{RequestState, State};

#[instrument(skip_all)]
pub(crate) async fn get_admin(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
) -> ServerResult<Html<String>> {
    render_search(&state, &req_state, SearchForm::default()).await
}

#[instrument(skip_all)]
pub(crate) async fn post_admin(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
    Extension(CurrentUser(admin)): Extension<CurrentUser>,
    Form(submission): Form<AdminSubmission>,
) -> ServerResult<Html<String>> {
    match submission {
        AdminSubmission::Search(form) => find_country(&state, &req_state, form).await,
        AdminSubmission::Edit(form) => {
            tracing::debug!("Country edit submitted by {}", admin.username);
            edit_country(&state, &req_state, form).await
        }
    }
}

async fn find_country(
    state: &State,
    req_state: &RequestState,
    form: SearchForm,
) -> ServerResult<Html<String>> {
    if let Err(errors) = form.validate() {
        let data = json!({ "search_form": form, "errors": field_errors(&errors) });
        return render_page(state, req_state, "admin", data).await;
    }

    let database = state.database().await?;
    let country = database
        .get_country_by_name(&form.search.trim().to_lowercase())
        .await?;

    match country {
        Some(country) => {
            let country_form = CountryForm::from_country(
                country.id,
                &country.name,
                &country.description,
                &country.travel_advice,
                country.indices(),
            );

            render_page(
                state,
                req_state,
                "admin",
                json!({ "country_form": country_form }),
            )
            .await
        }
        None => {
            req_state
                .flash(
                    FlashLevel::Warning,
                    format!("Country \"{}\" not found. Please try again.", form.search),
                )
                .await;

            render_search(state, req_state, form).await
        }
    }
}

async fn edit_country(
    state: &State,
    req_state: &RequestState,
    form: CountryForm,
) -> ServerResult<Html<String>> {
    let indices = match (form.validate(), form.indices()) {
        (Ok(()), Some(indices)) => indices,
        (result, _) => {
            let errors = result.err().map(|e| field_errors(&e)).unwrap_or_default();
            let data = json!({ "country_form": form, "errors": errors });
            return render_page(state, req_state, "admin", data).await;
        }
    };

    let country_id = form
        .country_id
        .parse::<i64>()
        .map_err(ServerError::request_error)?;

    let database = state.database().await?;
    let mut country = database
        .get_country_by_id(country_id)
        .await?
        .ok_or(ServerError::NotFound)?;

    country.name = form.name.trim().to_lowercase();
    country.description = form.description;
    country.travel_advice = form.travel_advice;
    country.set_indices(indices);

    let country = database.update_country(&country).await?;

    req_state
        .flash(
            FlashLevel::Success,
            format!("Country \"{}\" has been updated.", country.name),
        )
        .await;

    render_search(state, req_state, SearchForm::default()).await
}

async fn render_search(
    state: &State,
    req_state: &RequestState,
    form: SearchForm,
) -> ServerResult<Html<String>> {
    render_page(state, req_state, "admin", json!({ "search_form": form })).await
}
