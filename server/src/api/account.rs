//! Registration, login and logout.

use axum::extract::{Extension, Form};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde_json::json;
use tracing::instrument;
use validator::Validate;

use super::forms::{field_errors, LoginForm, RegisterForm};
use super::render_page;
use crate::access::FlashLevel;
use crate::database::entity::user::Role;
use crate::database::{NewUser, UserDatabase};
use crate::error::{ServerError, ServerResult};
use crate::{RequestState, State};

#[instrument(skip_all)]
pub(crate) async fn get_login(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
) -> ServerResult<Html<String>> {
    render_page(
        &state,
        &req_state,
        "login",
        json!({ "form": LoginForm::default() }),
    )
    .await
}

#[instrument(skip_all)]
pub(crate) async fn post_login(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
    Form(form): Form<LoginForm>,
) -> ServerResult<Response> {
    if let Err(errors) = form.validate() {
        tracing::debug!("Rejected login form: {}", errors);
        let data = json!({ "form": form, "errors": field_errors(&errors) });
        return Ok(render_page(&state, &req_state, "login", data)
            .await?
            .into_response());
    }

    let database = state.database().await?;

    if database.validate_user(&form.username, &form.password).await? {
        if let Some(user) = database.get_user_by_name(&form.username).await? {
            tracing::info!("User {} logged in", user.username);

            req_state.log_in(&user).await;
            req_state
                .flash(FlashLevel::Success, "Logged in successfully.")
                .await;

            return Ok(Redirect::to("/").into_response());
        }
    }

    req_state
        .flash(
            FlashLevel::Warning,
            "Login unsuccessful. Please check username and password.",
        )
        .await;

    Ok(render_page(&state, &req_state, "login", json!({ "form": form }))
        .await?
        .into_response())
}

#[instrument(skip_all)]
pub(crate) async fn get_register(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
) -> ServerResult<Html<String>> {
    render_page(
        &state,
        &req_state,
        "register",
        json!({ "form": RegisterForm::default() }),
    )
    .await
}

/// Creates a guest account.
#[instrument(skip_all)]
pub(crate) async fn post_register(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
    Form(form): Form<RegisterForm>,
) -> ServerResult<Response> {
    if let Err(errors) = form.validate() {
        tracing::debug!("Rejected registration form: {}", errors);
        let data = json!({ "form": form, "errors": field_errors(&errors) });
        return Ok(render_page(&state, &req_state, "register", data)
            .await?
            .into_response());
    }

    let database = state.database().await?;
    let user = NewUser::new(form.username.clone(), &form.password, Role::Guest).await?;

    match database.add_user(user).await {
        Ok(user) => {
            req_state
                .flash(
                    FlashLevel::Success,
                    format!("Account created for {}!", user.username),
                )
                .await;

            Ok(Redirect::to("/login").into_response())
        }
        Err(ServerError::UserAlreadyExists { username }) => {
            req_state
                .flash(
                    FlashLevel::Warning,
                    format!("Username \"{}\" is already taken. Please try again.", username),
                )
                .await;

            Ok(render_page(&state, &req_state, "register", json!({ "form": form }))
                .await?
                .into_response())
        }
        Err(e) => Err(e),
    }
}

#[instrument(skip_all)]
pub(crate) async fn logout(Extension(req_state): Extension<RequestState>) -> Redirect {
    req_state.log_out().await;
    req_state
        .flash(FlashLevel::Success, "Logged out successfully.")
        .await;

    Redirect::to("/")
}
