//! HTTP middlewares for access control.

use axum::{
    extract::Extension,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::{Duration as ChronoDuration, Utc};
use cookie::{Cookie, SameSite};
use sea_orm::DatabaseConnection;

use crate::access::{FlashLevel, Session};
use crate::database::entity::user::{Role, UserModel};
use crate::database::UserDatabase;
use crate::error::{ServerError, ServerResult};
use crate::{RequestState, State};

/// Roles allowed on administrative pages.
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Roles allowed on pages that only require logging in.
pub const ANY_ROLE: &[Role] = &[Role::Guest, Role::Admin];

/// The user who passed the role guard.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserModel);

/// Resolves the user ID stored in a session.
///
/// Returns `None` if the account no longer exists.
pub async fn load_user(database: &DatabaseConnection, user_id: i64) -> ServerResult<Option<UserModel>> {
    let user = database.get_user_by_id(user_id).await?;

    if user.is_none() {
        tracing::debug!("Session refers to missing user #{}", user_id);
    }

    Ok(user)
}

/// Loads the session from the cookie and writes it back if it changed.
pub(crate) async fn apply_session<B>(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
    req: Request<B>,
    next: Next<B>,
) -> ServerResult<Response> {
    let session_config = &state.config.session;

    let token = req
        .headers()
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == session_config.cookie_name)
        .map(|cookie| cookie.value().to_owned());

    if let Some(token) = token {
        match Session::from_jwt(&token, &session_config.secret.decoding) {
            Ok(session) => {
                *req_state.session.lock().await = session;
                tracing::trace!("Loaded valid session");
            }
            Err(e) => {
                tracing::debug!("Ignoring bad session token: {}", e);
            }
        }
    }

    let mut response = next.run(req).await;

    let session = req_state.session.lock().await;
    if session.is_modified() {
        let lifetime = session_config.lifetime.as_secs() as i64;
        let exp = Utc::now() + ChronoDuration::seconds(lifetime);
        let token = session.encode(&session_config.secret.encoding, &exp)?;

        let cookie = Cookie::build(session_config.cookie_name.to_owned(), token)
            .path("/")
            .http_only(true)
            .secure(session_config.secure_cookie)
            .same_site(SameSite::Lax)
            .max_age(cookie::time::Duration::seconds(lifetime))
            .finish();

        let value = HeaderValue::from_str(&cookie.to_string()).map_err(ServerError::request_error)?;
        response.headers_mut().append(header::SET_COOKIE, value);
    }

    Ok(response)
}

/// Restricts a route to logged-in users with one of the allowed roles.
///
/// Anonymous users are sent to the login page, and users with other
/// roles are sent to the home page. Otherwise the user is made
/// available to the handler as a [`CurrentUser`] extension.
pub async fn require_roles<B>(
    allowed: &'static [Role],
    mut req: Request<B>,
    next: Next<B>,
) -> ServerResult<Response> {
    let state = req
        .extensions()
        .get::<State>()
        .cloned()
        .ok_or(ServerError::InternalServerError)?;
    let req_state = req
        .extensions()
        .get::<RequestState>()
        .cloned()
        .ok_or(ServerError::InternalServerError)?;

    let database = state.database().await?;

    match req_state.current_user(database).await? {
        None => {
            req_state
                .flash(
                    FlashLevel::Warning,
                    "The page you are attempting to access requires you to login",
                )
                .await;
            Ok(Redirect::to("/login").into_response())
        }
        Some(user) if !allowed.contains(&user.role) => {
            tracing::debug!("User {} lacks the role for {}", user.username, req.uri());
            req_state
                .flash(
                    FlashLevel::Error,
                    "You do not have the correct credentials for this page.",
                )
                .await;
            Ok(Redirect::to("/").into_response())
        }
        Some(user) => {
            req.extensions_mut().insert(CurrentUser(user));
            Ok(next.run(req).await)
        }
    }
}
