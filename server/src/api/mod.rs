//! HTML pages.

mod account;
mod admin;
mod forms;
mod pages;
mod search;
mod votes;


use axum::{
    body::Body,
    http::Request,
    middleware::{from_fn, Next},
    response::Html,
    routing::get,
    Router,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::access::http::{require_roles, ADMIN_ONLY, ANY_ROLE};
use crate::access::Flash;
use crate::database::entity::user::{Role, UserModel};
use crate::error::ServerResult;
use crate::templates;
use crate::{RequestState, State};

/// Data available to every page.
#[derive(Debug, Serialize)]
struct Page<T: Serialize> {
    flashes: Vec<Flash>,
    current_user: Option<PageUser>,

    #[serde(flatten)]
    data: T,
}

#[derive(Debug, Serialize)]
struct PageUser {
    username: String,
    is_admin: bool,
}

impl From<UserModel> for PageUser {
    fn from(user: UserModel) -> Self {
        Self {
            is_admin: user.role == Role::Admin,
            username: user.username,
        }
    }
}

/// Renders a page, consuming the pending flash messages.
async fn render_page<T: Serialize>(
    state: &State,
    req_state: &RequestState,
    template: &str,
    data: T,
) -> ServerResult<Html<String>> {
    let database = state.database().await?;
    let current_user = req_state.current_user(database).await?.map(PageUser::from);
    let flashes = req_state.session.lock().await.take_flashes();

    let page = templates::render(
        template,
        &Page {
            flashes,
            current_user,
            data,
        },
    )?;

    Ok(Html(page))
}

/// Characters escaped in a path segment. Unreserved characters are kept.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Returns the path of a country page.
fn country_path(name: &str) -> String {
    format!("/country/{}", utf8_percent_encode(name, PATH_SEGMENT))
}

/// Returns a country name with the first letter capitalized.
fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub(crate) fn get_router() -> Router {
    let admin = Router::new()
        .route("/admin", get(admin::get_admin).post(admin::post_admin))
        .route_layer(from_fn(|req: Request<Body>, next: Next<Body>| {
            require_roles(ADMIN_ONLY, req, next)
        }));

    let members = Router::new()
        .route("/logout", get(account::logout))
        .route("/upvote", get(votes::no_country).post(votes::upvote))
        .route("/downvote", get(votes::no_country).post(votes::downvote))
        .route("/vote/reset", get(votes::no_country).post(votes::reset_vote))
        .route_layer(from_fn(|req: Request<Body>, next: Next<Body>| {
            require_roles(ANY_ROLE, req, next)
        }));

    Router::new()
        .route("/", get(pages::homepage))
        .route("/map", get(pages::map))
        .route("/country", get(pages::country_placeholder))
        .route("/search", get(search::get_search).post(search::post_search))
        .route("/country/:name", get(search::show_country))
        .route("/login", get(account::get_login).post(account::post_login))
        .route(
            "/register",
            get(account::get_register).post(account::post_register),
        )
        .merge(admin)
        .merge(members)
}
