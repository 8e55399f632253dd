//! Static pages.

use axum::extract::Extension;
use axum::response::Html;
use serde_json::json;
use tracing::instrument;

use super::render_page;
use crate::error::ServerResult;
use crate::{RequestState, State};

#[instrument(skip_all)]
pub(crate) async fn homepage(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
) -> ServerResult<Html<String>> {
    render_page(&state, &req_state, "homepage", json!({})).await
}

#[instrument(skip_all)]
pub(crate) async fn map(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
) -> ServerResult<Html<String>> {
    render_page(&state, &req_state, "map", json!({})).await
}

/// The country page with no country selected.
#[instrument(skip_all)]
pub(crate) async fn country_placeholder(
    Extension(state): Extension<State>,
    Extension(req_state): Extension<RequestState>,
) -> ServerResult<Html<String>> {
    render_page(&state, &req_state, "country_placeholder", json!({})).await
}
