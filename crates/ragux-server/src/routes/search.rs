//! Search route.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use ragux_protocol::{parse_body, SearchResult};
use ragux_resolve::echo_search;

use crate::delay::Endpoint;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/search", post(search))
}

/// POST /api/search: payload with mode, queryType, query and filters echoed.
async fn search(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SearchResult>, ApiError> {
    let body = parse_body(&body)?;
    let request = state.schemas.search(&body)?;

    state.delay.pause(Endpoint::Search).await;

    let payload = state.generator.search(&request)?;
    Ok(Json(echo_search(payload, &request)))
}
