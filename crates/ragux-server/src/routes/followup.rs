//! Follow-up route: continues a thread started by a search.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use ragux_protocol::{parse_body, FollowupResponse};
use ragux_resolve::correlate_followup;
use tracing::info;

use crate::delay::Endpoint;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/followup", post(followup))
}

/// POST /api/followup: thread id echoed, answer id freshly minted.
async fn followup(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<FollowupResponse>, ApiError> {
    let body = parse_body(&body)?;
    let request = state.schemas.followup(&body)?;

    state.delay.pause(Endpoint::Followup).await;

    let payload = state.generator.followup(&request)?;
    let response = correlate_followup(payload, &request);
    info!(
        thread_id = %response.thread_id,
        answer_id = %response.answer_id,
        "Follow-up answered"
    );
    Ok(Json(response))
}
