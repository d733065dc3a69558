//! Stored answer lookup.

use std::sync::Arc;

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use ragux_protocol::{AnswerResponse, IssueCode, ValidationError};
use ragux_resolve::stamp_answer;

use crate::delay::Endpoint;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/answers/{id}", get(get_answer))
}

/// GET /api/answers/{id}: answer stamped with id, createdAt and mode.
async fn get_answer(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let Path(id) = path?;
    let Query(params) = query?;

    let modes: Vec<&str> = params
        .iter()
        .filter(|(key, _)| key == "mode")
        .map(|(_, value)| value.as_str())
        .collect();
    if modes.len() > 1 {
        return Err(ValidationError::single(
            vec!["mode".into()],
            IssueCode::InvalidParameter,
            format!("Expected a single mode, received {}", modes.len()),
        )
        .into());
    }
    let mode = state.schemas.answer_mode(modes.first().copied())?;

    state.delay.pause(Endpoint::Answer).await;

    let payload = state.generator.answer(&id, mode)?;
    Ok(Json(stamp_answer(payload, &id, mode)))
}
