//! Service health and info.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}

/// GET /api/health: generator in use and corpus size. Never delayed.
async fn get_health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let stats = state.generator.stats();

    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "generator": state.generator.name(),
        "quotes": stats.map(|s| s.quotes),
        "sources": stats.map(|s| s.sources),
        "images": stats.map(|s| s.images),
        "latencyMs": {
            "search": state.config.latency.search_ms,
            "followup": state.config.latency.followup_ms,
            "answer": state.config.latency.answer_ms,
        },
    }))
}
