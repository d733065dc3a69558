//! Response envelopes: echo request fields onto search payloads, link
//! follow-ups to their thread, stamp stored answers.

use chrono::{DateTime, SecondsFormat, Utc};
use ragux_protocol::{
    AnswerResponse, FollowupRequest, FollowupResponse, Mode, SearchRequest, SearchResponse,
    SearchResult,
};
use uuid::Uuid;

/// A fresh answer id: `ans_<unix millis>_<8 random hex>`.
///
/// The millisecond prefix keeps ids ordered by creation time; the random
/// suffix separates ids minted within the same millisecond.
pub fn mint_answer_id() -> String {
    mint_answer_id_at(Utc::now())
}

pub fn mint_answer_id_at(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("ans_{}_{}", now.timestamp_millis(), &suffix[..8])
}

pub fn echo_search(payload: SearchResponse, request: &SearchRequest) -> SearchResult {
    SearchResult::echo(payload, request)
}

/// Attach the caller's thread id, unchanged, and a new answer id.
pub fn correlate_followup(payload: SearchResponse, request: &FollowupRequest) -> FollowupResponse {
    FollowupResponse {
        response: payload,
        thread_id: request.thread_id.clone(),
        answer_id: mint_answer_id(),
    }
}

pub fn stamp_answer(payload: SearchResponse, id: &str, mode: Mode) -> AnswerResponse {
    stamp_answer_at(payload, id, mode, Utc::now())
}

pub fn stamp_answer_at(
    payload: SearchResponse,
    id: &str,
    mode: Mode,
    created_at: DateTime<Utc>,
) -> AnswerResponse {
    AnswerResponse {
        response: payload,
        id: id.to_string(),
        created_at: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        mode,
    }
}
