//! API parity tests: validates that response shapes match what the
//! browser UI (lib/types.ts) expects.
//!
//! These build responses from the shared protocol types and the builtin
//! corpus (no HTTP server needed) and check field names and types.

use std::collections::HashSet;

use ragux_protocol::{Mode, QueryType, SearchFilters, SearchRequest, SearchResponse};
use ragux_resolve::correlate::stamp_answer;
use ragux_resolve::{correlate_followup, echo_search, MockCorpus};

fn search_payload() -> SearchResponse {
    MockCorpus::builtin().search
}

/// SearchResponse: { summary, quotes[], sources[], images[] }
#[test]
fn test_search_response_shape() {
    let json = serde_json::to_value(search_payload()).unwrap();

    assert!(json["summary"].is_string());
    assert!(json["quotes"].is_array());
    assert!(json["sources"].is_array());
    assert!(json["images"].is_array());

    let quote = &json["quotes"][0];
    assert!(quote["id"].is_string());
    assert!(quote["text"].is_string());
    assert!(quote["distance"].is_number());

    let meta = &quote["metadata"];
    for key in ["id", "title", "iteration", "date", "filename", "section_path", "product"] {
        assert!(meta[key].is_string(), "metadata.{} should be a string", key);
    }
    assert!(meta["chunk_index"].is_number());

    let source = &json["sources"][0];
    for key in ["id", "title", "date", "iteration"] {
        assert!(source[key].is_string(), "source.{} should be a string", key);
    }

    let image = &json["images"][0];
    assert!(image["path"].is_string());
    assert!(image["alt"].is_string());
    assert!(image["source_id"].is_string());
}

/// Every quote and image points at a source in the same response.
#[test]
fn test_referential_integrity() {
    let payload = search_payload();
    let ids: HashSet<&str> = payload.sources.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids.len(), payload.sources.len());
    assert!(payload.quotes.iter().all(|q| ids.contains(q.metadata.id.as_str())));
    assert!(payload.images.iter().all(|i| ids.contains(i.source_id.as_str())));
}

/// Serializing and parsing back loses nothing.
#[test]
fn test_search_response_round_trip() {
    let payload = search_payload();
    let text = serde_json::to_string(&payload).unwrap();
    let parsed: SearchResponse = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, payload);
    assert_eq!(parsed.quotes[0].distance, Some(0.23));
}

/// Search result: SearchResponse + { mode, queryType, query, filters }
#[test]
fn test_search_result_shape() {
    let request = SearchRequest {
        mode: Mode::Online,
        query_type: QueryType::Text,
        query: Some("беспроцентный период".into()),
        file_ids: None,
        filters: Some(SearchFilters {
            iteration: Some("3".into()),
            scenario: None,
            date: None,
        }),
    };
    let json = serde_json::to_value(echo_search(search_payload(), &request)).unwrap();

    assert_eq!(json["mode"], "online");
    assert_eq!(json["queryType"], "text");
    assert_eq!(json["query"], "беспроцентный период");
    assert_eq!(json["filters"], serde_json::json!({"iteration": "3"}));
    assert!(json["summary"].is_string());
    assert!(json.get("fileIds").is_none());
}

/// FollowupResponse: SearchResponse + { threadId, answerId }
#[test]
fn test_followup_response_shape() {
    let request = ragux_protocol::FollowupRequest {
        thread_id: "thread-1".into(),
        query: "ещё".into(),
    };
    let json = serde_json::to_value(correlate_followup(search_payload(), &request)).unwrap();

    assert_eq!(json["threadId"], "thread-1");
    assert!(json["answerId"].is_string());
    assert!(json["quotes"].is_array());
    assert!(json.get("thread_id").is_none());
}

/// AnswerResponse: SearchResponse + { id, createdAt, mode }
#[test]
fn test_answer_response_shape() {
    let json = serde_json::to_value(stamp_answer(search_payload(), "abc123", Mode::Online)).unwrap();

    assert_eq!(json["id"], "abc123");
    assert_eq!(json["mode"], "online");
    assert!(json["createdAt"].is_string());
    assert!(json["createdAt"].as_str().unwrap().ends_with('Z'));
    assert!(json["images"].is_array());
}

/// Validation failure body: { error, details: { issues: [{ path, code, message }] } }
#[test]
fn test_validation_error_shape() {
    let err = ragux_protocol::RequestSchemas::new()
        .unwrap()
        .search(&serde_json::json!({"mode": "invalid"}))
        .unwrap_err();
    let json = serde_json::json!({ "error": "Invalid request", "details": err });

    let issues = json["details"]["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 2);
    for issue in issues {
        assert!(issue["path"].is_array());
        assert!(issue["code"].is_string());
        assert!(issue["message"].is_string());
    }
}
