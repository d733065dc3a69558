//! Property tests for request validation, echoing and payload round trips.

use proptest::prelude::*;
use ragux_protocol::{
    Image, Quote, QuoteMetadata, RequestSchemas, SearchResponse, SearchResult, Source,
};
use serde_json::{json, Map, Value};

fn arb_mode() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("online"), Just("offline")]
}

fn arb_query_type() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("text"), Just("image")]
}

/// Optional filters object with any subset of its three keys.
fn arb_filters() -> impl Strategy<Value = Option<Value>> {
    proptest::option::of(
        (
            proptest::option::of("\\PC{0,12}"),
            proptest::option::of("\\PC{0,12}"),
            proptest::option::of("[0-9]{4}-[0-9]{2}"),
        )
            .prop_map(|(iteration, scenario, date)| {
                let mut obj = Map::new();
                if let Some(v) = iteration {
                    obj.insert("iteration".into(), Value::String(v));
                }
                if let Some(v) = scenario {
                    obj.insert("scenario".into(), Value::String(v));
                }
                if let Some(v) = date {
                    obj.insert("date".into(), Value::String(v));
                }
                Value::Object(obj)
            }),
    )
}

fn payload_with_distances(distances: &[Option<f64>]) -> SearchResponse {
    let quotes = distances
        .iter()
        .enumerate()
        .map(|(i, distance)| Quote {
            id: format!("q{}", i + 1),
            text: format!("finding {}", i),
            metadata: QuoteMetadata {
                id: "S-1".into(),
                title: "Study".into(),
                iteration: "1".into(),
                date: "2024-01".into(),
                filename: "S-1.md".into(),
                section_path: "Findings".into(),
                chunk_index: i as u32,
                product: "Card".into(),
                tags: None,
            },
            distance: *distance,
        })
        .collect();

    SearchResponse {
        summary: "summary".into(),
        quotes,
        sources: vec![Source {
            id: "S-1".into(),
            title: "Study".into(),
            date: "2024-01".into(),
            iteration: "1".into(),
        }],
        images: vec![Image {
            path: "fig.png".into(),
            alt: Some("figure".into()),
            source_id: "S-1".into(),
        }],
    }
}

/// *For any* valid search body, the echoed mode, queryType, query and
/// filters equal the request's (query defaults to "", filters to {}).
mod prop_search_echo {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn echoed_fields_equal_request(
            mode in arb_mode(),
            query_type in arb_query_type(),
            query in proptest::option::of("\\PC{0,40}"),
            filters in arb_filters(),
        ) {
            let mut body = json!({ "mode": mode, "queryType": query_type });
            if let Some(q) = &query {
                body["query"] = Value::String(q.clone());
            }
            if let Some(f) = &filters {
                body["filters"] = f.clone();
            }

            let schemas = RequestSchemas::new().unwrap();
            let request = schemas.search(&body).unwrap();
            let result = SearchResult::echo(payload_with_distances(&[Some(0.1)]), &request);
            let echoed = serde_json::to_value(&result).unwrap();

            prop_assert_eq!(&echoed["mode"], &body["mode"]);
            prop_assert_eq!(&echoed["queryType"], &body["queryType"]);
            prop_assert_eq!(
                echoed["query"].clone(),
                Value::String(query.unwrap_or_default())
            );
            prop_assert_eq!(echoed["filters"].clone(), filters.unwrap_or_else(|| json!({})));
        }
    }
}

/// *For any* `mode` outside {online, offline}, validation fails on `mode`.
mod prop_invalid_mode {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn unknown_mode_is_reported(mode in "\\PC{0,16}") {
            prop_assume!(mode != "online" && mode != "offline");
            let schemas = RequestSchemas::new().unwrap();
            let err = schemas
                .search(&json!({ "mode": mode, "queryType": "text" }))
                .unwrap_err();
            prop_assert!(err.fields().contains(&"mode".to_string()));
        }

        #[test]
        fn non_string_mode_is_reported(mode in prop_oneof![
            any::<i64>().prop_map(Value::from),
            any::<bool>().prop_map(Value::from),
            Just(Value::Null),
        ]) {
            let schemas = RequestSchemas::new().unwrap();
            let err = schemas
                .search(&json!({ "mode": mode, "queryType": "text" }))
                .unwrap_err();
            prop_assert_eq!(err.fields(), vec!["mode".to_string()]);
        }
    }
}

/// *For any* finite non-negative distances, a payload survives a JSON
/// round trip unchanged.
mod prop_payload_round_trip {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn distances_survive_exactly(
            distances in proptest::collection::vec(
                proptest::option::of(0.0f64..1.0e6),
                0..10,
            ),
        ) {
            let payload = payload_with_distances(&distances);
            let text = serde_json::to_string(&payload).unwrap();
            let parsed: SearchResponse = serde_json::from_str(&text).unwrap();
            prop_assert_eq!(&parsed, &payload);
            for (quote, expected) in parsed.quotes.iter().zip(&distances) {
                prop_assert_eq!(quote.distance.map(f64::to_bits), expected.map(f64::to_bits));
            }
        }
    }
}
