//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use rickmorty_core::{Character, Episode, HttpMethod, HttpRequest, HttpResponse, RickMortyClient};

const BASE_URL: &str = "https://rickandmortyapi.com/api";

fn client() -> RickMortyClient {
    RickMortyClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        other => panic!("unknown method: {other}"),
    }
}

fn assert_request(name: &str, req: &HttpRequest, expected: &serde_json::Value) {
    assert_eq!(
        req.method,
        parse_method(expected["method"].as_str().unwrap()),
        "{name}: method"
    );
    assert_eq!(
        req.url,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: path"
    );
}

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

fn expected_error(case: &serde_json::Value) -> Option<&str> {
    case["expected_result"]["error"].as_str()
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let raw = include_str!("../../test-vectors/list.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];

        let req = c.build_list_characters(
            input["name"].as_str().unwrap(),
            input["page"].as_u64().unwrap() as u32,
        );
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_list_characters(simulated(case));
        match expected_error(case) {
            Some(message) => {
                assert_eq!(result.unwrap_err().to_string(), message, "{name}: error");
            }
            None => {
                let page = result.unwrap();
                let expected = &case["expected_result"]["ok"];
                let names: Vec<&str> = page.results.iter().map(|c| c.name.as_str()).collect();
                let expected_names: Vec<&str> = expected["result_names"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|n| n.as_str().unwrap())
                    .collect();
                assert_eq!(names, expected_names, "{name}: results");
                assert_eq!(
                    page.info.prev.is_some(),
                    expected["has_prev"].as_bool().unwrap(),
                    "{name}: prev"
                );
                assert_eq!(
                    page.info.next.is_some(),
                    expected["has_next"].as_bool().unwrap(),
                    "{name}: next"
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Get character
// ---------------------------------------------------------------------------

#[test]
fn get_character_test_vectors() {
    let raw = include_str!("../../test-vectors/get_character.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input"]["id"].as_u64().unwrap() as u32;

        let req = c.build_get_character(id);
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_get_character(simulated(case));
        match expected_error(case) {
            Some(message) => {
                assert_eq!(result.unwrap_err().to_string(), message, "{name}: error");
            }
            None => {
                let expected: Character =
                    serde_json::from_value(case["expected_result"]["ok"].clone()).unwrap();
                assert_eq!(result.unwrap(), expected, "{name}: parsed result");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Episodes
// ---------------------------------------------------------------------------

#[test]
fn episodes_test_vectors() {
    let raw = include_str!("../../test-vectors/episodes.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let urls: Vec<String> = serde_json::from_value(case["input"]["urls"].clone()).unwrap();

        let Some(req) = c.build_get_episodes(&urls) else {
            assert!(case["expected_request"].is_null(), "{name}: expected a request");
            let expected: Vec<Episode> =
                serde_json::from_value(case["expected_result"]["ok"].clone()).unwrap();
            assert!(expected.is_empty(), "{name}: no request means no episodes");
            continue;
        };
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_get_episodes(simulated(case));
        match expected_error(case) {
            Some(message) => {
                assert_eq!(result.unwrap_err().to_string(), message, "{name}: error");
            }
            None => {
                let expected: Vec<Episode> =
                    serde_json::from_value(case["expected_result"]["ok"].clone()).unwrap();
                assert_eq!(result.unwrap(), expected, "{name}: parsed result");
            }
        }
    }
}
