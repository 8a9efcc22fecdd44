//! Verify request building and route resolution against the JSON test
//! vectors stored in `test-vectors/`.

use std::collections::HashMap;

use geotrackr_core::{ApiClient, History, HttpMethod, HttpRequest, Router};

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        other => panic!("unknown method: {other}"),
    }
}

fn build(client: &ApiClient, operation: &str, input: &serde_json::Value) -> HttpRequest {
    let id = || input["id"].as_str().unwrap();
    let limit = || input["limit"].as_u64().unwrap() as u32;
    let offset = || input["offset"].as_u64().unwrap() as u32;
    match operation {
        "users" => client.build_users(input["username"].as_str().unwrap(), limit(), offset()),
        "user_by_id" => client.build_user_by_id(id()),
        "user_duels" => client.build_user_duels(id(), limit(), offset()),
        "ranking_graph_data" => client.build_ranking_graph_data(id()),
        other => panic!("unknown operation: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();
    let base_url = vectors["base_url"].as_str().unwrap();

    let c = ApiClient::new(base_url);
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        let req = build(&c, case["operation"].as_str().unwrap(), &case["input"]);
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, format!("{base_url}{}", expected_req["path"].as_str().unwrap()), "{name}: path");

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
        assert!(req.body.is_none(), "{name}: body should be None");
    }
}

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

#[test]
fn route_test_vectors() {
    let raw = include_str!("../../test-vectors/routes.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let router = Router::new(History::Web).unwrap();
    for case in vectors["cases"].as_array().unwrap() {
        let location = case["location"].as_str().unwrap();
        let resolved = router.resolve(location);
        let expected = &case["expected"];

        if expected.is_null() {
            assert!(resolved.is_none(), "{location}: expected no match, got {resolved:?}");
            continue;
        }

        let m = resolved.unwrap_or_else(|| panic!("{location}: expected a match"));
        assert_eq!(m.name.as_str(), expected["name"].as_str().unwrap(), "{location}: name");
        let params: HashMap<String, String> =
            serde_json::from_value(expected["params"].clone()).unwrap();
        assert_eq!(m.params, params, "{location}: params");
    }
}
