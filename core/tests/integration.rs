//! End-to-end tests against the live mock API.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every operation
//! twice: once with the caller executing the round-trip through ureq
//! (host-does-IO), once through the bundled async `Api` transport.

use geotrackr_core::{
    Api, ApiClient, ApiConfig, ApiError, HttpMethod, HttpRequest, HttpResponse, RankingPoint,
    SoloDuel, User, DEFAULT_BASE_URL,
};

/// Start the mock server on its own thread and return its base URL.
fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_api::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}/api")
}

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Status codes are not treated as errors so the core client sees 4xx/5xx
/// responses as data.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match req.method {
        HttpMethod::Get => {
            let mut call = agent.get(&req.path);
            for (key, value) in &req.headers {
                call = call.header(key.as_str(), value.as_str());
            }
            call.call()
        }
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

#[test]
fn host_executed_round_trips() {
    let client = ApiClient::new(&spawn_server());

    // Search: case-insensitive substring match.
    let req = client.build_users("ali", 10, 0);
    let users = client.parse_body(execute(req)).unwrap();
    let names: Vec<&str> = users
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Alice", "Alicia"]);

    // Profile.
    let req = client.build_user_by_id("u1");
    let user: User = client.parse_body_as(execute(req)).unwrap();
    assert_eq!(user.username, "Valentin");

    // Duels, newest first.
    let req = client.build_user_duels("u1", 10, 0);
    let duels: Vec<SoloDuel> = client.parse_body_as(execute(req)).unwrap();
    assert_eq!(duels.len(), 2);
    assert!(duels[0].start_time > duels[1].start_time);

    // Ranking graph.
    let req = client.build_ranking_graph_data("u1");
    let points: Vec<RankingPoint> = client.parse_body_as(execute(req)).unwrap();
    let elos: Vec<i64> = points.iter().map(|p| p.elo).collect();
    assert_eq!(elos, [1092, 1100]);

    // Unknown user surfaces the raw 404.
    let req = client.build_user_by_id("missing");
    let err = client.parse_body(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 404, .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn async_api_round_trips() {
    let base_url = spawn_server();
    let api = Api::new(&ApiConfig::new(&base_url).unwrap()).unwrap();

    let users = api.fetch_users("", 2, 1).await.unwrap();
    assert_eq!(users.as_array().unwrap().len(), 2);
    assert_eq!(users[0]["id"], "u2");

    let user = api.fetch_user_by_id("u3").await.unwrap();
    assert_eq!(user["username"], "Alicia");

    let duels = api.fetch_user_duels("u3", 1, 0).await.unwrap();
    assert_eq!(duels.as_array().unwrap().len(), 1);
    assert_eq!(duels[0]["id"], "d3");
    assert_eq!(duels[0]["rounds"][0]["round_number"], 1);

    let ranking = api.fetch_ranking_graph_data("u4").await.unwrap();
    assert_eq!(ranking, serde_json::json!([]));

    let err = api.fetch_ranking_graph_data("missing").await.unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 404, .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_calls_share_one_client() {
    let base_url = spawn_server();
    let api = Api::new(&ApiConfig::new(&base_url).unwrap()).unwrap();

    let (a, b, c) = tokio::join!(
        api.fetch_user_by_id("u1"),
        api.fetch_user_by_id("u2"),
        api.fetch_users("bob", 10, 0),
    );
    assert_eq!(a.unwrap()["username"], "Valentin");
    assert_eq!(b.unwrap()["username"], "Alice");
    assert_eq!(c.unwrap()[0]["id"], "u4");
}

#[tokio::test(flavor = "multi_thread")]
async fn client_sends_json_content_type_by_default() {
    let base_url = spawn_server();
    let api = Api::new(&ApiConfig::new(&base_url).unwrap()).unwrap();

    // No per-request headers: only the client's defaults go out.
    let request = HttpRequest {
        method: HttpMethod::Get,
        path: format!("{base_url}/echo/content-type"),
        headers: Vec::new(),
        body: None,
    };
    let echoed: serde_json::Value = api.fetch_as(request).await.unwrap();
    assert_eq!(echoed["content_type"], "application/json");
}

#[test]
fn from_env_without_base_url_uses_default() {
    std::env::remove_var("API_BASE_URL");
    let api = Api::from_env().unwrap();
    assert_eq!(api.client().base_url(), DEFAULT_BASE_URL);
    assert_eq!(
        api.client().build_user_by_id("42").path,
        "http://localhost:5173/api/users/42"
    );
}

#[tokio::test]
async fn transport_failure_is_propagated() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let api = Api::new(&ApiConfig::new(&format!("http://{addr}/api")).unwrap()).unwrap();

    let err = api.fetch_user_by_id("u1").await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
