//! Async transport executing `ApiClient` requests with `reqwest`.
//!
//! # Design
//! `Api` owns one `reqwest::Client` configured with the default
//! `Content-Type: application/json` header and reused by every call. Each
//! operation is build, one round-trip, then parse, with no retry or caching.
//! Clones share the underlying connection pool.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::ApiClient;
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

#[derive(Debug, Clone)]
pub struct Api {
    client: ApiClient,
    http: reqwest::Client,
}

impl Api {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self {
            client: ApiClient::from_config(config),
            http,
        })
    }

    /// Build an `Api` from `API_BASE_URL`, or the default base URL.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(&ApiConfig::from_env())
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn fetch_users(&self, username: &str, limit: u32, offset: u32) -> Result<Value, ApiError> {
        self.fetch_as(self.client.build_users(username, limit, offset)).await
    }

    pub async fn fetch_user_by_id(&self, id: &str) -> Result<Value, ApiError> {
        self.fetch_as(self.client.build_user_by_id(id)).await
    }

    pub async fn fetch_user_duels(&self, id: &str, limit: u32, offset: u32) -> Result<Value, ApiError> {
        self.fetch_as(self.client.build_user_duels(id, limit, offset)).await
    }

    pub async fn fetch_ranking_graph_data(&self, id: &str) -> Result<Value, ApiError> {
        self.fetch_as(self.client.build_ranking_graph_data(id)).await
    }

    /// Execute a built request and decode the body into `T`.
    pub async fn fetch_as<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, ApiError> {
        let response = self.execute(request).await?;
        self.client.parse_body_as(response)
    }

    /// Perform the round-trip for `request` and return the raw response.
    /// Non-2xx statuses are data here; only transport failures are errors.
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let builder = match request.method {
            HttpMethod::Get => self.http.get(&request.path),
        };
        let builder = request
            .headers
            .iter()
            .fold(builder, |b, (key, value)| b.header(key.as_str(), value.as_str()));
        let builder = match request.body {
            Some(body) => builder.body(body),
            None => builder,
        };

        let response = builder.send().await.inspect_err(|e| {
            tracing::warn!(path = %request.path, error = %e, "request failed");
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response.text().await?;
        tracing::debug!(path = %request.path, status, "received response");

        Ok(HttpResponse { status, headers, body })
    }
}
