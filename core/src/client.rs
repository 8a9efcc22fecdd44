//! Stateless HTTP request builder and response parser for the GeoTrackr API.
//!
//! # Design
//! `ApiClient` holds only a `base_url` and carries no mutable state between
//! calls. Each endpoint has a `build_*` method producing an `HttpRequest`;
//! every endpoint answers with JSON, so a single `parse_body` (or the typed
//! `parse_body_as`) consumes the `HttpResponse`.
//!
//! Path ids and query values are percent-encoded. Unreserved characters pass
//! through untouched, so ordinary ids and usernames are interpolated verbatim.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// RFC 3986 unreserved characters stay literal; everything else is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn encode(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Synchronous, stateless client for the GeoTrackr API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /users?username=..&limit=..&offset=..`
    pub fn build_users(&self, username: &str, limit: u32, offset: u32) -> HttpRequest {
        self.get(format!(
            "/users?username={}&limit={limit}&offset={offset}",
            encode(username)
        ))
    }

    /// `GET /users/{id}`
    pub fn build_user_by_id(&self, id: &str) -> HttpRequest {
        self.get(format!("/users/{}", encode(id)))
    }

    /// `GET /users/{id}/duels?limit=..&offset=..`
    pub fn build_user_duels(&self, id: &str, limit: u32, offset: u32) -> HttpRequest {
        self.get(format!(
            "/users/{}/duels?limit={limit}&offset={offset}",
            encode(id)
        ))
    }

    /// `GET /users/{id}/ranking`
    pub fn build_ranking_graph_data(&self, id: &str) -> HttpRequest {
        self.get(format!("/users/{}/ranking", encode(id)))
    }

    /// Return the decoded JSON body of a 2xx response.
    pub fn parse_body(&self, response: HttpResponse) -> Result<Value, ApiError> {
        self.parse_body_as(response)
    }

    /// Like [`ApiClient::parse_body`], decoding into a concrete type.
    pub fn parse_body_as<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    fn get(&self, endpoint: String) -> HttpRequest {
        let path = format!("{}{endpoint}", self.base_url);
        tracing::debug!(method = HttpMethod::Get.as_str(), %path, "built request");
        HttpRequest {
            method: HttpMethod::Get,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: None,
        }
    }
}

/// Any non-2xx status is returned untouched as `ApiError::HttpError`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
