//! Client core for the GeoTrackr web application.
//!
//! # Overview
//! Two pieces, both small:
//! - the API client: `ApiClient` builds `HttpRequest` values and parses
//!   `HttpResponse` values without touching the network, and `Api` executes
//!   them over one shared `reqwest::Client`;
//! - the route table: `Router` maps `/`, `/users` and `/users/{id}` to page
//!   views.
//!
//! # Design
//! - `ApiClient` is stateless; it holds only `base_url`.
//! - Response bodies come back as `serde_json::Value`; the DTOs in `types`
//!   are an opt-in typed view.
//! - Errors are passed through with their status/body or source intact.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod router;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use config::{ApiConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, RouteError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use router::{History, Route, RouteMatch, RouteName, Router, View};
pub use transport::Api;
pub use types::{DuelGuess, DuelRound, EloHistory, Map, Panorama, RankingPoint, SoloDuel, User};
