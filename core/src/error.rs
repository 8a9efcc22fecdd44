//! Error types for the GeoTrackr API client and route table.
//!
//! # Design
//! Failures are passed through rather than classified: a non-2xx response
//! keeps its raw status and body, and a transport failure keeps its source
//! error. Callers decide what a 404 or a 500 means for them.

use thiserror::Error;

/// Errors returned by `ApiClient` parse methods and the `Api` transport.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect, TLS, I/O).
    #[error("transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("invalid base URL: {0:?}")]
    InvalidBaseUrl(String),
}

/// Errors raised while building or querying the route table.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("conflicting route: {0}")]
    Conflict(#[from] matchit::InsertError),

    #[error("no route named `{0}`")]
    UnknownRoute(String),

    #[error("route `{route}` requires parameter `{param}`")]
    MissingParam { route: String, param: String },
}
