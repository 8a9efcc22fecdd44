//! API client configuration.

use std::env;

use crate::error::ApiError;

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "API_BASE_URL";

/// Base URL used when `API_BASE_URL` is unset or empty.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5173/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    /// Build a config from an explicit base URL. A trailing `/` is stripped.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    /// Load the config from the process environment, reading `.env` first.
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();
        Self::from_value(env::var(BASE_URL_ENV).ok())
    }

    /// Resolve a possibly-absent configured value, falling back to
    /// [`DEFAULT_BASE_URL`].
    pub fn from_value(value: Option<String>) -> Self {
        match value.as_deref().map(Self::new) {
            Some(Ok(config)) => config,
            Some(Err(_)) | None => {
                tracing::debug!(default = DEFAULT_BASE_URL, "{BASE_URL_ENV} unset, using default");
                Self::default()
            }
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}
