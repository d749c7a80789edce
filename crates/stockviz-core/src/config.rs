//! API client configuration.
//!
//! The base URL is the only externally supplied setting. It is read from
//! `STOCKVIZ_API_URL` (a `.env` file in the working directory is honoured);
//! the request timeout is fixed.

use std::env;
use std::time::Duration;

use crate::ValidationError;

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "STOCKVIZ_API_URL";

/// Backend dev origin plus its `/api` base path.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Per-request timeout applied to every call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ValidationError> {
        let base_url = base_url.as_ref().trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ValidationError::EmptyBaseUrl);
        }

        Ok(Self {
            base_url: base_url.to_owned(),
            timeout: REQUEST_TIMEOUT,
        })
    }

    /// Resolve the base URL from the environment, falling back to
    /// [`DEFAULT_API_URL`] when unset or blank.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        env::var(API_URL_ENV)
            .ok()
            .and_then(|value| Self::new(value).ok())
            .unwrap_or_default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Join a path (starting with `/`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_owned(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}
