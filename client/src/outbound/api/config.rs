//! Backend endpoint configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_API_PREFIX: &str = "/api";

/// Configuration values locating the backend API.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BENEFI")]
pub struct ApiSettings {
    /// Base URL of the backend server.
    pub base_url: Option<String>,
    /// Fixed path prefix prepended to every operation path.
    pub api_prefix: Option<String>,
}

impl ApiSettings {
    /// Return the configured base URL, falling back to the default.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Return the configured path prefix, falling back to the default.
    #[must_use]
    pub fn api_prefix(&self) -> &str {
        self.api_prefix.as_deref().unwrap_or(DEFAULT_API_PREFIX)
    }
}

/// Errors raised while validating API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiConfigError {
    /// The base URL did not parse.
    #[error("base URL is invalid: {message}")]
    InvalidBaseUrl {
        /// Parser-supplied description of the defect.
        message: String,
    },
    /// The base URL cannot carry path segments (e.g. `data:` URLs).
    #[error("base URL cannot serve as a request base: {url}")]
    UnsupportedBaseUrl {
        /// The offending URL, rendered for diagnostics.
        url: String,
    },
}

/// Validated endpoint configuration used by the resource client.
///
/// # Examples
/// ```
/// use client::outbound::api::ApiConfig;
/// use url::Url;
///
/// let base: Url = "http://127.0.0.1:8000".parse().unwrap();
/// let config = ApiConfig::new(base, "/api").unwrap();
/// assert_eq!(config.base_url().as_str(), "http://127.0.0.1:8000/");
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: Url,
    prefix_segments: Vec<String>,
}

impl ApiConfig {
    /// Validate a base URL and path prefix into a usable configuration.
    ///
    /// The prefix is normalised into path segments, so `/api`, `api`, and
    /// `/api/` are equivalent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiConfigError::UnsupportedBaseUrl`] when the URL cannot
    /// carry path segments.
    pub fn new(base_url: Url, api_prefix: &str) -> Result<Self, ApiConfigError> {
        if base_url.cannot_be_a_base() {
            return Err(ApiConfigError::UnsupportedBaseUrl {
                url: base_url.to_string(),
            });
        }

        let prefix_segments = api_prefix
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_owned)
            .collect();

        Ok(Self {
            base_url,
            prefix_segments,
        })
    }

    /// Build a configuration from layered settings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiConfigError::InvalidBaseUrl`] when the configured base
    /// URL does not parse, or [`ApiConfigError::UnsupportedBaseUrl`] when it
    /// cannot carry path segments.
    pub fn from_settings(settings: &ApiSettings) -> Result<Self, ApiConfigError> {
        let base_url =
            Url::parse(settings.base_url()).map_err(|error| ApiConfigError::InvalidBaseUrl {
                message: error.to_string(),
            })?;
        Self::new(base_url, settings.api_prefix())
    }

    /// Base URL every request is resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Normalised prefix segments prepended to every operation path.
    #[must_use]
    pub fn prefix_segments(&self) -> &[String] {
        self.prefix_segments.as_slice()
    }
}
