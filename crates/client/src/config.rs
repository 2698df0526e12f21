//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `AURELIA_API_URL` - Backend API base URL (default: `http://localhost:4000/api`)
//! - `AURELIA_DATA_DIR` - Directory for the persistent local store (default: `.aurelia`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default backend API base.
const DEFAULT_API_URL: &str = "http://localhost:4000/api";

/// Default local store directory.
const DEFAULT_DATA_DIR: &str = ".aurelia";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client application configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend API base URL, without a trailing slash.
    pub api_url: String,
    /// Directory holding the persistent local store.
    pub data_dir: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `AURELIA_API_URL` is set but is not a valid
    /// absolute URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = get_env_or_default("AURELIA_API_URL", DEFAULT_API_URL);
        Url::parse(&api_url)
            .map_err(|e| ConfigError::InvalidEnvVar("AURELIA_API_URL".to_owned(), e.to_string()))?;

        let data_dir = PathBuf::from(get_env_or_default("AURELIA_DATA_DIR", DEFAULT_DATA_DIR));

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_owned(),
            data_dir,
        })
    }

    /// Build a configuration pointing at an explicit backend and data dir.
    ///
    /// Used by tests and embedding applications that do not read the
    /// environment.
    #[must_use]
    pub fn new(api_url: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        let api_url: String = api_url.into();
        Self {
            api_url: api_url.trim_end_matches('/').to_owned(),
            data_dir: data_dir.into(),
        }
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
