//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREKEEP_API_BASE_URL` - Base URL of the demo store API
//!   (default: `https://fakestoreapi.com`)
//! - `STOREKEEP_DATA_DIR` - Directory holding the fallback store and the
//!   session file (default: the OS data directory plus `storekeep`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default base URL of the demo store API.
pub const DEFAULT_API_BASE_URL: &str = "https://fakestoreapi.com";

/// Directory name under the OS data directory.
const DATA_DIR_NAME: &str = "storekeep";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Could not resolve a data directory; set STOREKEEP_DATA_DIR")]
    NoDataDir,
}

/// Demo store API configuration.
#[derive(Debug, Clone)]
pub struct StoreApiConfig {
    /// Base URL of the API.
    pub base_url: Url,
}

/// Dashboard application configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Demo store API configuration.
    pub api: StoreApiConfig,
    /// Directory holding the fallback store and the session file.
    pub data_dir: PathBuf,
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    /// Every variable has a default, so loading only fails on malformed
    /// values or when no data directory can be resolved at all.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the base URL does not parse or no data
    /// directory can be determined.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = get_env_or_default("STOREKEEP_API_BASE_URL", DEFAULT_API_BASE_URL);
        let base_url = parse_base_url(&base_url)?;

        let data_dir = match std::env::var("STOREKEEP_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => default_data_dir().ok_or(ConfigError::NoDataDir)?,
        };

        Ok(Self {
            api: StoreApiConfig { base_url },
            data_dir,
        })
    }
}

/// Parse and validate an API base URL.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| {
        ConfigError::InvalidEnvVar("STOREKEEP_API_BASE_URL".to_string(), e.to_string())
    })
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Resolve the default data directory: `{os_data_dir}/storekeep`, falling
/// back to `~/.local/share/storekeep` when the OS does not report one.
fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut home| {
                home.push(".local");
                home.push("share");
                home
            })
        })
        .map(|base| base.join(DATA_DIR_NAME))
}
