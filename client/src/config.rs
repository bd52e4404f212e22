//! # Client Configuration
//!
//! Static configuration loaded once from environment variables and validated
//! on startup so a misconfigured build fails fast.
//!
//! | Variable | Default |
//! |---|---|
//! | `SIGNALS_API_BASE_URL` | `http://localhost:8080` |
//! | `SIGNALS_GOOGLE_CLIENT_ID_WEB` / `_ANDROID` / `_IOS` | empty |
//! | `SIGNALS_REQUEST_TIMEOUT_SECS` | `30` |
//! | `SIGNALS_TOKEN_FILE` | `data/session.json` |
//!
//! For the iOS simulator use the host machine's LAN address instead of
//! `localhost`; for the Android emulator use `http://10.0.2.2:8080`.

use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

use lib_utils::envs::{get_env_or, get_env_parse_or};

use crate::core::error::{ApiError, Result};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_TOKEN_FILE: &str = "data/session.json";

/// OAuth client identifiers, one per platform.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GoogleClientIds {
    pub web: String,
    pub android: String,
    pub ios: String,
}

impl GoogleClientIds {
    /// The browser flow only needs the web client id.
    pub fn is_configured(&self) -> bool {
        !self.web.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash
    pub api_base_url: String,

    pub google: GoogleClientIds,

    /// Per-request timeout
    ///
    /// Valid range: 1-300 seconds
    pub request_timeout: Duration,

    /// Backing file for [`crate::services::storage::FileSecureStore`]
    pub token_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            google: GoogleClientIds::default(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let timeout_secs = get_env_parse_or("SIGNALS_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;

        Ok(Self {
            api_base_url: get_env_or("SIGNALS_API_BASE_URL", DEFAULT_API_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            google: GoogleClientIds {
                web: get_env_or("SIGNALS_GOOGLE_CLIENT_ID_WEB", ""),
                android: get_env_or("SIGNALS_GOOGLE_CLIENT_ID_ANDROID", ""),
                ios: get_env_or("SIGNALS_GOOGLE_CLIENT_ID_IOS", ""),
            },
            request_timeout: Duration::from_secs(timeout_secs),
            token_file: PathBuf::from(get_env_or("SIGNALS_TOKEN_FILE", DEFAULT_TOKEN_FILE)),
        })
    }

    /// Configuration pointing at `base_url` with default settings otherwise.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(ApiError::Config(format!(
                "SIGNALS_API_BASE_URL must start with http:// or https://, got '{}'",
                self.api_base_url
            )));
        }

        if !(1..=300).contains(&self.request_timeout.as_secs()) {
            return Err(ApiError::Config(
                "SIGNALS_REQUEST_TIMEOUT_SECS must be between 1 and 300".to_string(),
            ));
        }

        Ok(())
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<ClientConfig> = OnceLock::new();

/// Load, validate and install the global configuration.
///
/// Calling it again returns the configuration installed first.
pub fn init_config() -> Result<&'static ClientConfig> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }

    let config = ClientConfig::from_env()?;
    config.validate()?;
    Ok(CONFIG.get_or_init(|| config))
}
