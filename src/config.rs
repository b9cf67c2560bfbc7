//! Process-wide configuration parsed from environment variables.
//!
//! Every value has a hardcoded fallback so a bare checkout talks to a local
//! store. Parsing goes through a lookup closure; `from_env` is the thin
//! wrapper over `std::env`.

use std::sync::OnceLock;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors produced while reading configuration overrides.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A numeric override was present but not a positive whole number.
    #[error("invalid value for {var}: {value}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Credentials for the external identity provider (Firebase web config).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub identity: IdentityConfig,
    pub timeouts: HttpTimeouts,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional (all have fallbacks):
    /// - `BACKOFFICE_API_URL`: store base URL, default `http://localhost:8000`
    /// - `FIREBASE_API_KEY`, `FIREBASE_AUTH_DOMAIN`, `FIREBASE_PROJECT_ID`,
    ///   `FIREBASE_STORAGE_BUCKET`, `FIREBASE_MESSAGING_SENDER_ID`, `FIREBASE_APP_ID`
    /// - `BACKOFFICE_REQUEST_TIMEOUT_SECS`: default 30
    /// - `BACKOFFICE_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout override is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout override is not a positive integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        let api_base_url = value("BACKOFFICE_API_URL", DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_owned();

        let identity = IdentityConfig {
            api_key: value("FIREBASE_API_KEY", "demo-api-key"),
            auth_domain: value("FIREBASE_AUTH_DOMAIN", "demo-backoffice.firebaseapp.com"),
            project_id: value("FIREBASE_PROJECT_ID", "demo-backoffice"),
            storage_bucket: value("FIREBASE_STORAGE_BUCKET", "demo-backoffice.appspot.com"),
            messaging_sender_id: value("FIREBASE_MESSAGING_SENDER_ID", "000000000000"),
            app_id: value("FIREBASE_APP_ID", "1:000000000000:web:0000000000000000"),
        };

        let timeouts = HttpTimeouts {
            request_secs: parse_u64(
                "BACKOFFICE_REQUEST_TIMEOUT_SECS",
                lookup("BACKOFFICE_REQUEST_TIMEOUT_SECS"),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            connect_secs: parse_u64(
                "BACKOFFICE_CONNECT_TIMEOUT_SECS",
                lookup("BACKOFFICE_CONNECT_TIMEOUT_SECS"),
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
        };

        Ok(Self { api_base_url, identity, timeouts })
    }

    /// Join an API path onto the configured base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base_url)
    }
}

fn parse_u64(var: &'static str, raw: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => match value.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(secs),
            _ => Err(ConfigError::InvalidNumber { var, value }),
        },
    }
}

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Install the process-wide config. The first call wins; later calls return
/// the already-installed value unchanged.
pub fn init(config: AppConfig) -> &'static AppConfig {
    CONFIG.get_or_init(|| config)
}

/// Return the process-wide config, reading the environment on first use.
///
/// # Errors
///
/// Returns an error if the environment holds an invalid override and no
/// config has been installed yet.
pub fn get() -> Result<&'static AppConfig, ConfigError> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    let config = AppConfig::from_env()?;
    Ok(init(config))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
