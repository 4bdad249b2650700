//! Environment-driven configuration, read once per cold start.

use std::time::Duration;
use thiserror::Error;

use crate::models::OutputMode;

const DEFAULT_SEARCH_PARAM: &str = "search";
const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CACHE_TTL_SECS: i64 = 300;

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the documentation platform API, without trailing slash.
    pub asset_api_url: String,
    pub asset_api_key: String,
    /// Query parameter name the asset search expects the email under.
    pub search_param: String,
    pub default_mode: OutputMode,
    pub lookup_timeout: Duration,
    /// Cache entries older than this are swept on every store.
    pub cache_ttl: chrono::Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable source. `from_env` passes the process environment.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let asset_api_url = get("ASSET_API_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("ASSET_API_URL"))?
            .trim_end_matches('/')
            .to_string();

        let asset_api_key = get("ASSET_API_KEY")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("ASSET_API_KEY"))?;

        let search_param = get("ASSET_SEARCH_PARAM")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_SEARCH_PARAM.to_string());

        let default_mode = match get("RESPONSE_MODE") {
            Some(v) => OutputMode::parse(&v).ok_or(ConfigError::Invalid { name: "RESPONSE_MODE", value: v })?,
            None => OutputMode::Json,
        };

        let lookup_timeout_secs = match get("LOOKUP_TIMEOUT_SECS") {
            Some(v) => v.parse::<u64>().map_err(|_| ConfigError::Invalid { name: "LOOKUP_TIMEOUT_SECS", value: v })?,
            None => DEFAULT_LOOKUP_TIMEOUT_SECS,
        };

        let cache_ttl_secs = match get("CACHE_TTL_SECS") {
            Some(v) => v
                .parse::<i64>()
                .ok()
                .filter(|secs| *secs >= 0)
                .ok_or(ConfigError::Invalid { name: "CACHE_TTL_SECS", value: v })?,
            None => DEFAULT_CACHE_TTL_SECS,
        };

        Ok(Config {
            asset_api_url,
            asset_api_key,
            search_param,
            default_mode,
            lookup_timeout: Duration::from_secs(lookup_timeout_secs),
            cache_ttl: chrono::Duration::seconds(cache_ttl_secs),
        })
    }
}
