//! Environment-based configuration.

use crate::airtable;
use crate::error::config::ConfigError;

/// Runtime configuration resolved from environment variables.
///
/// `STAYDEX_API_KEY` and `STAYDEX_BASE_ID` are required; everything else has
/// a default. Binaries load a `.env` file with `dotenvy` before calling
/// [`Config::from_env`].
pub struct Config {
    /// API token for the remote tabular source.
    pub api_key: String,
    /// Identifier of the base (dataset) holding the four tables.
    pub base_id: String,
    /// Root URL of the remote API.
    pub api_url: String,
    /// Freshness window of the company snapshot cache, in seconds.
    pub cache_ttl_secs: u64,
    /// Path to the id -> summary JSON side table.
    pub summaries_path: String,
}

impl Config {
    /// Default freshness window: one hour.
    pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
    /// Default location of the summary side table.
    pub const DEFAULT_SUMMARIES_PATH: &'static str = "data/summaries.json";

    pub fn from_env() -> Result<Self, ConfigError> {
        let cache_ttl_secs = match std::env::var("STAYDEX_CACHE_TTL_SECS") {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidEnvValue {
                    var: "STAYDEX_CACHE_TTL_SECS".to_string(),
                    reason: format!("expected an integer number of seconds, got {value:?}"),
                })?,
            Err(_) => Self::DEFAULT_CACHE_TTL_SECS,
        };

        Ok(Self {
            api_key: require_var("STAYDEX_API_KEY")?,
            base_id: require_var("STAYDEX_BASE_ID")?,
            api_url: std::env::var("STAYDEX_API_URL")
                .unwrap_or_else(|_| airtable::DEFAULT_API_URL.to_string()),
            cache_ttl_secs,
            summaries_path: std::env::var("STAYDEX_SUMMARIES_PATH")
                .unwrap_or_else(|_| Self::DEFAULT_SUMMARIES_PATH.to_string()),
        })
    }
}

fn require_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}
