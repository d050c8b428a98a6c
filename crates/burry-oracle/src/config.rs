//! Oracle client configuration.
//!
//! Defaults point to the public aggregator. Override via environment
//! variables or explicit construction for local testing.

use url::Url;

/// Default aggregator base URL.
pub const DEFAULT_ORACLE_URL: &str = "https://api.switchboard.xyz";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default number of repeated reads after a transient failure.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Configuration for [`crate::HttpPriceFeed`].
///
/// Custom `Debug` implementation redacts the `api_key` field.
#[derive(Clone)]
pub struct OracleConfig {
    /// Aggregator base URL.
    pub base_url: Url,
    /// Optional bearer token.
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Repeated reads after a connection failure or an overload status.
    pub max_retries: u32,
    /// Reject observations older than this many seconds. `None` disables
    /// the check.
    pub max_staleness_secs: Option<u64>,
}

impl std::fmt::Debug for OracleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("max_staleness_secs", &self.max_staleness_secs)
            .finish()
    }
}

impl OracleConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `BURRY_ORACLE_URL` (default: `https://api.switchboard.xyz`)
    /// - `BURRY_ORACLE_API_KEY` (optional)
    /// - `BURRY_ORACLE_TIMEOUT_SECS` (default: 10)
    /// - `BURRY_ORACLE_MAX_RETRIES` (default: 3)
    /// - `BURRY_ORACLE_MAX_STALENESS_SECS` (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env_url("BURRY_ORACLE_URL", DEFAULT_ORACLE_URL)?,
            api_key: std::env::var("BURRY_ORACLE_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            timeout_secs: env_u64("BURRY_ORACLE_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS),
            max_retries: env_u32("BURRY_ORACLE_MAX_RETRIES")?.unwrap_or(DEFAULT_MAX_RETRIES),
            max_staleness_secs: env_u64("BURRY_ORACLE_MAX_STALENESS_SECS")?,
        })
    }

    /// Configuration pointing to a local mock server.
    pub fn local_mock(port: u16) -> Result<Self, ConfigError> {
        let raw = format!("http://127.0.0.1:{port}");
        let base_url = Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl {
            var: "localhost".to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            base_url,
            api_key: None,
            timeout_secs: 5,
            max_retries: 0,
            max_staleness_secs: None,
        })
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl {
        var: var.to_string(),
        reason: e.to_string(),
    })
}

fn env_u64(var: &str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber {
                var: var.to_string(),
                value: raw,
            }),
        Err(_) => Ok(None),
    }
}

fn env_u32(var: &str) -> Result<Option<u32>, ConfigError> {
    env_u64(var)?
        .map(|value| {
            u32::try_from(value).map_err(|_| ConfigError::InvalidNumber {
                var: var.to_string(),
                value: value.to_string(),
            })
        })
        .transpose()
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A URL variable did not parse.
    #[error("invalid URL for {var}: {reason}")]
    InvalidUrl {
        /// Variable name.
        var: String,
        /// Parser message.
        reason: String,
    },
    /// A numeric variable did not parse.
    #[error("invalid number for {var}: {value:?}")]
    InvalidNumber {
        /// Variable name.
        var: String,
        /// Raw value.
        value: String,
    },
    /// The API key contains characters not allowed in a header.
    #[error("API key is not a valid header value")]
    InvalidApiKey,
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientInit(String),
}
