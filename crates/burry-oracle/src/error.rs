//! Oracle error types.

use burry_core::Address;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors returned by [`crate::PriceOracle`] implementations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// The feed could not be read or answered something unusable.
    #[error("price feed {feed} unavailable: {reason}")]
    Unavailable {
        /// Feed that was queried.
        feed: Address,
        /// What went wrong.
        reason: String,
    },

    /// The latest observation is older than the allowed age.
    #[error("price feed {feed} is stale: last observation {age_secs}s old, limit {max_age_secs}s")]
    Stale {
        /// Feed that was queried.
        feed: Address,
        /// Age of the observation in seconds.
        age_secs: i64,
        /// Configured limit.
        max_age_secs: u64,
    },

    /// The client could not be built from its configuration.
    #[error("oracle configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl OracleError {
    pub(crate) fn unavailable(feed: &Address, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            feed: *feed,
            reason: reason.into(),
        }
    }
}
