//! # burry-oracle -- Price feeds for oracle-gated escrow release
//!
//! A [`PriceOracle`] answers one question: what is the latest attested value
//! of a given feed? Every call is a fresh read; nothing is cached, so a
//! withdrawal always decides against the value current at the time of the
//! call.
//!
//! ## Implementations
//!
//! - [`HttpPriceFeed`] reads an aggregator over HTTP, retrying connection
//!   failures and overload statuses with exponential backoff.
//! - [`ManualPriceFeed`] holds a value set by the operator or a test.
//! - [`StalenessGuard`] wraps any oracle and rejects observations older
//!   than a configured age.
//!
//! All failures surface as [`OracleError`]; callers never see a partially
//! parsed observation.

pub mod config;
pub mod error;
pub mod guard;
pub mod http;
pub mod manual;
pub(crate) mod retry;

pub use config::{ConfigError, OracleConfig};
pub use error::OracleError;
pub use guard::StalenessGuard;
pub use http::HttpPriceFeed;
pub use manual::ManualPriceFeed;

use std::future::Future;

use burry_core::{Address, Price, Timestamp};
use serde::{Deserialize, Serialize};

/// One attested reading of a price feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceObservation {
    /// The reported price.
    pub value: Price,
    /// When the feed produced the value.
    pub observed_at: Timestamp,
}

/// Source of attested prices.
///
/// Implementations must not hold locks across the returned future; the
/// escrow program calls this outside of any ledger transaction.
pub trait PriceOracle: Send + Sync {
    /// Read the latest value of `feed`.
    fn fetch_price(
        &self,
        feed: &Address,
    ) -> impl Future<Output = Result<PriceObservation, OracleError>> + Send;
}
