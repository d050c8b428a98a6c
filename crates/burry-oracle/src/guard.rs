//! Staleness guard.

use burry_core::{Address, Timestamp};

use crate::error::OracleError;
use crate::{PriceObservation, PriceOracle};

/// Wraps an oracle and rejects observations older than `max_age_secs`.
///
/// With no limit configured the guard passes observations through
/// unchanged. Observations timestamped in the future are accepted.
#[derive(Debug, Clone)]
pub struct StalenessGuard<O> {
    inner: O,
    max_age_secs: Option<u64>,
}

impl<O> StalenessGuard<O> {
    /// Guard `inner` with an optional age limit.
    pub fn new(inner: O, max_age_secs: Option<u64>) -> Self {
        Self { inner, max_age_secs }
    }

    /// The wrapped oracle.
    pub fn inner(&self) -> &O {
        &self.inner
    }
}

/// Fail with [`OracleError::Stale`] if `observation` is more than
/// `max_age_secs` older than `now`.
pub fn check_freshness(
    feed: &Address,
    observation: &PriceObservation,
    now: Timestamp,
    max_age_secs: u64,
) -> Result<(), OracleError> {
    let age_secs = now.seconds_since(&observation.observed_at);
    let limit = i64::try_from(max_age_secs).unwrap_or(i64::MAX);
    if age_secs > limit {
        return Err(OracleError::Stale {
            feed: *feed,
            age_secs,
            max_age_secs,
        });
    }
    Ok(())
}

impl<O: PriceOracle> PriceOracle for StalenessGuard<O> {
    async fn fetch_price(&self, feed: &Address) -> Result<PriceObservation, OracleError> {
        let observation = self.inner.fetch_price(feed).await?;
        if let Some(max_age_secs) = self.max_age_secs {
            check_freshness(feed, &observation, Timestamp::now(), max_age_secs)?;
        }
        Ok(observation)
    }
}
