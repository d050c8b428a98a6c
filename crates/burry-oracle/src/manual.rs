//! Operator-controlled price feed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use burry_core::{Address, Price, Timestamp};
use parking_lot::RwLock;

use crate::error::OracleError;
use crate::{PriceObservation, PriceOracle};

/// A feed whose value is set by hand.
///
/// Clones share state, so a test can hold one handle while the escrow
/// program reads through another. The same observation is returned for
/// every feed address. An empty feed answers [`OracleError::Unavailable`].
#[derive(Debug, Clone, Default)]
pub struct ManualPriceFeed {
    observation: Arc<RwLock<Option<PriceObservation>>>,
    fetches: Arc<AtomicU64>,
}

impl ManualPriceFeed {
    /// An empty feed.
    pub fn new() -> Self {
        Self::default()
    }

    /// A feed holding `value`, observed now.
    pub fn with_price(value: Price) -> Self {
        let feed = Self::new();
        feed.set_price(value);
        feed
    }

    /// Replace the value, observed now.
    pub fn set_price(&self, value: Price) {
        self.set_observation(PriceObservation {
            value,
            observed_at: Timestamp::now(),
        });
    }

    /// Replace the whole observation.
    pub fn set_observation(&self, observation: PriceObservation) {
        *self.observation.write() = Some(observation);
    }

    /// Drop the value; subsequent reads fail as unavailable.
    pub fn clear(&self) {
        *self.observation.write() = None;
    }

    /// Number of reads served, successful or not.
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl PriceOracle for ManualPriceFeed {
    async fn fetch_price(&self, feed: &Address) -> Result<PriceObservation, OracleError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let observation = *self.observation.read();
        observation.ok_or_else(|| OracleError::unavailable(feed, "no price has been set"))
    }
}
