//! # Storage Rent
//!
//! An account that carries data must hold a minimum balance for as long as
//! it exists. The reservation is paid by whoever creates the account and is
//! released to the closing destination when the account is closed.

use serde::{Deserialize, Serialize};

/// Bytes of bookkeeping charged for every account on top of its data.
pub const ACCOUNT_STORAGE_OVERHEAD: u64 = 128;

/// Default rate: 3480 lamports per byte-year times a two-year exemption
/// threshold.
pub const DEFAULT_LAMPORTS_PER_BYTE: u64 = 6960;

/// Storage reservation rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentSchedule {
    /// Lamports reserved per stored byte.
    pub lamports_per_byte: u64,
}

impl RentSchedule {
    /// A schedule with the given rate.
    pub fn new(lamports_per_byte: u64) -> Self {
        Self { lamports_per_byte }
    }

    /// A schedule that charges nothing.
    pub fn free() -> Self {
        Self::new(0)
    }

    /// Minimum balance for an account with `data_len` bytes of data.
    ///
    /// Wallets (no data) are exempt.
    pub fn minimum_balance(&self, data_len: usize) -> u64 {
        if data_len == 0 {
            return 0;
        }
        let bytes = ACCOUNT_STORAGE_OVERHEAD.saturating_add(data_len as u64);
        self.lamports_per_byte.saturating_mul(bytes)
    }
}

impl Default for RentSchedule {
    fn default() -> Self {
        Self::new(DEFAULT_LAMPORTS_PER_BYTE)
    }
}
