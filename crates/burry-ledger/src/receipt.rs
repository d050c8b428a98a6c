//! Confirmation handle for a committed transaction.

use burry_core::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies one committed ledger transaction.
///
/// `sequence` is assigned while the transaction still holds its locks, so
/// for any single address the sequence numbers of the transactions that
/// touched it are strictly increasing in commit order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Unique transaction identifier.
    pub id: Uuid,
    /// Ledger-wide commit sequence number.
    pub sequence: u64,
    /// Commit time.
    pub committed_at: Timestamp,
}

impl std::fmt::Display for Receipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tx:{}#{}", self.id, self.sequence)
    }
}
