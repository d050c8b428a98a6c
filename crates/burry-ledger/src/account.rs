//! Stored account record.

use serde::{Deserialize, Serialize};

/// A ledger account: a lamport balance and opaque data.
///
/// Wallets carry empty data. Program accounts carry an encoded record whose
/// layout is owned by the program, not by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Account {
    /// Balance in lamports.
    pub lamports: u64,
    /// Program-defined bytes.
    #[serde(default)]
    pub data: Vec<u8>,
}

impl Account {
    /// A wallet with no data.
    pub fn wallet(lamports: u64) -> Self {
        Self {
            lamports,
            data: Vec::new(),
        }
    }

    /// An account carrying program data.
    pub fn with_data(lamports: u64, data: Vec<u8>) -> Self {
        Self { lamports, data }
    }

    /// Whether the account carries program data.
    pub fn has_data(&self) -> bool {
        !self.data.is_empty()
    }
}
