//! # Ledger Error Types
//!
//! Every variant names the address involved so failures can be traced to
//! a specific account without reading logs.

use burry_core::Address;
use thiserror::Error;

/// Errors raised by ledger transactions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The transaction touched an address it did not lock.
    #[error("address {address} is not locked by this transaction")]
    NotLocked {
        /// The address that was accessed.
        address: Address,
    },

    /// Account creation at an occupied address.
    #[error("account {address} already exists")]
    AccountAlreadyExists {
        /// The occupied address.
        address: Address,
    },

    /// Operation on an empty address.
    #[error("account {address} does not exist")]
    AccountNotFound {
        /// The empty address.
        address: Address,
    },

    /// Debit larger than the balance.
    #[error("account {address} has {available} lamports, needs {needed}")]
    InsufficientFunds {
        /// The account being debited.
        address: Address,
        /// Lamports required.
        needed: u64,
        /// Lamports held.
        available: u64,
    },

    /// Credit would overflow `u64`.
    #[error("balance overflow crediting account {address}")]
    BalanceOverflow {
        /// The account being credited.
        address: Address,
    },
}
