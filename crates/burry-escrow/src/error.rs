//! # Escrow Error Types
//!
//! Every failure a handler can return. Each variant has a stable numeric
//! code (starting at 6000, the Anchor custom-error range) and an
//! [`ErrorKind`] that tells the caller whether retrying can help.

use burry_core::{Address, DerivationError, Price};
use burry_ledger::LedgerError;
use burry_oracle::OracleError;
use thiserror::Error;

use crate::state::LayoutError;

/// Coarse classification of an [`EscrowError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad input; the same call will fail again.
    Validation,
    /// The entry is not in the state the operation needs.
    State,
    /// The caller is not the owner.
    Authorization,
    /// The oracle could not supply a usable price.
    ExternalDependency,
    /// The price condition is not met yet.
    Policy,
    /// Invariant violation inside the program or ledger.
    Internal,
}

impl ErrorKind {
    /// Whether the same call may succeed later without any change by the
    /// caller.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::Policy | Self::ExternalDependency)
    }

    /// Machine-readable name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::State => "STATE_ERROR",
            Self::Authorization => "AUTHORIZATION_ERROR",
            Self::ExternalDependency => "EXTERNAL_DEPENDENCY_ERROR",
            Self::Policy => "POLICY_ERROR",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by the escrow handlers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EscrowError {
    /// Deposit of zero lamports.
    #[error("escrow amount must be greater than zero")]
    InvalidAmount,

    /// The depositor cannot pay the amount plus the storage reservation.
    #[error("owner {owner} has {available} lamports, deposit needs {needed}")]
    InsufficientFunds {
        /// Depositor.
        owner: Address,
        /// Amount plus reservation, `u64::MAX` when the sum overflows.
        needed: u64,
        /// Current balance.
        available: u64,
    },

    /// The owner already has an active entry.
    #[error("escrow entry {address} already exists")]
    EntryAlreadyExists {
        /// Entry address.
        address: Address,
    },

    /// No active entry at the derived address.
    #[error("no escrow entry at {address}")]
    EntryNotFound {
        /// Entry address.
        address: Address,
    },

    /// The caller does not own the entry.
    #[error("{caller} is not the owner of escrow entry {address}")]
    Unauthorized {
        /// Entry address.
        address: Address,
        /// Identity that attempted the withdrawal.
        caller: Address,
    },

    /// The price feed could not be read.
    #[error("price oracle unavailable for feed {feed}: {reason}")]
    OracleUnavailable {
        /// Configured feed.
        feed: Address,
        /// What went wrong.
        reason: String,
    },

    /// The price feed's latest observation is too old.
    #[error("price feed {feed} is stale: {age_secs}s old, limit {max_age_secs}s")]
    StaleData {
        /// Configured feed.
        feed: Address,
        /// Age of the observation.
        age_secs: i64,
        /// Configured limit.
        max_age_secs: u64,
    },

    /// The current price is not strictly above the unlock price.
    #[error("Current SOL price is not above Escrow unlock price.")]
    PriceConditionNotMet {
        /// Price reported by the oracle.
        current: Price,
        /// Threshold stored in the entry.
        unlock: Price,
    },

    /// The entry's stored bump does not re-derive its address.
    #[error("escrow entry {address} does not match its stored bump {bump}")]
    AddressMismatch {
        /// Entry address.
        address: Address,
        /// Stored bump.
        bump: u8,
    },

    /// The account at the entry address does not hold an entry.
    #[error("account {address} holds invalid escrow data: {source}")]
    AccountDataInvalid {
        /// Entry address.
        address: Address,
        /// Layout failure.
        #[source]
        source: LayoutError,
    },

    /// Address derivation failed.
    #[error("address derivation failed: {0}")]
    Derivation(#[from] DerivationError),

    /// Unexpected ledger failure.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl EscrowError {
    /// Classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAmount | Self::InsufficientFunds { .. } => ErrorKind::Validation,
            Self::EntryAlreadyExists { .. } | Self::EntryNotFound { .. } => ErrorKind::State,
            Self::Unauthorized { .. } => ErrorKind::Authorization,
            Self::OracleUnavailable { .. } | Self::StaleData { .. } => {
                ErrorKind::ExternalDependency
            }
            Self::PriceConditionNotMet { .. } => ErrorKind::Policy,
            Self::AddressMismatch { .. }
            | Self::AccountDataInvalid { .. }
            | Self::Derivation(_)
            | Self::Ledger(_) => ErrorKind::Internal,
        }
    }

    /// Stable numeric code.
    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidAmount => 6000,
            Self::InsufficientFunds { .. } => 6001,
            Self::EntryAlreadyExists { .. } => 6002,
            Self::EntryNotFound { .. } => 6003,
            Self::Unauthorized { .. } => 6004,
            Self::OracleUnavailable { .. } => 6005,
            Self::StaleData { .. } => 6006,
            Self::PriceConditionNotMet { .. } => 6007,
            Self::AddressMismatch { .. } => 6008,
            Self::AccountDataInvalid { .. } => 6009,
            Self::Derivation(_) => 6010,
            Self::Ledger(_) => 6011,
        }
    }

    /// Shorthand for `self.kind().is_retryable()`.
    pub fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }
}

impl From<OracleError> for EscrowError {
    fn from(err: OracleError) -> Self {
        match err {
            OracleError::Unavailable { feed, reason } => Self::OracleUnavailable { feed, reason },
            OracleError::Stale {
                feed,
                age_secs,
                max_age_secs,
            } => Self::StaleData {
                feed,
                age_secs,
                max_age_secs,
            },
            OracleError::Config(e) => Self::OracleUnavailable {
                feed: Address::default(),
                reason: e.to_string(),
            },
        }
    }
}
