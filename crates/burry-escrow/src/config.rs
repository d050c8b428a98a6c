//! Escrow program configuration.

use burry_core::{Address, AddressError};
use burry_ledger::{RentSchedule, DEFAULT_LAMPORTS_PER_BYTE};

use crate::constants::{PROGRAM_ID, SOL_USD_FEED};

/// Which program namespace and price feed the escrow uses, plus the rent
/// rate for ledgers created from this configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscrowConfig {
    /// Namespace for derived entry addresses.
    pub program_id: Address,
    /// Feed consulted by withdrawals.
    pub price_feed: Address,
    /// Storage reservation rate given to a ledger created from this
    /// configuration. An existing ledger keeps its own schedule, and
    /// deposits always charge the ledger's schedule.
    pub new_ledger_rent: RentSchedule,
}

impl Default for EscrowConfig {
    fn default() -> Self {
        Self {
            program_id: PROGRAM_ID,
            price_feed: SOL_USD_FEED,
            new_ledger_rent: RentSchedule::default(),
        }
    }
}

impl EscrowConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `BURRY_PROGRAM_ID` (hex, default: [`PROGRAM_ID`])
    /// - `BURRY_PRICE_FEED` (hex, default: [`SOL_USD_FEED`])
    /// - `BURRY_RENT_LAMPORTS_PER_BYTE` (default: 6960)
    pub fn from_env() -> Result<Self, ConfigError> {
        let lamports_per_byte = match std::env::var("BURRY_RENT_LAMPORTS_PER_BYTE") {
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                var: "BURRY_RENT_LAMPORTS_PER_BYTE".to_string(),
                value: raw,
            })?,
            Err(_) => DEFAULT_LAMPORTS_PER_BYTE,
        };
        Ok(Self {
            program_id: env_address("BURRY_PROGRAM_ID", PROGRAM_ID)?,
            price_feed: env_address("BURRY_PRICE_FEED", SOL_USD_FEED)?,
            new_ledger_rent: RentSchedule::new(lamports_per_byte),
        })
    }
}

fn env_address(var: &str, default: Address) -> Result<Address, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => Address::from_hex(raw.trim()).map_err(|source| ConfigError::InvalidAddress {
            var: var.to_string(),
            source,
        }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// An address variable is not 64 hex characters.
    #[error("invalid address for {var}: {source}")]
    InvalidAddress {
        /// Variable name.
        var: String,
        /// Parse failure.
        #[source]
        source: AddressError,
    },
    /// A numeric variable did not parse.
    #[error("invalid number for {var}: {value:?}")]
    InvalidNumber {
        /// Variable name.
        var: String,
        /// Raw value.
        value: String,
    },
}
