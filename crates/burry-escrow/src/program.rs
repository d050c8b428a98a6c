//! # Escrow Program
//!
//! [`EscrowProgram`] bundles the injected state the handlers need: the
//! ledger, the price oracle, and the configuration. It is cheap to share
//! behind an `Arc`; the ledger handle itself is already shared.

use burry_core::{Address, Price};
use burry_ledger::{Ledger, Receipt};
use burry_oracle::{PriceObservation, PriceOracle};

use crate::config::EscrowConfig;
use crate::error::EscrowError;
use crate::instructions::{self, load_entry};
use crate::state::EscrowEntry;

/// The escrow program bound to a ledger and a price oracle.
#[derive(Debug, Clone)]
pub struct EscrowProgram<O> {
    ledger: Ledger,
    oracle: O,
    config: EscrowConfig,
}

impl<O: PriceOracle> EscrowProgram<O> {
    /// Bind the program to its state.
    ///
    /// Deposits reserve rent at the ledger's own schedule;
    /// [`EscrowConfig::new_ledger_rent`] only seeds ledgers created from
    /// configuration.
    pub fn new(ledger: Ledger, oracle: O, config: EscrowConfig) -> Self {
        Self {
            ledger,
            oracle,
            config,
        }
    }

    /// The backing ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The price oracle.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// The configuration in force.
    pub fn config(&self) -> &EscrowConfig {
        &self.config
    }

    /// Entry address and bump for `owner`.
    pub fn escrow_address(&self, owner: &Address) -> Result<(Address, u8), EscrowError> {
        Ok(EscrowEntry::find_address(owner, &self.config.program_id)?)
    }

    /// The active entry of `owner`, if any.
    pub fn entry(&self, owner: &Address) -> Result<Option<EscrowEntry>, EscrowError> {
        let (address, _) = self.escrow_address(owner)?;
        match self.ledger.get(&address) {
            Some(account) if account.has_data() => load_entry(&address, &account).map(Some),
            _ => Ok(None),
        }
    }

    /// Lock `amount` lamports from `owner` behind `unlock_price`.
    pub fn deposit(
        &self,
        owner: &Address,
        amount: u64,
        unlock_price: Price,
    ) -> Result<Receipt, EscrowError> {
        instructions::deposit::handler(&self.ledger, &self.config, owner, amount, unlock_price)
    }

    /// Release the caller's own entry.
    pub async fn withdraw(&self, caller: &Address) -> Result<Receipt, EscrowError> {
        self.withdraw_from(caller, caller).await
    }

    /// Release `owner`'s entry, acting as `caller`. Fails with
    /// [`EscrowError::Unauthorized`] unless `caller == owner`.
    pub async fn withdraw_from(
        &self,
        owner: &Address,
        caller: &Address,
    ) -> Result<Receipt, EscrowError> {
        instructions::withdraw::handler(&self.ledger, &self.oracle, &self.config, owner, caller)
            .await
    }

    /// Read the configured price feed.
    pub async fn current_price(&self) -> Result<PriceObservation, EscrowError> {
        Ok(self.oracle.fetch_price(&self.config.price_feed).await?)
    }
}
