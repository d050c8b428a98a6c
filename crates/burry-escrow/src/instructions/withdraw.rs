//! Withdraw: release an entry to its owner once the price condition holds.
//!
//! ## Procedure
//!
//! 1. Derive the entry address from the owner and read it without locking.
//!    A missing entry or a foreign caller fails here, before the oracle is
//!    consulted. The stored bump must re-derive the same address.
//! 2. Read the price feed. No ledger lock is held during the read.
//! 3. In one transaction over `{entry, owner}`: re-read the entry and
//!    repeat the checks of step 1. Compare the price, then close the entry
//!    and credit its whole balance to the owner.
//!
//! Step 3 re-reads because another withdrawal may have closed the entry
//! while step 2 was waiting on the oracle. The loser of such a race sees
//! [`EscrowError::EntryNotFound`].

use burry_core::Address;
use burry_ledger::{Ledger, Receipt};
use burry_oracle::PriceOracle;

use crate::config::EscrowConfig;
use crate::error::EscrowError;
use crate::instructions::read_entry;
use crate::state::EscrowEntry;

/// Release `owner`'s entry to `owner` if `caller` is the owner and the
/// current price is strictly above the entry's unlock price.
///
/// # Errors
///
/// - [`EscrowError::EntryNotFound`] if `owner` has no entry.
/// - [`EscrowError::Unauthorized`] if `caller` is not the entry's owner.
/// - [`EscrowError::OracleUnavailable`] / [`EscrowError::StaleData`] if the
///   feed cannot supply a usable price.
/// - [`EscrowError::PriceConditionNotMet`] if `current <= unlock`.
///
/// On any error the ledger is unchanged.
pub async fn handler<O: PriceOracle>(
    ledger: &Ledger,
    oracle: &O,
    config: &EscrowConfig,
    owner: &Address,
    caller: &Address,
) -> Result<Receipt, EscrowError> {
    let (address, _) = EscrowEntry::find_address(owner, &config.program_id)?;

    let entry = read_entry(&address, ledger.get(&address).as_ref())?;
    check_owner(&address, &entry, caller)?;
    check_address(config, &address, &entry)?;

    let observation = oracle.fetch_price(&config.price_feed).await?;
    let current = observation.value;

    let committed = ledger.transact(&[address, *owner], |tx| -> Result<_, EscrowError> {
        let entry = read_entry(&address, tx.get(&address)?)?;
        check_owner(&address, &entry, caller)?;
        check_address(config, &address, &entry)?;
        if current <= entry.unlock_price {
            return Err(EscrowError::PriceConditionNotMet {
                current,
                unlock: entry.unlock_price,
            });
        }
        let released = tx.close_account(&address, owner)?;
        Ok((entry, released))
    });

    let committed = match committed {
        Ok(committed) => committed,
        Err(err) => {
            tracing::info!(
                owner = %owner.short(),
                caller = %caller.short(),
                entry = %address.short(),
                current_price = %current,
                code = err.code(),
                "escrow withdrawal refused: {err}"
            );
            return Err(err);
        }
    };
    let (entry, released) = committed.value;

    tracing::info!(
        owner = %owner.short(),
        entry = %address.short(),
        locked_amount = entry.locked_amount,
        released,
        current_price = %current,
        unlock_price = %entry.unlock_price,
        receipt = %committed.receipt,
        "escrow released"
    );
    Ok(committed.receipt)
}

fn check_owner(address: &Address, entry: &EscrowEntry, caller: &Address) -> Result<(), EscrowError> {
    if entry.owner != *caller {
        return Err(EscrowError::Unauthorized {
            address: *address,
            caller: *caller,
        });
    }
    Ok(())
}

fn check_address(config: &EscrowConfig, address: &Address, entry: &EscrowEntry) -> Result<(), EscrowError> {
    if EscrowEntry::create_address(&entry.owner, entry.bump, &config.program_id)? != *address {
        return Err(EscrowError::AddressMismatch {
            address: *address,
            bump: entry.bump,
        });
    }
    Ok(())
}
