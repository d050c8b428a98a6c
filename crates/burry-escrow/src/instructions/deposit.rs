//! Deposit: lock lamports in a fresh entry.

use burry_core::{Address, Price};
use burry_ledger::{Ledger, Receipt};

use crate::config::EscrowConfig;
use crate::error::EscrowError;
use crate::state::EscrowEntry;

/// Lock `amount` lamports from `owner` until the price feed reports a value
/// above `unlock_price`.
///
/// The owner pays `amount` plus whatever part of the storage reservation
/// the entry address does not already hold. A bare balance sitting at the
/// address (lamports sent there before any deposit) is not an entry: it
/// stays in place, counts toward the reservation, and is released with the
/// entry on withdrawal.
///
/// # Errors
///
/// - [`EscrowError::InvalidAmount`] if `amount` is zero, checked first.
/// - [`EscrowError::EntryAlreadyExists`] if the owner already has an entry.
/// - [`EscrowError::InsufficientFunds`] if the owner cannot pay.
pub fn handler(
    ledger: &Ledger,
    config: &EscrowConfig,
    owner: &Address,
    amount: u64,
    unlock_price: Price,
) -> Result<Receipt, EscrowError> {
    if amount == 0 {
        return Err(EscrowError::InvalidAmount);
    }

    let (address, bump) = EscrowEntry::find_address(owner, &config.program_id)?;
    let entry = EscrowEntry {
        owner: *owner,
        locked_amount: amount,
        unlock_price,
        bump,
    };

    let committed = ledger.transact(&[*owner, address], |tx| -> Result<u64, EscrowError> {
        let held = match tx.get(&address)? {
            Some(account) if account.has_data() => {
                return Err(EscrowError::EntryAlreadyExists { address })
            }
            Some(account) => account.lamports,
            None => 0,
        };
        let reserve = tx
            .rent()
            .minimum_balance(EscrowEntry::SPACE)
            .saturating_sub(held);
        let available = tx.lamports(owner)?;
        // A sum past u64::MAX is more than any balance can hold.
        match amount.checked_add(reserve) {
            Some(needed) if needed <= available => {}
            needed => {
                return Err(EscrowError::InsufficientFunds {
                    owner: *owner,
                    needed: needed.unwrap_or(u64::MAX),
                    available,
                })
            }
        }
        let reserve = tx.init_account(owner, &address, entry.encode())?;
        tx.transfer(owner, &address, amount)?;
        Ok(reserve)
    })?;

    tracing::info!(
        owner = %owner.short(),
        entry = %address.short(),
        amount,
        reserve = committed.value,
        unlock_price = %unlock_price,
        receipt = %committed.receipt,
        "escrow deposit locked"
    );
    Ok(committed.receipt)
}
