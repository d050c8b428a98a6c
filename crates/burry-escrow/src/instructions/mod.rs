//! Escrow instruction handlers.
//!
//! Each handler is a free function over explicit state (ledger, config,
//! oracle) so it can be driven without the [`crate::EscrowProgram`] facade.

pub mod deposit;
pub mod withdraw;

use burry_core::Address;
use burry_ledger::Account;

use crate::error::EscrowError;
use crate::state::EscrowEntry;

/// The entry stored at `address`.
///
/// An empty address and a bare balance without data both hold no entry.
pub(crate) fn read_entry(address: &Address, account: Option<&Account>) -> Result<EscrowEntry, EscrowError> {
    match account {
        Some(account) if account.has_data() => load_entry(address, account),
        _ => Err(EscrowError::EntryNotFound { address: *address }),
    }
}

/// Decode the entry held by `account` at `address`.
pub(crate) fn load_entry(address: &Address, account: &Account) -> Result<EscrowEntry, EscrowError> {
    EscrowEntry::decode(&account.data).map_err(|source| EscrowError::AccountDataInvalid {
        address: *address,
        source,
    })
}
