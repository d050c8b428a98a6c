//! # Ledger Store
//!
//! Thread-safe, cloneable account store with per-address transactions.
//!
//! ## Transaction model
//!
//! [`Ledger::transact`] takes the set of addresses a transaction may touch,
//! locks them in ascending order, and hands the closure a [`Transaction`]
//! holding working copies of those accounts. If the closure returns `Ok`,
//! every working copy is written back before any lock is released; if it
//! returns `Err`, nothing is written. No other transaction on any of the
//! locked addresses can observe an intermediate state.
//!
//! The outer map lock is held only long enough to look up (or create) the
//! per-address slots. Slot locks are `parking_lot` mutexes: non-poisoning,
//! and never held across an `.await`.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use burry_core::{Address, Timestamp};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::account::Account;
use crate::error::LedgerError;
use crate::receipt::Receipt;
use crate::rent::RentSchedule;

type Slot = Arc<Mutex<Option<Account>>>;

#[derive(Debug)]
struct Inner {
    slots: RwLock<HashMap<Address, Slot>>,
    sequence: AtomicU64,
    rent: RentSchedule,
}

/// Shared handle to the account store. Clones share the same accounts.
#[derive(Debug, Clone)]
pub struct Ledger {
    inner: Arc<Inner>,
}

/// Result of a committed transaction: the closure's value plus the receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed<R> {
    /// Value returned by the transaction closure.
    pub value: R,
    /// Confirmation handle.
    pub receipt: Receipt,
}

/// Serializable point-in-time copy of the ledger.
///
/// Each account is read under its own lock. Writers running during
/// [`Ledger::snapshot`] may land on either side of the cut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Storage reservation rate in force.
    pub rent: RentSchedule,
    /// Last assigned commit sequence number.
    pub sequence: u64,
    /// All non-empty accounts.
    pub accounts: BTreeMap<Address, Account>,
}

impl Ledger {
    /// An empty ledger with the given rent schedule.
    pub fn new(rent: RentSchedule) -> Self {
        Self {
            inner: Arc::new(Inner {
                slots: RwLock::new(HashMap::new()),
                sequence: AtomicU64::new(0),
                rent,
            }),
        }
    }

    /// Rebuild a ledger from a snapshot.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Self {
        let slots = snapshot
            .accounts
            .into_iter()
            .map(|(address, account)| (address, Arc::new(Mutex::new(Some(account)))))
            .collect();
        Self {
            inner: Arc::new(Inner {
                slots: RwLock::new(slots),
                sequence: AtomicU64::new(snapshot.sequence),
                rent: snapshot.rent,
            }),
        }
    }

    /// Copy out all non-empty accounts.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let slots: Vec<(Address, Slot)> = self
            .inner
            .slots
            .read()
            .iter()
            .map(|(address, slot)| (*address, Arc::clone(slot)))
            .collect();
        let accounts = slots
            .into_iter()
            .filter_map(|(address, slot)| {
                let account = slot.lock().clone();
                account.map(|account| (address, account))
            })
            .collect();
        LedgerSnapshot {
            rent: self.inner.rent,
            sequence: self.inner.sequence.load(Ordering::SeqCst),
            accounts,
        }
    }

    /// The rent schedule in force.
    pub fn rent(&self) -> RentSchedule {
        self.inner.rent
    }

    /// Read one account.
    pub fn get(&self, address: &Address) -> Option<Account> {
        let slot = self.inner.slots.read().get(address).cloned()?;
        let account = slot.lock().clone();
        account
    }

    /// Balance of `address`, zero when empty.
    pub fn balance(&self, address: &Address) -> u64 {
        self.get(address).map_or(0, |a| a.lamports)
    }

    /// Whether an account exists at `address`.
    pub fn contains(&self, address: &Address) -> bool {
        self.get(address).is_some()
    }

    /// Credit lamports to a wallet out of thin air.
    pub fn airdrop(&self, to: &Address, lamports: u64) -> Result<Receipt, LedgerError> {
        let committed = self.transact(&[*to], |tx| tx.credit(to, lamports))?;
        Ok(committed.receipt)
    }

    /// Run `f` as one atomic transaction over `addresses`.
    ///
    /// Duplicate addresses are ignored. Accessing an address outside the
    /// set from inside `f` fails with [`LedgerError::NotLocked`].
    pub fn transact<R, E, F>(&self, addresses: &[Address], f: F) -> Result<Committed<R>, E>
    where
        F: FnOnce(&mut Transaction) -> Result<R, E>,
    {
        let mut keys = addresses.to_vec();
        keys.sort();
        keys.dedup();

        let slots: Vec<Slot> = keys.iter().map(|address| self.slot(address)).collect();
        let mut guards: Vec<_> = slots.iter().map(|slot| slot.lock()).collect();

        let mut tx = Transaction {
            rent: self.inner.rent,
            accounts: keys
                .iter()
                .zip(guards.iter())
                .map(|(address, guard)| (*address, (**guard).clone()))
                .collect(),
        };

        let value = match f(&mut tx) {
            Ok(value) => value,
            Err(err) => {
                drop(guards);
                drop(slots);
                self.prune(&keys);
                return Err(err);
            }
        };

        for (address, guard) in keys.iter().zip(guards.iter_mut()) {
            **guard = tx.accounts.remove(address).flatten();
        }
        let sequence = self.inner.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        drop(guards);
        drop(slots);
        self.prune(&keys);

        let receipt = Receipt {
            id: Uuid::new_v4(),
            sequence,
            committed_at: Timestamp::now(),
        };
        tracing::debug!(sequence, accounts = keys.len(), "ledger transaction committed");
        Ok(Committed { value, receipt })
    }

    fn slot(&self, address: &Address) -> Slot {
        if let Some(slot) = self.inner.slots.read().get(address) {
            return Arc::clone(slot);
        }
        Arc::clone(self.inner.slots.write().entry(*address).or_default())
    }

    /// Drop the slots of `addresses` that hold no account and that no other
    /// transaction has a handle to.
    ///
    /// Handles are only cloned out of the map under its lock, so a slot with
    /// a strong count of one cannot be picked up while the write lock is held.
    fn prune(&self, addresses: &[Address]) {
        let mut slots = self.inner.slots.write();
        for address in addresses {
            let unused = slots.get(address).is_some_and(|slot| {
                Arc::strong_count(slot) == 1 && slot.try_lock().is_some_and(|account| account.is_none())
            });
            if unused {
                slots.remove(address);
            }
        }
    }

    #[cfg(test)]
    fn tracked_slots(&self) -> usize {
        self.inner.slots.read().len()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(RentSchedule::default())
    }
}

/// Working view of the accounts locked by one transaction.
#[derive(Debug)]
pub struct Transaction {
    rent: RentSchedule,
    accounts: BTreeMap<Address, Option<Account>>,
}

impl Transaction {
    /// The rent schedule in force.
    pub fn rent(&self) -> RentSchedule {
        self.rent
    }

    /// The account at `address`, if any.
    pub fn get(&self, address: &Address) -> Result<Option<&Account>, LedgerError> {
        self.accounts
            .get(address)
            .map(Option::as_ref)
            .ok_or(LedgerError::NotLocked { address: *address })
    }

    /// Balance at `address`, zero when empty.
    pub fn lamports(&self, address: &Address) -> Result<u64, LedgerError> {
        Ok(self.get(address)?.map_or(0, |a| a.lamports))
    }

    /// Add lamports, creating a wallet if the address is empty.
    pub fn credit(&mut self, address: &Address, lamports: u64) -> Result<(), LedgerError> {
        let slot = self.slot_mut(address)?;
        let account = slot.get_or_insert_with(Account::default);
        account.lamports = account
            .lamports
            .checked_add(lamports)
            .ok_or(LedgerError::BalanceOverflow { address: *address })?;
        Ok(())
    }

    /// Remove lamports from an existing account.
    pub fn debit(&mut self, address: &Address, lamports: u64) -> Result<(), LedgerError> {
        let account = self
            .slot_mut(address)?
            .as_mut()
            .ok_or(LedgerError::AccountNotFound { address: *address })?;
        if account.lamports < lamports {
            return Err(LedgerError::InsufficientFunds {
                address: *address,
                needed: lamports,
                available: account.lamports,
            });
        }
        account.lamports -= lamports;
        Ok(())
    }

    /// Move lamports between two locked accounts.
    pub fn transfer(&mut self, from: &Address, to: &Address, lamports: u64) -> Result<(), LedgerError> {
        self.debit(from, lamports)?;
        self.credit(to, lamports)
    }

    /// Give the account at `address` program data, funded by `payer`.
    ///
    /// The address may be empty or hold a bare balance with no data. An
    /// existing balance counts toward the rent-exempt minimum and `payer`
    /// covers only the shortfall. Returns the lamports charged to `payer`.
    pub fn init_account(
        &mut self,
        payer: &Address,
        address: &Address,
        data: Vec<u8>,
    ) -> Result<u64, LedgerError> {
        let existing = match self.get(address)? {
            Some(account) if account.has_data() => {
                return Err(LedgerError::AccountAlreadyExists { address: *address })
            }
            Some(account) => account.lamports,
            None => 0,
        };
        let shortfall = self.rent.minimum_balance(data.len()).saturating_sub(existing);
        if shortfall > 0 {
            self.transfer(payer, address, shortfall)?;
        }
        let account = self
            .slot_mut(address)?
            .get_or_insert_with(Account::default);
        account.data = data;
        Ok(shortfall)
    }

    /// Delete the account at `address` and credit its whole balance to
    /// `destination`. Returns the lamports released.
    pub fn close_account(&mut self, address: &Address, destination: &Address) -> Result<u64, LedgerError> {
        let account = self
            .slot_mut(address)?
            .take()
            .ok_or(LedgerError::AccountNotFound { address: *address })?;
        self.credit(destination, account.lamports)?;
        Ok(account.lamports)
    }

    fn slot_mut(&mut self, address: &Address) -> Result<&mut Option<Account>, LedgerError> {
        self.accounts
            .get_mut(address)
            .ok_or(LedgerError::NotLocked { address: *address })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::new_from_array([byte; 32])
    }

    #[test]
    fn airdrop_creates_wallet() {
        let ledger = Ledger::new(RentSchedule::free());
        ledger.airdrop(&addr(1), 500).unwrap();
        assert_eq!(ledger.get(&addr(1)), Some(Account::wallet(500)));
    }

    #[test]
    fn failed_transaction_writes_nothing() {
        let ledger = Ledger::new(RentSchedule::free());
        ledger.airdrop(&addr(1), 100).unwrap();
        let result = ledger.transact(&[addr(1), addr(2)], |tx| {
            tx.transfer(&addr(1), &addr(2), 60)?;
            tx.transfer(&addr(1), &addr(2), 60)
        });
        assert_eq!(
            result.unwrap_err(),
            LedgerError::InsufficientFunds {
                address: addr(1),
                needed: 60,
                available: 40
            }
        );
        assert_eq!(ledger.balance(&addr(1)), 100);
        assert!(!ledger.contains(&addr(2)));
    }

    #[test]
    fn unlocked_address_rejected() {
        let ledger = Ledger::default();
        let err = ledger
            .transact(&[addr(1)], |tx| tx.credit(&addr(2), 1))
            .unwrap_err();
        assert_eq!(err, LedgerError::NotLocked { address: addr(2) });
    }

    #[test]
    fn init_account_charges_rent_and_rejects_reuse() {
        let ledger = Ledger::new(RentSchedule::new(1));
        ledger.airdrop(&addr(1), 10_000).unwrap();

        let charged = ledger
            .transact(&[addr(1), addr(2)], |tx| tx.init_account(&addr(1), &addr(2), vec![0; 8]))
            .unwrap()
            .value;
        assert_eq!(charged, 136);
        assert_eq!(ledger.balance(&addr(1)), 10_000 - 136);
        assert_eq!(ledger.get(&addr(2)), Some(Account::with_data(136, vec![0; 8])));

        let err = ledger
            .transact(&[addr(1), addr(2)], |tx| tx.init_account(&addr(1), &addr(2), vec![0; 8]))
            .unwrap_err();
        assert_eq!(err, LedgerError::AccountAlreadyExists { address: addr(2) });
        assert_eq!(ledger.balance(&addr(1)), 10_000 - 136);
    }

    #[test]
    fn init_account_counts_prefunded_balance_toward_rent() {
        let ledger = Ledger::new(RentSchedule::new(1));
        ledger.airdrop(&addr(1), 10_000).unwrap();
        ledger.airdrop(&addr(2), 100).unwrap();

        let charged = ledger
            .transact(&[addr(1), addr(2)], |tx| tx.init_account(&addr(1), &addr(2), vec![7; 8]))
            .unwrap()
            .value;
        assert_eq!(charged, 36);
        assert_eq!(ledger.get(&addr(2)), Some(Account::with_data(136, vec![7; 8])));

        ledger.airdrop(&addr(3), 500).unwrap();
        let charged = ledger
            .transact(&[addr(1), addr(3)], |tx| tx.init_account(&addr(1), &addr(3), vec![7; 8]))
            .unwrap()
            .value;
        assert_eq!(charged, 0);
        assert_eq!(ledger.get(&addr(3)), Some(Account::with_data(500, vec![7; 8])));
        assert_eq!(ledger.balance(&addr(1)), 10_000 - 36);
    }

    #[test]
    fn init_account_fails_when_payer_cannot_cover_rent() {
        let ledger = Ledger::new(RentSchedule::new(1));
        ledger.airdrop(&addr(1), 10).unwrap();
        let err = ledger
            .transact(&[addr(1), addr(2)], |tx| tx.init_account(&addr(1), &addr(2), vec![0; 8]))
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientFunds {
                address: addr(1),
                needed: 136,
                available: 10
            }
        );
        assert!(!ledger.contains(&addr(2)));
    }

    #[test]
    fn close_account_releases_everything() {
        let ledger = Ledger::new(RentSchedule::free());
        ledger.airdrop(&addr(1), 1_000).unwrap();
        ledger
            .transact(&[addr(1), addr(2)], |tx| {
                tx.init_account(&addr(1), &addr(2), vec![1, 2, 3])?;
                tx.transfer(&addr(1), &addr(2), 400)
            })
            .unwrap();
        let released = ledger
            .transact(&[addr(1), addr(2)], |tx| tx.close_account(&addr(2), &addr(1)))
            .unwrap()
            .value;
        assert_eq!(released, 400);
        assert_eq!(ledger.balance(&addr(1)), 1_000);
        assert!(!ledger.contains(&addr(2)));
    }

    #[test]
    fn empty_slots_are_released() {
        let ledger = Ledger::new(RentSchedule::free());
        ledger.airdrop(&addr(1), 1_000).unwrap();
        assert_eq!(ledger.tracked_slots(), 1);

        let _ = ledger.transact(&[addr(1), addr(2)], |tx| tx.transfer(&addr(1), &addr(2), 5_000));
        assert_eq!(ledger.tracked_slots(), 1);

        ledger
            .transact(&[addr(1), addr(3)], |tx| {
                tx.init_account(&addr(1), &addr(3), vec![1])?;
                tx.transfer(&addr(1), &addr(3), 10)
            })
            .unwrap();
        assert_eq!(ledger.tracked_slots(), 2);

        ledger
            .transact(&[addr(1), addr(3)], |tx| tx.close_account(&addr(3), &addr(1)))
            .unwrap();
        assert_eq!(ledger.tracked_slots(), 1);
        assert_eq!(ledger.balance(&addr(1)), 1_000);
    }

    #[test]
    fn sequence_numbers_increase() {
        let ledger = Ledger::default();
        let a = ledger.airdrop(&addr(1), 1).unwrap();
        let b = ledger.airdrop(&addr(1), 1).unwrap();
        assert!(b.sequence > a.sequence);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn opposite_order_transfers_do_not_deadlock() {
        let ledger = Ledger::new(RentSchedule::free());
        ledger.airdrop(&addr(1), 1_000_000).unwrap();
        ledger.airdrop(&addr(2), 1_000_000).unwrap();

        std::thread::scope(|s| {
            for i in 0..8 {
                let ledger = ledger.clone();
                s.spawn(move || {
                    let (from, to) = if i % 2 == 0 { (addr(1), addr(2)) } else { (addr(2), addr(1)) };
                    for _ in 0..500 {
                        ledger
                            .transact(&[from, to], |tx| tx.transfer(&from, &to, 1))
                            .unwrap();
                    }
                });
            }
        });

        assert_eq!(ledger.balance(&addr(1)) + ledger.balance(&addr(2)), 2_000_000);
        assert_eq!(ledger.balance(&addr(1)), 1_000_000);
    }

    #[test]
    fn snapshot_roundtrip_through_json() {
        let ledger = Ledger::new(RentSchedule::new(3));
        ledger.airdrop(&addr(1), 42).unwrap();
        let snapshot = ledger.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored = Ledger::from_snapshot(serde_json::from_str(&json).unwrap());
        assert_eq!(restored.balance(&addr(1)), 42);
        assert_eq!(restored.rent(), RentSchedule::new(3));
        assert_eq!(restored.snapshot(), snapshot);
    }
}
