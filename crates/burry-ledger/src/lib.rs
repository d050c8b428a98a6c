//! # burry-ledger: Address-Keyed Account Ledger
//!
//! The backing store for the escrow program. Every account (wallet or
//! program-derived escrow) lives at an [`Address`](burry_core::Address) and
//! holds a lamport balance plus opaque data bytes. The ledger is the arena;
//! derived addresses are the index into it.
//!
//! ## Modules
//!
//! - **Account** (`account.rs`): the stored record.
//! - **Rent** (`rent.rs`): storage reservation schedule.
//! - **Store** (`store.rs`): the [`Ledger`] handle and its [`Transaction`]
//!   view. A transaction locks exactly the addresses it names and commits
//!   all of its writes or none.
//! - **Receipt** (`receipt.rs`): confirmation handle for a committed
//!   transaction.
//!
//! ## Concurrency
//!
//! Each address has its own lock. Transactions acquire their locks in
//! ascending address order, so overlapping transactions cannot deadlock and
//! transactions over disjoint addresses never wait for each other. Locks are
//! `parking_lot` mutexes and are never held across an `.await`.

pub mod account;
pub mod error;
pub mod receipt;
pub mod rent;
pub mod store;

pub use account::Account;
pub use error::LedgerError;
pub use receipt::Receipt;
pub use rent::{RentSchedule, ACCOUNT_STORAGE_OVERHEAD, DEFAULT_LAMPORTS_PER_BYTE};
pub use store::{Committed, Ledger, LedgerSnapshot, Transaction};
