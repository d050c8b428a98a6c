//! # burry-escrow -- Price-conditional escrow
//!
//! A depositor locks lamports in an entry at an address derived from their
//! own address and the fixed label [`ESCROW_SEED`]. The funds can be
//! reclaimed by the depositor, and only by the depositor, once the
//! configured price feed reports a value strictly above the unlock price
//! recorded at deposit time.
//!
//! ## Lifecycle
//!
//! ```text
//! Empty --deposit--> Locked --withdraw (price > unlock)--> Empty
//! ```
//!
//! The entry address is reusable after a successful withdrawal. There is
//! no top-up: a second deposit while `Locked` fails with
//! [`EscrowError::EntryAlreadyExists`].
//!
//! ## Guarantees
//!
//! - Every handler call commits fully or changes nothing.
//! - Release and entry destruction commit in one ledger transaction.
//! - Two concurrent withdrawals of one entry release it at most once.
//! - The oracle is read without holding any ledger lock.

pub mod config;
pub mod constants;
pub mod error;
pub mod instructions;
pub mod program;
pub mod state;

pub use config::{ConfigError, EscrowConfig};
pub use constants::{ESCROW_SEED, PROGRAM_ID, SOL_USD_FEED};
pub use error::{ErrorKind, EscrowError};
pub use program::EscrowProgram;
pub use state::{EscrowEntry, LayoutError};
