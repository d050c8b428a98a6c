//! # burry-core: Foundational Types for the Burry Escrow Stack
//!
//! Every other crate in the workspace depends on `burry-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtypes for domain primitives.** `Address` and `Price` are distinct
//!    types with validated constructors. No bare byte arrays or floats cross
//!    crate boundaries.
//!
//! 2. **Derivation is a pure function.** [`find_program_address()`] maps
//!    `(seeds, program_id)` to the same `(Address, bump)` on every call, so
//!    handlers can locate an escrow without a shared index.
//!
//! 3. **Fixed-point prices.** `Price` is an `i64` mantissa with
//!    [`PRICE_DECIMALS`] implied decimals. Floats are rejected at parse time.
//!
//! 4. **UTC-only timestamps.** `Timestamp` is UTC with seconds precision.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `burry-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod address;
pub mod derive;
pub mod error;
pub mod price;
pub mod temporal;

pub use address::Address;
pub use derive::{
    create_program_address, find_program_address, is_on_curve, MAX_SEEDS, MAX_SEED_LEN,
    PDA_MARKER,
};
pub use error::{AddressError, DerivationError, PriceError, TimestampError};
pub use price::{Price, PRICE_DECIMALS, PRICE_SCALE};
pub use temporal::Timestamp;
