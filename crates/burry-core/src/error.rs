//! # Error Types
//!
//! Errors raised by the foundational types. All use `thiserror` and carry
//! the offending input so callers can report it without re-parsing.

use thiserror::Error;

/// An address string or byte slice could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Hex form must be exactly 64 characters.
    #[error("address hex must be 64 chars, got {0}")]
    InvalidLength(usize),

    /// Non-hex character in the input.
    #[error("invalid hex at position {position}: {reason}")]
    InvalidHex {
        /// Byte offset of the bad pair.
        position: usize,
        /// Parser message.
        reason: String,
    },
}

/// Program address derivation failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DerivationError {
    /// A single seed exceeds [`crate::MAX_SEED_LEN`] bytes.
    #[error("seed {index} is {len} bytes, max is {max}")]
    MaxSeedLength {
        /// Position of the seed in the seed list.
        index: usize,
        /// Actual length.
        len: usize,
        /// Allowed maximum.
        max: usize,
    },

    /// More than [`crate::MAX_SEEDS`] seeds (bump included).
    #[error("{count} seeds supplied, max is {max}")]
    TooManySeeds {
        /// Number of seeds supplied, including the bump.
        count: usize,
        /// Allowed maximum.
        max: usize,
    },

    /// The candidate hash lies on the ed25519 curve, or no bump in
    /// `0..=255` produced an off-curve address.
    #[error("seeds do not produce a valid program address")]
    InvalidSeeds,
}

/// A price string could not be converted to fixed point.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// Not a plain decimal number.
    #[error("invalid price {input:?}: {reason}")]
    Malformed {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// More fractional digits than [`crate::PRICE_DECIMALS`].
    #[error("price {input:?} has more than {max} decimal places")]
    TooPrecise {
        /// The rejected input.
        input: String,
        /// Allowed decimal places.
        max: u32,
    },

    /// The scaled value does not fit in an `i64`.
    #[error("price {0:?} is out of range")]
    Overflow(String),
}

/// A timestamp could not be parsed or constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// Only the `Z` suffix is accepted.
    #[error("timestamp must use Z suffix (UTC only), got {0:?}")]
    NotUtc(String),

    /// Not RFC 3339.
    #[error("invalid RFC 3339 timestamp {input:?}: {reason}")]
    Invalid {
        /// The rejected input.
        input: String,
        /// Parser message.
        reason: String,
    },

    /// Epoch seconds out of chrono's range.
    #[error("invalid Unix timestamp: {0}")]
    OutOfRange(i64),
}
