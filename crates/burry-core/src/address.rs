//! # Addresses
//!
//! A 32-byte account address. Wallets, program ids, price feeds, and
//! program-derived escrow accounts all share this one type, matching the
//! flat account model of the ledger.
//!
//! Addresses render as 64 lowercase hex characters in `Display` and serde.
//! Identity comparison is plain byte equality; there is no notion of a
//! partial or delegated identity.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AddressError;

/// A 32-byte account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; 32]);

impl Address {
    /// Byte length of an address.
    pub const LEN: usize = 32;

    /// Create an address from raw bytes.
    pub const fn new_from_array(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// A fresh random address, for wallets and tests.
    pub fn new_unique() -> Self {
        Self(rand::random())
    }

    /// Raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy out the raw bytes.
    pub fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Render as lowercase hex.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a 64-character hex string (case-insensitive, surrounding
    /// whitespace ignored).
    pub fn from_hex(hex: &str) -> Result<Self, AddressError> {
        let hex = hex.trim().to_lowercase();
        if hex.len() != 64 {
            return Err(AddressError::InvalidLength(hex.len()));
        }
        let mut arr = [0u8; 32];
        for (i, slot) in arr.iter_mut().enumerate() {
            let pair = hex.get(i * 2..i * 2 + 2).ok_or(AddressError::InvalidHex {
                position: i * 2,
                reason: "non-ascii input".to_string(),
            })?;
            *slot = u8::from_str_radix(pair, 16).map_err(|e| AddressError::InvalidHex {
                position: i * 2,
                reason: e.to_string(),
            })?;
        }
        Ok(Self(arr))
    }

    /// Short prefix for log lines.
    pub fn short(&self) -> String {
        self.0[..4].iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl std::str::FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Address({}..)", self.short())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}
