//! # Escrow Entry
//!
//! The persisted record of one active escrow and its on-ledger layout.
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 8 | discriminator |
//! | 8 | 32 | owner |
//! | 40 | 8 | locked_amount (LE u64) |
//! | 48 | 8 | unlock_price mantissa (LE i64) |
//! | 56 | 1 | bump |

use burry_core::{
    create_program_address, find_program_address, Address, DerivationError, Price,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::ESCROW_SEED;

/// First 8 bytes of `sha256("account:EscrowEntry")`.
pub const ENTRY_DISCRIMINATOR: [u8; 8] = [0x8d, 0xa0, 0xf8, 0x4e, 0xc0, 0xbe, 0x55, 0x8d];

/// One active escrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowEntry {
    /// Depositor, the only identity allowed to withdraw.
    pub owner: Address,
    /// Lamports in custody. Always positive.
    pub locked_amount: u64,
    /// Release threshold.
    pub unlock_price: Price,
    /// Derivation nonce of the entry address.
    pub bump: u8,
}

/// Account data is not a valid encoded entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Fewer bytes than [`EscrowEntry::SPACE`].
    #[error("entry data is {len} bytes, expected {expected}")]
    TooShort {
        /// Actual length.
        len: usize,
        /// Required length.
        expected: usize,
    },
    /// Leading bytes are not the entry discriminator.
    #[error("account data is not an escrow entry")]
    WrongDiscriminator,
}

impl EscrowEntry {
    /// Encoded size in bytes.
    pub const SPACE: usize = 8 + 32 + 8 + 8 + 1;

    /// Derive the entry address for `owner` under `program_id`.
    pub fn find_address(
        owner: &Address,
        program_id: &Address,
    ) -> Result<(Address, u8), DerivationError> {
        find_program_address(&[ESCROW_SEED, owner.as_ref()], program_id)
    }

    /// Re-derive the entry address for a known bump.
    pub fn create_address(
        owner: &Address,
        bump: u8,
        program_id: &Address,
    ) -> Result<Address, DerivationError> {
        create_program_address(&[ESCROW_SEED, owner.as_ref(), &[bump][..]], program_id)
    }

    /// Encode into the fixed layout.
    pub fn encode(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(Self::SPACE);
        data.extend_from_slice(&ENTRY_DISCRIMINATOR);
        data.extend_from_slice(self.owner.as_bytes());
        data.extend_from_slice(&self.locked_amount.to_le_bytes());
        data.extend_from_slice(&self.unlock_price.mantissa().to_le_bytes());
        data.push(self.bump);
        data
    }

    /// Decode from account data. Trailing bytes are ignored.
    pub fn decode(data: &[u8]) -> Result<Self, LayoutError> {
        if data.len() < Self::SPACE {
            return Err(LayoutError::TooShort {
                len: data.len(),
                expected: Self::SPACE,
            });
        }
        if data[..8] != ENTRY_DISCRIMINATOR {
            return Err(LayoutError::WrongDiscriminator);
        }
        let mut owner = [0u8; 32];
        owner.copy_from_slice(&data[8..40]);
        let mut amount = [0u8; 8];
        amount.copy_from_slice(&data[40..48]);
        let mut price = [0u8; 8];
        price.copy_from_slice(&data[48..56]);

        Ok(Self {
            owner: Address::new_from_array(owner),
            locked_amount: u64::from_le_bytes(amount),
            unlock_price: Price::from_mantissa(i64::from_le_bytes(price)),
            bump: data[56],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PROGRAM_ID;
    use sha2::{Digest, Sha256};

    fn sample() -> EscrowEntry {
        EscrowEntry {
            owner: Address::new_from_array([7; 32]),
            locked_amount: 5_000,
            unlock_price: Price::parse("-21.53").unwrap(),
            bump: 254,
        }
    }

    #[test]
    fn discriminator_matches_type_name_hash() {
        let digest = Sha256::digest(b"account:EscrowEntry");
        assert_eq!(&digest[..8], &ENTRY_DISCRIMINATOR[..]);
    }

    #[test]
    fn encoding_has_fixed_layout() {
        let data = sample().encode();
        assert_eq!(data.len(), EscrowEntry::SPACE);
        assert_eq!(&data[8..40], &[7u8; 32][..]);
        assert_eq!(&data[40..48], &5_000u64.to_le_bytes()[..]);
        assert_eq!(data[56], 254);
        assert_eq!(EscrowEntry::decode(&data).unwrap(), sample());
    }

    #[test]
    fn decode_rejects_short_data() {
        let data = sample().encode();
        assert_eq!(
            EscrowEntry::decode(&data[..40]),
            Err(LayoutError::TooShort { len: 40, expected: 57 })
        );
    }

    #[test]
    fn decode_rejects_foreign_account() {
        let mut data = sample().encode();
        data[0] ^= 0xff;
        assert_eq!(EscrowEntry::decode(&data), Err(LayoutError::WrongDiscriminator));
    }

    #[test]
    fn stored_bump_recreates_address() {
        let owner = Address::new_unique();
        let (address, bump) = EscrowEntry::find_address(&owner, &PROGRAM_ID).unwrap();
        assert_eq!(EscrowEntry::create_address(&owner, bump, &PROGRAM_ID).unwrap(), address);
    }
}
