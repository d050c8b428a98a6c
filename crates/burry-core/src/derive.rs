//! # Program-Derived Addresses
//!
//! Deterministic, collision-resistant mapping from `(seeds, program_id)` to
//! an [`Address`]. The escrow program uses `[ESCROW_SEED, owner]` as seeds,
//! so each owner has exactly one escrow slot per label and both handlers can
//! find it without a shared index.
//!
//! ## Construction
//!
//! ```text
//! candidate = SHA-256(seed_0 ‖ … ‖ seed_n ‖ [bump] ‖ program_id ‖ "ProgramDerivedAddress")
//! ```
//!
//! A candidate is accepted only if it is **not** a valid compressed ed25519
//! point, so no private key can ever sign for it. [`find_program_address()`]
//! searches bumps from 255 downward and returns the first accepted one (the
//! canonical bump). Storing that bump lets later calls re-derive with a
//! single hash via [`create_program_address()`].

use sha2::{Digest, Sha256};

use crate::address::Address;
use crate::error::DerivationError;

/// Maximum length of a single seed, in bytes.
pub const MAX_SEED_LEN: usize = 32;

/// Maximum number of seeds, bump included.
pub const MAX_SEEDS: usize = 16;

/// Domain separator appended to every derivation hash.
pub const PDA_MARKER: &[u8; 21] = b"ProgramDerivedAddress";

/// Whether 32 bytes decode to a point on the ed25519 curve.
pub fn is_on_curve(bytes: &[u8; 32]) -> bool {
    ed25519_dalek::VerifyingKey::from_bytes(bytes).is_ok()
}

/// Derive the address for a known bump.
///
/// `seeds` must already include the bump as its final one-byte seed.
///
/// # Errors
///
/// - [`DerivationError::MaxSeedLength`] if any seed exceeds [`MAX_SEED_LEN`].
/// - [`DerivationError::TooManySeeds`] if more than [`MAX_SEEDS`] are given.
/// - [`DerivationError::InvalidSeeds`] if the result lies on the curve.
pub fn create_program_address(
    seeds: &[&[u8]],
    program_id: &Address,
) -> Result<Address, DerivationError> {
    if seeds.len() > MAX_SEEDS {
        return Err(DerivationError::TooManySeeds {
            count: seeds.len(),
            max: MAX_SEEDS,
        });
    }
    for (index, seed) in seeds.iter().enumerate() {
        if seed.len() > MAX_SEED_LEN {
            return Err(DerivationError::MaxSeedLength {
                index,
                len: seed.len(),
                max: MAX_SEED_LEN,
            });
        }
    }

    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update(program_id.as_bytes());
    hasher.update(PDA_MARKER);
    let hash: [u8; 32] = hasher.finalize().into();

    if is_on_curve(&hash) {
        return Err(DerivationError::InvalidSeeds);
    }
    Ok(Address::new_from_array(hash))
}

/// Find the canonical `(address, bump)` for `seeds` under `program_id`.
///
/// Pure: identical inputs always return the identical pair.
///
/// # Errors
///
/// Seed-shape errors from [`create_program_address()`] are returned as-is.
/// [`DerivationError::InvalidSeeds`] if every bump lands on the curve,
/// which happens with negligible probability.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &Address,
) -> Result<(Address, u8), DerivationError> {
    if seeds.len() + 1 > MAX_SEEDS {
        return Err(DerivationError::TooManySeeds {
            count: seeds.len() + 1,
            max: MAX_SEEDS,
        });
    }

    for bump in (0..=u8::MAX).rev() {
        let bump_seed = [bump];
        let mut with_bump: Vec<&[u8]> = Vec::with_capacity(seeds.len() + 1);
        with_bump.extend_from_slice(seeds);
        with_bump.push(&bump_seed);
        match create_program_address(&with_bump, program_id) {
            Ok(address) => return Ok((address, bump)),
            Err(DerivationError::InvalidSeeds) => {}
            Err(e) => return Err(e),
        }
    }
    Err(DerivationError::InvalidSeeds)
}
