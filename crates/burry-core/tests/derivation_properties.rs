//! Property tests for program-derived address search.
//!
//! Exercises the two guarantees the escrow handlers rely on: the same
//! `(label, owner)` always maps to the same slot, and different owners
//! never share a slot.

use burry_core::{create_program_address, find_program_address, is_on_curve, Address};
use proptest::prelude::*;

const LABEL: &[u8] = b"MICHAEL BURRY";

fn program_id() -> Address {
    Address::new_from_array([0x42; 32])
}

proptest! {
    #[test]
    fn derivation_is_deterministic(owner in any::<[u8; 32]>()) {
        let owner = Address::new_from_array(owner);
        let first = find_program_address(&[LABEL, owner.as_ref()], &program_id()).unwrap();
        let second = find_program_address(&[LABEL, owner.as_ref()], &program_id()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn distinct_owners_get_distinct_addresses(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
        prop_assume!(a != b);
        let a = Address::new_from_array(a);
        let b = Address::new_from_array(b);
        let (addr_a, _) = find_program_address(&[LABEL, a.as_ref()], &program_id()).unwrap();
        let (addr_b, _) = find_program_address(&[LABEL, b.as_ref()], &program_id()).unwrap();
        prop_assert_ne!(addr_a, addr_b);
    }

    #[test]
    fn stored_bump_reverifies(owner in any::<[u8; 32]>()) {
        let owner = Address::new_from_array(owner);
        let (addr, bump) = find_program_address(&[LABEL, owner.as_ref()], &program_id()).unwrap();
        let bump_seed = [bump];
        let again = create_program_address(&[LABEL, owner.as_ref(), &bump_seed[..]], &program_id()).unwrap();
        prop_assert_eq!(addr, again);
        prop_assert!(!is_on_curve(addr.as_bytes()));
    }

    #[test]
    fn derived_address_differs_from_owner(owner in any::<[u8; 32]>()) {
        let owner = Address::new_from_array(owner);
        let (addr, _) = find_program_address(&[LABEL, owner.as_ref()], &program_id()).unwrap();
        prop_assert_ne!(addr, owner);
    }
}
