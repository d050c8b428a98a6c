//! Property tests for the release condition.

mod common;

use burry_core::Price;
use burry_escrow::EscrowError;
use burry_ledger::RentSchedule;
use common::{harness, STARTING_BALANCE};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Release happens exactly when the current price is strictly above
    /// the unlock price; otherwise nothing changes.
    #[test]
    fn release_iff_price_strictly_above(
        amount in 1u64..1_000_000_000,
        unlock in -1_000_000_000_000i64..1_000_000_000_000,
        delta in -1_000_000i64..1_000_000,
    ) {
        let current = Price::from_mantissa(unlock + delta);
        let h = harness(RentSchedule::default(), &current.to_string());
        h.program.deposit(&h.owner, amount, Price::from_mantissa(unlock)).unwrap();
        let entry_before = h.program.entry(&h.owner).unwrap();
        let balance_before = h.program.ledger().balance(&h.owner);

        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let result = rt.block_on(h.program.withdraw(&h.owner));

        if delta > 0 {
            prop_assert!(result.is_ok());
            prop_assert_eq!(h.program.entry(&h.owner).unwrap(), None);
            prop_assert_eq!(h.program.ledger().balance(&h.owner), STARTING_BALANCE);
        } else {
            let is_price_gate = matches!(result, Err(EscrowError::PriceConditionNotMet { .. }));
            prop_assert!(is_price_gate);
            prop_assert_eq!(h.program.entry(&h.owner).unwrap(), entry_before);
            prop_assert_eq!(h.program.ledger().balance(&h.owner), balance_before);
        }
    }
}
