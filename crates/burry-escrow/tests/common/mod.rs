#![allow(dead_code)]

use burry_core::{Address, Price};
use burry_escrow::{EscrowConfig, EscrowProgram};
use burry_ledger::{Ledger, RentSchedule};
use burry_oracle::ManualPriceFeed;

pub const STARTING_BALANCE: u64 = 10_000_000_000;

pub struct Harness {
    pub program: EscrowProgram<ManualPriceFeed>,
    pub feed: ManualPriceFeed,
    pub owner: Address,
}

pub fn price(s: &str) -> Price {
    Price::parse(s).unwrap()
}

pub fn ten() -> Price {
    Price::from_units(10).unwrap()
}

pub fn harness(rent: RentSchedule, current: &str) -> Harness {
    let ledger = Ledger::new(rent);
    let feed = ManualPriceFeed::with_price(price(current));
    let config = EscrowConfig {
        new_ledger_rent: rent,
        ..EscrowConfig::default()
    };
    let program = EscrowProgram::new(ledger, feed.clone(), config);
    let owner = Address::new_unique();
    program.ledger().airdrop(&owner, STARTING_BALANCE).unwrap();
    Harness {
        program,
        feed,
        owner,
    }
}
