//! Program constants.

use burry_core::Address;

/// Label mixed into every entry address.
pub const ESCROW_SEED: &[u8] = b"MICHAEL BURRY";

/// Default program identity, the namespace for derived entry addresses.
pub const PROGRAM_ID: Address = Address::new_from_array([
    0x29, 0x5c, 0xfd, 0x6d, 0x56, 0xb2, 0xe2, 0x10, 0xdc, 0xe3, 0x43, 0x87, 0x9b, 0xba, 0x87, 0x98,
    0x95, 0xfb, 0x84, 0x85, 0x17, 0xc0, 0xbc, 0x0d, 0x3c, 0xe3, 0x2c, 0x95, 0x87, 0x72, 0xe2, 0xe1,
]);

/// Default SOL/USD aggregator feed.
pub const SOL_USD_FEED: Address = Address::new_from_array([
    0xec, 0x81, 0x10, 0x51, 0x12, 0xa2, 0x57, 0xd6, 0x1d, 0xf4, 0xcf, 0x5f, 0x13, 0xee, 0x0a, 0x1b,
    0x01, 0x91, 0x97, 0xc8, 0xc5, 0x34, 0x3b, 0x4f, 0x2a, 0x7e, 0xc8, 0x84, 0x6a, 0xe2, 0x2c, 0x1a,
]);
