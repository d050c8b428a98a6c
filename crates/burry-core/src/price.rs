//! # Fixed-Point Prices
//!
//! `Price` is a signed 8-byte fixed-point number with [`PRICE_DECIMALS`]
//! implied decimal places. It is the unit of both the escrow unlock
//! threshold and the oracle observation, so the release comparison is an
//! exact integer comparison with no float rounding.
//!
//! Prices serialize as decimal strings (`"153.27"`). Floats never appear in
//! persisted or wire representations.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PriceError;

/// Number of implied decimal places in a [`Price`].
pub const PRICE_DECIMALS: u32 = 8;

/// `10^PRICE_DECIMALS`.
pub const PRICE_SCALE: i64 = 100_000_000;

/// A signed fixed-point price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(i64);

impl Price {
    /// Zero.
    pub const ZERO: Price = Price(0);

    /// Construct from the raw scaled mantissa.
    pub const fn from_mantissa(mantissa: i64) -> Self {
        Self(mantissa)
    }

    /// The raw scaled mantissa.
    pub const fn mantissa(&self) -> i64 {
        self.0
    }

    /// A whole-unit price, `None` on overflow.
    pub fn from_units(units: i64) -> Option<Self> {
        units.checked_mul(PRICE_SCALE).map(Self)
    }

    /// Parse a plain decimal string such as `"21.53"` or `"-0.5"`.
    ///
    /// # Errors
    ///
    /// - [`PriceError::Malformed`] for empty input, exponents, stray
    ///   characters, or more than one decimal point.
    /// - [`PriceError::TooPrecise`] for more than [`PRICE_DECIMALS`]
    ///   fractional digits.
    /// - [`PriceError::Overflow`] when the scaled value exceeds `i64`.
    pub fn parse(input: &str) -> Result<Self, PriceError> {
        let malformed = |reason: &str| PriceError::Malformed {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let s = input.trim();
        let (negative, unsigned) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            Some(_) => (false, s),
            None => return Err(malformed("empty")),
        };

        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, f),
            None => (unsigned, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(malformed("no digits"));
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(malformed("expected digits with at most one '.'"));
        }
        if frac_part.len() > PRICE_DECIMALS as usize {
            return Err(PriceError::TooPrecise {
                input: input.to_string(),
                max: PRICE_DECIMALS,
            });
        }

        let overflow = || PriceError::Overflow(input.to_string());

        let mut value: i128 = 0;
        for b in int_part.bytes() {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(i128::from(b - b'0')))
                .filter(|v| *v <= i128::from(i64::MAX))
                .ok_or_else(overflow)?;
        }
        value = value
            .checked_mul(i128::from(PRICE_SCALE))
            .ok_or_else(overflow)?;

        let mut frac: i128 = 0;
        for b in frac_part.bytes() {
            frac = frac * 10 + i128::from(b - b'0');
        }
        let pad = PRICE_DECIMALS - frac_part.len() as u32;
        frac *= 10i128.pow(pad);
        value += frac;

        if negative {
            value = -value;
        }
        i64::try_from(value).map(Self).map_err(|_| overflow())
    }

    /// `self + other`, `None` on overflow.
    pub fn checked_add(self, other: Price) -> Option<Price> {
        self.0.checked_add(other.0).map(Self)
    }

    /// `self - other`, `None` on overflow.
    pub fn checked_sub(self, other: Price) -> Option<Price> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Whether the value is strictly below zero.
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = PRICE_SCALE as u64;
        let units = abs / scale;
        let frac = abs % scale;
        if frac == 0 {
            return write!(f, "{sign}{units}");
        }
        let digits = format!("{frac:0width$}", width = PRICE_DECIMALS as usize);
        write!(f, "{sign}{units}.{}", digits.trim_end_matches('0'))
    }
}

impl std::str::FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_integer() {
        assert_eq!(Price::parse("21").unwrap().mantissa(), 2_100_000_000);
    }

    #[test]
    fn parse_fraction() {
        assert_eq!(Price::parse("21.53").unwrap().mantissa(), 2_153_000_000);
        assert_eq!(Price::parse(".5").unwrap().mantissa(), 50_000_000);
        assert_eq!(Price::parse("3.").unwrap().mantissa(), 300_000_000);
    }

    #[test]
    fn parse_negative() {
        assert_eq!(Price::parse("-0.00000001").unwrap().mantissa(), -1);
        assert!(Price::parse("-1").unwrap().is_negative());
    }

    #[test]
    fn parse_rejects_non_decimal_forms() {
        assert!(matches!(Price::parse("1e3"), Err(PriceError::Malformed { .. })));
        assert!(matches!(Price::parse("1.2.3"), Err(PriceError::Malformed { .. })));
        assert!(matches!(Price::parse(""), Err(PriceError::Malformed { .. })));
        assert!(matches!(Price::parse("-"), Err(PriceError::Malformed { .. })));
        assert!(matches!(Price::parse("."), Err(PriceError::Malformed { .. })));
        assert!(matches!(Price::parse("NaN"), Err(PriceError::Malformed { .. })));
    }

    #[test]
    fn parse_rejects_excess_precision() {
        assert!(matches!(
            Price::parse("1.123456789"),
            Err(PriceError::TooPrecise { max: 8, .. })
        ));
    }

    #[test]
    fn parse_rejects_overflow() {
        assert!(matches!(
            Price::parse("100000000000"),
            Err(PriceError::Overflow(_))
        ));
    }

    #[test]
    fn display_trims_trailing_zeros() {
        assert_eq!(Price::parse("153.270").unwrap().to_string(), "153.27");
        assert_eq!(Price::parse("7").unwrap().to_string(), "7");
        assert_eq!(Price::parse("-0.5").unwrap().to_string(), "-0.5");
        assert_eq!(Price::from_mantissa(i64::MIN).to_string(), "-92233720368.54775808");
    }

    #[test]
    fn ordering_is_numeric() {
        let low = Price::parse("143.27").unwrap();
        let high = Price::parse("153.27").unwrap();
        assert!(high > low);
        assert_eq!(high.checked_sub(Price::from_units(10).unwrap()), Some(low));
    }

    #[test]
    fn serde_as_string() {
        let p = Price::parse("21.53").unwrap();
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"21.53\"");
        let back: Price = serde_json::from_str("\"21.53\"").unwrap();
        assert_eq!(back, p);
        assert!(serde_json::from_str::<Price>("21.53").is_err());
    }

    proptest! {
        /// Display output always parses back to the same mantissa.
        #[test]
        fn display_parses_back(m in any::<i64>().prop_filter("i64::MIN has no positive twin", |m| *m != i64::MIN)) {
            let p = Price::from_mantissa(m);
            prop_assert_eq!(Price::parse(&p.to_string()).unwrap(), p);
        }

        /// Ordering of prices matches ordering of mantissas.
        #[test]
        fn order_matches_mantissa(a in any::<i64>(), b in any::<i64>()) {
            prop_assert_eq!(Price::from_mantissa(a).cmp(&Price::from_mantissa(b)), a.cmp(&b));
        }
    }
}
