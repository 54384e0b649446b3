//! # Value Primitives
//!
//! [`Amount`] holds a non-negative value in integer minor units with 18
//! decimal places, the ledger-native unit. Parsing accepts a decimal
//! string (`"0.1"`, `"5"`, `"1.000000000000000001"`) and rejects negative,
//! non-numeric, and overflowing input before any value reaches the
//! encoding layer.
//!
//! [`TokenId`] and [`OrderDuration`] are validated identifier/interval
//! newtypes used by trade orders.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Number of decimal places in the ledger-native unit.
pub const AMOUNT_DECIMALS: u32 = 18;

/// Scale factor between whole units and minor units (`10^18`).
pub const MINOR_UNITS_PER_UNIT: u128 = 1_000_000_000_000_000_000;

/// A non-negative value in ledger-native minor units (18 decimals).
///
/// Construction goes through [`Amount::parse`] or
/// [`Amount::from_minor_units`]; negative values are unrepresentable.
/// Positivity (amount > 0) is an operation-level rule checked by
/// [`Operation::validate`](crate::Operation::validate), not a type
/// invariant; a zero balance read is a legitimate value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(u128);

impl Amount {
    /// The zero amount.
    pub const ZERO: Amount = Amount(0);

    /// Parse a decimal string into minor units.
    ///
    /// Accepts an optional fractional part of at most 18 digits. Rejects
    /// empty input, signs, exponents, multiple decimal points, non-digit
    /// characters, and integer parts that overflow `u128` at scale.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAmount`] with the offending input
    /// and the reason it was rejected.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        let reject = |reason: &str| ValidationError::InvalidAmount {
            value: input.to_string(),
            reason: reason.to_string(),
        };

        if s.is_empty() {
            return Err(reject("empty input"));
        }
        if s.starts_with('-') {
            return Err(reject("negative amounts are not permitted"));
        }
        if s.starts_with('+') {
            return Err(reject("explicit sign is not permitted"));
        }

        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(reject("no digits"));
        }
        if !int_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(reject("integer part contains non-digit characters"));
        }
        if !frac_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(reject("fractional part contains non-digit characters"));
        }
        if frac_part.len() > AMOUNT_DECIMALS as usize {
            return Err(reject("more than 18 fractional digits"));
        }

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| reject("integer part overflows"))?
        };

        let mut frac: u128 = 0;
        if !frac_part.is_empty() {
            frac = frac_part
                .parse()
                .map_err(|_| reject("fractional part overflows"))?;
            frac *= 10u128.pow(AMOUNT_DECIMALS - frac_part.len() as u32);
        }

        let minor = whole
            .checked_mul(MINOR_UNITS_PER_UNIT)
            .and_then(|m| m.checked_add(frac))
            .ok_or_else(|| reject("value overflows the ledger-native range"))?;

        Ok(Amount(minor))
    }

    /// Construct directly from minor units.
    pub fn from_minor_units(minor: u128) -> Self {
        Amount(minor)
    }

    /// The raw minor-unit value.
    pub fn minor_units(&self) -> u128 {
        self.0
    }

    /// Whether this amount is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Render as the shortest decimal string (no trailing fractional zeros).
    pub fn format_units(&self) -> String {
        let whole = self.0 / MINOR_UNITS_PER_UNIT;
        let frac = self.0 % MINOR_UNITS_PER_UNIT;
        if frac == 0 {
            return whole.to_string();
        }
        let mut frac_str = format!("{frac:018}");
        while frac_str.ends_with('0') {
            frac_str.pop();
        }
        format!("{whole}.{frac_str}")
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format_units())
    }
}

/// A ledger token identifier. Strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(u64);

impl TokenId {
    /// Construct a token id, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTokenId`] for zero.
    pub fn new(raw: u64) -> Result<Self, ValidationError> {
        if raw == 0 {
            return Err(ValidationError::InvalidTokenId(raw));
        }
        Ok(TokenId(raw))
    }

    /// The raw identifier value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A trade-order lifetime in seconds. Strictly positive; the upper bound is
/// supplied by configuration at validation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderDuration(u64);

impl OrderDuration {
    /// Construct a duration, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDuration`] for zero.
    pub fn from_secs(secs: u64) -> Result<Self, ValidationError> {
        if secs == 0 {
            return Err(ValidationError::InvalidDuration {
                secs,
                reason: "duration must be positive".to_string(),
            });
        }
        Ok(OrderDuration(secs))
    }

    /// The duration in seconds.
    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Check this duration against a configured maximum.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDuration`] if the duration exceeds
    /// `max_secs`.
    pub fn check_max(&self, max_secs: u64) -> Result<(), ValidationError> {
        if self.0 > max_secs {
            return Err(ValidationError::InvalidDuration {
                secs: self.0,
                reason: format!("exceeds configured maximum of {max_secs}s"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_whole_units() {
        let a = Amount::parse("5").unwrap();
        assert_eq!(a.minor_units(), 5 * MINOR_UNITS_PER_UNIT);
        assert_eq!(a.format_units(), "5");
    }

    #[test]
    fn parse_fractional() {
        let a = Amount::parse("0.1").unwrap();
        assert_eq!(a.minor_units(), MINOR_UNITS_PER_UNIT / 10);
        assert_eq!(a.format_units(), "0.1");
    }

    #[test]
    fn parse_full_precision() {
        let a = Amount::parse("1.000000000000000001").unwrap();
        assert_eq!(a.minor_units(), MINOR_UNITS_PER_UNIT + 1);
        assert_eq!(a.format_units(), "1.000000000000000001");
    }

    #[test]
    fn parse_rejects_negative() {
        let err = Amount::parse("-1").unwrap_err();
        assert!(format!("{err}").contains("negative"));
    }

    #[test]
    fn parse_rejects_non_numeric() {
        assert!(Amount::parse("abc").is_err());
        assert!(Amount::parse("1.2.3").is_err());
        assert!(Amount::parse("1e9").is_err());
        assert!(Amount::parse("").is_err());
        assert!(Amount::parse(".").is_err());
    }

    #[test]
    fn parse_rejects_excess_precision() {
        assert!(Amount::parse("0.0000000000000000001").is_err());
    }

    #[test]
    fn parse_zero_is_zero() {
        assert!(Amount::parse("0").unwrap().is_zero());
        assert!(Amount::parse("0.0").unwrap().is_zero());
    }

    #[test]
    fn parse_accepts_leading_dot_fraction() {
        let a = Amount::parse(".5").unwrap();
        assert_eq!(a.format_units(), "0.5");
    }

    #[test]
    fn token_id_rejects_zero() {
        assert!(TokenId::new(0).is_err());
        assert_eq!(TokenId::new(7).unwrap().value(), 7);
    }

    #[test]
    fn duration_bounds() {
        assert!(OrderDuration::from_secs(0).is_err());
        let d = OrderDuration::from_secs(3600).unwrap();
        assert!(d.check_max(86400).is_ok());
        assert!(d.check_max(60).is_err());
    }

    proptest! {
        #[test]
        fn format_parse_roundtrip(minor in any::<u64>()) {
            let a = Amount::from_minor_units(minor as u128);
            let parsed = Amount::parse(&a.format_units()).unwrap();
            prop_assert_eq!(a, parsed);
        }

        #[test]
        fn parse_never_panics(s in "\\PC{0,24}") {
            let _ = Amount::parse(&s);
        }
    }
}
