//! # Hbar — Exact Currency Values
//!
//! A typesafe wrapper for amounts of hbar, the network's native currency.
//! Internally every value is an `i64` count of tinybar, the smallest
//! indivisible unit (100,000,000 tinybar = 1 hbar). No floating point
//! anywhere near monetary values.
//!
//! Conversions from larger denominations go through [`rust_decimal`] so
//! that a fractional-tinybar result is a loud error instead of a silent
//! truncation. A one-tinybar rounding mistake in a signed transaction is
//! irreversible once the network accepts it, so every lossy path here
//! fails at construction time.

use std::cmp::Ordering;
use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// HbarUnit
// ---------------------------------------------------------------------------

/// Denominations of hbar.
///
/// Every unit is a power-of-ten multiple of tinybar, which means converting
/// a tinybar count *into* any unit divides exactly in decimal arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HbarUnit {
    /// The smallest indivisible unit. All arithmetic happens in tinybar.
    Tinybar,
    /// 100 tinybar.
    Microbar,
    /// 100,000 tinybar.
    Millibar,
    /// 100,000,000 tinybar. The unit users actually think in.
    Hbar,
    /// 1,000 hbar.
    Kilobar,
    /// 1,000,000 hbar.
    Megabar,
    /// 1,000,000,000 hbar.
    Gigabar,
}

impl HbarUnit {
    /// Returns the number of tinybar in one of this unit.
    pub const fn tinybar(self) -> i64 {
        match self {
            HbarUnit::Tinybar => 1,
            HbarUnit::Microbar => 100,
            HbarUnit::Millibar => 100_000,
            HbarUnit::Hbar => 100_000_000,
            HbarUnit::Kilobar => 100_000_000_000,
            HbarUnit::Megabar => 100_000_000_000_000,
            HbarUnit::Gigabar => 100_000_000_000_000_000,
        }
    }

    /// The conventional symbol for this unit, for display purposes.
    pub const fn symbol(self) -> &'static str {
        match self {
            HbarUnit::Tinybar => "tℏ",
            HbarUnit::Microbar => "μℏ",
            HbarUnit::Millibar => "mℏ",
            HbarUnit::Hbar => "ℏ",
            HbarUnit::Kilobar => "kℏ",
            HbarUnit::Megabar => "Mℏ",
            HbarUnit::Gigabar => "Gℏ",
        }
    }
}

impl fmt::Display for HbarUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors produced when an amount cannot be represented as an exact,
/// in-range tinybar count.
#[derive(Debug, Error)]
pub enum HbarRangeError {
    /// The tinybar equivalent overflows the signed 64-bit range the
    /// network requires.
    #[error("{amount} {unit} is out of range for Hbar")]
    OutOfRange {
        /// The requested amount, in the requested unit.
        amount: Decimal,
        /// The unit the amount was given in.
        unit: HbarUnit,
    },

    /// The tinybar equivalent is fractional. Tinybar is indivisible, so
    /// this is rejected rather than rounded.
    #[error("tinybar equivalent of {amount} {unit} ({tinybar}) is not an integer")]
    NotAnInteger {
        /// The requested amount, in the requested unit.
        amount: Decimal,
        /// The unit the amount was given in.
        unit: HbarUnit,
        /// The exact (fractional) tinybar product that was rejected.
        tinybar: Decimal,
    },
}

// ---------------------------------------------------------------------------
// Hbar
// ---------------------------------------------------------------------------

/// An amount of hbar. May be positive, negative, or zero.
///
/// Total ordering, equality, and hashing all follow the underlying
/// tinybar count. The wire form is the raw `i64`.
///
/// # Examples
///
/// ```
/// use hgraph_sdk::hbar::{Hbar, HbarUnit};
/// use rust_decimal::Decimal;
///
/// let one = Hbar::new(1).unwrap();
/// assert_eq!(one, Hbar::from_tinybar(100_000_000));
/// assert!(one > Hbar::ZERO);
/// assert_eq!(one.to_unit(HbarUnit::Microbar), Decimal::from(1_000_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hbar(i64);

impl Hbar {
    /// Zero hbar.
    pub const ZERO: Hbar = Hbar(0);

    /// The smallest value the network itself will ever account for:
    /// negative fifty billion hbar. Advisory range constant for callers;
    /// construction does not enforce it.
    pub const MIN: Hbar = Hbar(-50_000_000_000 * 100_000_000);

    /// The largest value the network itself will ever account for:
    /// fifty billion hbar. Advisory, like [`Hbar::MIN`].
    pub const MAX: Hbar = Hbar(50_000_000_000 * 100_000_000);

    /// Wraps a whole number of hbar.
    ///
    /// Fails if the tinybar equivalent overflows `i64`.
    pub fn new(amount: i64) -> Result<Self, HbarRangeError> {
        Self::from_unit(amount, HbarUnit::Hbar)
    }

    /// Calculates an hbar amount from a whole number of the given unit.
    pub fn from_unit(amount: i64, unit: HbarUnit) -> Result<Self, HbarRangeError> {
        amount
            .checked_mul(unit.tinybar())
            .map(Hbar)
            .ok_or(HbarRangeError::OutOfRange {
                amount: Decimal::from(amount),
                unit,
            })
    }

    /// Calculates an hbar amount from a possibly fractional amount of the
    /// given unit.
    ///
    /// The tinybar equivalent must be an exact integer and fit in `i64`.
    /// E.g. `1.23456789` hbar is valid (123,456,789 tinybar) but
    /// `0.123456789` hbar is not (12,345,678.9 tinybar).
    pub fn from_decimal(amount: Decimal, unit: HbarUnit) -> Result<Self, HbarRangeError> {
        let tinybar = amount
            .checked_mul(Decimal::from(unit.tinybar()))
            .ok_or(HbarRangeError::OutOfRange { amount, unit })?;

        if !tinybar.fract().is_zero() {
            return Err(HbarRangeError::NotAnInteger {
                amount,
                unit,
                tinybar,
            });
        }

        tinybar
            .to_i64()
            .map(Hbar)
            .ok_or(HbarRangeError::OutOfRange { amount, unit })
    }

    /// Wraps a raw tinybar count. Always succeeds: every `i64` is a
    /// representable amount.
    pub const fn from_tinybar(amount: i64) -> Self {
        Hbar(amount)
    }

    /// Reinterprets this value in the requested unit.
    ///
    /// Exact in every case: unit factors are powers of ten, so the
    /// division terminates without rounding.
    pub fn to_unit(self, unit: HbarUnit) -> Decimal {
        if unit == HbarUnit::Tinybar {
            return Decimal::from(self.0);
        }
        Decimal::from(self.0) / Decimal::from(unit.tinybar())
    }

    /// The raw tinybar count.
    pub const fn as_tinybar(self) -> i64 {
        self.0
    }

    /// The arithmetic negation of this value.
    ///
    /// Saturates at `i64::MAX` for the single unrepresentable input
    /// (`i64::MIN`), which lies far outside the network's accounting
    /// range anyway.
    pub const fn negated(self) -> Self {
        Hbar(self.0.saturating_neg())
    }

    /// Returns `true` if this is exactly zero.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl PartialOrd for Hbar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Hbar {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl fmt::Display for Hbar {
    /// Debug-friendly printout in tinybar. Not localized, not pretty;
    /// the format is unspecified and not meant for end users.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, HbarUnit::Tinybar.symbol())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn tinybar_roundtrip() {
        for t in [0i64, 1, -1, 42, i64::MIN, i64::MAX] {
            assert_eq!(Hbar::from_tinybar(t).as_tinybar(), t);
        }
    }

    #[test]
    fn one_hbar_is_one_hundred_million_tinybar() {
        let one = Hbar::new(1).unwrap();
        assert_eq!(one, Hbar::from_tinybar(100_000_000));
        assert!(one > Hbar::ZERO);
    }

    #[test]
    fn from_unit_multiplies_by_factor() {
        assert_eq!(
            Hbar::from_unit(3, HbarUnit::Microbar).unwrap().as_tinybar(),
            300
        );
        assert_eq!(
            Hbar::from_unit(-2, HbarUnit::Kilobar).unwrap().as_tinybar(),
            -200_000_000_000
        );
    }

    #[test]
    fn from_unit_overflow_fails() {
        let err = Hbar::from_unit(i64::MAX, HbarUnit::Gigabar).unwrap_err();
        assert!(matches!(err, HbarRangeError::OutOfRange { .. }));
    }

    #[test]
    fn from_decimal_exact_amounts_roundtrip() {
        let cases = [
            (dec!(1.23456789), HbarUnit::Hbar),
            (dec!(1.234), HbarUnit::Millibar),
            (dec!(-0.5), HbarUnit::Microbar),
            (dec!(50_000_000_000), HbarUnit::Hbar),
        ];
        for (amount, unit) in cases {
            let value = Hbar::from_decimal(amount, unit).unwrap();
            assert_eq!(value.to_unit(unit), amount);
        }
    }

    #[test]
    fn from_decimal_fractional_tinybar_fails() {
        // 0.123456789 hbar is 12,345,678.9 tinybar.
        let err = Hbar::from_decimal(dec!(0.123456789), HbarUnit::Hbar).unwrap_err();
        match err {
            HbarRangeError::NotAnInteger { tinybar, .. } => {
                assert_eq!(tinybar, dec!(12345678.9));
            }
            other => panic!("expected NotAnInteger, got {:?}", other),
        }
    }

    #[test]
    fn from_decimal_fractional_tinybar_unit_fails() {
        let err = Hbar::from_decimal(dec!(1.5), HbarUnit::Tinybar).unwrap_err();
        assert!(matches!(err, HbarRangeError::NotAnInteger { .. }));
    }

    #[test]
    fn from_decimal_overflow_fails() {
        let err = Hbar::from_decimal(dec!(100_000_000_000_000), HbarUnit::Gigabar).unwrap_err();
        assert!(matches!(err, HbarRangeError::OutOfRange { .. }));
    }

    #[test]
    fn to_unit_tinybar_is_exact_integer() {
        let value = Hbar::from_tinybar(12_345);
        assert_eq!(value.to_unit(HbarUnit::Tinybar), dec!(12345));
    }

    #[test]
    fn to_unit_divides_exactly() {
        let value = Hbar::from_tinybar(150_000_000);
        assert_eq!(value.to_unit(HbarUnit::Hbar), dec!(1.5));
        assert_eq!(value.to_unit(HbarUnit::Millibar), dec!(1500));
    }

    #[test]
    fn ordering_follows_tinybar() {
        let a = Hbar::from_tinybar(-5);
        let b = Hbar::ZERO;
        let c = Hbar::from_tinybar(5);
        assert!(a < b && b < c);
        assert_eq!(c.negated(), a);
    }

    #[test]
    fn advisory_bounds_are_fifty_billion_hbar() {
        assert_eq!(Hbar::MAX.as_tinybar(), 5_000_000_000_000_000_000);
        assert_eq!(Hbar::MIN.as_tinybar(), -5_000_000_000_000_000_000);
        // The bounds are advisory: values beyond them still construct.
        assert!(Hbar::from_tinybar(i64::MAX) > Hbar::MAX);
    }

    #[test]
    fn error_messages_carry_context() {
        let msg = Hbar::from_decimal(dec!(0.1), HbarUnit::Tinybar)
            .unwrap_err()
            .to_string();
        assert!(msg.contains("0.1"));
        assert!(msg.contains("not an integer"));
    }

    #[test]
    fn display_is_tinybar() {
        assert_eq!(Hbar::from_tinybar(42).to_string(), "42 tℏ");
    }

    #[test]
    fn wire_form_is_transparent_i64() {
        let value = Hbar::from_tinybar(-77);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "-77");
        let back: Hbar = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
