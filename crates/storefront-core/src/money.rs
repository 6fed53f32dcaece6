//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Integer Inside, Decimal on the Wire
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Where Money Crosses Boundaries                      │
//! │                                                                         │
//! │  Backend JSON            Client                     View / Form         │
//! │  ────────────            ──────                     ───────────         │
//! │  "price": 19.99  ──────► Money(1999) ─────────────► "$19.99"            │
//! │                          (rounded once,                                 │
//! │                           on the way in)                                │
//! │                                                                         │
//! │  multipart "price" ◄──── Money(1999) ◄──────────── "19.99" (FromStr,    │
//! │  = "19.99"                                          exact, no float)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The backend speaks major-unit JSON numbers. They are converted to cents
//! exactly once during deserialization; everything after that is integer
//! math.
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price: Money = "10.99".parse().unwrap();
//! assert_eq!(price.cents(), 1099);
//!
//! let total = price.checked_multiply_quantity(3);
//! assert_eq!(total.map(|t| t.to_string()).as_deref(), Some("$32.97"));
//! ```

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: the server may report negative adjustments
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Custom serde**: major-unit JSON numbers on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a major-unit amount received from the backend.
    ///
    /// Rounds half away from zero to the nearest cent, so `19.99` (which
    /// is `1998.9999...` cents in binary floating point) becomes 1999.
    pub fn from_major_f64(amount: f64) -> Result<Self, CoreError> {
        if !amount.is_finite() {
            return Err(CoreError::InvalidAmount(amount.to_string()));
        }

        let cents = (amount * 100.0).round();
        if cents > i64::MAX as f64 || cents < i64::MIN as f64 {
            return Err(CoreError::InvalidAmount(amount.to_string()));
        }

        Ok(Money(cents as i64))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, or `None` if the product does not
    /// fit in i64 cents. Both factors come from the server.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Formats the amount as a plain decimal, as form fields expect it.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1999).to_major_string(), "19.99");
    /// assert_eq!(Money::from_cents(-5).to_major_string(), "-0.05");
    /// ```
    pub fn to_major_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }

    fn to_major_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a decimal string such as `"19.99"`, `"5"` or `"0.5"` exactly.
///
/// More than two fractional digits is an error rather than a silent
/// rounding; form input is the only source of these strings.
impl FromStr for Money {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidAmount(s.to_string());
        let trimmed = s.trim();

        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (whole, frac) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if frac.len() > 2 || !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .ok_or_else(invalid)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Serde (major-unit JSON numbers)
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_major_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::from_major_f64(amount).map_err(de::Error::custom)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_from_major_f64_rounds_binary_noise() {
        assert_eq!(Money::from_major_f64(19.99).unwrap().cents(), 1999);
        assert_eq!(Money::from_major_f64(0.1 + 0.2).unwrap().cents(), 30);
        assert_eq!(Money::from_major_f64(-2.5).unwrap().cents(), -250);
        assert!(Money::from_major_f64(f64::NAN).is_err());
        assert!(Money::from_major_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn test_parse_decimal_strings() {
        assert_eq!("19.99".parse::<Money>().unwrap().cents(), 1999);
        assert_eq!("5".parse::<Money>().unwrap().cents(), 500);
        assert_eq!("0.5".parse::<Money>().unwrap().cents(), 50);
        assert_eq!(".75".parse::<Money>().unwrap().cents(), 75);
        assert_eq!("-1.05".parse::<Money>().unwrap().cents(), -105);

        assert!("".parse::<Money>().is_err());
        assert!("1.999".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("1.2.3".parse::<Money>().is_err());
    }

    #[test]
    fn test_json_roundtrip_uses_major_units() {
        let price: Money = serde_json::from_str("12.5").unwrap();
        assert_eq!(price.cents(), 1250);

        let integer: Money = serde_json::from_str("3").unwrap();
        assert_eq!(integer.cents(), 300);

        assert_eq!(serde_json::to_string(&Money::from_cents(1250)).unwrap(), "12.5");
    }

    #[test]
    fn test_checked_multiply_quantity() {
        let price = Money::from_cents(500);
        assert_eq!(price.checked_multiply_quantity(4), Some(Money::from_cents(2000)));
        assert_eq!(price.checked_multiply_quantity(0), Some(Money::zero()));
    }

    #[test]
    fn test_checked_multiply_quantity_overflow() {
        let price = Money::from_major_f64(1.0e15).unwrap();
        assert_eq!(price.checked_multiply_quantity(100_000), None);
        assert_eq!(Money::from_cents(i64::MAX).checked_multiply_quantity(2), None);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert_eq!(zero.cents(), 0);
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_cents(100).is_positive());
        assert!(Money::from_cents(-100).is_negative());
    }
}
