//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! All monetary values in the register are integers in the smallest currency
//! unit (cents). The database of floating point woes is well known: `0.1 +
//! 0.2 != 0.3`, and a register that drifts by a cent per transaction is a
//! register that fails audit. Integer cents make every subtotal, tax,
//! discount, and change amount exact.
//!
//! ## Usage
//! ```rust
//! use paypoint_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(48_000); // $480.00
//!
//! // Arithmetic operations
//! let doubled = price * 2;                      // $960.00
//! let total = price + Money::from_cents(500);   // $485.00
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PosError;
use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// - **i64 (signed)**: change and discount math may pass through negatives
/// - **Single-field tuple struct**: zero-cost abstraction over i64
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// For negative amounts, only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is -$5.50, not -$4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
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

    /// Returns the minor unit (cents) portion, always 0-99.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Computes a basis-point fraction of this amount, rounded half-up.
    ///
    /// Uses integer math in `i128` to prevent overflow on large amounts:
    /// `(cents * bps + 5000) / 10000`. 1 basis point = 0.01%, so 500 bps is
    /// 5% and 1000 bps is 10%.
    ///
    /// ## Example
    /// ```rust
    /// use paypoint_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(600_000); // $6000.00
    /// assert_eq!(subtotal.percentage(500).cents(), 30_000); // 5% = $300.00
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        let part = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_cents(part as i64)
    }

    /// Calculates tax on this amount at the given rate.
    ///
    /// ## Example
    /// ```rust
    /// use paypoint_core::money::Money;
    /// use paypoint_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(600_000);   // $6000.00
    /// let rate = TaxRate::from_bps(1000);          // 10%
    /// assert_eq!(subtotal.calculate_tax(rate).cents(), 60_000); // $600.00
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        self.percentage(rate.bps())
    }

    /// Multiplies money by a quantity (line totals).
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// This is for debugging and tests. Operator-facing output goes through the
/// shell's configurable currency formatting.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Parses an operator-typed amount such as `480`, `480.5`, `480.50`, or
/// `$480.50` into exact cents.
///
/// Floating point never enters the picture. Anything else - signs, letters,
/// more than two decimals, empty input - is an [`PosError::InvalidAmount`].
impl FromStr for Money {
    type Err = PosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let raw = trimmed.strip_prefix('$').unwrap_or(trimmed);
        let invalid = || PosError::InvalidAmount {
            reason: format!("'{trimmed}' is not a valid amount"),
        };

        let (major_str, minor_str) = match raw.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (raw, ""),
        };

        if major_str.is_empty() && minor_str.is_empty() {
            return Err(invalid());
        }
        if !major_str.chars().all(|c| c.is_ascii_digit())
            || !minor_str.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let major: i64 = if major_str.is_empty() {
            0
        } else {
            major_str.parse().map_err(|_| invalid())?
        };
        let minor: i64 = match minor_str.len() {
            0 => 0,
            1 => minor_str.parse::<i64>().map_err(|_| invalid())? * 10,
            2 => minor_str.parse::<i64>().map_err(|_| invalid())?,
            _ => return Err(invalid()),
        };

        major
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(minor))
            .map(Money::from_cents)
            .ok_or_else(invalid)
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
