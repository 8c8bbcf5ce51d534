//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts safely.
//!
//! ## Why Integer Paise?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    1000 * 0.06 * 2 + 1000 = 1120.0000000000002  ❌                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise (1 rupee = 100 paise)                      │
//! │    100000 paise × 1200 bps / 10000 = 12000 paise of GST                 │
//! │    Exact, every time                                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rch_core::money::Money;
//!
//! let room = Money::from_paise(80000); // ₹800.00
//! let extra = Money::from_rupees(200);  // ₹200.00
//! assert_eq!((room + extra).fixed2(), "1000.00");
//!
//! // Form fields arrive as text and are parsed leniently
//! assert_eq!(Money::parse_lenient("1000").paise(), 100000);
//! assert_eq!(Money::parse_lenient("abc").paise(), 0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

use crate::types::TaxRate;

/// Currency symbol used by every rendering of an amount.
pub const RUPEE_SYMBOL: &str = "₹";

// =============================================================================
// Money Type
// =============================================================================

/// A rupee amount in paise (the smallest currency unit).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  Form "roomCharges" text ──► parse_lenient ──► GstBreakdown            │
/// │                                                    │                    │
/// │                                    BillingRecord.tax / .total           │
/// │                                                    │                    │
/// │           DashboardSummary ◄───────────────────────┤                    │
/// │           InvoiceDocument  ◄───────────────────────┘                    │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    ///
    /// ```rust
    /// use rch_core::money::Money;
    ///
    /// let charge = Money::from_paise(112000); // ₹1120.00
    /// assert_eq!(charge.rupees(), 1120);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion (truncated toward zero).
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the amount, or zero when the amount is negative.
    #[inline]
    pub const fn clamp_non_negative(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            Money(self.0)
        }
    }

    /// Calculates a tax share rounded to the nearest paisa (half up).
    ///
    /// ## Implementation
    /// Integer math: `(amount × bps + 5000) / 10000`.
    /// Callers pass non-negative amounts; the GST calculator clamps first.
    ///
    /// ```rust
    /// use rch_core::money::Money;
    /// use rch_core::types::TaxRate;
    ///
    /// let base = Money::from_rupees(1000);
    /// assert_eq!(base.calculate_tax(TaxRate::from_bps(600)).paise(), 6000);
    ///
    /// // ₹0.25 at 6% = 1.5 paise → 2 paise
    /// assert_eq!(Money::from_paise(25).calculate_tax(TaxRate::from_bps(600)).paise(), 2);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 keeps large ledgers from overflowing the intermediate product
        let tax_paise = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_paise(tax_paise as i64)
    }

    /// Parses a form field the way a browser `parseFloat` would.
    ///
    /// ## Rules
    /// - Leading whitespace is skipped
    /// - The longest numeric prefix is used (`"12abc"` → ₹12.00)
    /// - No digits at all (`""`, `"abc"`, `"."`) → zero
    /// - Digits beyond the second decimal round half up on the third
    /// - Sign is kept; clamping negatives is the caller's decision
    ///
    /// ```rust
    /// use rch_core::money::Money;
    ///
    /// assert_eq!(Money::parse_lenient(" 999.995").paise(), 100000);
    /// assert_eq!(Money::parse_lenient("12abc").paise(), 1200);
    /// assert_eq!(Money::parse_lenient("-5").paise(), -500);
    /// assert_eq!(Money::parse_lenient("").paise(), 0);
    /// ```
    pub fn parse_lenient(text: &str) -> Money {
        let bytes = text.trim_start().as_bytes();
        let mut i = 0;

        let mut negative = false;
        if let Some(&sign) = bytes.first() {
            if sign == b'+' || sign == b'-' {
                negative = sign == b'-';
                i += 1;
            }
        }

        let mut saw_digit = false;
        let mut whole: i64 = 0;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            whole = whole
                .saturating_mul(10)
                .saturating_add((bytes[i] - b'0') as i64);
            saw_digit = true;
            i += 1;
        }

        let mut fraction: i64 = 0;
        let mut round_up = false;
        if i < bytes.len() && bytes[i] == b'.' {
            i += 1;
            let mut position = 0;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                let digit = (bytes[i] - b'0') as i64;
                match position {
                    0 => fraction += digit * 10,
                    1 => fraction += digit,
                    2 => round_up = digit >= 5,
                    _ => {}
                }
                saw_digit = true;
                position += 1;
                i += 1;
            }
        }

        if !saw_digit {
            return Money::zero();
        }

        let paise = whole
            .saturating_mul(100)
            .saturating_add(fraction)
            .saturating_add(round_up as i64);

        Money(if negative { -paise } else { paise })
    }

    /// Formats the amount with exactly two decimals and no symbol.
    ///
    /// This is the form used in the billing form's tax/total fields
    /// (`"120.00"`) and in stored/exported figures.
    pub fn fixed2(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount as `₹1120.00` (no digit grouping).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}{}.{:02}",
            sign,
            RUPEE_SYMBOL,
            self.rupees().abs(),
            self.paise_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// Arithmetic saturates: form text can parse to i64::MAX paise.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Summing an iterator of amounts (dashboard totals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
