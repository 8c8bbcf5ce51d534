//! # GST Calculator
//!
//! Splits the taxable amount of a stay into CGST and SGST.
//!
//! ## Formula
//! ```text
//! base  = room_charges + extra_charges        (negatives coerced to 0)
//! tax   = round(base × 12%)                   (to the paisa, half up)
//! cgst  = round(base × 6%)
//! sgst  = tax − cgst                           (cgst and sgst differ by ≤ 1 paisa)
//! total = base + tax
//! ```
//!
//! `tax` and `total` are rounded once, so `tax == 12% of base` and
//! `total == 112% of base` hold exactly to the paisa.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::TaxRate;

/// Central GST share: 6%.
pub const CGST_RATE: TaxRate = TaxRate::from_bps(600);

/// State GST share: 6%.
pub const SGST_RATE: TaxRate = TaxRate::from_bps(600);

/// Combined GST on hotel stays: 12%.
pub const GST_RATE: TaxRate = TaxRate::from_bps(CGST_RATE.bps() + SGST_RATE.bps());

/// The tax lines of one bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GstBreakdown {
    /// Taxable amount after coercion.
    pub base: Money,
    pub cgst: Money,
    pub sgst: Money,
    /// `cgst + sgst`
    pub tax: Money,
    /// `base + tax`
    pub total: Money,
}

/// Computes the GST breakdown for a taxable amount.
///
/// Negative amounts are coerced to zero rather than rejected.
///
/// ```rust
/// use rch_core::gst::compute;
/// use rch_core::money::Money;
///
/// let gst = compute(Money::from_rupees(1000));
/// assert_eq!(gst.tax.fixed2(), "120.00");
/// assert_eq!(gst.total.fixed2(), "1120.00");
/// ```
pub fn compute(base: Money) -> GstBreakdown {
    let base = base.clamp_non_negative();
    let tax = base.calculate_tax(GST_RATE);
    let cgst = base.calculate_tax(CGST_RATE);
    let sgst = tax - cgst;

    GstBreakdown {
        base,
        cgst,
        sgst,
        tax,
        total: base + tax,
    }
}

/// Computes GST straight from the billing form's room-charges text.
///
/// ```rust
/// use rch_core::gst::compute_from_text;
///
/// assert_eq!(compute_from_text("1000").total.fixed2(), "1120.00");
/// assert_eq!(compute_from_text("").total.fixed2(), "0.00");
/// assert_eq!(compute_from_text("-50").total.fixed2(), "0.00");
/// ```
pub fn compute_from_text(room_charges: &str) -> GstBreakdown {
    compute(Money::parse_lenient(room_charges))
}

/// Computes GST over room and extra charges together.
///
/// Each component is coerced to zero on its own before summing, so a
/// negative extra charge never discounts the room.
pub fn compute_for_stay(room_charges: Money, extra_charges: Money) -> GstBreakdown {
    compute(room_charges.clamp_non_negative() + extra_charges.clamp_non_negative())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousand_rupees() {
        let gst = compute(Money::from_rupees(1000));
        assert_eq!(gst.cgst.fixed2(), "60.00");
        assert_eq!(gst.sgst.fixed2(), "60.00");
        assert_eq!(gst.tax.fixed2(), "120.00");
        assert_eq!(gst.total.fixed2(), "1120.00");
    }

    #[test]
    fn test_twenty_digit_room_charge_does_not_overflow() {
        let gst = compute_from_text("99999999999999999999");
        assert_eq!(gst.base.paise(), i64::MAX);
        assert_eq!(gst.total.paise(), i64::MAX);
        assert!(!gst.total.is_negative());
        assert_eq!(gst.cgst + gst.sgst, gst.tax);

        let stay = compute_for_stay(gst.base, gst.base);
        assert_eq!(stay.total.paise(), i64::MAX);
    }

    #[test]
    fn test_tax_is_twelve_percent_for_many_amounts() {
        for paise in [0_i64, 1, 7, 25, 99, 100, 12345, 99999, 100000, 7_654_321] {
            let gst = compute(Money::from_paise(paise));
            // round(paise * 0.12) computed independently
            let expected_tax = (paise * 12 + 50) / 100;
            assert_eq!(gst.tax.paise(), expected_tax, "tax for {} paise", paise);
            assert_eq!(gst.total.paise(), paise + expected_tax, "total for {} paise", paise);
            assert_eq!(gst.cgst + gst.sgst, gst.tax);
            assert!((gst.cgst.paise() - gst.sgst.paise()).abs() <= 1);
        }
    }

    #[test]
    fn test_non_numeric_and_negative_coerce_to_zero() {
        for text in ["", "abc", "-1000", "   "] {
            let gst = compute_from_text(text);
            assert!(gst.base.is_zero(), "base for {:?}", text);
            assert!(gst.total.is_zero(), "total for {:?}", text);
        }
    }

    #[test]
    fn test_stay_with_extra_charges() {
        let gst = compute_for_stay(Money::from_rupees(800), Money::from_rupees(200));
        assert_eq!(gst.cgst.fixed2(), "60.00");
        assert_eq!(gst.sgst.fixed2(), "60.00");
        assert_eq!(gst.total.fixed2(), "1120.00");
    }

    #[test]
    fn test_negative_extra_does_not_discount_room() {
        let gst = compute_for_stay(Money::from_rupees(1000), Money::from_rupees(-500));
        assert_eq!(gst.base, Money::from_rupees(1000));
    }

    #[test]
    fn test_rates() {
        assert_eq!(GST_RATE.bps(), 1200);
    }
}
