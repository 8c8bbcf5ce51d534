//! # Billing Form State
//!
//! The billing-entry form as a plain value. Every edit produces a new
//! form with tax and total recomputed, so the read-only fields can never
//! drift from the charges shown next to them.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  mount ──► BillingFormState { form: default, sequence: count snapshot } │
//! │                    │                                                    │
//! │   with_field(roomCharges, "1000") ──► tax 120.00, total 1120.00        │
//! │                    │                                                    │
//! │               submit ok ──► form reset, sequence advanced              │
//! │               submit err ─► state unchanged                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use ts_rs::TS;

use rch_core::validation::{
    parse_date, validate_charge, validate_guest_name, validate_mobile_number, validate_room_no,
    validate_stay_dates, ValidationResult,
};
use rch_core::{
    gst, BillSequence, GstBreakdown, Money, NewBillingRecord, PaymentMode, PaymentStatus,
    RoomType, ValidationError,
};

// =============================================================================
// Fields
// =============================================================================

/// An editable form field, addressed by its input name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    GuestName,
    MobileNumber,
    RoomNo,
    CheckInDate,
    CheckOutDate,
    RoomType,
    RoomCharges,
    ExtraCharges,
    PaymentStatus,
    PaymentMode,
}

impl FormField {
    pub const ALL: [FormField; 10] = [
        FormField::GuestName,
        FormField::MobileNumber,
        FormField::RoomNo,
        FormField::CheckInDate,
        FormField::CheckOutDate,
        FormField::RoomType,
        FormField::RoomCharges,
        FormField::ExtraCharges,
        FormField::PaymentStatus,
        FormField::PaymentMode,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FormField::GuestName => "guestName",
            FormField::MobileNumber => "mobileNumber",
            FormField::RoomNo => "roomNo",
            FormField::CheckInDate => "checkInDate",
            FormField::CheckOutDate => "checkOutDate",
            FormField::RoomType => "roomType",
            FormField::RoomCharges => "roomCharges",
            FormField::ExtraCharges => "extraCharges",
            FormField::PaymentStatus => "paymentStatus",
            FormField::PaymentMode => "paymentMode",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| ValidationError::UnknownField(s.to_string()))
    }
}

// =============================================================================
// Form
// =============================================================================

/// The billing form as the user sees it.
///
/// Text inputs keep exactly what was typed; `tax` and `total` are derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BillingForm {
    pub guest_name: String,
    pub mobile_number: String,
    pub room_no: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub room_type: RoomType,
    pub room_charges: String,
    pub extra_charges: String,
    pub tax: Money,
    pub total: Money,
    pub payment_status: PaymentStatus,
    pub payment_mode: PaymentMode,
}

impl Default for BillingForm {
    fn default() -> Self {
        BillingForm {
            guest_name: String::new(),
            mobile_number: String::new(),
            room_no: String::new(),
            check_in_date: String::new(),
            check_out_date: String::new(),
            room_type: RoomType::default(),
            room_charges: String::new(),
            extra_charges: String::new(),
            tax: Money::zero(),
            total: Money::zero(),
            payment_status: PaymentStatus::default(),
            payment_mode: PaymentMode::default(),
        }
    }
}

impl BillingForm {
    /// Live breakdown over whatever is typed so far (lenient parse).
    pub fn gst(&self) -> GstBreakdown {
        gst::compute_for_stay(
            Money::parse_lenient(&self.room_charges),
            Money::parse_lenient(&self.extra_charges),
        )
    }

    /// Returns a copy with one field replaced and tax/total recomputed.
    ///
    /// Select fields reject values outside their options; text fields
    /// accept anything and are checked on submit.
    pub fn with_field(&self, field: FormField, value: &str) -> ValidationResult<Self> {
        let mut next = self.clone();

        match field {
            FormField::GuestName => next.guest_name = value.to_string(),
            FormField::MobileNumber => next.mobile_number = value.to_string(),
            FormField::RoomNo => next.room_no = value.to_string(),
            FormField::CheckInDate => next.check_in_date = value.to_string(),
            FormField::CheckOutDate => next.check_out_date = value.to_string(),
            FormField::RoomType => next.room_type = value.parse()?,
            FormField::RoomCharges => next.room_charges = value.to_string(),
            FormField::ExtraCharges => next.extra_charges = value.to_string(),
            FormField::PaymentStatus => next.payment_status = value.parse()?,
            FormField::PaymentMode => next.payment_mode = value.parse()?,
        }

        let breakdown = next.gst();
        next.tax = breakdown.tax;
        next.total = breakdown.total;
        Ok(next)
    }

    /// [`with_field`](Self::with_field) addressed by input name.
    pub fn with_named_field(&self, name: &str, value: &str) -> ValidationResult<Self> {
        self.with_field(name.parse()?, value)
    }

    /// Validates every field and builds the record to insert.
    ///
    /// Tax and total are recomputed from the validated charges rather
    /// than copied from the live display.
    pub fn to_new_record(&self, bill_id: String) -> ValidationResult<NewBillingRecord> {
        let guest_name = validate_guest_name(&self.guest_name)?;
        let mobile_number = validate_mobile_number(&self.mobile_number)?;
        let room_no = validate_room_no(&self.room_no)?;

        let check_in_date = parse_date("checkInDate", &self.check_in_date)?;
        let check_out_date = parse_date("checkOutDate", &self.check_out_date)?;
        validate_stay_dates(check_in_date, check_out_date)?;

        let room_charges = validate_charge("roomCharges", &self.room_charges, true)?;
        let extra_charges = validate_charge("extraCharges", &self.extra_charges, false)?;
        let breakdown = gst::compute_for_stay(room_charges, extra_charges);

        Ok(NewBillingRecord {
            bill_id,
            guest_name,
            mobile_number,
            room_no,
            check_in_date,
            check_out_date,
            room_type: self.room_type,
            room_charges,
            extra_charges,
            tax: breakdown.tax,
            total: breakdown.total,
            payment_status: self.payment_status,
            payment_mode: self.payment_mode,
        })
    }
}

// =============================================================================
// Form + Sequence
// =============================================================================

/// The mounted form together with its bill-count snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingFormState {
    pub form: BillingForm,
    pub sequence: BillSequence,
}

impl BillingFormState {
    /// A fresh form over a count taken at mount time.
    pub fn mounted(existing_bills: u64) -> Self {
        BillingFormState {
            form: BillingForm::default(),
            sequence: BillSequence::from_count(existing_bills),
        }
    }

    pub fn with_form(&self, form: BillingForm) -> Self {
        BillingFormState {
            form,
            sequence: self.sequence,
        }
    }

    /// The id the next submit on `today` will carry.
    pub fn next_bill_id(&self, today: NaiveDate) -> String {
        self.sequence.next_id(today)
    }

    /// State after a successful submit: empty form, counter advanced.
    pub fn submitted(&self) -> Self {
        let mut sequence = self.sequence;
        sequence.advance();
        BillingFormState {
            form: BillingForm::default(),
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> BillingForm {
        let mut form = BillingForm::default();
        for (name, value) in [
            ("guestName", "Asha Raman"),
            ("mobileNumber", "9876543210"),
            ("roomNo", "204"),
            ("checkInDate", "2025-03-05"),
            ("checkOutDate", "2025-03-07"),
            ("roomType", "Triple"),
            ("roomCharges", "800"),
            ("extraCharges", "200"),
            ("paymentStatus", "Pending"),
            ("paymentMode", "UPI"),
        ] {
            form = form.with_named_field(name, value).unwrap();
        }
        form
    }

    #[test]
    fn test_defaults() {
        let form = BillingForm::default();
        assert_eq!(form.room_type, RoomType::Double);
        assert_eq!(form.payment_status, PaymentStatus::Paid);
        assert_eq!(form.payment_mode, PaymentMode::Cash);
        assert!(form.total.is_zero());
    }

    #[test]
    fn test_oversized_room_charge_is_shown_but_not_submitted() {
        let form = filled()
            .with_field(FormField::RoomCharges, "99999999999999999999")
            .unwrap();
        assert!(!form.total.is_negative());

        let err = form.to_new_record("RCH05Mar01".to_string()).unwrap_err();
        assert!(matches!(err, ValidationError::TooLarge { .. }));
    }

    #[test]
    fn test_room_charges_update_tax_and_total() {
        let form = BillingForm::default()
            .with_field(FormField::RoomCharges, "1000")
            .unwrap();
        assert_eq!(form.tax.fixed2(), "120.00");
        assert_eq!(form.total.fixed2(), "1120.00");
    }

    #[test]
    fn test_extra_charges_are_taxed_too() {
        let form = filled();
        assert_eq!(form.tax.fixed2(), "120.00");
        assert_eq!(form.total.fixed2(), "1120.00");
    }

    #[test]
    fn test_non_numeric_charges_display_zero() {
        let form = BillingForm::default()
            .with_field(FormField::RoomCharges, "abc")
            .unwrap();
        assert!(form.total.is_zero());

        let form = form.with_field(FormField::RoomCharges, "-400").unwrap();
        assert!(form.total.is_zero());
    }

    #[test]
    fn test_edit_leaves_original_untouched() {
        let before = BillingForm::default();
        let after = before.with_field(FormField::GuestName, "Asha").unwrap();
        assert_eq!(before.guest_name, "");
        assert_eq!(after.guest_name, "Asha");
    }

    #[test]
    fn test_unknown_field_and_bad_option() {
        let form = BillingForm::default();
        assert!(matches!(
            form.with_named_field("discount", "10"),
            Err(ValidationError::UnknownField(_))
        ));
        assert!(matches!(
            form.with_field(FormField::RoomType, "Suite"),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_to_new_record() {
        let record = filled().to_new_record("RCH05Mar01".to_string()).unwrap();
        assert_eq!(record.bill_id, "RCH05Mar01");
        assert_eq!(record.guest_name, "Asha Raman");
        assert_eq!(record.room_type, RoomType::Triple);
        assert_eq!(record.payment_mode, PaymentMode::Upi);
        assert_eq!(record.payment_status, PaymentStatus::Pending);
        assert_eq!(record.tax.fixed2(), "120.00");
        assert_eq!(record.total.fixed2(), "1120.00");
    }

    #[test]
    fn test_submit_validation_blocks() {
        let form = filled().with_field(FormField::MobileNumber, "98765").unwrap();
        assert!(form.to_new_record("RCH05Mar01".into()).is_err());

        let form = filled().with_field(FormField::CheckOutDate, "2025-03-01").unwrap();
        assert!(matches!(
            form.to_new_record("RCH05Mar01".into()),
            Err(ValidationError::DateOrder { .. })
        ));

        let form = filled().with_field(FormField::ExtraCharges, "-5").unwrap();
        assert!(matches!(
            form.to_new_record("RCH05Mar01".into()),
            Err(ValidationError::Negative { .. })
        ));

        let form = filled().with_field(FormField::GuestName, "  ").unwrap();
        assert!(matches!(
            form.to_new_record("RCH05Mar01".into()),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_extra_charges_optional() {
        let form = filled().with_field(FormField::ExtraCharges, "").unwrap();
        let record = form.to_new_record("RCH05Mar01".into()).unwrap();
        assert!(record.extra_charges.is_zero());
        assert_eq!(record.total.fixed2(), "896.00");
    }

    #[test]
    fn test_submitted_resets_and_advances() {
        let march_5 = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        let state = BillingFormState::mounted(4).with_form(filled());
        assert_eq!(state.next_bill_id(march_5), "RCH05Mar05");

        let next = state.submitted();
        assert_eq!(next.form, BillingForm::default());
        assert_eq!(next.next_bill_id(march_5), "RCH05Mar06");
    }
}
