//! # Invoice Document Model
//!
//! One computed charge table, three renderings.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   BillingRecord ──► InvoiceDocument::from_record                       │
//! │                        │  (cgst/sgst/total recomputed from             │
//! │                        │   room + extra; stored total ignored)         │
//! │                        │                                                │
//! │          ┌─────────────┼──────────────────────┐                         │
//! │          ▼             ▼                      ▼                         │
//! │     InvoiceModal   render_print_html    rch-desk pdf (A4)               │
//! │     (screen)       (print window)       letterhead + table              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The renderings never disagree about a figure because they all read the
//! same [`InvoiceDocument`].

use askama::Template;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::gst::{self, GstBreakdown};
use crate::money::Money;
use crate::types::{BillingRecord, PaymentStatus};
use crate::validation::DATE_FORMAT;

/// Number of recent bills the invoice viewer lists.
pub const INVOICE_PAGE_SIZE: u32 = 100;

/// Shown wherever a detail value is blank.
pub const NOT_AVAILABLE: &str = "N/A";

// =============================================================================
// Letterhead
// =============================================================================

/// Fixed hotel details printed at the top of every invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct HotelLetterhead {
    pub name: String,
    pub address_lines: Vec<String>,
    pub phone: String,
    pub gstin: String,
    pub email: String,
}

impl Default for HotelLetterhead {
    fn default() -> Self {
        HotelLetterhead {
            name: "Right Choice Hotels".to_string(),
            address_lines: vec![
                "21/90-C-5, Eswariamman Kovil Street".to_string(),
                "Rameswaram-623 526".to_string(),
            ],
            phone: "+91-7871140888".to_string(),
            gstin: "33CTHPS5371J1Z9".to_string(),
            email: "rightchoicehotels@gmail.com".to_string(),
        }
    }
}

impl HotelLetterhead {
    /// `Phone: +91-7871140888 | GSTIN: 33CTHPS5371J1Z9`
    pub fn contact_line(&self) -> String {
        format!("Phone: {} | GSTIN: {}", self.phone, self.gstin)
    }

    /// `Email: rightchoicehotels@gmail.com`
    pub fn email_line(&self) -> String {
        format!("Email: {}", self.email)
    }

    /// Lines under the hotel name, top to bottom.
    pub fn detail_lines(&self) -> Vec<String> {
        let mut lines = self.address_lines.clone();
        lines.push(self.contact_line());
        lines.push(self.email_line());
        lines
    }
}

// =============================================================================
// Document
// =============================================================================

/// One row of the charges table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChargeLine {
    pub description: String,
    pub amount: Money,
}

/// A `label: value` pair in the bill metadata block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DetailField {
    pub label: String,
    pub value: String,
}

impl DetailField {
    fn new(label: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        let value = if value.trim().is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            value
        };
        DetailField {
            label: label.to_string(),
            value,
        }
    }
}

/// The computed invoice for one bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceDocument {
    pub bill_id: String,
    pub guest_name: String,
    pub mobile_number: String,
    pub room_no: String,
    pub room_type: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub payment_mode: String,
    pub payment_status: PaymentStatus,
    pub room_charges: Money,
    pub extra_charges: Money,
    pub gst: GstBreakdown,
}

impl InvoiceDocument {
    /// Builds the invoice, recomputing tax from room + extra charges.
    ///
    /// ```rust
    /// # use chrono::{NaiveDate, Utc};
    /// # use rch_core::types::*;
    /// # use rch_core::money::Money;
    /// use rch_core::invoice::InvoiceDocument;
    ///
    /// # let record = NewBillingRecord {
    /// #     bill_id: "RCH05Mar01".into(), guest_name: "Asha".into(),
    /// #     mobile_number: "9876543210".into(), room_no: "101".into(),
    /// #     check_in_date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
    /// #     check_out_date: NaiveDate::from_ymd_opt(2025, 3, 6).unwrap(),
    /// #     room_type: RoomType::Double, room_charges: Money::from_rupees(800),
    /// #     extra_charges: Money::from_rupees(200), tax: Money::zero(),
    /// #     total: Money::zero(), payment_status: PaymentStatus::Paid,
    /// #     payment_mode: PaymentMode::Cash,
    /// # }.into_record("doc-1".into(), Utc::now());
    /// let invoice = InvoiceDocument::from_record(&record);
    /// assert_eq!(invoice.total().fixed2(), "1120.00");
    /// ```
    pub fn from_record(record: &BillingRecord) -> Self {
        let room_charges = record.room_charges();
        let extra_charges = record.extra_charges();

        InvoiceDocument {
            bill_id: record.bill_id.clone(),
            guest_name: record.guest_name.clone(),
            mobile_number: record.mobile_number.clone(),
            room_no: record.room_no.clone(),
            room_type: record.room_type.to_string(),
            check_in_date: record.check_in_date.format(DATE_FORMAT).to_string(),
            check_out_date: record.check_out_date.format(DATE_FORMAT).to_string(),
            payment_mode: record.payment_mode.to_string(),
            payment_status: record.payment_status,
            room_charges,
            extra_charges,
            gst: gst::compute_for_stay(room_charges, extra_charges),
        }
    }

    /// The recomputed grand total.
    #[inline]
    pub fn total(&self) -> Money {
        self.gst.total
    }

    /// Bill metadata, grouped as printed: stay details, then payment.
    pub fn detail_groups(&self) -> [Vec<DetailField>; 2] {
        [
            vec![
                DetailField::new("Bill ID", self.bill_id.as_str()),
                DetailField::new("Guest Name", self.guest_name.as_str()),
                DetailField::new("Mobile Number", self.mobile_number.as_str()),
                DetailField::new("Room Number", self.room_no.as_str()),
                DetailField::new("Room Type", self.room_type.as_str()),
                DetailField::new("Check-In Date", self.check_in_date.as_str()),
                DetailField::new("Check-Out Date", self.check_out_date.as_str()),
            ],
            vec![
                DetailField::new("Payment Mode", self.payment_mode.as_str()),
                DetailField::new("Payment Status", self.payment_status.as_str()),
            ],
        ]
    }

    /// Charge table rows, without the total.
    pub fn charge_lines(&self) -> Vec<ChargeLine> {
        let line = |description: &str, amount: Money| ChargeLine {
            description: description.to_string(),
            amount,
        };

        vec![
            line("Room Charges", self.room_charges),
            line("Extra Charges", self.extra_charges),
            line("CGST (6%)", self.gst.cgst),
            line("SGST (6%)", self.gst.sgst),
        ]
    }

    /// Artifact file name stem shared by the PDF and print exports.
    pub fn file_stem(&self) -> String {
        format!("{}_invoice", self.bill_id)
    }
}

// =============================================================================
// Screen Modal
// =============================================================================

/// The detail modal shown when an invoice row is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceModal {
    pub title: String,
    pub fields: Vec<DetailField>,
    pub total_style: StatusStyle,
}

impl InvoiceModal {
    pub fn from_document(doc: &InvoiceDocument) -> Self {
        InvoiceModal {
            title: "Invoice Details".to_string(),
            fields: vec![
                DetailField::new("Bill ID", doc.bill_id.as_str()),
                DetailField::new("Guest Name", doc.guest_name.as_str()),
                DetailField::new("Room Number", doc.room_no.as_str()),
                DetailField::new("Room Type", doc.room_type.as_str()),
                DetailField::new("Check-In", doc.check_in_date.as_str()),
                DetailField::new("Check-Out", doc.check_out_date.as_str()),
                DetailField::new("Room Charges", doc.room_charges.to_string()),
                DetailField::new("Extra Charges", doc.extra_charges.to_string()),
                DetailField::new("Total", doc.total().to_string()),
                DetailField::new("Payment Mode", doc.payment_mode.as_str()),
                DetailField::new("Payment Status", doc.payment_status.as_str()),
            ],
            total_style: StatusStyle::Success,
        }
    }
}

// =============================================================================
// Listing Rows
// =============================================================================

/// Colour class for a status cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum StatusStyle {
    Success,
    Danger,
}

impl From<PaymentStatus> for StatusStyle {
    fn from(status: PaymentStatus) -> Self {
        if status.is_paid() {
            StatusStyle::Success
        } else {
            StatusStyle::Danger
        }
    }
}

/// A row of the dashboard table or the invoice listing.
///
/// `amount` is the stored total, as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceRow {
    pub id: String,
    pub bill_id: String,
    pub guest_name: String,
    pub room_no: String,
    pub amount: Money,
    pub status: PaymentStatus,
    pub status_style: StatusStyle,
}

impl From<&BillingRecord> for InvoiceRow {
    fn from(record: &BillingRecord) -> Self {
        InvoiceRow {
            id: record.id.clone(),
            bill_id: record.bill_id.clone(),
            guest_name: record.guest_name.clone(),
            room_no: record.room_no.clone(),
            amount: record.total(),
            status: record.payment_status,
            status_style: record.payment_status.into(),
        }
    }
}

// =============================================================================
// Print View
// =============================================================================

/// Standalone print page; askama escapes every interpolated value.
#[derive(Template)]
#[template(path = "print_invoice.html")]
struct PrintInvoice {
    title: String,
    rows: Vec<DetailField>,
    total: String,
}

/// Renders the print view as a standalone HTML page.
pub fn render_print_html(doc: &InvoiceDocument) -> Result<String, askama::Error> {
    PrintInvoice {
        title: doc.file_stem(),
        rows: vec![
            DetailField::new("Bill ID", doc.bill_id.as_str()),
            DetailField::new("Guest Name", doc.guest_name.as_str()),
            DetailField::new("Room Number", doc.room_no.as_str()),
            DetailField::new("Room Charges", doc.room_charges.to_string()),
            DetailField::new("Extra Charges", doc.extra_charges.to_string()),
        ],
        total: doc.total().to_string(),
    }
    .render()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NewBillingRecord, PaymentMode, RoomType};
    use chrono::{NaiveDate, Utc};

    fn record(room: i64, extra: i64, stored_total: i64) -> BillingRecord {
        NewBillingRecord {
            bill_id: "RCH05Mar01".to_string(),
            guest_name: "Asha <Devi>".to_string(),
            mobile_number: "9876543210".to_string(),
            room_no: "101".to_string(),
            check_in_date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2025, 3, 7).unwrap(),
            room_type: RoomType::Triple,
            room_charges: Money::from_rupees(room),
            extra_charges: Money::from_rupees(extra),
            tax: Money::zero(),
            total: Money::from_rupees(stored_total),
            payment_status: PaymentStatus::Pending,
            payment_mode: PaymentMode::Upi,
        }
        .into_record("doc-1".to_string(), Utc::now())
    }

    #[test]
    fn test_total_includes_extra_charges() {
        let doc = InvoiceDocument::from_record(&record(800, 200, 0));
        assert_eq!(doc.total().fixed2(), "1120.00");
        assert_eq!(doc.gst.cgst.fixed2(), "60.00");
        assert_eq!(doc.gst.sgst.fixed2(), "60.00");
    }

    #[test]
    fn test_stored_total_is_ignored() {
        // Stored total was entered from room charges only
        let doc = InvoiceDocument::from_record(&record(1000, 500, 1120));
        assert_eq!(doc.total().fixed2(), "1680.00");
    }

    #[test]
    fn test_charge_lines_order() {
        let doc = InvoiceDocument::from_record(&record(1000, 0, 1120));
        let descriptions: Vec<_> = doc
            .charge_lines()
            .into_iter()
            .map(|l| l.description)
            .collect();
        assert_eq!(
            descriptions,
            ["Room Charges", "Extra Charges", "CGST (6%)", "SGST (6%)"]
        );
    }

    #[test]
    fn test_detail_groups() {
        let mut rec = record(1000, 0, 1120);
        rec.mobile_number = String::new();
        let doc = InvoiceDocument::from_record(&rec);
        let [stay, payment] = doc.detail_groups();

        assert_eq!(stay[0].label, "Bill ID");
        assert_eq!(stay[2].value, NOT_AVAILABLE);
        assert_eq!(stay[5].value, "2025-03-05");
        assert_eq!(payment[0].value, "UPI");
        assert_eq!(payment[1].value, "Pending");
    }

    #[test]
    fn test_modal_fields() {
        let doc = InvoiceDocument::from_record(&record(800, 200, 0));
        let modal = InvoiceModal::from_document(&doc);
        let labels: Vec<_> = modal.fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(
            labels,
            [
                "Bill ID",
                "Guest Name",
                "Room Number",
                "Room Type",
                "Check-In",
                "Check-Out",
                "Room Charges",
                "Extra Charges",
                "Total",
                "Payment Mode",
                "Payment Status",
            ]
        );
        assert_eq!(modal.fields[8].value, "₹1120.00");
    }

    #[test]
    fn test_print_html_contents_and_escaping() {
        let doc = InvoiceDocument::from_record(&record(800, 200, 0));
        let html = render_print_html(&doc).unwrap();

        assert!(html.contains("<h1>Invoice Details</h1>"));
        assert!(html.contains("<strong>Bill ID:</strong> RCH05Mar01"));
        assert!(html.contains("Asha &lt;Devi&gt;"));
        assert!(!html.contains("<Devi>"));
        assert!(html.contains("<strong>Room Charges:</strong> ₹800.00"));
        assert!(html.contains("<span class=\"highlight\">₹1120.00</span>"));
    }

    #[test]
    fn test_row_status_style() {
        let rec = record(1000, 0, 1120);
        let row = InvoiceRow::from(&rec);
        assert_eq!(row.status_style, StatusStyle::Danger);
        assert_eq!(row.amount.fixed2(), "1120.00");
        assert_eq!(StatusStyle::from(PaymentStatus::Paid), StatusStyle::Success);
    }

    #[test]
    fn test_letterhead_defaults() {
        let head = HotelLetterhead::default();
        assert_eq!(head.name, "Right Choice Hotels");
        assert_eq!(
            head.contact_line(),
            "Phone: +91-7871140888 | GSTIN: 33CTHPS5371J1Z9"
        );
        assert_eq!(head.detail_lines().len(), 4);
    }
}
