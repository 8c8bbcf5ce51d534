//! # Dashboard Summary
//!
//! Statistics over the page of recent bills the dashboard fetched.
//!
//! The window is whatever the store returned (the ten most recent bills by
//! check-in date), not the full ledger. The figures describe recent
//! activity only.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::BillingRecord;

/// Number of recent bills the dashboard summarizes.
pub const DASHBOARD_PAGE_SIZE: u32 = 10;

/// Dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardSummary {
    /// Sum of every fetched bill's stored total.
    pub total_payments: Money,
    /// Sum of stored totals for bills not marked Paid.
    pub pending_amount: Money,
    pub invoice_count: usize,
}

impl DashboardSummary {
    /// Aggregates a fetched page of bills.
    ///
    /// ```rust
    /// use rch_core::summary::DashboardSummary;
    ///
    /// let empty = DashboardSummary::from_records(&[]);
    /// assert_eq!(empty.invoice_count, 0);
    /// assert!(empty.total_payments.is_zero());
    /// ```
    pub fn from_records(records: &[BillingRecord]) -> Self {
        DashboardSummary {
            total_payments: records.iter().map(BillingRecord::total).sum(),
            pending_amount: records
                .iter()
                .filter(|r| !r.payment_status.is_paid())
                .map(BillingRecord::total)
                .sum(),
            invoice_count: records.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PaymentMode, PaymentStatus, RoomType};
    use chrono::{NaiveDate, Utc};

    fn bill(bill_id: &str, total_paise: i64, status: PaymentStatus) -> BillingRecord {
        BillingRecord {
            id: format!("doc-{}", bill_id),
            bill_id: bill_id.to_string(),
            guest_name: "Guest".to_string(),
            mobile_number: "9876543210".to_string(),
            room_no: "12".to_string(),
            check_in_date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2025, 3, 6).unwrap(),
            room_type: RoomType::Double,
            room_charges_paise: 0,
            extra_charges_paise: 0,
            tax_paise: 0,
            total_paise,
            payment_status: status,
            payment_mode: PaymentMode::Cash,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_page_is_all_zero() {
        assert_eq!(DashboardSummary::from_records(&[]), DashboardSummary::default());
    }

    #[test]
    fn test_totals_and_pending() {
        let records = vec![
            bill("RCH05Mar01", 112000, PaymentStatus::Paid),
            bill("RCH05Mar02", 56000, PaymentStatus::Pending),
            bill("RCH06Mar03", 22400, PaymentStatus::Pending),
        ];

        let summary = DashboardSummary::from_records(&records);
        assert_eq!(summary.total_payments.paise(), 190400);
        assert_eq!(summary.pending_amount.paise(), 78400);
        assert_eq!(summary.invoice_count, 3);
    }

    #[test]
    fn test_all_paid_has_no_pending() {
        let records = vec![
            bill("RCH05Mar01", 1000, PaymentStatus::Paid),
            bill("RCH05Mar02", 2000, PaymentStatus::Paid),
        ];
        let summary = DashboardSummary::from_records(&records);
        assert!(summary.pending_amount.is_zero());
        assert_eq!(summary.total_payments.paise(), 3000);
    }
}
