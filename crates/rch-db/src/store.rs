//! # Billing Store
//!
//! The document-store seam the front desk talks to.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   BillingForm ──insert──►┐                                              │
//! │   ──count──► (snapshot)  │                                              │
//! │                          ▼                                              │
//! │                 dyn BillingStore ◄── BillingRepository (SQLite)         │
//! │                          │       ◄── test doubles (in-memory, failing)  │
//! │   Dashboard ◄──list(CheckInDate, Desc, 10)                              │
//! │   Invoices  ◄──list(BillId, Desc, 100)                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No update or delete: bills are append-only.

use async_trait::async_trait;
use std::fmt;

use rch_core::{BillingRecord, NewBillingRecord};

use crate::error::DbResult;

/// Sortable fields of the billing collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    BillId,
    CheckInDate,
    CreatedAt,
}

impl OrderBy {
    /// Column name; only ever these fixed identifiers reach the SQL text.
    pub fn column(&self) -> &'static str {
        match self {
            OrderBy::BillId => "bill_id",
            OrderBy::CheckInDate => "check_in_date",
            OrderBy::CreatedAt => "created_at",
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Asc,
    #[default]
    Desc,
}

impl Direction {
    pub fn keyword(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// Query/order/limit access to stored bills.
#[async_trait]
pub trait BillingStore: Send + Sync {
    /// Stores a new bill and returns its document id.
    async fn insert(&self, bill: &NewBillingRecord) -> DbResult<String>;

    /// Up to `limit` bills ordered by one field.
    async fn list(
        &self,
        order_by: OrderBy,
        direction: Direction,
        limit: u32,
    ) -> DbResult<Vec<BillingRecord>>;

    /// Number of stored bills.
    async fn count(&self) -> DbResult<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_columns() {
        assert_eq!(OrderBy::BillId.column(), "bill_id");
        assert_eq!(OrderBy::CheckInDate.to_string(), "check_in_date");
        assert_eq!(Direction::default(), Direction::Desc);
        assert_eq!(Direction::Asc.keyword(), "ASC");
    }
}
