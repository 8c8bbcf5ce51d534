//! # Billing Repository
//!
//! SQLite implementation of [`BillingStore`] over the `billing` table.
//!
//! ## Bill Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. INSERT  insert(NewBillingRecord)                                   │
//! │     ├── id = UUID v4, created_at = now                                 │
//! │     └── bill_id already present? → warn!, insert anyway                │
//! │                                                                         │
//! │  2. READ    list(order_by, direction, limit) / count()                 │
//! │                                                                         │
//! │  (no update, no delete)                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, warn};
use uuid::Uuid;

use rch_core::{BillingRecord, NewBillingRecord};

use crate::error::DbResult;
use crate::store::{BillingStore, Direction, OrderBy};

const SELECT_COLUMNS: &str = r#"
    SELECT
        id,
        bill_id,
        guest_name,
        mobile_number,
        room_no,
        check_in_date,
        check_out_date,
        room_type,
        room_charges_paise,
        extra_charges_paise,
        tax_paise,
        total_paise,
        payment_status,
        payment_mode,
        created_at
    FROM billing
"#;

/// Repository for billing database operations.
#[derive(Debug, Clone)]
pub struct BillingRepository {
    pool: SqlitePool,
}

impl BillingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        BillingRepository { pool }
    }

    /// How many stored bills already carry this human-readable id.
    pub async fn count_by_bill_id(&self, bill_id: &str) -> DbResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM billing WHERE bill_id = ?1")
            .bind(bill_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }

    /// Looks a bill up by its document id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<BillingRecord>> {
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        let record = sqlx::query_as::<_, BillingRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }
}

#[async_trait]
impl BillingStore for BillingRepository {
    async fn insert(&self, bill: &NewBillingRecord) -> DbResult<String> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let existing = self.count_by_bill_id(&bill.bill_id).await?;
        if existing > 0 {
            warn!(
                bill_id = %bill.bill_id,
                existing,
                "Bill id already in use; another session took the same count snapshot"
            );
        }

        debug!(id = %id, bill_id = %bill.bill_id, "Inserting bill");

        sqlx::query(
            r#"
            INSERT INTO billing (
                id, bill_id, guest_name, mobile_number, room_no,
                check_in_date, check_out_date, room_type,
                room_charges_paise, extra_charges_paise, tax_paise, total_paise,
                payment_status, payment_mode, created_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5,
                ?6, ?7, ?8,
                ?9, ?10, ?11, ?12,
                ?13, ?14, ?15
            )
            "#,
        )
        .bind(&id)
        .bind(&bill.bill_id)
        .bind(&bill.guest_name)
        .bind(&bill.mobile_number)
        .bind(&bill.room_no)
        .bind(bill.check_in_date)
        .bind(bill.check_out_date)
        .bind(bill.room_type)
        .bind(bill.room_charges.paise())
        .bind(bill.extra_charges.paise())
        .bind(bill.tax.paise())
        .bind(bill.total.paise())
        .bind(bill.payment_status)
        .bind(bill.payment_mode)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn list(
        &self,
        order_by: OrderBy,
        direction: Direction,
        limit: u32,
    ) -> DbResult<Vec<BillingRecord>> {
        // Insertion order breaks ties so equal keys list deterministically
        let sql = format!(
            "{} ORDER BY {} {}, created_at {} LIMIT ?1",
            SELECT_COLUMNS,
            order_by.column(),
            direction.keyword(),
            direction.keyword()
        );

        let records = sqlx::query_as::<_, BillingRecord>(&sql)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        debug!(%order_by, count = records.len(), "Listed bills");
        Ok(records)
    }

    async fn count(&self) -> DbResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM billing")
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;
    use rch_core::{gst, Money, PaymentMode, PaymentStatus, RoomType};

    fn bill(bill_id: &str, check_in_day: u32, room_rupees: i64, status: PaymentStatus) -> NewBillingRecord {
        let room_charges = Money::from_rupees(room_rupees);
        let breakdown = gst::compute(room_charges);
        NewBillingRecord {
            bill_id: bill_id.to_string(),
            guest_name: format!("Guest {}", bill_id),
            mobile_number: "9876543210".to_string(),
            room_no: "101".to_string(),
            check_in_date: NaiveDate::from_ymd_opt(2025, 3, check_in_day).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2025, 3, check_in_day + 1).unwrap(),
            room_type: RoomType::Four,
            room_charges,
            extra_charges: Money::zero(),
            tax: breakdown.tax,
            total: breakdown.total,
            payment_status: status,
            payment_mode: PaymentMode::Upi,
        }
    }

    async fn repo() -> BillingRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().billing()
    }

    #[tokio::test]
    async fn test_insert_and_read_back() {
        let repo = repo().await;
        let new = bill("RCH05Mar01", 5, 1000, PaymentStatus::Pending);

        let id = repo.insert(&new).await.unwrap();
        let stored = repo.get_by_id(&id).await.unwrap().unwrap();

        assert_eq!(stored.bill_id, "RCH05Mar01");
        assert_eq!(stored.check_in_date, new.check_in_date);
        assert_eq!(stored.room_type, RoomType::Four);
        assert_eq!(stored.payment_mode, PaymentMode::Upi);
        assert_eq!(stored.payment_status, PaymentStatus::Pending);
        assert_eq!(stored.total().fixed2(), "1120.00");
        assert_eq!(stored.tax().fixed2(), "120.00");
    }

    #[tokio::test]
    async fn test_count() {
        let repo = repo().await;
        assert_eq!(repo.count().await.unwrap(), 0);

        repo.insert(&bill("RCH05Mar01", 5, 100, PaymentStatus::Paid)).await.unwrap();
        repo.insert(&bill("RCH05Mar02", 5, 100, PaymentStatus::Paid)).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_list_by_check_in_desc_with_limit() {
        let repo = repo().await;
        for (i, day) in [3, 9, 1, 7].into_iter().enumerate() {
            let id = format!("RCH0{}Mar0{}", day, i + 1);
            repo.insert(&bill(&id, day, 500, PaymentStatus::Paid)).await.unwrap();
        }

        let recent = repo.list(OrderBy::CheckInDate, Direction::Desc, 3).await.unwrap();
        let days: Vec<u32> = recent
            .iter()
            .map(|r| chrono::Datelike::day(&r.check_in_date))
            .collect();
        assert_eq!(days, [9, 7, 3]);
    }

    #[tokio::test]
    async fn test_list_by_bill_id_desc() {
        let repo = repo().await;
        for id in ["RCH05Mar01", "RCH05Mar03", "RCH05Mar02"] {
            repo.insert(&bill(id, 5, 500, PaymentStatus::Paid)).await.unwrap();
        }

        let listed = repo.list(OrderBy::BillId, Direction::Desc, 100).await.unwrap();
        let ids: Vec<_> = listed.iter().map(|r| r.bill_id.as_str()).collect();
        assert_eq!(ids, ["RCH05Mar03", "RCH05Mar02", "RCH05Mar01"]);
    }

    #[tokio::test]
    async fn test_duplicate_bill_id_is_stored_not_rejected() {
        let repo = repo().await;
        repo.insert(&bill("RCH05Mar01", 5, 100, PaymentStatus::Paid)).await.unwrap();
        repo.insert(&bill("RCH05Mar01", 5, 200, PaymentStatus::Paid)).await.unwrap();

        assert_eq!(repo.count_by_bill_id("RCH05Mar01").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_negative_charges_rejected_by_schema() {
        let repo = repo().await;
        let mut bad = bill("RCH05Mar01", 5, 100, PaymentStatus::Paid);
        bad.room_charges = Money::from_paise(-1);

        assert!(repo.insert(&bad).await.is_err());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
