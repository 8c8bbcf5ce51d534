//! # Domain Types
//!
//! Core domain types used throughout RCH Billing.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │   BillingRecord     │   │    RoomType     │   │  PaymentMode    │   │
//! │  │  ─────────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  id (UUID)          │   │  Double         │   │  Cash           │   │
//! │  │  bill_id (RCH...)   │   │  Triple         │   │  Card           │   │
//! │  │  guest / stay       │   │  Four           │   │  UPI            │   │
//! │  │  charges / tax      │   └─────────────────┘   └─────────────────┘   │
//! │  │  total              │   ┌─────────────────┐   ┌─────────────────┐   │
//! │  └─────────────────────┘   │ PaymentStatus   │   │    TaxRate      │   │
//! │                            │  Paid           │   │  bps (u32)      │   │
//! │                            │  Pending        │   │  600 = 6%       │   │
//! │                            └─────────────────┘   └─────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every billing record has:
//! - `id`: UUID v4 document id assigned by the store
//! - `bill_id`: human-readable `RCH05Mar01`, assigned once at creation

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so CGST at 6% is 600 bps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Room Type
// =============================================================================

/// Occupancy class of the room billed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum RoomType {
    #[default]
    Double,
    Triple,
    Four,
}

impl RoomType {
    /// All selectable room types, in form order.
    pub const ALL: [RoomType; 3] = [RoomType::Double, RoomType::Triple, RoomType::Four];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Double => "Double",
            RoomType::Triple => "Triple",
            RoomType::Four => "Four",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoomType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "roomType".to_string(),
                allowed: RoomType::ALL.iter().map(|t| t.to_string()).collect(),
            })
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// Whether the bill has been settled.
///
/// ## Pending Amount
/// Anything that is not `Paid` counts towards the dashboard's pending amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum PaymentStatus {
    #[default]
    Paid,
    Pending,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 2] = [PaymentStatus::Paid, PaymentStatus::Pending];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Pending => "Pending",
        }
    }

    #[inline]
    pub fn is_paid(&self) -> bool {
        matches!(self, PaymentStatus::Paid)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentStatus::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "paymentStatus".to_string(),
                allowed: PaymentStatus::ALL.iter().map(|p| p.to_string()).collect(),
            })
    }
}

// =============================================================================
// Payment Mode
// =============================================================================

/// How the guest paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum PaymentMode {
    #[default]
    Cash,
    Card,
    #[serde(rename = "UPI")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "UPI"))]
    Upi,
}

impl PaymentMode {
    pub const ALL: [PaymentMode; 3] = [PaymentMode::Cash, PaymentMode::Card, PaymentMode::Upi];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Card => "Card",
            PaymentMode::Upi => "UPI",
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "paymentMode".to_string(),
                allowed: PaymentMode::ALL.iter().map(|m| m.to_string()).collect(),
            })
    }
}

// =============================================================================
// Billing Record
// =============================================================================

/// A persisted bill, the sole business entity.
///
/// ## Lifecycle
/// Created once by the billing form, read-only afterwards. There is no
/// update or delete path anywhere in the system.
///
/// Money columns are stored as paise; use the accessor methods to get
/// [`Money`] values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BillingRecord {
    /// Document id (UUID v4) assigned by the store.
    pub id: String,
    /// Human-readable bill id, e.g. `RCH05Mar01`.
    pub bill_id: String,
    pub guest_name: String,
    /// Ten-digit mobile number.
    pub mobile_number: String,
    pub room_no: String,
    #[ts(as = "String")]
    pub check_in_date: NaiveDate,
    #[ts(as = "String")]
    pub check_out_date: NaiveDate,
    pub room_type: RoomType,
    pub room_charges_paise: i64,
    pub extra_charges_paise: i64,
    /// CGST + SGST as computed when the bill was entered.
    pub tax_paise: i64,
    /// Grand total as computed when the bill was entered.
    pub total_paise: i64,
    pub payment_status: PaymentStatus,
    pub payment_mode: PaymentMode,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl BillingRecord {
    #[inline]
    pub fn room_charges(&self) -> Money {
        Money::from_paise(self.room_charges_paise)
    }

    #[inline]
    pub fn extra_charges(&self) -> Money {
        Money::from_paise(self.extra_charges_paise)
    }

    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_paise(self.tax_paise)
    }

    /// The stored total. Invoices recompute their own figure instead.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paise(self.total_paise)
    }
}

/// A bill ready to be inserted; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBillingRecord {
    pub bill_id: String,
    pub guest_name: String,
    pub mobile_number: String,
    pub room_no: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub room_type: RoomType,
    pub room_charges: Money,
    pub extra_charges: Money,
    pub tax: Money,
    pub total: Money,
    pub payment_status: PaymentStatus,
    pub payment_mode: PaymentMode,
}

impl NewBillingRecord {
    /// Materializes the stored form of this bill.
    pub fn into_record(self, id: String, created_at: DateTime<Utc>) -> BillingRecord {
        BillingRecord {
            id,
            bill_id: self.bill_id,
            guest_name: self.guest_name,
            mobile_number: self.mobile_number,
            room_no: self.room_no,
            check_in_date: self.check_in_date,
            check_out_date: self.check_out_date,
            room_type: self.room_type,
            room_charges_paise: self.room_charges.paise(),
            extra_charges_paise: self.extra_charges.paise(),
            tax_paise: self.tax.paise(),
            total_paise: self.total.paise(),
            payment_status: self.payment_status,
            payment_mode: self.payment_mode,
            created_at,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
