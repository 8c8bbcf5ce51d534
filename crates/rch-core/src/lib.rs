//! # rch-core: Pure Business Logic for RCH Billing
//!
//! Billing arithmetic and invoice rendering for the Right Choice Hotels
//! front desk, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        RCH Billing Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    rch-desk (front-desk app)                    │   │
//! │  │   Login ──► Dashboard ──► Billing Form ──► Invoice Viewer      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rch-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  money  │ │   gst   │ │ bill_id │ │ summary │ │ invoice │  │   │
//! │  │   │  Money  │ │  CGST   │ │ RCH..01 │ │ totals  │ │ modal / │  │   │
//! │  │   │  paise  │ │  SGST   │ │ snapshot│ │ pending │ │ print   │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    rch-db (Database Layer)                      │   │
//! │  │          SQLite billing collection, users, migrations           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (BillingRecord, RoomType, PaymentStatus, ...)
//! - [`money`] - Money type with integer paise
//! - [`gst`] - CGST/SGST breakdown
//! - [`bill_id`] - `RCH{DD}{Mon}{NN}` identifiers
//! - [`summary`] - Dashboard aggregation
//! - [`invoice`] - Invoice document, modal view and print HTML
//! - [`validation`] - Form validation rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rch_core::{bill_id, gst};
//!
//! let breakdown = gst::compute_from_text("1000");
//! assert_eq!(breakdown.tax.fixed2(), "120.00");
//! assert_eq!(breakdown.total.fixed2(), "1120.00");
//!
//! let date = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
//! assert_eq!(bill_id::generate_bill_id(0, date), "RCH05Mar01");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bill_id;
pub mod error;
pub mod gst;
pub mod invoice;
pub mod money;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use bill_id::BillSequence;
pub use error::{CoreError, CoreResult, ValidationError};
pub use gst::GstBreakdown;
pub use invoice::{HotelLetterhead, InvoiceDocument, InvoiceModal, InvoiceRow, StatusStyle};
pub use money::Money;
pub use summary::DashboardSummary;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

pub use invoice::INVOICE_PAGE_SIZE;
pub use summary::DASHBOARD_PAGE_SIZE;

/// Toasts dismiss themselves after this many milliseconds.
pub const NOTIFICATION_TIMEOUT_MS: u64 = 3000;

/// The dashboard clock ticks once per second.
pub const CLOCK_INTERVAL_MS: u64 = 1000;
