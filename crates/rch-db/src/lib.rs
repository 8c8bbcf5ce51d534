//! # rch-db: Database Layer for RCH Billing
//!
//! SQLite storage for the `billing` collection and the local user
//! directory, using sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        RCH Billing Data Flow                            │
//! │                                                                         │
//! │  rch-desk command (submit bill, load dashboard, list invoices)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     rch-db (THIS CRATE)                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  billing.rs   │    │  (embedded)  │  │   │
//! │  │   │               │◄───│  user.rs      │    │ 0001_init    │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │ impl                           │   │
//! │  │                        ┌───────▼───────┐                        │   │
//! │  │                        │ BillingStore  │ (store.rs)             │   │
//! │  │                        └───────────────┘                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (platform data dir)/rch.db                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rch_db::{BillingStore, Database, DbConfig, Direction, OrderBy};
//!
//! let db = Database::new(DbConfig::new("rch.db")).await?;
//! let recent = db.billing().list(OrderBy::CheckInDate, Direction::Desc, 10).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::{BillingStore, Direction, OrderBy};

pub use repository::billing::BillingRepository;
pub use repository::user::{
    hash_password, verify_password, AuthProvider, NewUser, UserRecord, UserRepository,
};
