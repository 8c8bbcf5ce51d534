//! # Repository Module
//!
//! Database repository implementations for RCH Billing.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  rch-desk command                                                      │
//! │       │                                                                 │
//! │       │  db.billing().list(OrderBy::CheckInDate, Direction::Desc, 10)  │
//! │       ▼                                                                 │
//! │  BillingRepository (impl BillingStore)                                 │
//! │  ├── insert(&self, bill)                                               │
//! │  ├── list(&self, order_by, direction, limit)                           │
//! │  ├── count(&self)                                                      │
//! │  └── count_by_bill_id(&self, bill_id)                                  │
//! │                                                                         │
//! │  UserRepository                                                        │
//! │  ├── insert(&self, user)                                               │
//! │  ├── find_by_email(&self, email)                                       │
//! │  └── count(&self)                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod billing;
pub mod user;
