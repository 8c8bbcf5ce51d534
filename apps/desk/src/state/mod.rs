//! # State Module
//!
//! Application state for the desk, split into focused types so each
//! command only takes what it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌────────────┐  │
//! │  │   DbState    │  │   Session    │  │ BillingForm  │  │ DeskConfig │  │
//! │  │              │  │              │  │   State      │  │            │  │
//! │  │  Database    │  │  who is      │  │  form value  │  │ letterhead │  │
//! │  │  (SQLite     │  │  signed in   │  │  + bill-count│  │ export dir │  │
//! │  │   pool)      │  │  (explicit)  │  │    snapshot  │  │ page sizes │  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • DbState: Database has internal connection pool (thread-safe)        │
//! │  • Session / BillingFormState: plain values, replaced not mutated      │
//! │  • DeskConfig: Read-only after initialization                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod form;
mod session;

pub use config::{
    AuthConfig, ConfigError, ConfigResult, DashboardConfig, DeskConfig, ExportConfig,
    InvoicesConfig, StorageConfig, DEV_SESSION_SECRET,
};
pub use db::DbState;
pub use form::{BillingForm, BillingFormState, FormField};
pub use session::{Session, SignInMethod};
