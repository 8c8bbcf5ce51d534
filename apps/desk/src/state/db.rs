//! # Database State
//!
//! Wraps the `Database` connection for use in desk commands.
//!
//! ## Thread Safety
//! The `Database` struct from `rch-db` contains a `SqlitePool` which
//! is inherently thread-safe. Commands can run queries concurrently
//! without explicit locking.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! let billing = db_state.billing();
//! let view = commands::dashboard::load_dashboard(&billing, 10).await;
//! ```

use rch_db::{BillingRepository, Database, UserRepository};

/// Wrapper around `Database` handed to the command layer.
#[derive(Debug)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }

    /// The billing collection, as a [`rch_db::BillingStore`].
    pub fn billing(&self) -> BillingRepository {
        self.db.billing()
    }

    pub fn users(&self) -> UserRepository {
        self.db.users()
    }
}
