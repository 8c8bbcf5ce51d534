//! # RCH Desk Library
//!
//! Core library for the RCH Billing front-desk application. The binary in
//! `main.rs` is a thin clap front end over these commands.
//!
//! ## Module Organization
//! ```text
//! rch_desk/
//! ├── lib.rs          ◄─── You are here (startup & wiring)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── DeskConfig (TOML + env)
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   ├── form.rs     ◄─── Billing form state
//! │   └── session.rs  ◄─── Signed-in session
//! ├── commands/
//! │   ├── mod.rs      ◄─── Routes & guard
//! │   ├── login.rs    ◄─── Sign in / out
//! │   ├── billing.rs  ◄─── Billing form
//! │   ├── dashboard.rs◄─── Summary cards & recent bills
//! │   └── invoice.rs  ◄─── Listing, modal, print, PDF
//! ├── identity.rs     ◄─── IdentityProvider + local implementation
//! ├── clock.rs        ◄─── Dashboard clock task
//! ├── pdf.rs          ◄─── A4 invoice renderer
//! └── error.rs        ◄─── ApiError, AuthError, Notification
//! ```
//!
//! ## State
//! There is no single `AppState`. [`DeskContext`] only bundles what
//! startup produces; commands take the pieces they need as arguments.

pub mod clock;
pub mod commands;
pub mod error;
pub mod identity;
pub mod pdf;
pub mod state;

use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use identity::LocalIdentityProvider;
use rch_db::{Database, DbConfig, DbError};
use state::{ConfigError, DbState, DeskConfig};

/// Startup failures. Reported by `main` and never shown in a screen.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

/// Everything a running desk needs, built once at startup.
pub struct DeskContext {
    pub config: DeskConfig,
    pub db: DbState,
    pub identity: LocalIdentityProvider,
}

impl DeskContext {
    /// Opens the database (running migrations) and builds the identity
    /// provider from `config`.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │  1. Resolve DB path ── [storage].db_path or <data dir>/rch.db          │
    /// │  2. Connect ────────── SQLite, WAL mode, pending migrations            │
    /// │  3. Identity ───────── session tokens + optional federated verifier    │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    pub async fn open(config: DeskConfig) -> Result<Self, StartupError> {
        let db_path = config.database_path()?;
        info!(?db_path, "Database path determined");

        let db = Database::new(DbConfig::new(db_path)).await?;
        info!("Database connected and migrations applied");

        Ok(Self::with_database(config, db))
    }

    /// Builds the context around an already-open database.
    pub fn with_database(config: DeskConfig, db: Database) -> Self {
        let db = DbState::new(db);
        let identity = LocalIdentityProvider::from_config(db.users(), &config.auth);

        DeskContext {
            config,
            db,
            identity,
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=rch=trace` - Show trace for rch crates only
/// - Default: `info,rch=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rch=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
