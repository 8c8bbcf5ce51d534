//! # Desk Configuration
//!
//! Settings loaded once at startup and read-only afterwards.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     RCH_DB_PATH, RCH_EXPORT_DIR, RCH_LOGO_PATH,                        │
//! │     RCH_JWT_SECRET, RCH_FEDERATED_SECRET, RCH_HOTEL_NAME               │
//! │                                                                         │
//! │  2. TOML Config File (--config, or the platform config dir)            │
//! │     ~/.config/billing/desk.toml (Linux)                                │
//! │     ~/Library/Application Support/com.rch.billing/desk.toml (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [hotel]
//! name = "Right Choice Hotels"
//! addressLines = ["21/90-C-5, Eswariamman Kovil Street", "Rameswaram-623 526"]
//! phone = "+91-7871140888"
//! gstin = "33CTHPS5371J1Z9"
//! email = "rightchoicehotels@gmail.com"
//!
//! [storage]
//! db_path = "/var/lib/rch/rch.db"
//!
//! [export]
//! directory = "./invoices"
//! logo_path = "./assets/logo.png"
//!
//! [auth]
//! session_secret = "change-me"
//! session_lifetime_secs = 28800
//! federated_issuer = "https://accounts.google.com"
//! federated_secret = "shared-secret"
//!
//! [dashboard]
//! page_size = 10
//! clock_interval_ms = 1000
//!
//! [invoices]
//! page_size = 100
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use rch_core::{HotelLetterhead, CLOCK_INTERVAL_MS, DASHBOARD_PAGE_SIZE, INVOICE_PAGE_SIZE};

/// Session secret used when nothing else is configured. Fine for a
/// single desk in development; `validate` warns about it.
pub const DEV_SESSION_SECRET: &str = "rch-desk-dev-secret";

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine the platform data directory")]
    NoDataDir,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// Where the SQLite file lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Explicit database path; the platform data dir is used when unset.
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

/// Invoice artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory receiving `{bill_id}_invoice.pdf` / `.html`.
    #[serde(default = "default_export_dir")]
    pub directory: PathBuf,

    /// Letterhead logo (PNG or JPEG). PDF export aborts if it can't be read.
    #[serde(default = "default_logo_path")]
    pub logo_path: PathBuf,
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_logo_path() -> PathBuf {
    PathBuf::from("assets/logo.png")
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            directory: default_export_dir(),
            logo_path: default_logo_path(),
        }
    }
}

/// Identity provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 key for session tokens.
    #[serde(default = "default_session_secret")]
    pub session_secret: String,

    #[serde(default = "default_session_lifetime")]
    pub session_lifetime_secs: i64,

    /// Expected `iss` of federated ID tokens. Federated sign-in is off
    /// unless both issuer and secret are set.
    #[serde(default)]
    pub federated_issuer: Option<String>,

    #[serde(default)]
    pub federated_secret: Option<String>,
}

fn default_session_secret() -> String {
    DEV_SESSION_SECRET.to_string()
}

fn default_session_lifetime() -> i64 {
    8 * 60 * 60
}

impl Default for AuthConfig {
    fn default() -> Self {
        AuthConfig {
            session_secret: default_session_secret(),
            session_lifetime_secs: default_session_lifetime(),
            federated_issuer: None,
            federated_secret: None,
        }
    }
}

impl AuthConfig {
    /// Issuer and secret, when federated sign-in is configured.
    pub fn federated(&self) -> Option<(&str, &str)> {
        match (&self.federated_issuer, &self.federated_secret) {
            (Some(issuer), Some(secret)) => Some((issuer.as_str(), secret.as_str())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Recent bills fetched (and aggregated) by the dashboard.
    #[serde(default = "default_dashboard_page")]
    pub page_size: u32,

    #[serde(default = "default_clock_interval")]
    pub clock_interval_ms: u64,
}

fn default_dashboard_page() -> u32 {
    DASHBOARD_PAGE_SIZE
}

fn default_clock_interval() -> u64 {
    CLOCK_INTERVAL_MS
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            page_size: default_dashboard_page(),
            clock_interval_ms: default_clock_interval(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoicesConfig {
    #[serde(default = "default_invoice_page")]
    pub page_size: u32,
}

fn default_invoice_page() -> u32 {
    INVOICE_PAGE_SIZE
}

impl Default for InvoicesConfig {
    fn default() -> Self {
        InvoicesConfig {
            page_size: default_invoice_page(),
        }
    }
}

// =============================================================================
// Desk Config
// =============================================================================

/// Complete desk configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeskConfig {
    #[serde(default)]
    pub hotel: HotelLetterhead,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub invoices: InvoicesConfig,
}

impl DeskConfig {
    /// Loads configuration from file and environment.
    ///
    /// ## Loading Order
    /// 1. Start with defaults
    /// 2. Load from TOML file (if exists)
    /// 3. Override with environment variables
    /// 4. Validate
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading desk config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load desk config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.auth.session_secret.is_empty() {
            return Err(ConfigError::Invalid(
                "auth.session_secret must not be empty".into(),
            ));
        }

        if self.auth.session_lifetime_secs <= 0 {
            return Err(ConfigError::Invalid(
                "auth.session_lifetime_secs must be greater than 0".into(),
            ));
        }

        if self.auth.federated_issuer.is_some() != self.auth.federated_secret.is_some() {
            return Err(ConfigError::Invalid(
                "auth.federated_issuer and auth.federated_secret must be set together".into(),
            ));
        }

        if self.dashboard.page_size == 0 || self.invoices.page_size == 0 {
            return Err(ConfigError::Invalid(
                "page_size must be greater than 0".into(),
            ));
        }

        if self.dashboard.clock_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "dashboard.clock_interval_ms must be greater than 0".into(),
            ));
        }

        if self.hotel.name.trim().is_empty() {
            return Err(ConfigError::Invalid("hotel.name must not be empty".into()));
        }

        if self.auth.session_secret == DEV_SESSION_SECRET {
            warn!("Using the development session secret; set RCH_JWT_SECRET in production");
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("RCH_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.db_path = Some(PathBuf::from(path));
        }

        if let Ok(dir) = std::env::var("RCH_EXPORT_DIR") {
            debug!(dir = %dir, "Overriding export directory from environment");
            self.export.directory = PathBuf::from(dir);
        }

        if let Ok(path) = std::env::var("RCH_LOGO_PATH") {
            self.export.logo_path = PathBuf::from(path);
        }

        if let Ok(secret) = std::env::var("RCH_JWT_SECRET") {
            self.auth.session_secret = secret;
        }

        if let Ok(secret) = std::env::var("RCH_FEDERATED_SECRET") {
            self.auth.federated_secret = Some(secret);
        }

        if let Ok(name) = std::env::var("RCH_HOTEL_NAME") {
            self.hotel.name = name;
        }
    }

    /// `desk.toml` in the platform config directory.
    fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "rch", "billing").map(|dirs| dirs.config_dir().join("desk.toml"))
    }

    /// The database file, creating the platform data directory if needed.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.rch.billing/rch.db`
    /// - **Windows**: `%APPDATA%\rch\billing\data\rch.db`
    /// - **Linux**: `~/.local/share/billing/rch.db`
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.storage.db_path {
            return Ok(path.clone());
        }

        let data_dir = Self::data_dir()?;
        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir.join("rch.db"))
    }

    /// Where the CLI keeps the signed-in session token.
    pub fn session_file(&self) -> ConfigResult<PathBuf> {
        let dir = match &self.storage.db_path {
            Some(path) => path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
            None => Self::data_dir()?,
        };
        Ok(dir.join("session.jwt"))
    }

    fn data_dir() -> ConfigResult<PathBuf> {
        ProjectDirs::from("com", "rch", "billing")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(ConfigError::NoDataDir)
    }
}
