//! # Session
//!
//! The signed-in identity, handed explicitly to every command that needs
//! to know who is at the desk. There is no global "current user".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// How the session was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SignInMethod {
    Password,
    Federated,
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Session {
    /// Token id (`jti`); signing out revokes it.
    pub session_id: String,
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub method: SignInMethod,
    /// Signed HS256 session token.
    pub token: String,
    #[ts(as = "String")]
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Display name, falling back to the email address.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}
