//! # Commands Module
//!
//! One handler per user action. Handlers take the state they need as
//! plain arguments and return the next state (plus a notification)
//! instead of mutating anything shared.
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Desk Commands                                        │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌─────────────────────┐                     │
//! │  │   Login (/)         │   │   Dashboard         │                     │
//! │  │                     │   │   (/homepage)       │                     │
//! │  │  • login            │   │  • load_dashboard   │                     │
//! │  │  • login_federated  │   │  • toggle_menu      │                     │
//! │  │  • logout           │   │  • MenuItem::route  │                     │
//! │  └─────────────────────┘   └─────────────────────┘                     │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌─────────────────────┐                     │
//! │  │   Billing Form      │   │   Invoice           │                     │
//! │  │   (/billing-form)   │   │   (/invoice)        │                     │
//! │  │  • open_billing_form│   │  • load_invoices    │                     │
//! │  │  • update_field     │   │  • select / close   │                     │
//! │  │  • submit_bill      │   │  • print / pdf      │                     │
//! │  └─────────────────────┘   └─────────────────────┘                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod billing;
pub mod dashboard;
pub mod invoice;
pub mod login;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;

use crate::state::Session;

/// Screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum Route {
    Login,
    Homepage,
    BillingForm,
    Invoice,
}

impl Route {
    pub const ALL: [Route; 4] = [
        Route::Login,
        Route::Homepage,
        Route::BillingForm,
        Route::Invoice,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Homepage => "/homepage",
            Route::BillingForm => "/billing-form",
            Route::Invoice => "/invoice",
        }
    }

    /// Everything except the login screen needs a session.
    pub fn requires_session(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

/// Resolves the screen to show for `requested`. Protected screens fall
/// back to the login screen without a live session.
pub fn guard(requested: Route, session: Option<&Session>, now: DateTime<Utc>) -> Route {
    match session {
        _ if !requested.requires_session() => requested,
        Some(session) if !session.is_expired_at(now) => requested,
        _ => Route::Login,
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::ALL
            .into_iter()
            .find(|route| route.path() == s)
            .ok_or_else(|| format!("Unknown route: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(route.path().parse::<Route>().unwrap(), route);
        }
        assert!("/settings".parse::<Route>().is_err());
    }

    #[test]
    fn test_only_login_is_public() {
        assert!(!Route::Login.requires_session());
        assert!(Route::Homepage.requires_session());
        assert!(Route::Invoice.requires_session());
    }

    #[test]
    fn test_guard() {
        let now = Utc::now();
        let session = Session {
            session_id: "s-1".into(),
            user_id: "u-1".into(),
            email: "desk@rch.in".into(),
            display_name: None,
            method: crate::state::SignInMethod::Password,
            token: "t".into(),
            expires_at: now + chrono::Duration::hours(1),
        };

        assert_eq!(guard(Route::Invoice, Some(&session), now), Route::Invoice);
        assert_eq!(guard(Route::Invoice, None, now), Route::Login);
        assert_eq!(guard(Route::Login, None, now), Route::Login);

        let later = now + chrono::Duration::hours(2);
        assert_eq!(guard(Route::Homepage, Some(&session), later), Route::Login);
    }
}
