//! # Login Commands
//!
//! Sign in and out through an [`IdentityProvider`]. Every outcome carries
//! the route to show next and a toast; failures keep the user where they
//! are.

use serde::Serialize;
use tracing::error;

use crate::error::Notification;
use crate::identity::IdentityProvider;
use crate::state::Session;

use super::Route;

pub const LOGIN_SUCCESS: &str = "Login successful!";
pub const LOGIN_FAILED: &str = "Invalid email or password.";
pub const FEDERATED_SUCCESS: &str = "Google login successful!";
pub const FEDERATED_FAILED: &str = "Google login failed. Please try again.";
pub const LOGOUT_SUCCESS: &str = "Logged out successfully!";
pub const LOGOUT_FAILED: &str = "Failed to logout. Please try again.";

/// What the login form submits.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Result of a sign-in or sign-out.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthOutcome {
    /// The session in force after the command.
    pub session: Option<Session>,
    pub route: Route,
    pub notification: Notification,
}

/// Email/password sign-in.
pub async fn login(identity: &dyn IdentityProvider, credentials: &Credentials) -> AuthOutcome {
    match identity
        .sign_in_with_password(&credentials.email, &credentials.password)
        .await
    {
        Ok(session) => AuthOutcome {
            session: Some(session),
            route: Route::Homepage,
            notification: Notification::success(LOGIN_SUCCESS),
        },
        Err(e) => {
            error!(email = %credentials.email, "Login failed: {}", e);
            AuthOutcome {
                session: None,
                route: Route::Login,
                notification: Notification::error(LOGIN_FAILED),
            }
        }
    }
}

/// Federated sign-in with an ID-token assertion.
pub async fn login_federated(identity: &dyn IdentityProvider, assertion: &str) -> AuthOutcome {
    match identity.sign_in_federated(assertion).await {
        Ok(session) => AuthOutcome {
            session: Some(session),
            route: Route::Homepage,
            notification: Notification::success(FEDERATED_SUCCESS),
        },
        Err(e) => {
            error!("Federated login failed: {}", e);
            AuthOutcome {
                session: None,
                route: Route::Login,
                notification: Notification::error(FEDERATED_FAILED),
            }
        }
    }
}

/// Signs out. On failure the session stays and the user stays on
/// `current`.
pub async fn logout(
    identity: &dyn IdentityProvider,
    session: Session,
    current: Route,
) -> AuthOutcome {
    match identity.sign_out(&session).await {
        Ok(()) => AuthOutcome {
            session: None,
            route: Route::Login,
            notification: Notification::success(LOGOUT_SUCCESS),
        },
        Err(e) => {
            error!(session_id = %session.session_id, "Logout error: {}", e);
            AuthOutcome {
                session: Some(session),
                route: current,
                notification: Notification::error(LOGOUT_FAILED),
            }
        }
    }
}
