//! End-to-end desk flows against an in-memory SQLite store and a store
//! that fails every call.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};

use rch_core::{BillingRecord, Money, NewBillingRecord, PaymentStatus};
use rch_db::{BillingStore, Database, DbConfig, DbError, DbResult, Direction, OrderBy};
use rch_desk::commands::{billing, dashboard, invoice, login, Route};
use rch_desk::error::{AuthError, AuthResult, NotificationLevel};
use rch_desk::identity::IdentityProvider;
use rch_desk::state::{BillingFormState, Session, SignInMethod};

// =============================================================================
// Doubles
// =============================================================================

/// Every call fails as if the store were unreachable.
struct OfflineStore;

#[async_trait]
impl BillingStore for OfflineStore {
    async fn insert(&self, _bill: &NewBillingRecord) -> DbResult<String> {
        Err(DbError::ConnectionFailed("offline".into()))
    }

    async fn list(&self, _: OrderBy, _: Direction, _: u32) -> DbResult<Vec<BillingRecord>> {
        Err(DbError::ConnectionFailed("offline".into()))
    }

    async fn count(&self) -> DbResult<u64> {
        Err(DbError::ConnectionFailed("offline".into()))
    }
}

/// Accepts one password and lets sign-out succeed or fail on demand.
struct StubIdentity {
    sign_out_fails: bool,
}

fn session() -> Session {
    Session {
        session_id: "s-1".into(),
        user_id: "u-1".into(),
        email: "desk@rch.in".into(),
        display_name: Some("Front Desk".into()),
        method: SignInMethod::Password,
        token: "token".into(),
        expires_at: Utc::now() + Duration::hours(8),
    }
}

#[async_trait]
impl IdentityProvider for StubIdentity {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> AuthResult<Session> {
        if email == "desk@rch.in" && password == "secret123" {
            Ok(session())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    async fn sign_in_federated(&self, _assertion: &str) -> AuthResult<Session> {
        Err(AuthError::FederatedDisabled)
    }

    async fn sign_out(&self, _session: &Session) -> AuthResult<()> {
        if self.sign_out_fails {
            Err(AuthError::InvalidSession("provider unavailable".into()))
        } else {
            Ok(())
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

async fn store() -> rch_db::BillingRepository {
    Database::new(DbConfig::in_memory())
        .await
        .unwrap()
        .billing()
}

fn fill(state: BillingFormState, fields: &[(&str, &str)]) -> BillingFormState {
    fields.iter().fold(state, |state, (name, value)| {
        billing::update_field(&state, name, value).unwrap()
    })
}

fn guest(state: BillingFormState, name: &str, check_in: &str, room: &str) -> BillingFormState {
    fill(
        state,
        &[
            ("guestName", name),
            ("mobileNumber", "9876543210"),
            ("roomNo", "101"),
            ("checkInDate", check_in),
            ("checkOutDate", "2025-03-20"),
            ("roomCharges", room),
        ],
    )
}

fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
}

// =============================================================================
// Billing form
// =============================================================================

#[tokio::test]
async fn test_submit_stores_bill_and_resets_form() {
    let store = store().await;
    let state = billing::open_billing_form(&store).await.unwrap();

    let state = guest(state, "Asha", "2025-03-05", "800");
    let state = fill(state, &[("extraCharges", "200"), ("paymentStatus", "Paid")]);
    assert_eq!(state.form.total.fixed2(), "1120.00");

    let outcome = billing::submit_bill(&store, &state, march(5)).await;
    assert_eq!(outcome.notification.level, NotificationLevel::Success);
    assert_eq!(outcome.notification.message, billing::BILL_ADDED);
    assert_eq!(outcome.bill_id.as_deref(), Some("RCH05Mar01"));
    assert!(outcome.state.form.guest_name.is_empty());

    // the snapshot advanced, so the next bill gets the next number
    let next = guest(outcome.state, "Ravi", "2025-03-05", "1000");
    let outcome = billing::submit_bill(&store, &next, march(5)).await;
    assert_eq!(outcome.bill_id.as_deref(), Some("RCH05Mar02"));

    let stored = store.list(OrderBy::BillId, Direction::Asc, 10).await.unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].total().fixed2(), "1120.00");
    assert_eq!(stored[0].payment_status, PaymentStatus::Paid);
}

#[tokio::test]
async fn test_invalid_form_is_not_stored() {
    let store = store().await;
    let state = billing::open_billing_form(&store).await.unwrap();
    let state = guest(state, "Asha", "2025-03-05", "800");
    let state = fill(state, &[("mobileNumber", "98765")]);

    let outcome = billing::submit_bill(&store, &state, march(5)).await;
    assert!(outcome.notification.is_error());
    assert!(outcome.notification.message.contains("mobileNumber"));
    assert_eq!(outcome.state, state);
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_checkout_before_checkin_is_rejected() {
    let store = store().await;
    let state = billing::open_billing_form(&store).await.unwrap();
    let state = guest(state, "Asha", "2025-03-25", "800");

    let outcome = billing::submit_bill(&store, &state, march(25)).await;
    assert!(outcome.notification.is_error());
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_store_failure_keeps_form() {
    let state = guest(BillingFormState::mounted(0), "Asha", "2025-03-05", "800");

    let outcome = billing::submit_bill(&OfflineStore, &state, march(5)).await;
    assert_eq!(outcome.notification.message, billing::BILL_FAILED);
    assert_eq!(outcome.bill_id, None);
    assert_eq!(outcome.state, state);

    assert!(billing::open_billing_form(&OfflineStore).await.is_err());
}

#[test]
fn test_unknown_field_is_rejected() {
    let state = BillingFormState::mounted(0);
    assert!(billing::update_field(&state, "discount", "10").is_err());
}

// =============================================================================
// Dashboard
// =============================================================================

#[tokio::test]
async fn test_dashboard_summarizes_latest_page() {
    let store = store().await;
    let mut state = billing::open_billing_form(&store).await.unwrap();

    for day in 1..=12u32 {
        let check_in = format!("2025-03-{:02}", day);
        state = guest(state, "Guest", &check_in, "1000");
        // the form resets to Paid; odd days are marked Pending
        if day % 2 == 1 {
            state = fill(state, &[("paymentStatus", "Pending")]);
        }
        let outcome = billing::submit_bill(&store, &state, march(day)).await;
        assert!(!outcome.notification.is_error());
        state = outcome.state;
    }

    let view = dashboard::load_dashboard(&store, 10).await;
    assert!(!view.loading);
    assert_eq!(view.error, None);
    assert_eq!(view.summary.invoice_count, 10);
    assert_eq!(view.summary.total_payments, Money::from_rupees(11_200));
    assert_eq!(view.summary.pending_amount, Money::from_rupees(5_600));
    // newest check-in first; days 1 and 2 fall off the page
    assert_eq!(view.rows[0].bill_id, "RCH12Mar12");
    assert_eq!(view.rows[9].bill_id, "RCH03Mar03");
    assert_eq!(view.table_message(), None);
}

#[tokio::test]
async fn test_dashboard_empty_store() {
    let store = store().await;
    let view = dashboard::load_dashboard(&store, 10).await;

    assert_eq!(view.summary.invoice_count, 0);
    assert!(view.summary.total_payments.is_zero());
    assert_eq!(view.table_message(), Some(dashboard::EMPTY_MESSAGE));
}

#[tokio::test]
async fn test_dashboard_failure_shows_banner() {
    let view = dashboard::load_dashboard(&OfflineStore, 10).await;

    assert!(!view.loading);
    assert_eq!(
        view.error.as_deref(),
        Some("Failed to load invoices. Please try again.")
    );
    assert_eq!(view.summary.invoice_count, 0);
    assert!(view.summary.total_payments.is_zero());
    assert!(view.summary.pending_amount.is_zero());
}

// =============================================================================
// Invoices
// =============================================================================

#[tokio::test]
async fn test_invoice_listing_select_and_print() {
    let store = store().await;
    let mut state = billing::open_billing_form(&store).await.unwrap();
    for day in [5u32, 6] {
        state = guest(state, "Asha", &format!("2025-03-{:02}", day), "800");
        state = fill(state, &[("extraCharges", "200")]);
        state = billing::submit_bill(&store, &state, march(day)).await.state;
    }

    let view = invoice::load_invoices(&store, 100).await;
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.rows[0].bill_id, "RCH06Mar02");
    assert_eq!(view.notification, None);

    let view = invoice::select_invoice(&view, "RCH05Mar01").unwrap();
    let selected = view.selected.as_ref().unwrap();
    assert_eq!(selected.modal.title, "Invoice Details");
    assert_eq!(selected.document.total().fixed2(), "1120.00");

    let dir = tempfile::tempdir().unwrap();
    let path = invoice::print_invoice(&selected.document, dir.path()).unwrap();
    assert!(path.ends_with("RCH05Mar01_invoice.html"));

    assert!(invoice::close_invoice(&view).selected.is_none());
}

#[tokio::test]
async fn test_invoice_listing_failure() {
    let view = invoice::load_invoices(&OfflineStore, 100).await;

    assert!(!view.loading);
    assert!(view.rows.is_empty());
    assert!(view.notification.unwrap().is_error());
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_messages_and_routes() {
    let identity = StubIdentity {
        sign_out_fails: false,
    };

    let ok = login::login(
        &identity,
        &login::Credentials {
            email: "desk@rch.in".into(),
            password: "secret123".into(),
        },
    )
    .await;
    assert_eq!(ok.notification.message, "Login successful!");
    assert_eq!(ok.route, Route::Homepage);

    let bad = login::login(
        &identity,
        &login::Credentials {
            email: "desk@rch.in".into(),
            password: "wrong".into(),
        },
    )
    .await;
    assert_eq!(bad.notification.message, "Invalid email or password.");
    assert_eq!(bad.route, Route::Login);
    assert!(bad.session.is_none());

    let federated = login::login_federated(&identity, "assertion").await;
    assert_eq!(
        federated.notification.message,
        "Google login failed. Please try again."
    );

    let out = login::logout(&identity, ok.session.unwrap(), Route::Invoice).await;
    assert_eq!(out.notification.message, "Logged out successfully!");
    assert_eq!(out.route, Route::Login);
    assert!(out.session.is_none());
}

#[tokio::test]
async fn test_failed_logout_keeps_session() {
    let identity = StubIdentity {
        sign_out_fails: true,
    };

    let out = login::logout(&identity, session(), Route::Invoice).await;
    assert_eq!(
        out.notification.message,
        "Failed to logout. Please try again."
    );
    assert_eq!(out.route, Route::Invoice);
    assert!(out.session.is_some());
}
