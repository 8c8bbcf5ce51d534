//! # Billing Form Commands
//!
//! Mount, edit and submit the billing-entry form.
//!
//! ## Submit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. VALIDATE   form.to_new_record(next_bill_id)                        │
//! │     └── invalid? → error toast with the reason, state unchanged        │
//! │                                                                         │
//! │  2. INSERT     store.insert(record)                                    │
//! │     └── failed?  → "Failed to add the bill.", state unchanged          │
//! │                                                                         │
//! │  3. RESET      "Bill added successfully!", form cleared,               │
//! │                bill-count snapshot advanced by one                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{error, info, warn};

use rch_db::BillingStore;

use crate::error::{ApiError, Notification};
use crate::state::BillingFormState;

pub const BILL_ADDED: &str = "Bill added successfully!";
pub const BILL_FAILED: &str = "Failed to add the bill.";

/// Mounts the form, taking the bill-count snapshot used for ids.
pub async fn open_billing_form(store: &dyn BillingStore) -> Result<BillingFormState, ApiError> {
    let count = store.count().await.map_err(|e| {
        error!("Error fetching bill count: {}", e);
        ApiError::from(e)
    })?;

    Ok(BillingFormState::mounted(count))
}

/// Applies one input change by field name.
pub fn update_field(
    state: &BillingFormState,
    name: &str,
    value: &str,
) -> Result<BillingFormState, ApiError> {
    let form = state.form.with_named_field(name, value)?;
    Ok(state.with_form(form))
}

/// Result of a submit attempt.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    #[serde(skip)]
    pub state: BillingFormState,
    /// Bill id of the stored record, on success.
    pub bill_id: Option<String>,
    pub notification: Notification,
}

/// Validates and stores the bill.
pub async fn submit_bill(
    store: &dyn BillingStore,
    state: &BillingFormState,
    today: NaiveDate,
) -> SubmitOutcome {
    let bill_id = state.next_bill_id(today);

    let record = match state.form.to_new_record(bill_id.clone()) {
        Ok(record) => record,
        Err(e) => {
            warn!(bill_id = %bill_id, "Bill rejected: {}", e);
            return SubmitOutcome {
                state: state.clone(),
                bill_id: None,
                notification: Notification::error(ApiError::from(e).message),
            };
        }
    };

    match store.insert(&record).await {
        Ok(id) => {
            info!(id = %id, bill_id = %bill_id, total = %record.total, "Bill added");
            SubmitOutcome {
                state: state.submitted(),
                bill_id: Some(bill_id),
                notification: Notification::success(BILL_ADDED),
            }
        }
        Err(e) => {
            error!(bill_id = %bill_id, "Error adding bill: {}", e);
            SubmitOutcome {
                state: state.clone(),
                bill_id: None,
                notification: Notification::error(BILL_FAILED),
            }
        }
    }
}
