//! # Dashboard Commands
//!
//! Loads the most recent bills by check-in date and summarizes them.
//! The totals cover only the fetched page, not the whole collection.

use serde::Serialize;
use tracing::{debug, error};
use ts_rs::TS;

use rch_core::{DashboardSummary, InvoiceRow};
use rch_db::{BillingStore, Direction, OrderBy};

use super::Route;

pub const LOAD_FAILED: &str = "Failed to load invoices. Please try again.";
pub const LOADING_MESSAGE: &str = "Loading invoices...";
pub const EMPTY_MESSAGE: &str = "No invoices found.";

/// Everything the dashboard screen renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardView {
    pub summary: DashboardSummary,
    /// Recent invoices table.
    pub rows: Vec<InvoiceRow>,
    pub loading: bool,
    /// Error banner text.
    pub error: Option<String>,
    pub menu_open: bool,
}

impl DashboardView {
    /// Initial state while the fetch is in flight.
    pub fn loading() -> Self {
        DashboardView {
            summary: DashboardSummary::default(),
            rows: Vec::new(),
            loading: true,
            error: None,
            menu_open: false,
        }
    }

    /// Placeholder row text, when the table has no data rows to show.
    pub fn table_message(&self) -> Option<&'static str> {
        if self.loading {
            Some(LOADING_MESSAGE)
        } else if self.rows.is_empty() {
            Some(EMPTY_MESSAGE)
        } else {
            None
        }
    }

    pub fn toggle_menu(&self) -> Self {
        DashboardView {
            menu_open: !self.menu_open,
            ..self.clone()
        }
    }
}

/// Fetches the latest `page_size` bills and computes the summary cards.
///
/// A failed fetch yields an error banner with zeroed counters; loading
/// is cleared either way.
pub async fn load_dashboard(store: &dyn BillingStore, page_size: u32) -> DashboardView {
    match store
        .list(OrderBy::CheckInDate, Direction::Desc, page_size)
        .await
    {
        Ok(records) => {
            let summary = DashboardSummary::from_records(&records);
            debug!(count = summary.invoice_count, "Dashboard loaded");

            DashboardView {
                summary,
                rows: records.iter().map(InvoiceRow::from).collect(),
                loading: false,
                error: None,
                menu_open: false,
            }
        }
        Err(e) => {
            error!("Error fetching invoices: {}", e);
            DashboardView {
                loading: false,
                error: Some(LOAD_FAILED.to_string()),
                ..DashboardView::loading()
            }
        }
    }
}

/// Entries of the dashboard's navigation menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Home,
    BillingForm,
    Invoice,
    Logout,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [
        MenuItem::Home,
        MenuItem::BillingForm,
        MenuItem::Invoice,
        MenuItem::Logout,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Home => "Home",
            MenuItem::BillingForm => "Billing Form",
            MenuItem::Invoice => "Invoice",
            MenuItem::Logout => "Logout",
        }
    }

    /// Where the entry navigates. `Logout` goes through
    /// [`super::login::logout`] instead.
    pub fn route(&self) -> Option<Route> {
        match self {
            MenuItem::Home => Some(Route::Login),
            MenuItem::BillingForm => Some(Route::BillingForm),
            MenuItem::Invoice => Some(Route::Invoice),
            MenuItem::Logout => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_message() {
        let view = DashboardView::loading();
        assert_eq!(view.table_message(), Some(LOADING_MESSAGE));

        let loaded = DashboardView {
            loading: false,
            ..view
        };
        assert_eq!(loaded.table_message(), Some(EMPTY_MESSAGE));
    }

    #[test]
    fn test_toggle_menu() {
        let view = DashboardView::loading();
        let opened = view.toggle_menu();
        assert!(opened.menu_open);
        assert!(!opened.toggle_menu().menu_open);
        assert!(!view.menu_open);
    }

    #[test]
    fn test_menu_routes() {
        assert_eq!(MenuItem::Home.route(), Some(Route::Login));
        assert_eq!(MenuItem::BillingForm.route(), Some(Route::BillingForm));
        assert_eq!(MenuItem::Invoice.route(), Some(Route::Invoice));
        assert_eq!(MenuItem::Logout.route(), None);
    }
}
