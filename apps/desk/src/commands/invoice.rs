//! # Invoice Commands
//!
//! The invoice viewer lists bills newest-id first. Selecting a row builds
//! the computed [`InvoiceDocument`], from which the modal, the print view
//! and the PDF are all rendered.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, info};
use ts_rs::TS;

use rch_core::invoice::render_print_html;
use rch_core::{
    BillingRecord, CoreError, HotelLetterhead, InvoiceDocument, InvoiceModal, InvoiceRow,
};
use rch_db::{BillingStore, Direction, OrderBy};

use super::dashboard::{EMPTY_MESSAGE, LOADING_MESSAGE, LOAD_FAILED};
use crate::error::{ApiError, Notification};
use crate::pdf;

/// The open invoice: its computed document and the modal built from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SelectedInvoice {
    pub document: InvoiceDocument,
    pub modal: InvoiceModal,
}

/// State of the invoice viewer screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceListView {
    /// Fetched records, kept so a selection can be rendered.
    pub records: Vec<BillingRecord>,
    pub rows: Vec<InvoiceRow>,
    pub loading: bool,
    pub selected: Option<SelectedInvoice>,
    pub notification: Option<Notification>,
}

impl InvoiceListView {
    pub fn loading() -> Self {
        InvoiceListView {
            records: Vec::new(),
            rows: Vec::new(),
            loading: true,
            selected: None,
            notification: None,
        }
    }

    pub fn table_message(&self) -> Option<&'static str> {
        if self.loading {
            Some(LOADING_MESSAGE)
        } else if self.rows.is_empty() {
            Some(EMPTY_MESSAGE)
        } else {
            None
        }
    }

    fn find(&self, bill_id: &str) -> Result<&BillingRecord, CoreError> {
        self.records
            .iter()
            .find(|record| record.bill_id == bill_id)
            .ok_or_else(|| CoreError::InvoiceNotFound(bill_id.to_string()))
    }
}

/// Fetches up to `page_size` bills ordered by bill id, descending.
pub async fn load_invoices(store: &dyn BillingStore, page_size: u32) -> InvoiceListView {
    match store.list(OrderBy::BillId, Direction::Desc, page_size).await {
        Ok(records) => {
            debug!(count = records.len(), "Invoices loaded");
            InvoiceListView {
                rows: records.iter().map(InvoiceRow::from).collect(),
                records,
                loading: false,
                selected: None,
                notification: None,
            }
        }
        Err(e) => {
            error!("Error fetching invoices: {}", e);
            InvoiceListView {
                loading: false,
                notification: Some(Notification::error(LOAD_FAILED)),
                ..InvoiceListView::loading()
            }
        }
    }
}

/// Opens the detail modal for `bill_id`.
///
/// Only bills in the fetched listing can be selected.
pub fn select_invoice(view: &InvoiceListView, bill_id: &str) -> Result<InvoiceListView, ApiError> {
    let record = view.find(bill_id)?;
    let document = InvoiceDocument::from_record(record);
    let modal = InvoiceModal::from_document(&document);

    Ok(InvoiceListView {
        selected: Some(SelectedInvoice { document, modal }),
        ..view.clone()
    })
}

pub fn close_invoice(view: &InvoiceListView) -> InvoiceListView {
    InvoiceListView {
        selected: None,
        ..view.clone()
    }
}

/// Writes the printable HTML view as `{bill_id}_invoice.html`.
pub fn print_invoice(invoice: &InvoiceDocument, out_dir: &Path) -> Result<PathBuf, ApiError> {
    let path = out_dir.join(format!("{}.html", invoice.file_stem()));

    let html = render_print_html(invoice).map_err(|e| {
        error!(bill_id = %invoice.bill_id, "Error rendering print view: {}", e);
        ApiError::export(format!("Failed to render print view: {}", e))
    })?;

    std::fs::create_dir_all(out_dir)
        .and_then(|()| std::fs::write(&path, html))
        .map_err(|e| {
            error!(bill_id = %invoice.bill_id, ?path, "Error writing print view: {}", e);
            ApiError::export(format!("Failed to write print view: {}", e))
        })?;

    info!(bill_id = %invoice.bill_id, ?path, "Print view written");
    Ok(path)
}

/// Renders the A4 PDF as `{bill_id}_invoice.pdf`. A missing or unreadable
/// logo aborts the export and nothing is written.
pub fn export_pdf(
    invoice: &InvoiceDocument,
    letterhead: &HotelLetterhead,
    logo_path: &Path,
    out_dir: &Path,
) -> Result<PathBuf, ApiError> {
    pdf::export_invoice_pdf(invoice, letterhead, logo_path, out_dir)
        .map_err(|e| ApiError::export(e.to_string()))
}
