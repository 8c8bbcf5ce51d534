//! # Invoice PDF Export
//!
//! Renders an [`InvoiceDocument`] onto a single A4 page with the fixed
//! hotel letterhead and writes `{bill_id}_invoice.pdf`.
//!
//! ## Page Layout (mm from the top edge)
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐  0
//! │ ████ band rgb(0,51,102) ████████████████████████████████████ │
//! │ [logo 30×30]  Right Choice Hotels          (18pt bold)       │  15
//! │               address / phone / email      (10pt)            │  22..37
//! │ ████████████████████████████████████████████████████████████ │  50
//! │                        Tax Invoice         (20pt bold)       │  60
//! │   ──────────────────────────────────────────────────────     │  65
//! │   Bill ID:          RCH05Mar01                               │  75
//! │   ...               (7 stay lines, 7mm apart)                │
//! │   Payment Mode:     Cash          (after a 14mm gap)         │
//! │   Payment Status:   Paid                                     │
//! │   ▓ Description                          Amount (Rs.) ▓      │
//! │     Room Charges                           Rs. 800.00        │
//! │     Extra Charges / CGST (6%) / SGST (6%)  (10mm apart)      │
//! │   ░ Total Amount                          Rs. 1120.00 ░      │
//! │                                                              │
//! │              Thank you for staying with us!                  │  280
//! └──────────────────────────────────────────────────────────────┘  297
//! ```
//!
//! The builtin PDF fonts only cover WinAnsi, so amounts print as
//! `Rs. 1120.00` instead of using the rupee sign.
//!
//! If the logo can't be read or decoded the export is aborted: the
//! error is logged and no file is written.

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::image_crate::{self, DynamicImage, GenericImageView};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfLayerReference, Point, Rect, Rgb,
};
use thiserror::Error;
use tracing::{error, info};

use rch_core::{HotelLetterhead, InvoiceDocument, Money};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;

const BAND_HEIGHT: f32 = 50.0;
const LOGO_SIZE: f32 = 30.0;
const LOGO_DPI: f32 = 300.0;

const TABLE_LEFT: f32 = 20.0;
const TABLE_WIDTH: f32 = 170.0;
const TEXT_LEFT: f32 = 25.0;
const AMOUNT_RIGHT: f32 = 175.0;
const VALUE_OFFSET: f32 = 50.0;

const PT_TO_MM: f32 = 0.352_778;

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to read logo {path}: {source}")]
    LogoRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to decode logo {path}: {reason}")]
    LogoDecode { path: PathBuf, reason: String },

    #[error("Failed to render PDF: {0}")]
    Render(String),

    #[error("Failed to write PDF: {0}")]
    Write(#[from] std::io::Error),
}

// =============================================================================
// Export
// =============================================================================

/// Reads and decodes the letterhead logo.
pub fn load_logo(path: &Path) -> Result<DynamicImage, PdfError> {
    let bytes = std::fs::read(path).map_err(|source| PdfError::LogoRead {
        path: path.to_path_buf(),
        source,
    })?;

    image_crate::load_from_memory(&bytes).map_err(|e| PdfError::LogoDecode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Renders the invoice and writes it into `out_dir`.
///
/// Returns the written file's path.
pub fn export_invoice_pdf(
    invoice: &InvoiceDocument,
    letterhead: &HotelLetterhead,
    logo_path: &Path,
    out_dir: &Path,
) -> Result<PathBuf, PdfError> {
    let logo = load_logo(logo_path).map_err(|e| {
        error!(bill_id = %invoice.bill_id, "Error loading logo image: {}", e);
        e
    })?;

    let bytes = render_invoice_pdf(invoice, letterhead, &logo)?;

    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(format!("{}.pdf", invoice.file_stem()));
    std::fs::write(&path, bytes)?;

    info!(bill_id = %invoice.bill_id, ?path, "Invoice PDF written");
    Ok(path)
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders the A4 invoice to PDF bytes.
pub fn render_invoice_pdf(
    invoice: &InvoiceDocument,
    letterhead: &HotelLetterhead,
    logo: &DynamicImage,
) -> Result<Vec<u8>, PdfError> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Invoice {}", invoice.bill_id),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let layer = doc.get_page(page).get_layer(layer);

    let font = |builtin| {
        doc.add_builtin_font(builtin)
            .map_err(|e| PdfError::Render(e.to_string()))
    };
    let fonts = Fonts {
        regular: font(BuiltinFont::Helvetica)?,
        bold: font(BuiltinFont::HelveticaBold)?,
        italic: font(BuiltinFont::HelveticaOblique)?,
    };

    draw_letterhead(&layer, &fonts, letterhead, logo);

    // Title and divider
    layer.set_fill_color(gray(0));
    text_centered(&layer, &fonts.bold, "Tax Invoice", 20.0, PAGE_WIDTH / 2.0, 60.0);

    layer.set_outline_color(brand_blue());
    layer.set_outline_thickness(1.4);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(TABLE_LEFT), top(65.0)), false),
            (Point::new(Mm(TABLE_LEFT + TABLE_WIDTH), top(65.0)), false),
        ],
        is_closed: false,
    });

    // Bill metadata: stay details, a wider gap, then payment
    let mut y = 75.0 - 7.0;
    for (group, fields) in invoice.detail_groups().iter().enumerate() {
        for (i, field) in fields.iter().enumerate() {
            y += if group > 0 && i == 0 { 14.0 } else { 7.0 };
            layer.use_text(format!("{}:", field.label), 11.0, Mm(TABLE_LEFT), top(y), &fonts.bold);
            layer.use_text(
                field.value.as_str(),
                11.0,
                Mm(TABLE_LEFT + VALUE_OFFSET),
                top(y),
                &fonts.regular,
            );
        }
    }

    // Charges table header
    y += 15.0;
    fill_row(&layer, y, brand_blue());
    layer.set_fill_color(gray(255));
    layer.use_text("Description", 11.0, Mm(TEXT_LEFT), top(y + 7.0), &fonts.bold);
    text_right(&layer, &fonts.bold, "Amount (Rs.)", 11.0, AMOUNT_RIGHT, y + 7.0);

    // Charge rows
    y += 15.0;
    layer.set_fill_color(gray(0));
    for line in invoice.charge_lines() {
        layer.use_text(line.description.as_str(), 11.0, Mm(TEXT_LEFT), top(y), &fonts.regular);
        text_right(&layer, &fonts.regular, &amount(line.amount), 11.0, AMOUNT_RIGHT, y);
        y += 10.0;
    }

    // Total row
    fill_row(&layer, y, gray(240));
    layer.set_fill_color(gray(0));
    layer.use_text("Total Amount", 11.0, Mm(TEXT_LEFT), top(y + 7.0), &fonts.bold);
    text_right(&layer, &fonts.bold, &amount(invoice.total()), 11.0, AMOUNT_RIGHT, y + 7.0);

    // Footer
    layer.set_fill_color(gray(120));
    text_centered(
        &layer,
        &fonts.italic,
        "Thank you for staying with us!",
        10.0,
        PAGE_WIDTH / 2.0,
        280.0,
    );

    let mut writer = BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer)
        .map_err(|e| PdfError::Render(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| PdfError::Render(e.to_string()))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

fn draw_letterhead(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    letterhead: &HotelLetterhead,
    logo: &DynamicImage,
) {
    layer.set_fill_color(brand_blue());
    layer.add_rect(
        Rect::new(Mm(0.0), top(BAND_HEIGHT), Mm(PAGE_WIDTH), top(0.0)).with_mode(PaintMode::Fill),
    );

    // Scale the logo to a 30mm square whatever its pixel size
    let (width_px, height_px) = logo.dimensions();
    let natural_mm = |px: u32| px.max(1) as f32 / LOGO_DPI * 25.4;
    Image::from_dynamic_image(logo).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(10.0)),
            translate_y: Some(top(10.0 + LOGO_SIZE)),
            scale_x: Some(LOGO_SIZE / natural_mm(width_px)),
            scale_y: Some(LOGO_SIZE / natural_mm(height_px)),
            dpi: Some(LOGO_DPI),
            ..Default::default()
        },
    );

    layer.set_fill_color(gray(255));
    layer.use_text(letterhead.name.as_str(), 18.0, Mm(50.0), top(15.0), &fonts.bold);

    let mut y = 22.0;
    for line in letterhead.detail_lines() {
        layer.use_text(line, 10.0, Mm(50.0), top(y), &fonts.regular);
        y += 5.0;
    }
}

/// A 10mm full-width table row background starting `y` mm from the top.
fn fill_row(layer: &PdfLayerReference, y: f32, color: Color) {
    layer.set_fill_color(color);
    layer.add_rect(
        Rect::new(
            Mm(TABLE_LEFT),
            top(y + 10.0),
            Mm(TABLE_LEFT + TABLE_WIDTH),
            top(y),
        )
        .with_mode(PaintMode::Fill),
    );
}

// =============================================================================
// Helpers
// =============================================================================

/// Converts a distance from the top edge into PDF's bottom-up y.
fn top(mm_from_top: f32) -> Mm {
    Mm(PAGE_HEIGHT - mm_from_top)
}

fn amount(value: Money) -> String {
    format!("Rs. {}", value.fixed2())
}

fn brand_blue() -> Color {
    rgb(0, 51, 102)
}

fn gray(level: u8) -> Color {
    rgb(level, level, level)
}

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(Rgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    ))
}

/// Approximate Helvetica advance width in 1/1000 em.
///
/// printpdf can't measure builtin fonts, and only right/center aligned
/// labels and amounts go through this.
fn glyph_width(c: char) -> u32 {
    match c {
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '!' | '|' | '\'' | ' ' | 'I' => 278,
        'f' | 't' | '(' | ')' | 'r' | '-' => 333,
        's' | 'c' | 'k' | 'v' | 'x' | 'y' | 'z' => 500,
        'm' | 'M' => 833,
        'w' | 'C' | 'D' | 'H' | 'N' | 'R' | 'U' => 722,
        'W' => 944,
        'A'..='Z' => 667,
        _ => 556,
    }
}

fn text_width_mm(text: &str, size_pt: f32) -> f32 {
    let em: u32 = text.chars().map(glyph_width).sum();
    em as f32 / 1000.0 * size_pt * PT_TO_MM
}

fn text_right(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    size_pt: f32,
    right_mm: f32,
    y: f32,
) {
    let x = right_mm - text_width_mm(text, size_pt);
    layer.use_text(text, size_pt, Mm(x), top(y), font);
}

fn text_centered(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    size_pt: f32,
    center_mm: f32,
    y: f32,
) {
    let x = center_mm - text_width_mm(text, size_pt) / 2.0;
    layer.use_text(text, size_pt, Mm(x), top(y), font);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use printpdf::image_crate::{Rgb as Pixel, RgbImage};
    use rch_core::{NewBillingRecord, PaymentMode, PaymentStatus, RoomType};

    fn invoice() -> InvoiceDocument {
        let record = NewBillingRecord {
            bill_id: "RCH05Mar01".to_string(),
            guest_name: "Asha Raman".to_string(),
            mobile_number: "9876543210".to_string(),
            room_no: "204".to_string(),
            check_in_date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2025, 3, 6).unwrap(),
            room_type: RoomType::Double,
            room_charges: Money::from_rupees(800),
            extra_charges: Money::from_rupees(200),
            tax: Money::from_rupees(120),
            total: Money::from_rupees(1120),
            payment_status: PaymentStatus::Paid,
            payment_mode: PaymentMode::Cash,
        }
        .into_record("doc-1".to_string(), Utc::now());
        InvoiceDocument::from_record(&record)
    }

    fn write_logo(dir: &Path) -> PathBuf {
        let path = dir.join("logo.png");
        let image = RgbImage::from_pixel(60, 60, Pixel([0, 51, 102]));
        DynamicImage::ImageRgb8(image).save(&path).unwrap();
        path
    }

    #[test]
    fn test_render_produces_pdf() {
        let logo = DynamicImage::ImageRgb8(RgbImage::new(40, 40));
        let bytes = render_invoice_pdf(&invoice(), &HotelLetterhead::default(), &logo).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_export_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let logo = write_logo(dir.path());
        let out = dir.path().join("invoices");

        let path =
            export_invoice_pdf(&invoice(), &HotelLetterhead::default(), &logo, &out).unwrap();
        assert_eq!(path, out.join("RCH05Mar01_invoice.pdf"));
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_missing_logo_aborts_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.png");

        let err = export_invoice_pdf(&invoice(), &HotelLetterhead::default(), &missing, dir.path())
            .unwrap_err();
        assert!(matches!(err, PdfError::LogoRead { .. }));
        assert!(!dir.path().join("RCH05Mar01_invoice.pdf").exists());
    }

    #[test]
    fn test_corrupt_logo_aborts_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let corrupt = dir.path().join("logo.png");
        std::fs::write(&corrupt, b"not an image").unwrap();

        let err = export_invoice_pdf(&invoice(), &HotelLetterhead::default(), &corrupt, dir.path())
            .unwrap_err();
        assert!(matches!(err, PdfError::LogoDecode { .. }));
        assert!(!dir.path().join("RCH05Mar01_invoice.pdf").exists());
    }

    #[test]
    fn test_bundled_logo_decodes() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/logo.png");
        let logo = load_logo(&path).unwrap();
        assert_eq!((logo.width(), logo.height()), (64, 64));
    }

    #[test]
    fn test_amount_label() {
        assert_eq!(amount(Money::from_paise(112000)), "Rs. 1120.00");
        // Right-aligned columns need longer text to start further left
        assert!(text_width_mm("Rs. 1120.00", 11.0) > text_width_mm("Rs. 60.00", 11.0));
    }
}
