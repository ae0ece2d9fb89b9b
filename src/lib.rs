//! # Maintenance Back-Office Core
//!
//! Core library for a maintenance/procurement back office: requisition
//! drafts with reactively derived totals, printable layout construction,
//! and PDF document export.
//!
//! ## Features
//!
//! - Requisition draft editing with derived subtotal/tax/total per line
//! - Fixed-grid printable layouts with blank-row padding and category
//!   checklists for backlog reports
//! - Rasterized PDF export: slice a rendered surface into A4 pages
//! - Structured PDF export: exit vouchers (vales de salida) drawn from a
//!   plain record, with wrapped item rows and a signature block
//!
//! ## Example
//!
//! ```no_run
//! use mttocore::RequisitionDraft;
//! use mttocore::draft::LineField;
//!
//! let mut draft = RequisitionDraft::new("REQ-0001");
//! draft.update_line(0, LineField::Quantity, "2");
//! draft.update_line(0, LineField::UnitPrice, "10");
//! assert_eq!(draft.grand_total(), 23.2);
//! ```

pub mod draft;
pub mod records;
pub mod layout;
pub mod export;
pub mod utils;
pub mod error;

// Re-export main types
pub use error::{DocError, Result};
pub use records::{
    Requisition, RequisitionItems, RequisitionKind, SparePartLine, SupplyLine, FilterLine,
    BacklogReport, WorkItem, ExitVoucher, VoucherProduct,
};
pub use draft::{RequisitionDraft, LineItem, LineField, Unit};
pub use layout::{PrintGrid, GridRow, ChecklistEntry, normalize_code};
pub use export::{ExportOutcome, ExportOptions, RenderSurface, SurfaceRegistry, SurfaceStyle};

/// Fixed VAT rate applied to every line subtotal (16%)
pub const IVA_RATE: f64 = 0.16;

/// Minimum number of body rows in a printable grid; short item lists are
/// padded with blank rows up to this count
pub const MIN_GRID_ROWS: usize = 15;

/// A4 portrait page width in millimeters
pub const A4_WIDTH_MM: f64 = 210.0;

/// A4 portrait page height in millimeters
pub const A4_HEIGHT_MM: f64 = 297.0;

/// Pixel density multiplier used when rasterizing a surface
pub const RASTER_SCALE: u32 = 2;

/// Vertical cursor threshold (mm) past which the vale renderer starts a
/// new page before drawing the next row or the signature block
pub const PAGE_BREAK_Y_MM: f64 = 250.0;

/// Column width, in characters, for wrapped item descriptions on a vale
pub const DESC_WRAP_CHARS: usize = 48;

/// Date format used in exported file names (ISO date, no time component)
pub const FILE_DATE_FORMAT: &str = "%Y-%m-%d";
