//! Requisition editor state
//!
//! This module provides the in-memory draft a requisition form edits:
//! a header plus an ordered list of line items whose monetary fields are
//! recomputed on every edit.

pub mod requisition;
pub mod lines;

pub use requisition::RequisitionDraft;
pub use lines::{LineItem, LineField, parse_amount};
pub use crate::records::Unit;
