//! Printable layout builder
//!
//! Deterministically maps persisted records onto fixed-layout grids ready
//! for rendering: real rows first, blank padding up to a minimum row count,
//! and category checklists that always enumerate the full fixed vocabulary.

pub mod grid;
pub mod labels;

pub use grid::{PrintGrid, GridRow, Checklist, pad_rows, requisition_grid, backlog_grid};
pub use labels::{
    ChecklistEntry, normalize_code, checklist, COMPONENT_LABELS, PHASE_LABELS,
};
