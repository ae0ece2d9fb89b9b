//! Fixed print grids
//!
//! Grid construction is deterministic and order-preserving: real rows come
//! first in insertion order, then blank padding rows up to the minimum row
//! count.

use serde::{Deserialize, Serialize};

use crate::MIN_GRID_ROWS;
use crate::records::{BacklogReport, Requisition, RequisitionItems};
use crate::utils::{format_display_date, format_money};
use super::labels::{checklist, ChecklistEntry, COMPONENT_LABELS, PHASE_LABELS};

/// One body row of a print grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRow {
    pub cells: Vec<String>,
}

impl GridRow {
    /// A row of `width` empty cells
    pub fn blank(width: usize) -> Self {
        Self {
            cells: vec![String::new(); width],
        }
    }

    /// True when every cell is empty
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }
}

/// A labeled checklist section on a printed report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    pub section: String,
    pub entries: Vec<ChecklistEntry>,
}

/// Fixed-layout table structure ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintGrid {
    /// Document title line
    pub title: String,
    /// Labeled header fields, print order
    pub header_fields: Vec<(String, String)>,
    /// Column headings
    pub columns: Vec<String>,
    /// Body rows, real rows first, then blank padding
    pub rows: Vec<GridRow>,
    /// Checklist sections (backlog reports only)
    pub checklists: Vec<Checklist>,
    /// Labeled totals, print order
    pub totals: Vec<(String, String)>,
}

/// Pad `rows` with blank rows of `width` cells up to `min_rows`.
/// Output length is `max(rows.len(), min_rows)`.
pub fn pad_rows(mut rows: Vec<GridRow>, width: usize, min_rows: usize) -> Vec<GridRow> {
    while rows.len() < min_rows {
        rows.push(GridRow::blank(width));
    }
    rows
}

/// Column headings for a requisition item flavor
fn requisition_columns(items: &RequisitionItems) -> Vec<String> {
    let columns: &[&str] = match items {
        RequisitionItems::Refacciones(_) => &[
            "No. Parte", "Descripción", "Cantidad", "Unidad", "Precio Unitario", "Importe",
        ],
        RequisitionItems::Insumos(_) => &[
            "Descripción", "Cantidad", "Unidad", "Precio Unitario", "Importe",
        ],
        RequisitionItems::Filtros(_) => &[
            "No. Parte", "Equipo", "Cantidad", "Precio Unitario", "Importe",
        ],
    };
    columns.iter().map(|c| (*c).to_string()).collect()
}

/// Body rows for a requisition item payload, one per line, insertion order
fn requisition_rows(items: &RequisitionItems) -> Vec<GridRow> {
    match items {
        RequisitionItems::Refacciones(lines) => lines
            .iter()
            .map(|l| GridRow {
                cells: vec![
                    l.part_number.clone(),
                    l.description.clone(),
                    l.quantity.to_string(),
                    l.unit.to_string(),
                    format_money(l.unit_price),
                    format_money(l.total),
                ],
            })
            .collect(),
        RequisitionItems::Insumos(lines) => lines
            .iter()
            .map(|l| GridRow {
                cells: vec![
                    l.description.clone(),
                    l.quantity.to_string(),
                    l.unit.to_string(),
                    format_money(l.unit_price),
                    format_money(l.total),
                ],
            })
            .collect(),
        RequisitionItems::Filtros(lines) => lines
            .iter()
            .map(|l| GridRow {
                cells: vec![
                    l.part_number.clone(),
                    l.equipment.clone(),
                    l.quantity.to_string(),
                    format_money(l.unit_price),
                    format_money(l.total),
                ],
            })
            .collect(),
    }
}

/// Build the printable grid for a purchase requisition
pub fn requisition_grid(record: &Requisition) -> PrintGrid {
    let columns = requisition_columns(&record.items);
    let width = columns.len();
    let rows = pad_rows(requisition_rows(&record.items), width, MIN_GRID_ROWS);

    let mut header_fields = vec![
        ("Folio".to_string(), record.folio.clone()),
        ("Fecha".to_string(), format_display_date(&record.date)),
        ("Solicitante".to_string(), record.requester.clone()),
        ("Departamento".to_string(), record.department.clone()),
    ];
    if let Some(comments) = &record.comments {
        header_fields.push(("Comentarios".to_string(), comments.clone()));
    }

    let subtotal: f64 = match &record.items {
        RequisitionItems::Refacciones(lines) => lines.iter().map(|l| l.subtotal).sum(),
        RequisitionItems::Insumos(lines) => lines.iter().map(|l| l.subtotal).sum(),
        RequisitionItems::Filtros(lines) => lines.iter().map(|l| l.subtotal).sum(),
    };
    let tax: f64 = match &record.items {
        RequisitionItems::Refacciones(lines) => lines.iter().map(|l| l.tax).sum(),
        RequisitionItems::Insumos(lines) => lines.iter().map(|l| l.tax).sum(),
        RequisitionItems::Filtros(lines) => lines.iter().map(|l| l.tax).sum(),
    };

    PrintGrid {
        title: format!("REQUISICIÓN DE COMPRA — {}", record.items.kind_label()),
        header_fields,
        columns,
        rows,
        checklists: Vec::new(),
        totals: vec![
            ("Subtotal".to_string(), format_money(subtotal)),
            ("IVA".to_string(), format_money(tax)),
            ("Total".to_string(), format_money(record.total)),
        ],
    }
}

/// Build the printable grid for a backlog report, including the component
/// and phase checklists
pub fn backlog_grid(record: &BacklogReport) -> PrintGrid {
    let columns: Vec<String> = ["Descripción del trabajo", "Prioridad", "Horas estimadas"]
        .iter()
        .map(|c| (*c).to_string())
        .collect();
    let width = columns.len();

    let rows: Vec<GridRow> = record
        .work_items
        .iter()
        .map(|item| GridRow {
            cells: vec![
                item.description.clone(),
                item.priority.clone().unwrap_or_default(),
                item.hours.map(|h| h.to_string()).unwrap_or_default(),
            ],
        })
        .collect();

    PrintGrid {
        title: "REPORTE DE BACKLOG".to_string(),
        header_fields: vec![
            ("Folio".to_string(), record.folio.clone()),
            ("Fecha".to_string(), format_display_date(&record.date)),
            ("Equipo".to_string(), record.equipment.clone()),
            ("Solicitante".to_string(), record.requester.clone()),
        ],
        columns,
        rows: pad_rows(rows, width, MIN_GRID_ROWS),
        checklists: vec![
            Checklist {
                section: "Componentes".to_string(),
                entries: checklist(COMPONENT_LABELS, &record.component_codes),
            },
            Checklist {
                section: "Fases".to_string(),
                entries: checklist(PHASE_LABELS, &record.phase_codes),
            },
        ],
        totals: Vec::new(),
    }
}
