//! Requisition draft
//!
//! A draft is created empty (one blank line) or hydrated from a persisted
//! record when editing, and is bundled whole into one outbound record on
//! submit. Nothing is persisted partially.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::records::{
    FilterLine, Requisition, RequisitionItems, RequisitionKind, SparePartLine, SupplyLine,
};
use super::lines::{parse_amount, LineItem};

/// In-memory state of the requisition editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequisitionDraft {
    pub folio: String,
    pub date: NaiveDate,
    pub requester: String,
    pub department: String,
    pub comments: String,
    pub kind: RequisitionKind,
    pub items: Vec<LineItem>,
}

impl RequisitionDraft {
    /// Create an empty draft dated today, with a single blank line
    pub fn new(folio: &str) -> Self {
        Self {
            folio: folio.to_string(),
            date: Local::now().date_naive(),
            requester: String::new(),
            department: String::new(),
            comments: String::new(),
            kind: RequisitionKind::Refacciones,
            items: vec![LineItem::blank()],
        }
    }

    /// Rebuild editor state from a persisted record
    pub fn hydrate(record: &Requisition) -> Self {
        let items: Vec<LineItem> = match &record.items {
            RequisitionItems::Refacciones(lines) => lines
                .iter()
                .map(|l| {
                    let mut item = LineItem::blank();
                    item.part_number = l.part_number.clone();
                    item.description = l.description.clone();
                    item.quantity = edit_text(l.quantity);
                    item.unit = l.unit;
                    item.unit_price = edit_text(l.unit_price);
                    item.recompute();
                    item
                })
                .collect(),
            RequisitionItems::Insumos(lines) => lines
                .iter()
                .map(|l| {
                    let mut item = LineItem::blank();
                    item.description = l.description.clone();
                    item.quantity = edit_text(l.quantity);
                    item.unit = l.unit;
                    item.unit_price = edit_text(l.unit_price);
                    item.recompute();
                    item
                })
                .collect(),
            RequisitionItems::Filtros(lines) => lines
                .iter()
                .map(|l| {
                    let mut item = LineItem::blank();
                    item.part_number = l.part_number.clone();
                    item.description = l.equipment.clone();
                    item.quantity = edit_text(l.quantity);
                    item.unit_price = edit_text(l.unit_price);
                    item.recompute();
                    item
                })
                .collect(),
        };

        let mut draft = Self::new(&record.folio);
        draft.date = record.date;
        draft.requester = record.requester.clone();
        draft.department = record.department.clone();
        draft.comments = record.comments.clone().unwrap_or_default();
        draft.kind = record.items.kind();
        if !items.is_empty() {
            draft.items = items;
        }
        draft
    }

    /// Bundle the whole draft plus the computed grand total into one
    /// outbound record
    pub fn submit(&self) -> Requisition {
        let items = match self.kind {
            RequisitionKind::Refacciones => RequisitionItems::Refacciones(
                self.items.iter().map(|item| SparePartLine {
                    part_number: item.part_number.clone(),
                    description: item.description.clone(),
                    quantity: parse_amount(&item.quantity),
                    unit: item.unit,
                    unit_price: parse_amount(&item.unit_price),
                    subtotal: item.subtotal,
                    tax: item.tax,
                    total: item.total,
                }).collect(),
            ),
            RequisitionKind::Insumos => RequisitionItems::Insumos(
                self.items.iter().map(|item| SupplyLine {
                    description: item.description.clone(),
                    quantity: parse_amount(&item.quantity),
                    unit: item.unit,
                    unit_price: parse_amount(&item.unit_price),
                    subtotal: item.subtotal,
                    tax: item.tax,
                    total: item.total,
                }).collect(),
            ),
            RequisitionKind::Filtros => RequisitionItems::Filtros(
                self.items.iter().map(|item| FilterLine {
                    part_number: item.part_number.clone(),
                    equipment: item.description.clone(),
                    quantity: parse_amount(&item.quantity),
                    unit_price: parse_amount(&item.unit_price),
                    subtotal: item.subtotal,
                    tax: item.tax,
                    total: item.total,
                }).collect(),
            ),
        };

        Requisition {
            folio: self.folio.clone(),
            date: self.date,
            requester: self.requester.clone(),
            department: self.department.clone(),
            comments: if self.comments.is_empty() {
                None
            } else {
                Some(self.comments.clone())
            },
            items,
            total: self.grand_total(),
        }
    }
}

/// Render a stored numeric value back into field text; whole numbers lose
/// the trailing `.0` so the user edits what they typed
fn edit_text(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
