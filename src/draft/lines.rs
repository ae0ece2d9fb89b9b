//! Line-item operations
//!
//! The derived monetary fields of a line are always a pure function of its
//! quantity and unit price. Quantity and price are kept as the raw entered
//! text so a field may be blank mid-edit; blank or malformed input counts
//! as zero for the derived computation and never errors.

use serde::{Deserialize, Serialize};

use crate::IVA_RATE;
use crate::records::Unit;
use super::requisition::RequisitionDraft;

/// One editable requisition line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Part or product number
    pub part_number: String,
    /// Free-text description (for filter lines this holds the machine)
    pub description: String,
    /// Quantity as entered; blank allowed mid-edit
    pub quantity: String,
    /// Measurement unit
    pub unit: Unit,
    /// Unit price as entered; blank allowed mid-edit
    pub unit_price: String,
    /// Derived: quantity × unit price
    pub subtotal: f64,
    /// Derived: subtotal × the fixed VAT rate
    pub tax: f64,
    /// Derived: subtotal + tax
    pub total: f64,
}

impl LineItem {
    /// Create a blank line with zeroed derived fields
    pub fn blank() -> Self {
        Self {
            part_number: String::new(),
            description: String::new(),
            quantity: String::new(),
            unit: Unit::default(),
            unit_price: String::new(),
            subtotal: 0.0,
            tax: 0.0,
            total: 0.0,
        }
    }

    /// Recompute subtotal, tax and total from the current quantity and
    /// unit price text
    pub fn recompute(&mut self) {
        let quantity = parse_amount(&self.quantity);
        let price = parse_amount(&self.unit_price);
        self.subtotal = quantity * price;
        self.tax = self.subtotal * IVA_RATE;
        self.total = self.subtotal + self.tax;
    }
}

/// Editable fields of a line item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineField {
    PartNumber,
    Description,
    Quantity,
    Unit,
    UnitPrice,
}

/// Parse a monetary/quantity field, coercing blank or malformed input to 0
pub fn parse_amount(s: &str) -> f64 {
    s.trim().parse::<f64>().unwrap_or(0.0)
}

impl RequisitionDraft {
    /// Replace one field of the line at `index`.
    ///
    /// Edits to quantity or unit price recompute the derived fields of that
    /// line only. An unknown unit token or an out-of-range index leaves the
    /// draft unchanged.
    pub fn update_line(&mut self, index: usize, field: LineField, value: &str) {
        let Some(line) = self.items.get_mut(index) else {
            return;
        };

        match field {
            LineField::PartNumber => line.part_number = value.to_string(),
            LineField::Description => line.description = value.to_string(),
            LineField::Quantity => {
                line.quantity = value.to_string();
                line.recompute();
            }
            LineField::Unit => {
                if let Some(unit) = Unit::parse(value) {
                    line.unit = unit;
                }
            }
            LineField::UnitPrice => {
                line.unit_price = value.to_string();
                line.recompute();
            }
        }
    }

    /// Append a blank line
    pub fn add_line(&mut self) {
        self.items.push(LineItem::blank());
    }

    /// Remove the line at `index`; a no-op when only one line remains or
    /// the index is out of range
    pub fn remove_line(&mut self, index: usize) {
        if self.items.len() <= 1 || index >= self.items.len() {
            return;
        }
        self.items.remove(index);
    }

    /// Sum of line totals, recomputed from the current lines on every call
    pub fn grand_total(&self) -> f64 {
        self.items.iter().map(|line| line.total).sum()
    }
}
