//! Persisted record types
//!
//! These are the records the back office stores and hands to the layout
//! builder and the export pipeline. Wire names are the Spanish field names
//! used at the JavaScript-shaped boundary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Measurement unit for requisition quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Unit {
    /// Pieces
    Pzas,
    /// Kilograms
    Kg,
    /// Liters
    Lts,
    /// Meters
    Mts,
}

impl Unit {
    /// Parse a unit token, case-insensitive. Returns `None` for anything
    /// outside the fixed vocabulary.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "PZAS" => Some(Unit::Pzas),
            "KG" => Some(Unit::Kg),
            "LTS" => Some(Unit::Lts),
            "MTS" => Some(Unit::Mts),
            _ => None,
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Pzas => write!(f, "PZAS"),
            Unit::Kg => write!(f, "KG"),
            Unit::Lts => write!(f, "LTS"),
            Unit::Mts => write!(f, "MTS"),
        }
    }
}

impl Default for Unit {
    fn default() -> Self {
        Unit::Pzas
    }
}

/// Spare-part requisition line (refacción)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparePartLine {
    #[serde(rename = "numeroParte")]
    pub part_number: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "cantidad")]
    pub quantity: f64,
    #[serde(rename = "unidad")]
    pub unit: Unit,
    #[serde(rename = "precioUnitario")]
    pub unit_price: f64,
    pub subtotal: f64,
    #[serde(rename = "iva")]
    pub tax: f64,
    #[serde(rename = "importe")]
    pub total: f64,
}

/// Consumable requisition line (insumo); no part number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyLine {
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "cantidad")]
    pub quantity: f64,
    #[serde(rename = "unidad")]
    pub unit: Unit,
    #[serde(rename = "precioUnitario")]
    pub unit_price: f64,
    pub subtotal: f64,
    #[serde(rename = "iva")]
    pub tax: f64,
    #[serde(rename = "importe")]
    pub total: f64,
}

/// Filter requisition line, tied to a specific machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterLine {
    #[serde(rename = "numeroParte")]
    pub part_number: String,
    #[serde(rename = "equipo")]
    pub equipment: String,
    #[serde(rename = "cantidad")]
    pub quantity: f64,
    #[serde(rename = "precioUnitario")]
    pub unit_price: f64,
    pub subtotal: f64,
    #[serde(rename = "iva")]
    pub tax: f64,
    #[serde(rename = "importe")]
    pub total: f64,
}

/// Requisition item flavor tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequisitionKind {
    Refacciones,
    Insumos,
    Filtros,
}

/// Requisition item payload, tagged by item flavor.
///
/// Each variant carries its own line type; code that needs the rows matches
/// exhaustively instead of probing duck-typed fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequisitionItems {
    Refacciones(Vec<SparePartLine>),
    Insumos(Vec<SupplyLine>),
    Filtros(Vec<FilterLine>),
}

impl RequisitionItems {
    /// Flavor tag for this payload
    pub fn kind(&self) -> RequisitionKind {
        match self {
            RequisitionItems::Refacciones(_) => RequisitionKind::Refacciones,
            RequisitionItems::Insumos(_) => RequisitionKind::Insumos,
            RequisitionItems::Filtros(_) => RequisitionKind::Filtros,
        }
    }

    /// Printable heading for this item flavor
    pub fn kind_label(&self) -> &'static str {
        match self {
            RequisitionItems::Refacciones(_) => "REFACCIONES",
            RequisitionItems::Insumos(_) => "INSUMOS",
            RequisitionItems::Filtros(_) => "FILTROS",
        }
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        match self {
            RequisitionItems::Refacciones(v) => v.len(),
            RequisitionItems::Insumos(v) => v.len(),
            RequisitionItems::Filtros(v) => v.len(),
        }
    }

    /// True when the payload has no lines
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of line totals
    pub fn grand_total(&self) -> f64 {
        match self {
            RequisitionItems::Refacciones(v) => v.iter().map(|l| l.total).sum(),
            RequisitionItems::Insumos(v) => v.iter().map(|l| l.total).sum(),
            RequisitionItems::Filtros(v) => v.iter().map(|l| l.total).sum(),
        }
    }
}

/// Persisted purchase requisition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requisition {
    pub folio: String,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "solicitante")]
    pub requester: String,
    #[serde(rename = "departamento")]
    pub department: String,
    #[serde(rename = "comentarios", default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(flatten)]
    pub items: RequisitionItems,
    pub total: f64,
}

/// One pending work item on a backlog report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "prioridad", default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(rename = "horas", default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
}

/// Maintenance-planning backlog report.
///
/// `component_codes` and `phase_codes` hold normalized uppercase tokens
/// (see [`crate::layout::normalize_code`]) matched against the fixed
/// checklist vocabularies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacklogReport {
    pub folio: String,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "equipo")]
    pub equipment: String,
    #[serde(rename = "solicitante")]
    pub requester: String,
    #[serde(rename = "trabajos")]
    pub work_items: Vec<WorkItem>,
    #[serde(rename = "componentes", default)]
    pub component_codes: Vec<String>,
    #[serde(rename = "fases", default)]
    pub phase_codes: Vec<String>,
}

/// One product on an exit voucher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoucherProduct {
    #[serde(rename = "cantidad")]
    pub quantity: f64,
    #[serde(rename = "numeroPieza", default, skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
    #[serde(rename = "nombre", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl VoucherProduct {
    /// Display label: `nombre` wins over `descripcion`
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.description.as_deref())
            .unwrap_or("")
    }
}

/// Exit voucher (vale de salida): items leaving inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitVoucher {
    pub id: String,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "proyecto", default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(rename = "equipo", default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    #[serde(rename = "solicitante")]
    pub requester: String,
    #[serde(rename = "responsable", default, skip_serializing_if = "Option::is_none")]
    pub responsible: Option<String>,
    #[serde(rename = "productos")]
    pub products: Vec<VoucherProduct>,
}
