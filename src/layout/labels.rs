//! Category and phase vocabularies
//!
//! Records store category membership as normalized uppercase tokens. The
//! printable checklists enumerate the full fixed label set and mark the
//! entries whose normalized form appears among the record's codes.

use serde::{Deserialize, Serialize};

/// Fixed component checklist labels for backlog reports
pub const COMPONENT_LABELS: &[&str] = &[
    "Motor",
    "Transmisión",
    "Sist. Eléctrico",
    "Sist. Hidráulico",
    "Sist. de Enfriamiento",
    "Frenos",
    "Dirección",
    "Rodado",
    "Carrocería",
];

/// Fixed maintenance-phase checklist labels for backlog reports
pub const PHASE_LABELS: &[&str] = &[
    "Inspección",
    "Lubricación",
    "Ajuste",
    "Reparación",
    "Reemplazo",
    "Reconstrucción",
];

/// One entry of a printable checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    /// Display label, as printed
    pub label: String,
    /// Normalized code for this label
    pub code: String,
    /// Whether the record carries this code
    pub marked: bool,
}

/// Normalize a free-text label into its stored code form: uppercase,
/// Spanish diacritics stripped, spaces and periods collapsed to single
/// underscores. Idempotent.
pub fn normalize_code(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut last_was_sep = true;

    for c in label.trim().chars() {
        let c = match c.to_uppercase().next().unwrap_or(c) {
            'Á' => 'A',
            'É' => 'E',
            'Í' => 'I',
            'Ó' => 'O',
            'Ú' | 'Ü' => 'U',
            'Ñ' => 'N',
            other => other,
        };
        if c == ' ' || c == '.' || c == '_' {
            if !last_was_sep {
                out.push('_');
                last_was_sep = true;
            }
        } else {
            out.push(c);
            last_was_sep = false;
        }
    }

    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Build a checklist over the full `labels` vocabulary, marking the entries
/// whose normalized form appears in `codes`. Output order is declaration
/// order, regardless of which entries are marked.
pub fn checklist(labels: &[&str], codes: &[String]) -> Vec<ChecklistEntry> {
    labels
        .iter()
        .map(|label| {
            let code = normalize_code(label);
            let marked = codes.iter().any(|c| normalize_code(c) == code);
            ChecklistEntry {
                label: (*label).to_string(),
                code,
                marked,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_diacritics() {
        assert_eq!(normalize_code("Transmisión"), "TRANSMISION");
        assert_eq!(normalize_code("Inspección"), "INSPECCION");
        assert_eq!(normalize_code("Añejo"), "ANEJO");
    }

    #[test]
    fn test_normalize_example_from_form() {
        assert_eq!(normalize_code("Sist. Eléctrico"), "SIST_ELECTRICO");
        assert_eq!(normalize_code("Sist. de Enfriamiento"), "SIST_DE_ENFRIAMIENTO");
    }

    #[test]
    fn test_normalize_idempotent() {
        for label in COMPONENT_LABELS.iter().chain(PHASE_LABELS) {
            let once = normalize_code(label);
            assert_eq!(normalize_code(&once), once);
        }
        assert_eq!(normalize_code("SIST_ELECTRICO"), "SIST_ELECTRICO");
    }

    #[test]
    fn test_normalize_trims_separators() {
        assert_eq!(normalize_code("  Motor  "), "MOTOR");
        assert_eq!(normalize_code("Motor."), "MOTOR");
        assert_eq!(normalize_code(". Motor"), "MOTOR");
    }

    #[test]
    fn test_checklist_enumerates_full_vocabulary() {
        let codes = vec!["MOTOR".to_string(), "FRENOS".to_string()];
        let entries = checklist(COMPONENT_LABELS, &codes);

        assert_eq!(entries.len(), COMPONENT_LABELS.len());
        for (entry, label) in entries.iter().zip(COMPONENT_LABELS) {
            assert_eq!(entry.label, *label);
        }
        assert!(entries[0].marked); // Motor
        assert!(!entries[1].marked); // Transmisión
        assert!(entries.iter().filter(|e| e.marked).count() == 2);
    }

    #[test]
    fn test_checklist_marks_unnormalized_codes_too() {
        let codes = vec!["Sist. Eléctrico".to_string()];
        let entries = checklist(COMPONENT_LABELS, &codes);
        let electric = entries.iter().find(|e| e.code == "SIST_ELECTRICO").unwrap();
        assert!(electric.marked);
    }

    #[test]
    fn test_checklist_empty_codes() {
        let entries = checklist(PHASE_LABELS, &[]);
        assert_eq!(entries.len(), PHASE_LABELS.len());
        assert!(entries.iter().all(|e| !e.marked));
    }
}
