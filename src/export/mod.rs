//! Document export pipeline
//!
//! Two export modes produce downloadable PDF files: rasterizing a rendered
//! surface into sliced A4 pages, and drawing an exit voucher directly from
//! its record. Both modes normalize every internal failure into a uniform
//! [`ExportOutcome`]; no error escapes the export boundary.

pub mod surface;
pub mod raster;
pub mod vale;

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{DocError, Result};
use crate::FILE_DATE_FORMAT;

pub use surface::{RenderSurface, SurfaceRegistry, SurfaceStyle, VisibleGuard};
pub use raster::{export_from_element, paginate, PageSlice};
pub use vale::export_vale;

/// Uniform result of an export call: a success flag plus a human-readable
/// message, and the written file path on success
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub success: bool,
    pub message: String,
    pub file: Option<PathBuf>,
}

impl ExportOutcome {
    pub(crate) fn ok(file: PathBuf) -> Self {
        Self {
            success: true,
            message: "PDF generado correctamente".to_string(),
            file: Some(file),
        }
    }

    pub(crate) fn failure(err: &DocError) -> Self {
        let message = match err {
            DocError::ElementNotFound(id) => {
                format!("No se encontró el elemento de impresión: {id}")
            }
            _ => format!("No se pudo generar el PDF: {err}"),
        };
        Self {
            success: false,
            message,
            file: None,
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Directory the PDF file is written to
    pub output_dir: PathBuf,
    /// Directory holding the Liberation Sans family; when unset, well-known
    /// system font directories are probed
    pub font_dir: Option<PathBuf>,
    /// Path of the company logo drawn on vouchers; loading is best effort
    pub logo_path: Option<PathBuf>,
}

impl ExportOptions {
    /// Options writing into `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            font_dir: None,
            logo_path: None,
        }
    }
}

/// File name `<prefix>-<ISO date>.pdf`, stamped with the current date
pub(crate) fn stamped_filename(prefix: &str) -> String {
    format!("{}-{}.pdf", prefix, Local::now().format(FILE_DATE_FORMAT))
}

/// Locate a directory containing `LiberationSans-Regular.ttf`
pub fn find_font_dir() -> Option<PathBuf> {
    const CANDIDATES: &[&str] = &[
        "/usr/share/fonts/truetype/liberation",
        "/usr/share/fonts/truetype/liberation2",
        "/usr/share/fonts/liberation",
        "/usr/share/fonts/liberation-fonts",
        "/usr/share/fonts/TTF",
        "/usr/local/share/fonts/liberation",
    ];
    CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|dir| dir.join("LiberationSans-Regular.ttf").is_file())
}

/// Load the Liberation Sans family for PDF generation
pub(crate) fn load_fonts(font_dir: Option<&Path>) -> Result<genpdf::fonts::FontFamily<genpdf::fonts::FontData>> {
    let dir = match font_dir {
        Some(dir) => dir.to_path_buf(),
        None => find_font_dir().ok_or_else(|| {
            DocError::Render("no Liberation Sans font directory found".to_string())
        })?,
    };
    genpdf::fonts::from_files(&dir, "LiberationSans", None)
        .map_err(|e| DocError::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamped_filename_shape() {
        let name = stamped_filename("requisicion-REQ-1");
        assert!(name.starts_with("requisicion-REQ-1-"));
        assert!(name.ends_with(".pdf"));
        // prefix + "-YYYY-MM-DD.pdf"
        let stamp = &name["requisicion-REQ-1-".len()..name.len() - 4];
        assert_eq!(stamp.len(), 10);
        assert_eq!(stamp.chars().filter(|c| *c == '-').count(), 2);
    }

    #[test]
    fn test_outcome_failure_element_not_found() {
        let outcome =
            ExportOutcome::failure(&DocError::ElementNotFound("vista-requisicion".to_string()));
        assert!(!outcome.success);
        assert!(outcome.message.contains("vista-requisicion"));
        assert!(outcome.file.is_none());
    }

    #[test]
    fn test_outcome_failure_render() {
        let outcome = ExportOutcome::failure(&DocError::Render("sin fuente".to_string()));
        assert!(!outcome.success);
        assert!(outcome.message.contains("No se pudo generar el PDF"));
    }

    #[test]
    fn test_outcome_ok_carries_path() {
        let outcome = ExportOutcome::ok(PathBuf::from("/tmp/x.pdf"));
        assert!(outcome.success);
        assert_eq!(outcome.file.as_deref(), Some(Path::new("/tmp/x.pdf")));
    }
}
