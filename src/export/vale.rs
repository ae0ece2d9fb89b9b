//! Exit voucher (vale de salida) export
//!
//! This path does not rasterize anything: a pure planner walks a vertical
//! cursor over the voucher record and emits absolute-position draw
//! operations (header, labeled field block, item rows at fixed column
//! offsets, signature rules), breaking to a new page whenever the cursor
//! passes the page threshold. A small genpdf element then replays one
//! planned page onto the PDF canvas.

use std::path::{Path, PathBuf};

use image::GenericImageView;

use crate::error::{DocError, Result};
use crate::records::ExitVoucher;
use crate::utils::{format_display_date, wrap_text};
use crate::{DESC_WRAP_CHARS, PAGE_BREAK_Y_MM};
use super::{load_fonts, stamped_filename, ExportOptions, ExportOutcome};

/// Company header text, also the fallback drawn when the logo fails to load
const COMPANY_NAME: &str = "SERVICIOS DE MANTENIMIENTO DE MAQUINARIA";

/// Fixed address lines under the title
const ADDRESS_LINES: &[&str] = &[
    "Av. de los Talleres 1200, Parque Industrial",
    "Tel. (81) 8000-0000",
];

const TITLE: &str = "VALE DE SALIDA DE ALMACÉN";

// Layout offsets, all in millimeters on an A4 portrait page
const LEFT_X: f64 = 15.0;
const RIGHT_X: f64 = 195.0;
const LOGO_X: f64 = 15.0;
const LOGO_Y: f64 = 12.0;
const LOGO_WIDTH: f64 = 40.0;
const TITLE_X: f64 = 70.0;
const TITLE_Y: f64 = 18.0;
const FIELDS_TOP_Y: f64 = 48.0;
const FIELD_VALUE_X: f64 = 50.0;
const FIELD_LINE_MM: f64 = 6.0;
const QTY_X: f64 = 15.0;
const PART_X: f64 = 35.0;
const DESC_X: f64 = 70.0;
const ROW_LINE_MM: f64 = 6.0;
const CONTINUE_TOP_Y: f64 = 20.0;
const SIGNATURE_GAP_MM: f64 = 18.0;

/// Recipient label used when neither a responsible party nor a requester
/// is recorded
const RECIPIENT_PLACEHOLDER: &str = "______________________";

/// One absolute-position drawing operation
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DrawOp {
    Text {
        x: f64,
        y: f64,
        size: u8,
        bold: bool,
        text: String,
    },
    Rule {
        x1: f64,
        x2: f64,
        y: f64,
    },
    Logo {
        x: f64,
        y: f64,
        width: f64,
    },
}

/// The draw operations of one page
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct PagePlan {
    pub ops: Vec<DrawOp>,
}

impl PagePlan {
    #[cfg(test)]
    pub(crate) fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn has_logo(&self) -> bool {
        self.ops.iter().any(|op| matches!(op, DrawOp::Logo { .. }))
    }
}

fn text(ops: &mut Vec<DrawOp>, x: f64, y: f64, size: u8, bold: bool, s: impl Into<String>) {
    ops.push(DrawOp::Text {
        x,
        y,
        size,
        bold,
        text: s.into(),
    });
}

/// Labeled header field: bold label at the left margin, value at the fixed
/// value column; advances the cursor one field line
fn field(ops: &mut Vec<DrawOp>, y: &mut f64, label: &str, value: &str) {
    text(ops, LEFT_X, *y, 10, true, label);
    text(ops, FIELD_VALUE_X, *y, 10, false, value);
    *y += FIELD_LINE_MM;
}

/// Quantity display: whole numbers lose the trailing `.0`
fn fmt_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{}", quantity as i64)
    } else {
        quantity.to_string()
    }
}

/// Name printed under the recipient signature rule: the responsible party,
/// falling back to the requester, falling back to a blank rule
fn recipient_name(vale: &ExitVoucher) -> String {
    let responsible = vale.responsible.as_deref().map(str::trim).unwrap_or("");
    if !responsible.is_empty() {
        return responsible.to_string();
    }
    let requester = vale.requester.trim();
    if !requester.is_empty() {
        return requester.to_string();
    }
    RECIPIENT_PLACEHOLDER.to_string()
}

/// Plan every page of the voucher.
///
/// `logo_available` selects between the logo image and the text fallback
/// in the header; asset failure never fails the export.
pub(crate) fn plan_vale(vale: &ExitVoucher, logo_available: bool) -> Vec<PagePlan> {
    let mut pages = Vec::new();
    let mut ops = Vec::new();

    // Header: logo or fallback text, title, address block
    if logo_available {
        ops.push(DrawOp::Logo {
            x: LOGO_X,
            y: LOGO_Y,
            width: LOGO_WIDTH,
        });
    } else {
        text(&mut ops, LOGO_X, LOGO_Y + 8.0, 10, true, COMPANY_NAME);
    }
    text(&mut ops, TITLE_X, TITLE_Y, 14, true, TITLE);
    for (i, line) in ADDRESS_LINES.iter().enumerate() {
        text(&mut ops, TITLE_X, TITLE_Y + 8.0 + i as f64 * 4.0, 8, false, *line);
    }

    // Labeled field block
    let mut y = FIELDS_TOP_Y;
    field(&mut ops, &mut y, "Folio:", &vale.id);
    field(&mut ops, &mut y, "Fecha:", &format_display_date(&vale.date));
    if let Some(project) = vale.project.as_deref().filter(|p| !p.trim().is_empty()) {
        field(&mut ops, &mut y, "Proyecto:", project);
    }
    if let Some(equipment) = vale.equipment.as_deref().filter(|e| !e.trim().is_empty()) {
        field(&mut ops, &mut y, "Equipo:", equipment);
    }
    field(&mut ops, &mut y, "Solicitante:", &vale.requester);
    if let Some(responsible) = vale.responsible.as_deref().filter(|r| !r.trim().is_empty()) {
        field(&mut ops, &mut y, "Responsable:", responsible);
    }

    // Item table header
    y += 4.0;
    text(&mut ops, QTY_X, y, 9, true, "CANT.");
    text(&mut ops, PART_X, y, 9, true, "NO. PIEZA");
    text(&mut ops, DESC_X, y, 9, true, "DESCRIPCIÓN");
    ops.push(DrawOp::Rule {
        x1: LEFT_X,
        x2: RIGHT_X,
        y: y + 2.0,
    });
    y += 8.0;

    // Item rows; the cursor advances by the wrapped-line count and a page
    // break is taken when it passes the threshold before the next row
    for product in &vale.products {
        if y > PAGE_BREAK_Y_MM {
            pages.push(PagePlan {
                ops: std::mem::take(&mut ops),
            });
            y = CONTINUE_TOP_Y;
        }

        text(&mut ops, QTY_X, y, 9, false, fmt_quantity(product.quantity));
        if let Some(part) = product.part_number.as_deref().filter(|p| !p.is_empty()) {
            text(&mut ops, PART_X, y, 9, false, part);
        }
        let lines = wrap_text(product.label(), DESC_WRAP_CHARS);
        for (i, line) in lines.iter().enumerate() {
            text(&mut ops, DESC_X, y + i as f64 * ROW_LINE_MM, 9, false, line.clone());
        }
        y += lines.len() as f64 * ROW_LINE_MM;
    }

    // Signature block, on a fresh page when the cursor is past the threshold
    if y > PAGE_BREAK_Y_MM {
        pages.push(PagePlan {
            ops: std::mem::take(&mut ops),
        });
        y = CONTINUE_TOP_Y;
    }
    y += SIGNATURE_GAP_MM;

    let segments: [(f64, f64, &str, Option<String>); 3] = [
        (20.0, 65.0, "Autorizó", None),
        (80.0, 125.0, "Almacén", None),
        (140.0, 185.0, "Recibió", Some(recipient_name(vale))),
    ];
    for (x1, x2, role, name) in segments {
        ops.push(DrawOp::Rule { x1, x2, y });
        text(&mut ops, x1 + 8.0, y + 5.0, 9, false, role);
        if let Some(name) = name {
            text(&mut ops, x1 + 8.0, y + 10.0, 9, false, name);
        }
    }

    pages.push(PagePlan { ops });
    pages
}

/// Load the voucher logo. Failure degrades to the text fallback in the
/// caller; it never fails the export.
fn load_logo(path: &Path) -> Result<image::DynamicImage> {
    let img = image::open(path).map_err(|e| DocError::AssetLoad(e.to_string()))?;
    Ok(image::DynamicImage::ImageRgb8(img.into_rgb8()))
}

/// genpdf element replaying one planned page
struct ValePage {
    ops: Vec<DrawOp>,
    logo: Option<image::DynamicImage>,
}

impl genpdf::Element for ValePage {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: genpdf::render::Area<'_>,
        style: genpdf::style::Style,
    ) -> std::result::Result<genpdf::RenderResult, genpdf::error::Error> {
        for op in &self.ops {
            match op {
                DrawOp::Text { x, y, size, bold, text } => {
                    let mut text_style = style.clone();
                    text_style.set_font_size(*size);
                    if *bold {
                        text_style.set_bold();
                    }
                    let _ = area.print_str(
                        &context.font_cache,
                        genpdf::Position::new(*x, *y),
                        text_style,
                        text.as_str(),
                    )?;
                }
                DrawOp::Rule { x1, x2, y } => {
                    area.draw_line(
                        vec![genpdf::Position::new(*x1, *y), genpdf::Position::new(*x2, *y)],
                        style.clone(),
                    );
                }
                DrawOp::Logo { x, y, width } => {
                    if let Some(logo) = &self.logo {
                        let dpi = f64::from(logo.width()) / (*width / 25.4);
                        let mut element = genpdf::elements::Image::from_dynamic_image(logo.clone())?
                            .with_position(genpdf::Position::new(*x, *y))
                            .with_dpi(dpi);
                        genpdf::Element::render(&mut element, context, area.clone(), style.clone())?;
                    }
                }
            }
        }

        Ok(genpdf::RenderResult {
            size: area.size(),
            has_more: false,
        })
    }
}

/// Export a voucher as `vale-salida-<id>-<ISO date>.pdf`
pub fn export_vale(vale: &ExitVoucher, options: &ExportOptions) -> ExportOutcome {
    match render_vale(vale, options) {
        Ok(path) => ExportOutcome::ok(path),
        Err(err) => ExportOutcome::failure(&err),
    }
}

fn render_vale(vale: &ExitVoucher, options: &ExportOptions) -> Result<PathBuf> {
    if vale.id.trim().is_empty() {
        return Err(DocError::InvalidRecord("el vale no tiene folio".to_string()));
    }

    let logo = match &options.logo_path {
        Some(path) => load_logo(path),
        None => Err(DocError::AssetLoad("logo path not configured".to_string())),
    };
    let (plans, logo_image) = match logo {
        Ok(img) => (plan_vale(vale, true), Some(img)),
        Err(_) => (plan_vale(vale, false), None),
    };

    let fonts = load_fonts(options.font_dir.as_deref())?;
    let mut doc = genpdf::Document::new(fonts);
    doc.set_title(format!("Vale de salida {}", vale.id));
    doc.set_paper_size(genpdf::PaperSize::A4);

    for (i, plan) in plans.into_iter().enumerate() {
        if i > 0 {
            doc.push(genpdf::elements::PageBreak::new());
        }
        let logo = if plan.ops.iter().any(|op| matches!(op, DrawOp::Logo { .. })) {
            logo_image.clone()
        } else {
            None
        };
        doc.push(ValePage { ops: plan.ops, logo });
    }

    let path = options
        .output_dir
        .join(stamped_filename(&format!("vale-salida-{}", vale.id)));
    doc.render_to_file(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::VoucherProduct;
    use chrono::NaiveDate;

    fn product(label: &str) -> VoucherProduct {
        VoucherProduct {
            quantity: 1.0,
            part_number: None,
            name: Some(label.to_string()),
            description: None,
        }
    }

    fn sample_vale(n_products: usize) -> ExitVoucher {
        ExitVoucher {
            id: "V-77".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
            project: Some("Obra Norte".to_string()),
            equipment: None,
            requester: "P. Cantú".to_string(),
            responsible: Some("G. Ortiz".to_string()),
            products: (0..n_products)
                .map(|i| product(&format!("Producto {i}")))
                .collect(),
        }
    }

    #[test]
    fn test_plan_single_page() {
        let plans = plan_vale(&sample_vale(5), false);
        assert_eq!(plans.len(), 1);

        let texts = plans[0].texts();
        assert!(texts.contains(&TITLE));
        assert!(texts.contains(&"Folio:"));
        assert!(texts.contains(&"V-77"));
        assert!(texts.contains(&"Proyecto:"));
        assert!(texts.contains(&"Producto 0"));
        assert!(texts.contains(&"Producto 4"));
    }

    #[test]
    fn test_plan_logo_fallback_text() {
        let plans = plan_vale(&sample_vale(1), false);
        assert!(!plans[0].has_logo());
        assert!(plans[0].texts().contains(&COMPANY_NAME));
    }

    #[test]
    fn test_plan_logo_op_when_available() {
        let plans = plan_vale(&sample_vale(1), true);
        assert!(plans[0].has_logo());
        assert!(!plans[0].texts().contains(&COMPANY_NAME));
    }

    #[test]
    fn test_plan_breaks_page_on_long_item_list() {
        let plans = plan_vale(&sample_vale(60), false);
        assert!(plans.len() >= 2, "60 rows must spill onto a second page");

        // Continuation pages restart at the top margin
        let first_row_y = plans[1]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { y, .. } => Some(*y),
                _ => None,
            })
            .fold(f64::MAX, f64::min);
        assert!((first_row_y - CONTINUE_TOP_Y).abs() < 1e-9);
    }

    #[test]
    fn test_plan_signature_block_on_last_page() {
        for n in [1, 60] {
            let plans = plan_vale(&sample_vale(n), false);
            let last = plans.last().unwrap();
            let texts = last.texts();
            assert!(texts.contains(&"Autorizó"));
            assert!(texts.contains(&"Almacén"));
            assert!(texts.contains(&"Recibió"));
            let rules = last
                .ops
                .iter()
                .filter(|op| matches!(op, DrawOp::Rule { .. }))
                .count();
            // Three signature rules (plus the table header rule on page 1)
            assert!(rules >= 3);
        }
    }

    #[test]
    fn test_plan_wrapped_description_advances_cursor() {
        let long = "Manguera hidráulica de alta presión con conexiones JIC de tres cuartos \
                    y recubrimiento trenzado para servicio pesado";
        let mut vale = sample_vale(0);
        vale.products = vec![product(long), product("Corto")];

        let plans = plan_vale(&vale, false);
        let desc_ys: Vec<f64> = plans[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                // Table column only; the title shares the same x offset but
                // uses a larger font
                DrawOp::Text { x, y, size: 9, .. } if *x == DESC_X => Some(*y),
                _ => None,
            })
            .collect();

        let wrapped_lines = wrap_text(long, DESC_WRAP_CHARS).len();
        assert!(wrapped_lines > 1);
        // Header row + wrapped lines + the second product's single line
        assert_eq!(desc_ys.len(), 1 + wrapped_lines + 1);

        // The second product starts below every wrapped line of the first
        let second_y = *desc_ys.last().unwrap();
        for y in &desc_ys[1..desc_ys.len() - 1] {
            assert!(second_y > *y);
        }
    }

    #[test]
    fn test_recipient_defaults() {
        let mut vale = sample_vale(1);
        assert_eq!(recipient_name(&vale), "G. Ortiz");

        vale.responsible = None;
        assert_eq!(recipient_name(&vale), "P. Cantú");

        vale.responsible = Some("   ".to_string());
        assert_eq!(recipient_name(&vale), "P. Cantú");

        vale.requester = String::new();
        assert_eq!(recipient_name(&vale), RECIPIENT_PLACEHOLDER);
    }

    #[test]
    fn test_fmt_quantity() {
        assert_eq!(fmt_quantity(2.0), "2");
        assert_eq!(fmt_quantity(2.5), "2.5");
        assert_eq!(fmt_quantity(0.0), "0");
    }

    #[test]
    fn test_plan_omits_blank_optional_fields() {
        let mut vale = sample_vale(1);
        vale.project = None;
        vale.responsible = None;
        let plans = plan_vale(&vale, false);
        let texts = plans[0].texts();
        assert!(!texts.contains(&"Proyecto:"));
        assert!(!texts.contains(&"Responsable:"));
        assert!(texts.contains(&"Solicitante:"));
    }

    #[test]
    fn test_plan_deterministic() {
        let vale = sample_vale(12);
        assert_eq!(plan_vale(&vale, false), plan_vale(&vale, false));
    }
}
