//! Rasterized export
//!
//! Converts a renderable surface into a paginated PDF: the surface is
//! rasterized at 2x density while a scoped visibility override is held,
//! the raster is sliced into successive A4-proportioned page crops, and
//! each crop is drawn full-width on its own page.

use std::path::PathBuf;

use crate::error::{DocError, Result};
use crate::{A4_HEIGHT_MM, A4_WIDTH_MM, RASTER_SCALE};
use super::surface::{RenderSurface, SurfaceRegistry, VisibleGuard};
use super::{load_fonts, stamped_filename, ExportOptions, ExportOutcome};

/// One page-sized horizontal slice of a raster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSlice {
    /// Vertical pixel offset of the slice within the raster; drawing the
    /// full image at `-offset_px` paints this slice at the page top
    pub offset_px: u32,
    /// Slice height in pixels; the last slice may be shorter
    pub height_px: u32,
}

/// Page height, in pixels, of an A4 page rendered at the raster's width
fn page_height_px(width: u32) -> u32 {
    ((width as f64) * A4_HEIGHT_MM / A4_WIDTH_MM).round().max(1.0) as u32
}

/// Slice a `width` x `height` raster into successive A4-proportioned pages.
///
/// Slices cover the raster exactly: an image whose height divides the page
/// height evenly produces no trailing blank page.
pub fn paginate(width: u32, height: u32) -> Vec<PageSlice> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let page_height = page_height_px(width);
    let mut slices = Vec::new();
    let mut offset = 0;
    while offset < height {
        let height_px = page_height.min(height - offset);
        slices.push(PageSlice { offset_px: offset, height_px });
        offset += height_px;
    }
    slices
}

/// Export the surface registered under `element_id` as a paginated PDF
/// named `<prefix>-<ISO date>.pdf`.
///
/// A missing id aborts with a failure outcome before anything is written;
/// any later failure also produces a failure outcome, with the surface's
/// style already restored by the guard.
pub fn export_from_element(
    registry: &mut SurfaceRegistry,
    element_id: &str,
    prefix: &str,
    options: &ExportOptions,
) -> ExportOutcome {
    let Some(surface) = registry.get_mut(element_id) else {
        return ExportOutcome::failure(&DocError::ElementNotFound(element_id.to_string()));
    };

    match render_surface_pdf(surface, prefix, options) {
        Ok(path) => ExportOutcome::ok(path),
        Err(err) => ExportOutcome::failure(&err),
    }
}

fn render_surface_pdf(
    surface: &mut dyn RenderSurface,
    prefix: &str,
    options: &ExportOptions,
) -> Result<PathBuf> {
    let raster = {
        let mut guard = VisibleGuard::acquire(surface);
        guard.rasterize(RASTER_SCALE)?
        // guard drops here, restoring the surface style on both paths
    };

    let slices = paginate(raster.width(), raster.height());
    if slices.is_empty() {
        return Err(DocError::Render("surface produced an empty raster".to_string()));
    }

    let fonts = load_fonts(options.font_dir.as_deref())?;
    let mut doc = genpdf::Document::new(fonts);
    doc.set_title(prefix);
    doc.set_paper_size(genpdf::PaperSize::A4);

    // Full-width placement: the image's dpi is chosen so its pixel width
    // maps exactly onto the A4 page width
    let dpi = raster.width() as f64 / (A4_WIDTH_MM / 25.4);

    for (i, slice) in slices.iter().enumerate() {
        if i > 0 {
            doc.push(genpdf::elements::PageBreak::new());
        }
        let crop = image::imageops::crop_imm(
            &raster,
            0,
            slice.offset_px,
            raster.width(),
            slice.height_px,
        )
        .to_image();
        let page_image = image::DynamicImage::ImageRgb8(
            image::DynamicImage::ImageRgba8(crop).into_rgb8(),
        );
        doc.push(genpdf::elements::Image::from_dynamic_image(page_image)?.with_dpi(dpi));
    }

    let path = options.output_dir.join(stamped_filename(prefix));
    doc.render_to_file(&path)?;
    Ok(path)
}
