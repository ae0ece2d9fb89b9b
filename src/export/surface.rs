//! Renderable surfaces
//!
//! The rasterized export path reads a pre-rendered, normally hidden print
//! layout. A [`RenderSurface`] abstracts that layout; [`VisibleGuard`]
//! scopes the off-screen visibility override needed for rasterization and
//! restores the prior style unconditionally when dropped, so the surface is
//! left exactly as found on both the success and the failure path.

use std::collections::HashMap;

use image::RgbaImage;

use crate::error::Result;

/// Style state of a surface, saved and restored around rasterization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceStyle {
    pub display: String,
    pub visibility: String,
    pub position: String,
    pub left: String,
    pub top: String,
}

impl SurfaceStyle {
    /// The resting state of a print layout: present but not displayed
    pub fn hidden() -> Self {
        Self {
            display: "none".to_string(),
            visibility: "hidden".to_string(),
            position: "static".to_string(),
            left: "auto".to_string(),
            top: "auto".to_string(),
        }
    }

    /// Off-screen override applied while rasterizing: the surface must be
    /// laid out at its true dimensions, but not on screen
    pub fn render_visible() -> Self {
        Self {
            display: "block".to_string(),
            visibility: "visible".to_string(),
            position: "absolute".to_string(),
            left: "-10000px".to_string(),
            top: "0".to_string(),
        }
    }
}

/// A pre-rendered print layout that can report and mutate its style and
/// produce a raster of itself
pub trait RenderSurface {
    /// Current style state
    fn style(&self) -> SurfaceStyle;

    /// Replace the style state
    fn set_style(&mut self, style: SurfaceStyle);

    /// Rasterize the laid-out surface at the given pixel-density multiplier
    fn rasterize(&mut self, scale: u32) -> Result<RgbaImage>;
}

/// Scoped visibility override.
///
/// Acquiring the guard saves the surface's style and applies the
/// off-screen-visible override; dropping it restores the saved style. The
/// restore runs on every exit path, including rasterization failure.
pub struct VisibleGuard<'a> {
    surface: &'a mut dyn RenderSurface,
    saved: SurfaceStyle,
}

impl<'a> VisibleGuard<'a> {
    /// Save the current style and apply the render-visible override
    pub fn acquire(surface: &'a mut dyn RenderSurface) -> Self {
        let saved = surface.style();
        surface.set_style(SurfaceStyle::render_visible());
        Self { surface, saved }
    }

    /// Rasterize the surface while the override is held
    pub fn rasterize(&mut self, scale: u32) -> Result<RgbaImage> {
        self.surface.rasterize(scale)
    }
}

impl Drop for VisibleGuard<'_> {
    fn drop(&mut self) {
        self.surface.set_style(self.saved.clone());
    }
}

/// Registry of renderable surfaces, keyed by element id
#[derive(Default)]
pub struct SurfaceRegistry {
    surfaces: HashMap<String, Box<dyn RenderSurface>>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a surface under `id`, replacing any previous one
    pub fn register(&mut self, id: &str, surface: Box<dyn RenderSurface>) {
        self.surfaces.insert(id.to_string(), surface);
    }

    /// Look up a surface by id
    pub fn get_mut(&mut self, id: &str) -> Option<&mut (dyn RenderSurface + 'static)> {
        self.surfaces.get_mut(id).map(|s| s.as_mut())
    }

    /// Whether a surface is registered under `id`
    pub fn contains(&self, id: &str) -> bool {
        self.surfaces.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocError;

    /// Surface whose raster is a fixed-size white image
    pub(crate) struct FlatSurface {
        pub style: SurfaceStyle,
        pub width: u32,
        pub height: u32,
        pub raster_calls: u32,
    }

    impl FlatSurface {
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                style: SurfaceStyle::hidden(),
                width,
                height,
                raster_calls: 0,
            }
        }
    }

    impl RenderSurface for FlatSurface {
        fn style(&self) -> SurfaceStyle {
            self.style.clone()
        }

        fn set_style(&mut self, style: SurfaceStyle) {
            self.style = style;
        }

        fn rasterize(&mut self, scale: u32) -> Result<RgbaImage> {
            self.raster_calls += 1;
            Ok(RgbaImage::from_pixel(
                self.width * scale,
                self.height * scale,
                image::Rgba([255, 255, 255, 255]),
            ))
        }
    }

    /// Surface whose rasterization always fails
    pub(crate) struct BrokenSurface {
        pub style: SurfaceStyle,
    }

    impl RenderSurface for BrokenSurface {
        fn style(&self) -> SurfaceStyle {
            self.style.clone()
        }

        fn set_style(&mut self, style: SurfaceStyle) {
            self.style = style;
        }

        fn rasterize(&mut self, _scale: u32) -> Result<RgbaImage> {
            Err(DocError::Render("paint did not settle".to_string()))
        }
    }

    #[test]
    fn test_guard_applies_override_while_held() {
        let mut surface = FlatSurface::new(10, 10);
        {
            let _guard = VisibleGuard::acquire(&mut surface);
        }
        // Restored after drop
        assert_eq!(surface.style, SurfaceStyle::hidden());
    }

    #[test]
    fn test_guard_override_visible_during_raster() {
        let mut surface = FlatSurface::new(10, 10);
        {
            let mut guard = VisibleGuard::acquire(&mut surface);
            let raster = guard.rasterize(2).unwrap();
            assert_eq!(raster.width(), 20);
        }
        assert_eq!(surface.raster_calls, 1);
        assert_eq!(surface.style, SurfaceStyle::hidden());
    }

    #[test]
    fn test_guard_restores_on_raster_failure() {
        let mut surface = BrokenSurface {
            style: SurfaceStyle::hidden(),
        };
        let result = {
            let mut guard = VisibleGuard::acquire(&mut surface);
            assert_eq!(surface_style_of(&guard), SurfaceStyle::render_visible());
            guard.rasterize(2)
        };
        assert!(result.is_err());
        assert_eq!(surface.style, SurfaceStyle::hidden());
    }

    fn surface_style_of(guard: &VisibleGuard<'_>) -> SurfaceStyle {
        guard.surface.style()
    }

    #[test]
    fn test_guard_restores_nondefault_prior_style() {
        let mut surface = FlatSurface::new(5, 5);
        let mut custom = SurfaceStyle::hidden();
        custom.position = "relative".to_string();
        custom.left = "12px".to_string();
        surface.style = custom.clone();

        {
            let _guard = VisibleGuard::acquire(&mut surface);
        }
        assert_eq!(surface.style, custom);
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = SurfaceRegistry::new();
        registry.register("vista", Box::new(FlatSurface::new(4, 4)));

        assert!(registry.contains("vista"));
        assert!(registry.get_mut("vista").is_some());
        assert!(registry.get_mut("otra").is_none());
    }
}
