//! Android adaptive-icon foreground composition.
//!
//! An adaptive icon layer spans 108x108 dp. The launcher masks its outer
//! edge, so the artwork has to sit inside a centered safe zone of
//! `inner_units` dp (90 by default) with a transparent margin around it.
//! Both the inner size and the margin are truncated to whole pixels.

use std::path::Path;

use super::{Border, RenderError, TRANSPARENT_WHITE, VectorRenderer};
use crate::slot::SizePx;

/// Full adaptive-icon canvas in dp.
pub const CANVAS_UNITS: u32 = 108;

/// Default safe-zone size in dp.
pub const DEFAULT_INNER_UNITS: u32 = 90;

/// Pixel layout of an adaptive-icon foreground for one canvas size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdaptiveIconGeometry {
    pub canvas: SizePx,
    /// Size the vector source is rendered at.
    pub icon: SizePx,
    /// `floor(width * (108 - inner) / 108)`, the total horizontal margin.
    pub border_width: u32,
    /// Margin per edge; always pads `icon` back out to exactly `canvas`.
    pub border: Border,
}

impl AdaptiveIconGeometry {
    pub fn for_canvas(canvas: SizePx, inner_units: u32) -> Self {
        let scale = |length: u32, units: u32| (length as u64 * units as u64 / CANVAS_UNITS as u64) as u32;

        let icon = SizePx::new(
            scale(canvas.width, inner_units),
            scale(canvas.height, inner_units),
        );
        let border_width = scale(canvas.width, CANVAS_UNITS - inner_units);

        // Split the margin left by the inner rendition across opposite edges.
        // Truncation may leave an odd pixel, which goes right / bottom.
        let horizontal = canvas.width - icon.width;
        let vertical = canvas.height - icon.height;
        let border = Border {
            left: horizontal / 2,
            top: vertical / 2,
            right: horizontal - horizontal / 2,
            bottom: vertical - vertical / 2,
        };

        Self {
            canvas,
            icon,
            border_width,
            border,
        }
    }
}

/// Renders a vector into an adaptive-icon foreground slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdaptiveIconComposer {
    inner_units: u32,
}

impl Default for AdaptiveIconComposer {
    fn default() -> Self {
        Self::new(DEFAULT_INNER_UNITS)
    }
}

impl AdaptiveIconComposer {
    /// Creates a composer with a custom safe-zone size, clamped to 1..=108.
    pub fn new(inner_units: u32) -> Self {
        Self {
            inner_units: inner_units.clamp(1, CANVAS_UNITS),
        }
    }

    pub fn geometry(&self, canvas: SizePx) -> AdaptiveIconGeometry {
        AdaptiveIconGeometry::for_canvas(canvas, self.inner_units)
    }

    /// Renders `source` at the safe-zone size into `destination`, then pads
    /// it with transparent white up to `canvas`.
    pub fn compose<R: VectorRenderer + ?Sized>(
        &self,
        renderer: &R,
        source: &Path,
        canvas: SizePx,
        destination: &Path,
    ) -> Result<AdaptiveIconGeometry, RenderError> {
        let geometry = self.geometry(canvas);
        if !geometry.icon.is_positive() {
            return Err(RenderError::InvalidSize { size: geometry.icon });
        }

        renderer.render(source, geometry.icon, destination)?;
        renderer.add_border(destination, geometry.border, TRANSPARENT_WHITE)?;
        Ok(geometry)
    }
}
