//! Rendering primitives consumed by the engine.
//!
//! The engine never rasterizes vectors itself. It drives a [`VectorRenderer`],
//! which supplies four file-to-file operations:
//!
//! - exact-fit rendering of a vector to a given pixel size,
//! - aspect-preserving render that covers the target and crops the overflow,
//! - padding an existing raster with a solid border,
//! - flattening an existing raster onto an opaque background.
//!
//! [`ResvgRenderer`] implements them with resvg and the `image` crate. The
//! adaptive-icon composition and strategy selection built on top of these
//! primitives live in [`adaptive`] and [`policy`].

pub mod adaptive;
pub mod policy;
pub mod svg;

pub use adaptive::{AdaptiveIconComposer, AdaptiveIconGeometry};
pub use policy::RenderStrategy;
pub use svg::ResvgRenderer;

use std::path::{Path, PathBuf};

use image::Rgba;
use thiserror::Error;

use crate::slot::SizePx;

/// Errors raised by a [`VectorRenderer`].
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse vector source {}", path.display())]
    Svg {
        path: PathBuf,
        #[source]
        source: resvg::usvg::Error,
    },

    #[error("cannot read or write raster {}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid target size {size}")]
    InvalidSize { size: SizePx },
}

/// Per-edge border widths in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Border {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Border {
    /// The same width on all four edges.
    pub fn uniform(width: u32) -> Self {
        Self {
            left: width,
            top: width,
            right: width,
            bottom: width,
        }
    }

    /// Size of an image of `inner` size after padding.
    pub fn outer_size(&self, inner: SizePx) -> SizePx {
        SizePx::new(
            inner.width + self.left + self.right,
            inner.height + self.top + self.bottom,
        )
    }
}

/// Fully transparent white, the fill of the adaptive-icon safe zone.
pub const TRANSPARENT_WHITE: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Vector-to-raster capability the engine depends on.
///
/// All operations write or rewrite a file in place and must produce exactly
/// the requested pixel dimensions.
pub trait VectorRenderer {
    /// Renders `source` to `destination` at exactly `size`, stretching if the
    /// aspect ratios differ.
    fn render(&self, source: &Path, size: SizePx, destination: &Path) -> Result<(), RenderError>;

    /// Renders `source` preserving its aspect ratio so that it covers `size`,
    /// then crops the overflow on the longer axis.
    fn render_cropped(
        &self,
        source: &Path,
        size: SizePx,
        destination: &Path,
    ) -> Result<(), RenderError>;

    /// Pads the raster at `destination` with `border`, filled with `color`.
    fn add_border(&self, destination: &Path, border: Border, color: Rgba<u8>)
    -> Result<(), RenderError>;

    /// Flattens the raster at `destination` onto an opaque background and
    /// drops its alpha channel.
    fn remove_alpha(&self, destination: &Path) -> Result<(), RenderError>;
}

impl<R: VectorRenderer + ?Sized> VectorRenderer for &R {
    fn render(&self, source: &Path, size: SizePx, destination: &Path) -> Result<(), RenderError> {
        (**self).render(source, size, destination)
    }

    fn render_cropped(
        &self,
        source: &Path,
        size: SizePx,
        destination: &Path,
    ) -> Result<(), RenderError> {
        (**self).render_cropped(source, size, destination)
    }

    fn add_border(&self, destination: &Path, border: Border, color: Rgba<u8>)
    -> Result<(), RenderError> {
        (**self).add_border(destination, border, color)
    }

    fn remove_alpha(&self, destination: &Path) -> Result<(), RenderError> {
        (**self).remove_alpha(destination)
    }
}
