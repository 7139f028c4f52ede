//! [`VectorRenderer`] implementation on resvg and the `image` crate.

use std::path::Path;
use std::sync::Arc;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{self, Options, Tree};

use super::{Border, RenderError, VectorRenderer};
use crate::slot::SizePx;

/// Background used when flattening transparency away.
pub const FLATTEN_BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Renders SVG sources with resvg and writes PNG files.
#[derive(Debug, Clone, Default)]
pub struct ResvgRenderer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl ResvgRenderer {
    /// A renderer without fonts; `<text>` elements render as nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// A renderer that can draw text using the fonts installed on the system.
    pub fn with_system_fonts() -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        Self {
            fontdb: Arc::new(fontdb),
        }
    }

    fn load_tree(&self, source: &Path) -> Result<Tree, RenderError> {
        let data = std::fs::read(source).map_err(|e| RenderError::Io {
            path: source.to_path_buf(),
            source: e,
        })?;

        let mut options = Options::default();
        options.resources_dir = source.parent().map(Path::to_path_buf);
        options.fontdb = Arc::clone(&self.fontdb);

        Tree::from_data(&data, &options).map_err(|e| RenderError::Svg {
            path: source.to_path_buf(),
            source: e,
        })
    }

    /// Renders `tree` into a pixmap of `size` with the given transform.
    fn rasterize(tree: &Tree, size: SizePx, transform: Transform) -> Result<RgbaImage, RenderError> {
        let mut pixmap =
            Pixmap::new(size.width, size.height).ok_or(RenderError::InvalidSize { size })?;
        resvg::render(tree, transform, &mut pixmap.as_mut());
        Ok(pixmap_to_rgba_image(&pixmap))
    }
}

impl VectorRenderer for ResvgRenderer {
    fn render(&self, source: &Path, size: SizePx, destination: &Path) -> Result<(), RenderError> {
        let tree = self.load_tree(source)?;
        let svg_size = tree.size();

        let transform = Transform::from_scale(
            size.width as f32 / svg_size.width(),
            size.height as f32 / svg_size.height(),
        );
        let image = Self::rasterize(&tree, size, transform)?;
        save_png(DynamicImage::ImageRgba8(image), destination)
    }

    fn render_cropped(
        &self,
        source: &Path,
        size: SizePx,
        destination: &Path,
    ) -> Result<(), RenderError> {
        let tree = self.load_tree(source)?;
        let svg_size = tree.size();

        // Cover the target, then center the overflow outside the pixmap.
        let scale = (size.width as f32 / svg_size.width())
            .max(size.height as f32 / svg_size.height());
        let dx = (size.width as f32 - svg_size.width() * scale) / 2.0;
        let dy = (size.height as f32 - svg_size.height() * scale) / 2.0;

        let transform = Transform::from_row(scale, 0.0, 0.0, scale, dx, dy);
        let image = Self::rasterize(&tree, size, transform)?;
        save_png(DynamicImage::ImageRgba8(image), destination)
    }

    fn add_border(&self, destination: &Path, border: Border, color: Rgba<u8>)
    -> Result<(), RenderError> {
        let inner = open_rgba(destination)?;
        let outer = border.outer_size(SizePx::new(inner.width(), inner.height()));

        let mut canvas = RgbaImage::from_pixel(outer.width, outer.height, color);
        image::imageops::replace(&mut canvas, &inner, border.left as i64, border.top as i64);
        save_png(DynamicImage::ImageRgba8(canvas), destination)
    }

    fn remove_alpha(&self, destination: &Path) -> Result<(), RenderError> {
        let image = open_rgba(destination)?;
        let flattened = flatten_onto(&image, FLATTEN_BACKGROUND);
        save_png(DynamicImage::ImageRgb8(flattened), destination)
    }
}

fn open_rgba(path: &Path) -> Result<RgbaImage, RenderError> {
    image::open(path)
        .map(|image| image.to_rgba8())
        .map_err(|e| RenderError::Image {
            path: path.to_path_buf(),
            source: e,
        })
}

fn save_png(image: DynamicImage, path: &Path) -> Result<(), RenderError> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| RenderError::Image {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Composites every pixel over an opaque background color.
fn flatten_onto(image: &RgbaImage, background: Rgb<u8>) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let alpha = a as u32;
        let blend = |c: u8, bg: u8| ((c as u32 * alpha + bg as u32 * (255 - alpha) + 127) / 255) as u8;
        Rgb([
            blend(r, background[0]),
            blend(g, background[1]),
            blend(b, background[2]),
        ])
    })
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    RgbaImage::from_fn(pixmap.width(), pixmap.height(), |x, y| {
        let index = (y * pixmap.width() + x) as usize;
        let pixel = pixmap.pixels()[index];
        // tiny_skia uses premultiplied alpha, we need to unpremultiply
        let (r, g, b, a) = unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
        Rgba([r, g, b, a])
    })
}

/// Unpremultiplies a premultiplied alpha pixel.
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
