//! Rasterization of a mounted surface into one tall RGB bitmap.
//!
//! # Pipeline
//! layout → image sources inlined as PNG data URLs → SVG → usvg tree → resvg render
//! at `scale` on an opaque white pixmap → `image::RgbImage`.

use std::path::Path;
use std::sync::Arc;

use image::RgbImage;
use resvg::tiny_skia::{Color as SkiaColor, Pixmap, Transform};
use tracing::{debug, info, warn};

use crate::export::photo;
use crate::export::ExportError;
use crate::surface::layout::{layout, Paint};
use crate::surface::node::Node;
use crate::surface::svg::to_svg;

/// Largest bitmap width accepted, in pixels.
pub const MAX_BITMAP_WIDTH: u32 = 8_192;
/// Largest bitmap height accepted, in pixels.
pub const MAX_BITMAP_HEIGHT: u32 = 65_535;

/// Turns a surface into pixels. Implementations are CPU-bound and synchronous.
pub trait SurfaceRasterizer: Send + Sync {
    fn rasterize(&self, surface: &Node, scale: f32) -> Result<RgbImage, ExportError>;
}

/// Default rasterizer backed by usvg/resvg.
pub struct SvgRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl SvgRasterizer {
    /// Loads system fonts plus any `.ttf`/`.otf`/`.ttc` files in `font_dir`.
    pub fn new(font_dir: Option<&Path>) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        if let Some(dir) = font_dir {
            load_fonts_from_dir(&mut db, dir);
        }
        info!(faces = db.len(), "Font database ready for rasterization");
        Self {
            fontdb: Arc::new(db),
        }
    }
}

impl SurfaceRasterizer for SvgRasterizer {
    fn rasterize(&self, surface: &Node, scale: f32) -> Result<RgbImage, ExportError> {
        if surface.is_empty() {
            return Err(ExportError::RenderFailure("surface has no content".to_string()));
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ExportError::RenderFailure(format!("invalid scale {scale}")));
        }

        let mut laid_out = layout(surface, 0.0);
        for paint in &mut laid_out.paints {
            if let Paint::Image { href, .. } = paint {
                *href = photo::inline_png(href)
                    .map_err(|e| ExportError::RenderFailure(format!("image cannot be sampled: {e}")))?;
            }
        }

        let (width, height) = bitmap_size(laid_out.width, laid_out.height, scale)?;
        let svg = to_svg(&laid_out);

        let options = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &options)
            .map_err(|e| ExportError::RenderFailure(format!("svg parse failed: {e}")))?;

        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            ExportError::RenderFailure(format!("failed to allocate {width}x{height} pixmap"))
        })?;
        pixmap.fill(SkiaColor::WHITE);
        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

        debug!(width, height, scale, "Rasterized surface");
        Ok(pixmap_to_rgb(&pixmap))
    }
}

/// Pixel dimensions of the bitmap, checked against the allowed range.
pub fn bitmap_size(width: f32, height: f32, scale: f32) -> Result<(u32, u32), ExportError> {
    let w = (width * scale).ceil();
    let h = (height * scale).ceil();
    if !(w.is_finite() && h.is_finite()) || w < 1.0 || h < 1.0 {
        return Err(ExportError::RenderFailure(format!(
            "surface has zero size ({width}x{height})"
        )));
    }
    if w > MAX_BITMAP_WIDTH as f32 || h > MAX_BITMAP_HEIGHT as f32 {
        return Err(ExportError::RenderFailure(format!(
            "bitmap {w}x{h} exceeds {MAX_BITMAP_WIDTH}x{MAX_BITMAP_HEIGHT}"
        )));
    }
    Ok((w as u32, h as u32))
}

/// Drops alpha. The pixmap starts opaque white, so every pixel is fully opaque and the
/// premultiplied channels equal the straight ones.
fn pixmap_to_rgb(pixmap: &Pixmap) -> RgbImage {
    let rgb: Vec<u8> = pixmap
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    RgbImage::from_raw(pixmap.width(), pixmap.height(), rgb)
        .unwrap_or_else(|| RgbImage::new(pixmap.width(), pixmap.height()))
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        warn!(dir = %dir.display(), "FONT_DIR is not readable; using system fonts only");
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        if matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc") {
            if let Err(e) = db.load_font_file(&path) {
                warn!(path = %path.display(), "Skipping font file: {e}");
            }
        }
    }
}
