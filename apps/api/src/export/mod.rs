// Document export: clone + normalize the surface, rasterize it, slice it into A4 bands,
// encode each band, assemble the PDF, deliver it once.
// The whole pipeline is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod encode;
pub mod filename;
pub mod handlers;
pub mod normalize;
pub mod paginate;
pub mod pdf;
pub mod photo;
pub mod raster;
pub mod sink;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::surface::Document;

pub use filename::derive_filename;
pub use paginate::{page_pixel_height, plan_bands, Band, PageSize};
pub use raster::{SurfaceRasterizer, SvgRasterizer};
pub use sink::{DownloadSink, MemorySink};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Surface '{0}' not found")]
    SurfaceNotFound(String),

    #[error("Rasterization failed: {0}")]
    RenderFailure(String),

    #[error("Page encoding failed: {0}")]
    EncodingFailure(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportSettings {
    /// Logical width of the normalized surface.
    pub surface_width: f32,
    pub padding: f32,
    /// Oversampling factor applied when rasterizing.
    pub scale: f32,
    pub page: PageSize,
    pub jpeg_quality: u8,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            surface_width: 800.0,
            padding: 40.0,
            scale: 2.0,
            page: PageSize::A4,
            jpeg_quality: 100,
        }
    }
}

/// What a successful export produced.
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub filename: String,
    pub bitmap_width: u32,
    pub bitmap_height: u32,
    pub page_pixel_height: u32,
    pub bands: Vec<Band>,
    pub bytes: usize,
}

impl ExportReport {
    pub fn page_count(&self) -> usize {
        self.bands.len()
    }
}

/// Exports the live surface `surface_id` of `doc` as a paginated PDF named `filename`.
///
/// The live surface is never touched: a clone is normalized and mounted off-screen for
/// the duration of the render, and unmounted on every exit path. `sink` receives the
/// document only after every page has been encoded.
pub fn export_to_document(
    doc: &mut Document,
    surface_id: &str,
    filename: &str,
    settings: &ExportSettings,
    rasterizer: &dyn SurfaceRasterizer,
    sink: &mut dyn DownloadSink,
) -> Result<ExportReport, ExportError> {
    let mut clone = doc
        .find_by_id(surface_id)
        .cloned()
        .ok_or_else(|| ExportError::SurfaceNotFound(surface_id.to_string()))?;
    normalize::normalize_surface(&mut clone, settings);

    let bitmap = {
        let mount = doc.mount_offscreen(clone);
        rasterizer.rasterize(mount.node(), settings.scale)?
    };
    let (bitmap_width, bitmap_height) = bitmap.dimensions();
    if bitmap_width == 0 || bitmap_height == 0 {
        return Err(ExportError::RenderFailure("rasterizer produced an empty bitmap".to_string()));
    }

    let page_px = page_pixel_height(bitmap_width, settings.page);
    let bands = plan_bands(bitmap_height, page_px);
    debug!(bitmap_width, bitmap_height, page_px, pages = bands.len(), "Planned bands");

    let encoded = bands
        .iter()
        .map(|band| encode::encode_band(&bitmap, *band, settings.jpeg_quality))
        .collect::<Result<Vec<_>, _>>()?;
    let bytes = pdf::assemble_pdf(&encoded, settings.page);

    let report = ExportReport {
        filename: filename.to_string(),
        bitmap_width,
        bitmap_height,
        page_pixel_height: page_px,
        bands,
        bytes: bytes.len(),
    };
    sink.deliver(filename, bytes);

    info!(filename, pages = report.page_count(), bytes = report.bytes, "Export complete");
    Ok(report)
}


#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use image::RgbImage;

    use super::testing::{FailingRasterizer, FixedRasterizer};
    use super::*;
    use crate::models::record::{Experience, ResumeRecord};
    use crate::surface::node::Node;
    use crate::templates::{render_preview, PREVIEW_SURFACE_ID};

    fn name_and_email() -> ResumeRecord {
        let mut record = ResumeRecord::default();
        record.personal_info.full_name = "Ada Lovelace".to_string();
        record.personal_info.email = "ada@example.com".to_string();
        record
    }

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle.as_bytes())
    }

    #[test]
    fn test_missing_surface_is_not_found_and_not_delivered() {
        let mut doc = render_preview(&name_and_email());
        let mut sink = MemorySink::default();
        let rasterizer = FixedRasterizer { width: 100, height: 100 };
        let err = export_to_document(
            &mut doc,
            "nope",
            "x.pdf",
            &ExportSettings::default(),
            &rasterizer,
            &mut sink,
        )
        .unwrap_err();
        assert!(matches!(err, ExportError::SurfaceNotFound(id) if id == "nope"));
        assert_eq!(sink.deliveries, 0);
    }

    #[test]
    fn test_render_failure_delivers_nothing_and_unmounts() {
        let mut doc = render_preview(&name_and_email());
        let mut sink = MemorySink::default();
        let err = export_to_document(
            &mut doc,
            PREVIEW_SURFACE_ID,
            "ada-lovelace.pdf",
            &ExportSettings::default(),
            &FailingRasterizer,
            &mut sink,
        )
        .unwrap_err();
        assert!(matches!(err, ExportError::RenderFailure(_)));
        assert_eq!(sink.deliveries, 0);
        assert!(sink.delivered.is_none());
        assert_eq!(doc.offscreen_count(), 0);
    }

    #[test]
    fn test_live_surface_is_unchanged() {
        let mut doc = render_preview(&name_and_email());
        let before = doc.clone();
        let mut sink = MemorySink::default();
        export_to_document(
            &mut doc,
            PREVIEW_SURFACE_ID,
            "ada-lovelace.pdf",
            &ExportSettings::default(),
            &FixedRasterizer { width: 1600, height: 900 },
            &mut sink,
        )
        .unwrap();
        assert_eq!(doc, before);
        assert_eq!(doc.offscreen_count(), 0);
    }

    #[test]
    fn test_short_surface_exports_one_page_delivered_once() {
        let mut doc = render_preview(&name_and_email());
        let mut sink = MemorySink::default();
        let report = export_to_document(
            &mut doc,
            PREVIEW_SURFACE_ID,
            "ada-lovelace.pdf",
            &ExportSettings::default(),
            &FixedRasterizer { width: 1600, height: 900 },
            &mut sink,
        )
        .unwrap();
        assert_eq!(report.page_count(), 1);
        assert_eq!(report.bands[0].height, 900);
        assert_eq!(sink.deliveries, 1);
        let download = sink.delivered.unwrap();
        assert_eq!(download.filename, "ada-lovelace.pdf");
        assert!(contains(&download.bytes, "/Count 1"));
        assert_eq!(download.bytes.len(), report.bytes);
    }

    #[test]
    fn test_three_point_four_pages_exports_four() {
        let page_px = page_pixel_height(1600, PageSize::A4);
        let height = (page_px as f64 * 3.4).round() as u32;
        let mut doc = render_preview(&name_and_email());
        let mut sink = MemorySink::default();
        let report = export_to_document(
            &mut doc,
            PREVIEW_SURFACE_ID,
            "a.pdf",
            &ExportSettings::default(),
            &FixedRasterizer { width: 1600, height },
            &mut sink,
        )
        .unwrap();
        assert_eq!(report.page_count(), 4);
        assert_eq!(report.bands.iter().map(|b| b.height).sum::<u32>(), height);
        assert!(contains(&sink.delivered.unwrap().bytes, "/Count 4"));
    }

    #[test]
    fn test_rasterizer_sees_normalized_clone() {
        struct Inspecting(AtomicUsize);
        impl SurfaceRasterizer for Inspecting {
            fn rasterize(&self, surface: &Node, _scale: f32) -> Result<RgbImage, ExportError> {
                assert_eq!(surface.style.width, Some(800.0));
                assert_eq!(surface.id.as_deref(), Some(PREVIEW_SURFACE_ID));
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok(RgbImage::new(10, 10))
            }
        }
        let rasterizer = Inspecting(AtomicUsize::new(0));
        let mut doc = render_preview(&name_and_email());
        let mut sink = MemorySink::default();
        export_to_document(
            &mut doc,
            PREVIEW_SURFACE_ID,
            "a.pdf",
            &ExportSettings::default(),
            &rasterizer,
            &mut sink,
        )
        .unwrap();
        assert_eq!(rasterizer.0.load(Ordering::SeqCst), 1);
        assert!(doc.find_by_id(PREVIEW_SURFACE_ID).unwrap().style.width.is_none());
    }

    #[test]
    fn test_many_experiences_render_through_real_rasterizer() {
        let mut record = name_and_email();
        for i in 0..30 {
            record.experience.push(Experience {
                company: format!("Company {i}"),
                position: "Engineer".to_string(),
                start_date: "2019".to_string(),
                end_date: "2021".to_string(),
                description: "Built and operated services that handled millions of requests per day across several regions.".to_string(),
                achievements: vec!["Cut p99 latency in half".to_string(), "Mentored four engineers".to_string()],
                ..Default::default()
            });
        }
        let mut doc = render_preview(&record);
        let mut sink = MemorySink::default();
        let settings = ExportSettings {
            scale: 1.0,
            jpeg_quality: 60,
            ..Default::default()
        };
        let report = export_to_document(
            &mut doc,
            PREVIEW_SURFACE_ID,
            "ada-lovelace.pdf",
            &settings,
            &SvgRasterizer::new(None),
            &mut sink,
        )
        .unwrap();
        assert_eq!(report.bitmap_width, 800);
        assert!(report.page_count() > 1);
        let expected = (report.bitmap_height + report.page_pixel_height - 1) / report.page_pixel_height;
        assert_eq!(report.page_count() as u32, expected);
        assert_eq!(sink.deliveries, 1);
    }

    #[test]
    fn test_name_and_email_is_one_page_through_real_rasterizer() {
        let mut doc = render_preview(&name_and_email());
        let mut sink = MemorySink::default();
        let report = export_to_document(
            &mut doc,
            PREVIEW_SURFACE_ID,
            "ada-lovelace.pdf",
            &ExportSettings::default(),
            &SvgRasterizer::new(None),
            &mut sink,
        )
        .unwrap();
        assert_eq!(report.bitmap_width, 1600);
        assert!(report.bitmap_height < report.page_pixel_height);
        assert_eq!(report.page_count(), 1);
        assert_eq!(sink.deliveries, 1);
        assert!(sink.delivered.unwrap().bytes.starts_with(b"%PDF"));
        assert_eq!(doc.offscreen_count(), 0);
    }
}
