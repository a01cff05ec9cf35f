use std::sync::Arc;

use crate::config::Config;
use crate::export::{ExportSettings, SurfaceRasterizer};
use crate::llm_client::LanguageModel;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn LanguageModel>,
    /// Pluggable rasterizer. Default: SvgRasterizer (usvg/resvg).
    pub rasterizer: Arc<dyn SurfaceRasterizer>,
    pub config: Config,
    pub sessions: SessionStore,
    /// Export geometry and quality, derived from config at startup.
    pub export_settings: ExportSettings,
}

impl AppState {
    pub fn new(
        config: Config,
        llm: Arc<dyn LanguageModel>,
        rasterizer: Arc<dyn SurfaceRasterizer>,
    ) -> Self {
        let export_settings = ExportSettings {
            scale: config.export_scale,
            jpeg_quality: config.export_jpeg_quality,
            ..ExportSettings::default()
        };
        Self {
            llm,
            rasterizer,
            config,
            sessions: SessionStore::new(),
            export_settings,
        }
    }
}
