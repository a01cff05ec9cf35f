use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Oversampling factor for export rasterization.
    pub export_scale: f32,
    pub export_jpeg_quality: u8,
    /// Extra font files for rasterization, on top of system fonts.
    pub font_dir: Option<PathBuf>,
    /// When set, every exported PDF is also written here.
    pub export_archive_dir: Option<PathBuf>,
    /// Sessions idle for longer than this are dropped.
    pub session_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let export_scale = std::env::var("EXPORT_SCALE")
            .unwrap_or_else(|_| "2.0".to_string())
            .parse::<f32>()
            .context("EXPORT_SCALE must be a number")?;
        if !(export_scale.is_finite() && export_scale > 0.0) {
            anyhow::bail!("EXPORT_SCALE must be positive, got {export_scale}");
        }

        let export_jpeg_quality = std::env::var("EXPORT_JPEG_QUALITY")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<u32>()
            .context("EXPORT_JPEG_QUALITY must be an integer")?
            .clamp(1, 100) as u8;

        let session_ttl_secs = std::env::var("SESSION_TTL_SECS")
            .unwrap_or_else(|_| "7200".to_string())
            .parse::<u64>()
            .context("SESSION_TTL_SECS must be a whole number of seconds")?;
        if session_ttl_secs == 0 {
            anyhow::bail!("SESSION_TTL_SECS must be positive");
        }

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            export_scale,
            export_jpeg_quality,
            font_dir: optional_path("FONT_DIR"),
            export_archive_dir: optional_path("EXPORT_ARCHIVE_DIR"),
            session_ttl: Duration::from_secs(session_ttl_secs),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_path(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
impl Config {
    /// Defaults used by handler tests; no environment access.
    pub fn for_tests() -> Self {
        Config {
            gemini_api_key: "test-key".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            export_scale: 2.0,
            export_jpeg_quality: 100,
            font_dir: None,
            export_archive_dir: None,
            session_ttl: Duration::from_secs(7200),
        }
    }
}
