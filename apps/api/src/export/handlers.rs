use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::normalize::normalize_surface;
use crate::export::sink::{archive_to_dir, Download};
use crate::export::{derive_filename, export_to_document, ExportError, MemorySink};
use crate::models::record::ResumeRecord;
use crate::session::session_not_found;
use crate::state::AppState;
use crate::surface::render_svg;
use crate::templates::{render_preview, PREVIEW_SURFACE_ID};

/// GET /api/v1/sessions/:id/preview
/// SVG of the surface exactly as it would be rasterized for export.
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let record = current_record(&state, id).await?;
    let settings = state.export_settings.clone();

    let svg = tokio::task::spawn_blocking(move || {
        let doc = render_preview(&record);
        let mut surface = doc
            .find_by_id(PREVIEW_SURFACE_ID)
            .cloned()
            .ok_or_else(|| ExportError::SurfaceNotFound(PREVIEW_SURFACE_ID.to_string()))?;
        normalize_surface(&mut surface, &settings);
        Ok::<_, ExportError>(render_svg(&surface, settings.surface_width))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Preview task failed: {e}")))??;

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

/// POST /api/v1/sessions/:id/export
/// Renders the session's preview surface to a paginated A4 PDF and returns it as a download.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    match state.sessions.begin_export(id).await {
        None => return Err(session_not_found(id)),
        Some(false) => {
            return Err(AppError::Conflict(format!(
                "An export is already running for session {id}"
            )))
        }
        Some(true) => {}
    }

    // Spawned so the slot is released even if the client goes away mid-export.
    let task_state = state.clone();
    let download = tokio::spawn(async move {
        let result = run_export(&task_state, id).await;
        task_state.sessions.finish_export(id).await;
        result
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Export task failed: {e}")))??;

    if let Some(dir) = state.config.export_archive_dir.clone() {
        let filename = download.filename.clone();
        let bytes = download.bytes.clone();
        let archived =
            tokio::task::spawn_blocking(move || archive_to_dir(&dir, &filename, &bytes)).await;
        match archived {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => warn!(session_id = %id, "Archiving export failed: {e}"),
            Err(e) => warn!(session_id = %id, "Archive task failed: {e}"),
        }
    }

    let disposition = content_disposition(&download.filename);
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        download.bytes,
    )
        .into_response())
}

async fn current_record(state: &AppState, id: Uuid) -> Result<ResumeRecord, AppError> {
    state
        .sessions
        .snapshot(id)
        .await
        .map(|session| session.record)
        .ok_or_else(|| session_not_found(id))
}

async fn run_export(state: &AppState, id: Uuid) -> Result<Download, AppError> {
    let record = current_record(state, id).await?;
    let filename = derive_filename(&record.personal_info.full_name);
    let settings = state.export_settings.clone();
    let rasterizer = state.rasterizer.clone();

    let (report, sink) = tokio::task::spawn_blocking(move || {
        let mut doc = render_preview(&record);
        let mut sink = MemorySink::default();
        export_to_document(
            &mut doc,
            PREVIEW_SURFACE_ID,
            &filename,
            &settings,
            rasterizer.as_ref(),
            &mut sink,
        )
        .map(|report| (report, sink))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Export task failed: {e}")))??;

    info!(session_id = %id, pages = report.page_count(), "Export delivered");
    sink.delivered
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Export finished without a document")))
}

/// `attachment` disposition with an ASCII fallback name and, for non-ASCII names,
/// an RFC 5987 `filename*` parameter.
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| if c.is_ascii_graphic() && c != '"' && c != '\\' { c } else { '_' })
        .collect();
    if filename.is_ascii() {
        return format!("attachment; filename=\"{fallback}\"");
    }
    let mut encoded = String::new();
    for byte in filename.bytes() {
        if byte.is_ascii_alphanumeric() || b"-._~".contains(&byte) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_disposition() {
        assert_eq!(
            content_disposition("ada-lovelace.pdf"),
            "attachment; filename=\"ada-lovelace.pdf\""
        );
    }

    #[test]
    fn test_non_ascii_disposition_has_fallback_and_utf8_name() {
        let value = content_disposition("zoë.pdf");
        assert!(value.starts_with("attachment; filename=\"zo_.pdf\""));
        assert!(value.ends_with("filename*=UTF-8''zo%C3%AB.pdf"));
    }
}
