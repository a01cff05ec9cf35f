use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::photo::photo_data_url;
use crate::insights::InsightSlot;
use crate::models::record::ResumeRecord;
use crate::session::completeness::{compute_completeness_report, CompletenessReport};
use crate::session::mutation::{apply_mutation, RecordMutation};
use crate::session::validation::{validate_record, FieldWarning};
use crate::session::{session_not_found, Session};
use crate::state::AppState;

/// Multipart field carrying the uploaded photo.
const PHOTO_FIELD: &str = "photo";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateSessionRequest {
    pub record: ResumeRecord,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: Uuid,
    pub record: ResumeRecord,
    pub insights: InsightSlot,
    pub completeness: CompletenessReport,
    pub warnings: Vec<FieldWarning>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Session> for SessionView {
    fn from(session: Session) -> Self {
        let completeness = compute_completeness_report(&session.record);
        let warnings = validate_record(&session.record);
        SessionView {
            id: session.id,
            record: session.record,
            insights: session.insights,
            completeness,
            warnings,
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let session = state.sessions.create(req.record).await;
    Ok((StatusCode::CREATED, Json(session.into())))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state
        .sessions
        .snapshot(id)
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(session.into()))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found(id))
    }
}

/// POST /api/v1/sessions/:id/mutations
pub async fn handle_apply_mutation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(mutation): Json<RecordMutation>,
) -> Result<Json<SessionView>, AppError> {
    // Values stay out of the log: they carry personal details and photo data URLs.
    debug!(session_id = %id, op = mutation.op(), section = ?mutation.section(), "Applying mutation");
    let session = state
        .sessions
        .update(id, |session| {
            apply_mutation(&mut session.record, mutation).map(|_| session.clone())
        })
        .await
        .ok_or_else(|| session_not_found(id))??;
    Ok(Json(session.into()))
}

/// POST /api/v1/sessions/:id/photo
/// Expects a multipart form with one `photo` file field.
pub async fn handle_upload_photo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<SessionView>, AppError> {
    let mut data_url = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(PHOTO_FIELD) {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid photo field: {e}")))?;
        data_url = Some(photo_data_url(&content_type, &bytes)?);
        info!(session_id = %id, bytes = bytes.len(), %content_type, "Photo accepted");
        break;
    }
    let data_url = data_url
        .ok_or_else(|| AppError::Validation(format!("Missing '{PHOTO_FIELD}' field")))?;

    let session = state
        .sessions
        .update(id, |session| {
            session.record.personal_info.profile_picture = data_url;
            session.clone()
        })
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(session.into()))
}
