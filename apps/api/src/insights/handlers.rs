use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::insights::assistant::{
    ats_score, keyword_coverage, merge_ats_keywords, suggest_field, KeywordCoverage,
};
use crate::insights::{fetch_insights, InsightSlot};
use crate::models::insight::ProfessionInsightBundle;
use crate::models::record::{ResumeRecord, Skill};
use crate::session::session_not_found;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetProfessionRequest {
    pub profession: String,
    #[serde(default)]
    pub custom_profession: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResponse {
    pub profession: String,
    pub loading: bool,
    pub bundle: ProfessionInsightBundle,
    pub coverage: Vec<KeywordCoverage>,
}

impl InsightsResponse {
    fn new(slot: &InsightSlot, record: &ResumeRecord) -> Self {
        Self {
            profession: slot.profession.clone(),
            loading: slot.loading,
            bundle: slot.bundle.clone(),
            coverage: keyword_coverage(record, &slot.bundle),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeSkillsResponse {
    pub added: usize,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Serialize)]
pub struct AtsScoreResponse {
    pub score: u8,
}

#[derive(Debug, Deserialize)]
pub struct FieldSuggestionRequest {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct FieldSuggestionResponse {
    pub suggestion: String,
}

/// PUT /api/v1/sessions/:id/profession
/// Stores the selection and fetches its insights. A selection made while this fetch is in
/// flight supersedes it: the older result is dropped when it lands.
pub async fn handle_set_profession(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetProfessionRequest>,
) -> Result<Json<InsightsResponse>, AppError> {
    let started = state
        .sessions
        .update(id, |session| {
            session.record.profession = req.profession.trim().to_string();
            session.record.custom_profession = req.custom_profession.clone();
            match session.record.effective_profession() {
                Some(label) => Some((session.insights.begin(&label), label)),
                None => {
                    session.insights.reset();
                    None
                }
            }
        })
        .await
        .ok_or_else(|| session_not_found(id))?;

    if let Some((ticket, label)) = started {
        // The fetch runs in its own task so a dropped request still settles the slot.
        // No lock is held while the model call is outstanding.
        let llm = state.llm.clone();
        let sessions = state.sessions.clone();
        let fetch = tokio::spawn(async move {
            let bundle = fetch_insights(llm.as_ref(), &label).await;
            let applied = sessions
                .update(id, |session| session.insights.complete(ticket, bundle))
                .await
                .unwrap_or(false);
            debug!(session_id = %id, profession = %label, applied, "Insight fetch settled");
        });
        fetch
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Insight task failed: {e}")))?;
    }

    let session = state
        .sessions
        .snapshot(id)
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(InsightsResponse::new(&session.insights, &session.record)))
}

/// GET /api/v1/sessions/:id/insights
pub async fn handle_get_insights(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InsightsResponse>, AppError> {
    let session = state
        .sessions
        .snapshot(id)
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(InsightsResponse::new(&session.insights, &session.record)))
}

/// POST /api/v1/sessions/:id/skills/from-insights
pub async fn handle_merge_skills(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MergeSkillsResponse>, AppError> {
    let response = state
        .sessions
        .update(id, |session| {
            let added = merge_ats_keywords(&mut session.record, &session.insights.bundle);
            MergeSkillsResponse {
                added,
                skills: session.record.skills.clone(),
            }
        })
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(response))
}

/// POST /api/v1/sessions/:id/ats-score
pub async fn handle_ats_score(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AtsScoreResponse>, AppError> {
    let record = state
        .sessions
        .snapshot(id)
        .await
        .map(|session| session.record)
        .ok_or_else(|| session_not_found(id))?;
    let score = ats_score(state.llm.as_ref(), &record).await;
    Ok(Json(AtsScoreResponse { score }))
}

/// POST /api/v1/assist/field
pub async fn handle_suggest_field(
    State(state): State<AppState>,
    Json(req): Json<FieldSuggestionRequest>,
) -> Result<Json<FieldSuggestionResponse>, AppError> {
    let suggestion = suggest_field(state.llm.as_ref(), &req.field, &req.value).await;
    Ok(Json(FieldSuggestionResponse { suggestion }))
}
