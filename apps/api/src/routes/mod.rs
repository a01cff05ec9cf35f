pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::export::handlers as export;
use crate::export::photo::MAX_PHOTO_BYTES;
use crate::insights::handlers as insights;
use crate::session::handlers as session;
use crate::state::AppState;

/// Room for multipart framing around a maximum-size photo.
const PHOTO_BODY_LIMIT: usize = MAX_PHOTO_BYTES + 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Sessions
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(session::handle_get_session).delete(session::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/mutations",
            post(session::handle_apply_mutation),
        )
        .route(
            "/api/v1/sessions/:id/photo",
            post(session::handle_upload_photo).layer(DefaultBodyLimit::max(PHOTO_BODY_LIMIT)),
        )
        // Insights
        .route(
            "/api/v1/sessions/:id/profession",
            put(insights::handle_set_profession),
        )
        .route(
            "/api/v1/sessions/:id/insights",
            get(insights::handle_get_insights),
        )
        .route(
            "/api/v1/sessions/:id/skills/from-insights",
            post(insights::handle_merge_skills),
        )
        .route(
            "/api/v1/sessions/:id/ats-score",
            post(insights::handle_ats_score),
        )
        .route("/api/v1/assist/field", post(insights::handle_suggest_field))
        // Export
        .route("/api/v1/sessions/:id/preview", get(export::handle_preview))
        .route("/api/v1/sessions/:id/export", post(export::handle_export))
        .with_state(state)
}
