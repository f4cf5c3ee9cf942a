//! Step transitions: generate, back, confirm.

use axum::{extract::State, Json};
use serde::Deserialize;

use peticao::providers::{source_for_path, template_for_path};

use super::session::{session_response, SessionResponse};
use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Request body for confirming the review.
#[derive(Deserialize, Default)]
pub struct ConfirmRequest {
    /// Edited paragraphs; absent means the generated text unchanged.
    #[serde(default)]
    pub paragraphs: Option<Vec<String>>,
}

/// POST /api/generate
///
/// Document parsing runs on the blocking pool against a copy of the
/// session; the write lock is held throughout so generations do not
/// interleave.
pub async fn generate(State(state): State<AppState>) -> Result<Json<SessionResponse>, ApiError> {
    let mut session = state.session.write().await;

    let mut working = session.clone();
    let job = state.clone();
    let (working, result) = tokio::task::spawn_blocking(move || {
        let result = job.pipeline.generate(
            &mut working,
            source_for_path(&job.source_path).as_ref(),
            &job.source_path,
            template_for_path(&job.template_path).as_ref(),
            &job.template_path,
            &job.supplementary,
        );
        (working, result)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("generation task failed: {}", e)))?;

    // Cached extraction is kept even when the fill fails.
    *session = working;
    let response = session_response(&state, &session);

    drop(session);
    state.persist().await?;
    result?;

    Ok(Json(response))
}

/// POST /api/back
pub async fn back(State(state): State<AppState>) -> Result<Json<SessionResponse>, ApiError> {
    let mut session = state.session.write().await;
    session.back();
    let response = session_response(&state, &session);

    drop(session);
    state.persist().await?;

    Ok(Json(response))
}

/// POST /api/confirm
pub async fn confirm(
    State(state): State<AppState>,
    Json(req): Json<ConfirmRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let mut session = state.session.write().await;
    session.confirm_edits(req.paragraphs)?;
    let response = session_response(&state, &session);

    drop(session);
    state.persist().await?;

    Ok(Json(response))
}
