//! Read-only views of the session.

use axum::{extract::State, Json};
use serde::Serialize;

use peticao::{Step, WorkflowSession};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Response describing the current step and its artifacts.
#[derive(Serialize)]
pub struct SessionResponse {
    pub step: u8,
    pub title: String,
    pub progress: u8,
    pub source: String,
    pub template: String,
    /// Non-empty generated paragraphs, available from step 2.
    pub paragraphs: Vec<ParagraphInfo>,
    /// Confirmed paragraphs, available at step 3.
    pub edited: Option<Vec<String>>,
    pub can_download: bool,
    pub updated_at: String,
}

#[derive(Serialize)]
pub struct ParagraphInfo {
    /// 1-based position in the generated sequence.
    pub index: usize,
    pub text: String,
}

#[derive(Serialize)]
pub struct FieldRow {
    pub field: String,
    pub value: String,
}

/// Response containing extracted data for display.
#[derive(Serialize)]
pub struct FieldsResponse {
    pub fields: Vec<FieldRow>,
}

pub(crate) fn session_response(state: &AppState, session: &WorkflowSession) -> SessionResponse {
    let step = session.step();
    SessionResponse {
        step: step.number(),
        title: step.title().to_string(),
        progress: step.progress(),
        source: state.source_path.display().to_string(),
        template: state.template_path.display().to_string(),
        paragraphs: session
            .reviewable_paragraphs()
            .into_iter()
            .map(|(index, text)| ParagraphInfo {
                index,
                text: text.to_string(),
            })
            .collect(),
        edited: session.edited_paragraphs.clone(),
        can_download: step == Step::Finalize,
        updated_at: session.updated_at.to_rfc3339(),
    }
}

/// GET /api/session
pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.session.read().await;
    Json(session_response(&state, &session))
}

/// GET /api/fields
pub async fn get_fields(State(state): State<AppState>) -> Result<Json<FieldsResponse>, ApiError> {
    let session = state.session.read().await;

    let fields = session
        .extracted_fields
        .as_ref()
        .ok_or_else(|| ApiError::NotFound("No fields extracted yet".to_string()))?;

    Ok(Json(FieldsResponse {
        fields: fields
            .display_rows()
            .into_iter()
            .map(|(field, value)| FieldRow { field, value })
            .collect(),
    }))
}
