//! Final document download.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use peticao::providers::assembler_for_format;
use peticao::OutputFormat;

use crate::server::error::ApiError;
use crate::server::state::AppState;

#[derive(Deserialize)]
pub struct DownloadQuery {
    #[serde(default)]
    pub format: OutputFormat,
}

/// GET /api/download
pub async fn download(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, ApiError> {
    let session = state.session.read().await;

    let assembler = assembler_for_format(query.format);
    let artifact = state.pipeline.finalize(&session, assembler.as_ref())?;

    Ok((
        [
            (header::CONTENT_TYPE, artifact.content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", artifact.file_name),
            ),
        ],
        artifact.bytes,
    )
        .into_response())
}
