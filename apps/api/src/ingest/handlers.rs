//! Axum route handlers for the Candidate upload API.

use axum::{extract::Multipart, extract::State, Json};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::ingest::chunking::TextSplitter;
use crate::ingest::extract::{extract_pdf_text, is_accepted_content_type};
use crate::state::AppState;

/// Multipart field carrying the resume.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub candidate_id: String,
    pub chunks: usize,
    pub characters: usize,
}

/// POST /api/v1/candidates
///
/// Accepts a PDF resume, indexes it under a fresh candidate id and returns that id.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut upload: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        if !is_accepted_content_type(field.content_type()) {
            return Err(AppError::Validation("Please upload a PDF.".to_string()));
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        upload = Some(data);
        break;
    }

    let data = upload
        .ok_or_else(|| AppError::Validation(format!("Missing '{FILE_FIELD}' field")))?;

    let text = extract_pdf_text(data).await?;
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "Could not extract text from PDF.".to_string(),
        ));
    }

    let characters = text.chars().count();
    let candidate_id = Uuid::new_v4().to_string();
    let chunks = TextSplitter::default()
        .split(&text)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Chunking failed: {e}")))?;
    let indexed = state.index.index(&candidate_id, &chunks).await?;

    info!(
        "Uploaded resume for candidate {candidate_id}: {characters} characters, {indexed} chunks"
    );

    Ok(Json(UploadResponse {
        candidate_id,
        chunks: indexed,
        characters,
    }))
}
