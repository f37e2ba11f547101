use bytes::Bytes;

use crate::errors::AppError;

const ACCEPTED_CONTENT_TYPES: [&str; 2] = ["application/pdf", "application/octet-stream"];

/// Browsers and CLI clients label PDFs inconsistently; both labels are accepted.
pub fn is_accepted_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase())
        .is_some_and(|ct| ACCEPTED_CONTENT_TYPES.contains(&ct.as_str()))
}

/// Extracts plain text from a PDF on the blocking pool.
pub async fn extract_pdf_text(data: Bytes) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))?
        .map_err(|e| AppError::Validation(format!("Could not read PDF: {e}")))
}
