use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::metadata::extract_metadata;
use crate::state::AppState;

/// Multipart field carrying the résumé document.
pub const RESUME_FIELD: &str = "resume";

#[derive(Debug, Serialize)]
pub struct UploadResumeResponse {
    pub message: String,
    pub metadata: String,
}

/// Body-limit overruns become 413; any other multipart failure is a bad request.
fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("Uploaded file is too large: {}", e.body_text()))
    } else {
        AppError::MalformedRequest(format!("Failed to read multipart body: {}", e.body_text()))
    }
}

/// POST /upload_resume
///
/// Reads the `resume` PDF, extracts its text and returns LLM-extracted metadata.
/// Nothing is stored.
#[tracing::instrument(skip_all)]
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResumeResponse>, AppError> {
    let mut document = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        if field.name() == Some(RESUME_FIELD) {
            let filename = field.file_name().unwrap_or("unknown").to_string();
            let data = field.bytes().await.map_err(multipart_error)?;
            info!("Received résumé '{}' ({} bytes)", filename, data.len());
            document = Some(data);
            break;
        }
    }

    let data = document.ok_or_else(|| {
        AppError::MissingInput(format!(
            "No file part: expected a multipart field named '{RESUME_FIELD}'"
        ))
    })?;

    let text = state.extractor.extract_text(data).await?;

    let metadata = extract_metadata(
        &text,
        &state.tokenizer,
        state.llm.as_ref(),
        &state.retry,
        state.config.max_tokens,
    )
    .await?;

    Ok(Json(UploadResumeResponse {
        message: "Resume uploaded and processed successfully".to_string(),
        metadata,
    }))
}
