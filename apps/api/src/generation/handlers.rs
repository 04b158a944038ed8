//! Axum route handler for the generation endpoint.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::errors::AppError;
use crate::generation::generator::{generate_resume, GenerateRequest, GenerationLimits};
use crate::state::AppState;

/// POST /generate_resume
///
/// Drafts a résumé from `job_qualifications` and returns it as a PDF attachment
/// named after the supplied `name` and `company`.
#[tracing::instrument(skip_all)]
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Response, AppError> {
    let limits = GenerationLimits {
        max_input_tokens: state.config.max_tokens,
        max_output_tokens: state.config.generation_max_tokens,
    };

    let resume = generate_resume(
        &request,
        &state.tokenizer,
        state.llm.as_ref(),
        &state.retry,
        state.renderer.clone(),
        limits,
    )
    .await?;

    let disposition = format!("attachment; filename=\"{}\"", resume.filename);
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        resume.bytes,
    )
        .into_response())
}
