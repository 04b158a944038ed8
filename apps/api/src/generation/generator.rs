//! Resume generation: drafts a résumé from job qualifications and renders it.
//!
//! Flow: validate qualifications → token budget check → LLM generate (with
//! retry) → render PDF on the blocking pool → attachment filename.
//! The rendered document only lives in memory for the duration of the request.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::generation::filename::attachment_filename;
use crate::generation::prompts::GENERATION_SYSTEM;
use crate::llm_client::{ChatCompletion, CompletionRequest, RetryPolicy};
use crate::render::{DocumentRenderer, RenderError};
use crate::tokenizer::Tokenizer;

/// Request body for resume generation.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub job_qualifications: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company: String,
}

/// A rendered résumé ready to be sent as an attachment.
#[derive(Debug)]
pub struct GeneratedResume {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Limits applied to a generation request.
#[derive(Debug, Clone, Copy)]
pub struct GenerationLimits {
    /// Maximum tokens accepted in `job_qualifications`.
    pub max_input_tokens: usize,
    /// Completion cap for the drafted résumé.
    pub max_output_tokens: u32,
}

/// Runs the generation pipeline. The LLM is never called for invalid input.
pub async fn generate_resume(
    request: &GenerateRequest,
    tokenizer: &Tokenizer,
    llm: &dyn ChatCompletion,
    retry: &RetryPolicy,
    renderer: Arc<dyn DocumentRenderer>,
    limits: GenerationLimits,
) -> Result<GeneratedResume, AppError> {
    // Step 1: Validate input
    let qualifications = request.job_qualifications.trim();
    if qualifications.is_empty() {
        return Err(AppError::MissingInput(
            "job_qualifications cannot be empty".to_string(),
        ));
    }

    let token_count = tokenizer.count_tokens(qualifications);
    if token_count > limits.max_input_tokens {
        info!(
            "Rejecting qualifications: {} tokens > {} limit",
            token_count, limits.max_input_tokens
        );
        return Err(AppError::InputTooLarge(format!(
            "Job qualifications text exceeds the maximum token limit ({token_count} > {}).",
            limits.max_input_tokens
        )));
    }

    // Step 2: Draft the résumé
    let completion = CompletionRequest {
        system: GENERATION_SYSTEM,
        user: qualifications,
        max_tokens: limits.max_output_tokens,
    };
    let content = retry
        .run("Resume generation", || llm.complete(completion))
        .await?;
    info!("Drafted résumé: {} chars", content.len());

    // Step 3: Render
    let filename = attachment_filename(&request.name, &request.company);
    let title = filename.trim_end_matches(".pdf").to_string();
    let bytes = tokio::task::spawn_blocking(move || renderer.render(&title, &content))
        .await
        .map_err(|e| RenderError::Task(e.to_string()))??;

    info!("Rendered '{}' ({} bytes)", filename, bytes.len());
    Ok(GeneratedResume { filename, bytes })
}
