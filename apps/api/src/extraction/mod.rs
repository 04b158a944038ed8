// Résumé upload pipeline: PDF → text → token-bounded chunks → LLM metadata.
// All LLM calls go through llm_client and are wrapped in the shared RetryPolicy.

pub mod handlers;
pub mod metadata;
pub mod pdf;
pub mod prompts;

use thiserror::Error;

use crate::llm_client::LlmError;
use crate::tokenizer::TokenizationError;

pub use pdf::{PdfTextExtractor, TextExtractor};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("{0}")]
    Document(String),

    #[error("metadata extraction failed: {0}")]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Tokenization(#[from] TokenizationError),
}
