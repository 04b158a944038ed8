use std::sync::Arc;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::llm_client::{ChatCompletion, RetryPolicy};
use crate::render::DocumentRenderer;
use crate::tokenizer::Tokenizer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once in `main`; immutable afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Chat-completion backend. Default: `LlmClient` against the OpenAI API.
    pub llm: Arc<dyn ChatCompletion>,
    pub retry: RetryPolicy,
    pub tokenizer: Arc<Tokenizer>,
    /// PDF → text. Default: `PdfTextExtractor`.
    pub extractor: Arc<dyn TextExtractor>,
    /// Text → PDF. Default: `PdfRenderer` (A4, Helvetica 12pt).
    pub renderer: Arc<dyn DocumentRenderer>,
}
