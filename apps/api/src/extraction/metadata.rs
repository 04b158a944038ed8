//! Metadata extraction: asks the LLM to summarize résumé text into structured text.
//!
//! A résumé that fits the token budget is sent in one call. A longer one is
//! split into chunks; each chunk is extracted in order and the replies are
//! joined with a blank line. The reply format is left to the model and is not
//! parsed here.

use tracing::info;

use crate::extraction::prompts::{CHUNK_SEPARATOR, METADATA_SYSTEM};
use crate::extraction::ExtractionError;
use crate::llm_client::{ChatCompletion, CompletionRequest, RetryPolicy};
use crate::tokenizer::Tokenizer;

/// Chunks `text` to `max_tokens` and extracts metadata from every chunk.
pub async fn extract_metadata(
    text: &str,
    tokenizer: &Tokenizer,
    llm: &dyn ChatCompletion,
    retry: &RetryPolicy,
    max_tokens: usize,
) -> Result<String, ExtractionError> {
    let token_count = tokenizer.count_tokens(text);
    let chunks = tokenizer.chunks_for_budget(text, max_tokens)?;
    info!(
        "Extracting metadata: {} tokens across {} chunk(s)",
        token_count,
        chunks.len()
    );

    let reply_tokens = u32::try_from(max_tokens).unwrap_or(u32::MAX);
    let mut results = Vec::with_capacity(chunks.len());
    for (index, chunk) in chunks.iter().enumerate() {
        let metadata = extract_chunk(chunk, llm, retry, reply_tokens).await?;
        info!("Chunk {}/{} extracted", index + 1, chunks.len());
        results.push(metadata);
    }

    Ok(results.join(CHUNK_SEPARATOR))
}

async fn extract_chunk(
    chunk: &str,
    llm: &dyn ChatCompletion,
    retry: &RetryPolicy,
    max_tokens: u32,
) -> Result<String, ExtractionError> {
    let request = CompletionRequest {
        system: METADATA_SYSTEM,
        user: chunk,
        max_tokens,
    };
    let metadata = retry
        .run("Metadata extraction", || llm.complete(request))
        .await?;
    Ok(metadata)
}
