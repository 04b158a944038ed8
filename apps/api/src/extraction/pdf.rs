use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::extraction::ExtractionError;

/// Turns an uploaded document into plain text, pages in document order.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, data: Bytes) -> Result<String, ExtractionError>;
}

#[derive(Debug, Default)]
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract_text(&self, data: Bytes) -> Result<String, ExtractionError> {
        if !data.starts_with(b"%PDF") {
            return Err(ExtractionError::Document(
                "uploaded file is not a PDF document".to_string(),
            ));
        }

        let size = data.len();
        // pdf-extract is CPU-bound and panics on some malformed inputs;
        // a panic surfaces here as a JoinError instead of taking the worker down.
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
            .await
            .map_err(|e| ExtractionError::Document(format!("PDF parser aborted: {e}")))?
            .map_err(|e| ExtractionError::Document(format!("failed to parse PDF: {e}")))?;

        debug!("Extracted {} chars from {} byte PDF", text.len(), size);
        Ok(text)
    }
}
