//! Token counting and token-bounded chunking for the target model's vocabulary.

use thiserror::Error;
use tiktoken_rs::{CoreBPE, Rank};

/// Tokens held back from every chunk for the system instruction and the reply.
pub const RESERVED_MARGIN: usize = 100;

#[derive(Debug, Error)]
pub enum TokenizationError {
    #[error("no tokenizer available for model '{model}': {message}")]
    Unavailable { model: String, message: String },

    #[error(
        "token budget {max_tokens} leaves no room after the reserved margin of {}",
        RESERVED_MARGIN
    )]
    BudgetTooSmall { max_tokens: usize },

    #[error("a {window}-token window cannot hold a single whole character")]
    WindowTooSmall { window: usize },
}

pub struct Tokenizer {
    bpe: CoreBPE,
}

impl Tokenizer {
    /// Loads the encoding used by `model`. Fails if the model family is unknown.
    pub fn for_model(model: &str) -> Result<Self, TokenizationError> {
        let bpe = tiktoken_rs::get_bpe_from_model(model).map_err(|e| {
            TokenizationError::Unavailable {
                model: model.to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(Self { bpe })
    }

    pub fn count_tokens(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }

    /// Returns `[text]` when it fits in `max_tokens`, otherwise its chunks.
    pub fn chunks_for_budget(
        &self,
        text: &str,
        max_tokens: usize,
    ) -> Result<Vec<String>, TokenizationError> {
        if self.count_tokens(text) <= max_tokens {
            return Ok(vec![text.to_string()]);
        }
        self.split_into_chunks(text, max_tokens)
    }

    /// Splits `text` into consecutive chunks of at most
    /// `max_tokens - RESERVED_MARGIN` tokens each. Always yields at least one chunk.
    pub fn split_into_chunks(
        &self,
        text: &str,
        max_tokens: usize,
    ) -> Result<Vec<String>, TokenizationError> {
        let window = max_tokens
            .checked_sub(RESERVED_MARGIN)
            .filter(|w| *w > 0)
            .ok_or(TokenizationError::BudgetTooSmall { max_tokens })?;

        let tokens = self.bpe.encode_with_special_tokens(text);
        if tokens.is_empty() {
            return Ok(vec![String::new()]);
        }

        let mut chunks = Vec::with_capacity(tokens.len().div_ceil(window));
        let mut start = 0;
        while start < tokens.len() {
            let (end, chunk) = self.decode_window(&tokens, start, window)?;
            chunks.push(chunk);
            start = end;
        }
        Ok(chunks)
    }

    /// Decodes the longest prefix of `tokens[start..start + window]` that forms
    /// valid UTF-8. A window can cut a multi-byte character in half; the cut
    /// tokens move to the next window instead. Fails when not even one whole
    /// character fits in `window`.
    fn decode_window(
        &self,
        tokens: &[Rank],
        start: usize,
        window: usize,
    ) -> Result<(usize, String), TokenizationError> {
        let limit = (start + window).min(tokens.len());
        (start + 1..=limit)
            .rev()
            .find_map(|end| {
                self.bpe
                    .decode(tokens[start..end].to_vec())
                    .ok()
                    .map(|text| (end, text))
            })
            .ok_or(TokenizationError::WindowTooSmall { window })
    }
}
