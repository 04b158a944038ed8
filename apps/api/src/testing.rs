//! Stub collaborators shared by unit and router tests.

use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::config::Config;
use crate::extraction::{ExtractionError, TextExtractor};
use crate::llm_client::{ChatCompletion, CompletionRequest, LlmError, RetryPolicy};
use crate::render::{DocumentRenderer, RenderError};
use crate::state::AppState;
use crate::tokenizer::Tokenizer;

/// The real `gpt-3.5-turbo` tokenizer, loaded once per test binary.
pub fn tokenizer() -> &'static Tokenizer {
    shared_tokenizer()
}

fn shared_tokenizer() -> &'static Arc<Tokenizer> {
    static TOKENIZER: OnceLock<Arc<Tokenizer>> = OnceLock::new();
    TOKENIZER.get_or_init(|| {
        Arc::new(Tokenizer::for_model("gpt-3.5-turbo").expect("cl100k tokenizer is bundled"))
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
}

type ErrorFactory = Box<dyn Fn() -> LlmError + Send + Sync>;

enum Script {
    Reply(String),
    /// Replies "reply 1", "reply 2", ... in call order.
    Numbered,
    /// Fails the first `failures` calls, then replies.
    FailThenReply {
        failures: usize,
        error: ErrorFactory,
        reply: String,
    },
    AlwaysFail(ErrorFactory),
}

/// Scripted `ChatCompletion` that records every request it receives.
pub struct StubLlm {
    script: Script,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubLlm {
    fn with_script(script: Script) -> Self {
        Self {
            script,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(reply: &str) -> Self {
        Self::with_script(Script::Reply(reply.to_string()))
    }

    pub fn numbered() -> Self {
        Self::with_script(Script::Numbered)
    }

    pub fn failing(error: impl Fn() -> LlmError + Send + Sync + 'static) -> Self {
        Self::with_script(Script::AlwaysFail(Box::new(error)))
    }

    pub fn failing_then(
        reply: &str,
        failures: usize,
        error: impl Fn() -> LlmError + Send + Sync + 'static,
    ) -> Self {
        Self::with_script(Script::FailThenReply {
            failures,
            error: Box::new(error),
            reply: reply.to_string(),
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletion for StubLlm {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
        let call_number = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(RecordedCall {
                system: request.system.to_string(),
                user: request.user.to_string(),
                max_tokens: request.max_tokens,
            });
            calls.len()
        };

        match &self.script {
            Script::Reply(reply) => Ok(reply.clone()),
            Script::Numbered => Ok(format!("reply {call_number}")),
            Script::FailThenReply {
                failures,
                error,
                reply,
            } => {
                if call_number <= *failures {
                    Err(error())
                } else {
                    Ok(reply.clone())
                }
            }
            Script::AlwaysFail(error) => Err(error()),
        }
    }
}

/// Treats uploaded bytes as UTF-8 text.
pub struct StubExtractor;

#[async_trait]
impl TextExtractor for StubExtractor {
    async fn extract_text(&self, data: Bytes) -> Result<String, ExtractionError> {
        String::from_utf8(data.to_vec()).map_err(|e| ExtractionError::Document(e.to_string()))
    }
}

/// Records rendered text and returns a fixed placeholder document.
#[derive(Default)]
pub struct StubRenderer {
    rendered: Mutex<Vec<String>>,
}

impl StubRenderer {
    pub fn rendered(&self) -> Vec<String> {
        self.rendered.lock().unwrap().clone()
    }
}

impl DocumentRenderer for StubRenderer {
    fn render(&self, _title: &str, text: &str) -> Result<Vec<u8>, RenderError> {
        self.rendered.lock().unwrap().push(text.to_string());
        Ok(b"%PDF-1.3 stub".to_vec())
    }
}

pub fn test_config() -> Config {
    Config {
        openai_api_key: "test-key".to_string(),
        openai_base_url: "http://127.0.0.1:9".to_string(),
        model: "gpt-3.5-turbo".to_string(),
        llm_timeout: Duration::from_secs(5),
        max_tokens: 4096,
        generation_max_tokens: 1500,
        retry_max_attempts: 2,
        retry_base_delay: Duration::ZERO,
        max_upload_bytes: 1024 * 1024,
        port: 0,
        rust_log: "debug".to_string(),
    }
}

/// App state wired to stubs, with an immediate two-attempt retry policy.
pub fn test_state(llm: Arc<StubLlm>) -> AppState {
    let config = test_config();
    AppState {
        retry: RetryPolicy {
            max_attempts: config.retry_max_attempts,
            base_delay: config.retry_base_delay,
            jitter: Duration::ZERO,
        },
        config,
        llm,
        tokenizer: Arc::clone(shared_tokenizer()),
        extractor: Arc::new(StubExtractor),
        renderer: Arc::new(StubRenderer::default()),
    }
}

