mod config;
mod errors;
mod extraction;
mod generation;
mod layout;
mod llm_client;
mod render;
mod routes;
mod state;
mod tokenizer;

#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::PdfTextExtractor;
use crate::llm_client::{LlmClient, RetryPolicy};
use crate::render::PdfRenderer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::tokenizer::Tokenizer;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing LLM credential)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        &config.openai_base_url,
        config.model.clone(),
        config.llm_timeout,
    )?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm.model(),
        config.llm_timeout.as_secs()
    );

    // Tokenizer must match the model's vocabulary
    let tokenizer = Tokenizer::for_model(&config.model)
        .with_context(|| format!("Cannot count tokens for model '{}'", config.model))?;
    info!("Tokenizer loaded (budget: {} tokens)", config.max_tokens);

    let retry = RetryPolicy::new(config.retry_max_attempts, config.retry_base_delay);
    info!(
        "Retry policy: {} attempts, base delay {}ms",
        retry.max_attempts,
        retry.base_delay.as_millis()
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        llm: Arc::new(llm),
        retry,
        tokenizer: Arc::new(tokenizer),
        extractor: Arc::new(PdfTextExtractor),
        renderer: Arc::new(PdfRenderer::default()),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
