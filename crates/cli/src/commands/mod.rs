//! Command handlers for the docqa CLI.
//!
//! This module organizes all CLI commands into separate submodules, plus the
//! setup they share.

pub mod ask;
pub mod chat;
pub mod extract;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use extract::ExtractCommand;

use docqa_chat::{AnswerGenerator, AnswerPipeline};
use docqa_core::config::{AppConfig, ProviderConfig};
use docqa_core::{AppError, AppResult};
use docqa_documents::{ContextAssembler, GroundingText};
use docqa_llm::{create_client, ClientOptions};
use docqa_prompt::load_prompt;
use std::time::Duration;

/// Build the answer pipeline for the configured provider, model and prompt.
pub(crate) fn build_pipeline(config: &AppConfig) -> AppResult<AnswerPipeline> {
    config.validate()?;

    let provider_config = config.get_provider_config(&config.provider);
    let endpoint = provider_config.as_ref().and_then(|pc| pc.endpoint());
    let api_key = config.resolve_api_key(&config.provider);

    let organization = match &provider_config {
        Some(ProviderConfig::OpenAI {
            organization_env: Some(var),
            ..
        }) => std::env::var(var).ok(),
        _ => None,
    };

    let timeout_secs = config.chat.request_timeout_secs.or(match &provider_config {
        Some(ProviderConfig::Ollama { timeout, .. }) => *timeout,
        _ => None,
    });

    let client = create_client(
        &config.provider,
        ClientOptions {
            endpoint,
            api_key: api_key.as_deref(),
            organization: organization.as_deref(),
            timeout: timeout_secs.map(Duration::from_secs),
        },
    )
    .map_err(AppError::Config)?;

    let prompt = load_prompt(&config.workspace, &config.chat.prompt_id)?;
    tracing::debug!("Loaded prompt definition: {}", prompt.id);

    let generator = AnswerGenerator::new(client, &config.model)
        .with_prompt(prompt)
        .with_temperature(config.chat.temperature);

    Ok(AnswerPipeline::new(
        generator,
        ContextAssembler::new(config.chat.extraction_policy),
    ))
}

/// Grounding text for a new session. A missing file only logs a warning.
pub(crate) fn load_grounding(config: &AppConfig) -> GroundingText {
    GroundingText::load_or_empty(&config.grounding_path())
}
