//! Answer generation: one prompt, one completion, post-processing.

use crate::error::AnswerError;
use crate::postprocess::postprocess;
use docqa_llm::{LlmClient, LlmRequest};
use docqa_prompt::{build_prompt, default_prompt, PromptDefinition};
use std::sync::Arc;

/// Sampling temperature used unless configured otherwise.
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// Generates answers from a context and a question.
///
/// Every call to [`AnswerGenerator::generate`] issues exactly one completion
/// request. Failures are converted to [`AnswerError::Completion`] here and
/// never propagate further as infrastructure errors.
#[derive(Clone)]
pub struct AnswerGenerator {
    client: Arc<dyn LlmClient>,
    prompt: PromptDefinition,
    model: String,
    temperature: f32,
}

impl AnswerGenerator {
    /// Create a generator with the built-in prompt and default temperature.
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            prompt: default_prompt(),
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Use a different prompt definition.
    pub fn with_prompt(mut self, prompt: PromptDefinition) -> Self {
        self.prompt = prompt;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_name(&self) -> &str {
        self.client.provider_name()
    }

    /// Answer `question` from `context`.
    pub async fn generate(&self, context: &str, question: &str) -> Result<String, AnswerError> {
        let built = build_prompt(&self.prompt, context, question)
            .map_err(|e| AnswerError::completion(&e))?;

        let request = LlmRequest::new(built.user, &self.model).with_temperature(self.temperature);

        tracing::debug!(
            "Requesting completion from {} (model: {}, prompt: {}, context: {} chars)",
            self.client.provider_name(),
            self.model,
            built.metadata.source_prompt_id,
            built.metadata.context_chars
        );

        let response = self.client.complete(&request).await.map_err(|e| {
            tracing::warn!("Completion request failed: {}", e);
            AnswerError::completion(&e)
        })?;

        if response.usage.total_tokens > 0 {
            tracing::debug!(
                "Completion used {} tokens ({} prompt, {} completion)",
                response.usage.total_tokens,
                response.usage.prompt_tokens,
                response.usage.completion_tokens
            );
        }

        Ok(postprocess(&response.content))
    }
}
