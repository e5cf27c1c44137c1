//! LLM provider factory.
//!
//! Builds an [`LlmClient`] from a provider name plus the endpoint, key and
//! timeout resolved from configuration.

use crate::client::LlmClient;
use crate::providers::{OllamaClient, OpenAiClient};
use crate::types::ProviderType;
use std::sync::Arc;
use std::time::Duration;

/// Resolved connection settings for a provider.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions<'a> {
    /// Custom endpoint URL, provider default when `None`
    pub endpoint: Option<&'a str>,

    /// API key (required by OpenAI)
    pub api_key: Option<&'a str>,

    /// OpenAI organization header
    pub organization: Option<&'a str>,

    /// Whole-request timeout, none when `None`
    pub timeout: Option<Duration>,
}

/// Create an LLM client based on the provider name.
///
/// # Errors
/// Returns error if:
/// - Provider is unknown
/// - Required secrets are missing
/// - The HTTP client cannot be built
pub fn create_client(
    provider: &str,
    options: ClientOptions<'_>,
) -> Result<Arc<dyn LlmClient>, String> {
    let provider_type =
        ProviderType::parse(provider).ok_or_else(|| format!("Unknown provider: {}", provider))?;
    let base_url = options
        .endpoint
        .unwrap_or_else(|| provider_type.default_endpoint());

    tracing::debug!("Creating {} client for {}", provider_type.as_str(), base_url);

    match provider_type {
        ProviderType::Ollama => {
            let client = OllamaClient::with_base_url(base_url)
                .with_timeout(options.timeout)
                .map_err(|e| e.to_string())?;
            Ok(Arc::new(client))
        }
        ProviderType::OpenAI => {
            let api_key = options
                .api_key
                .ok_or_else(|| "OpenAI provider requires API key".to_string())?;
            let mut client = OpenAiClient::with_base_url(base_url, api_key)
                .with_timeout(options.timeout)
                .map_err(|e| e.to_string())?;
            if let Some(organization) = options.organization {
                client = client.with_organization(organization);
            }
            Ok(Arc::new(client))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_ollama_client() {
        let client = create_client("ollama", ClientOptions::default()).unwrap();
        assert_eq!(client.provider_name(), "ollama");
    }

    #[test]
    fn test_create_openai_with_key_and_timeout() {
        let client = create_client(
            "openai",
            ClientOptions {
                api_key: Some("sk-test"),
                timeout: Some(Duration::from_secs(30)),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(client.provider_name(), "openai");
    }

    #[test]
    fn test_openai_requires_api_key() {
        match create_client("openai", ClientOptions::default()) {
            Err(err) => assert!(err.contains("OpenAI provider requires API key")),
            Ok(_) => panic!("Expected error for OpenAI without API key"),
        }
    }

    #[test]
    fn test_unknown_provider() {
        match create_client("gguf", ClientOptions::default()) {
            Err(err) => assert!(err.contains("Unknown provider")),
            Ok(_) => panic!("Expected error for unknown provider"),
        }
    }
}
