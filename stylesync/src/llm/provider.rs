use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::{parse_llm_provider_model, LlmConfig};
use crate::error::{Result, StyleSyncError};
use crate::llm::api::{default_base_url, provider_requires_api_key, LlmApiClient};
use crate::llm::gateway::{GatewayRequest, ModelGateway};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmBackend {
    Gemini,
    OpenAI,
    OpenRouter,
    Ollama,
    LmStudio,
    OpenAICompatible { base_url: String },
    Unavailable { reason: String },
}

impl LlmBackend {
    pub fn name(&self) -> &'static str {
        match self {
            LlmBackend::Gemini => "gemini",
            LlmBackend::OpenAI => "openai",
            LlmBackend::OpenRouter => "openrouter",
            LlmBackend::Ollama => "ollama",
            LlmBackend::LmStudio => "lmstudio",
            LlmBackend::OpenAICompatible { .. } => "openai-compatible",
            LlmBackend::Unavailable { .. } => "unavailable",
        }
    }
}

/// Where a provider's credential came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CredentialSource {
    Environment,
    Session,
    NotRequired,
    Missing,
}

#[derive(Debug, Clone)]
pub struct LlmProvider {
    backend: LlmBackend,
    config: Arc<LlmConfig>,
    client: Option<LlmApiClient>,
    credential: CredentialSource,
}

impl LlmProvider {
    /// Build the provider from configuration. A credential in `config` is
    /// treated as coming from the environment.
    pub fn new(config: &LlmConfig) -> Self {
        let credential = if config.api_key.is_some() {
            CredentialSource::Environment
        } else if provider_requires_api_key(&config.model) {
            CredentialSource::Missing
        } else {
            CredentialSource::NotRequired
        };

        Self::build(config.clone(), credential)
    }

    fn build(config: LlmConfig, credential: CredentialSource) -> Self {
        let (provider, _model) = parse_llm_provider_model(&config.model);

        let mut backend = match provider.to_lowercase().as_str() {
            "gemini" => LlmBackend::Gemini,
            "openai" => LlmBackend::OpenAI,
            "openrouter" => LlmBackend::OpenRouter,
            "ollama" => LlmBackend::Ollama,
            "lmstudio" => LlmBackend::LmStudio,
            _ => {
                if let Some(base_url) = &config.base_url {
                    LlmBackend::OpenAICompatible {
                        base_url: base_url.clone(),
                    }
                } else {
                    LlmBackend::Unavailable {
                        reason: format!("Unknown provider in model: {}", config.model),
                    }
                }
            }
        };

        let client = if matches!(backend, LlmBackend::Unavailable { .. }) {
            None
        } else {
            match LlmApiClient::new(&config) {
                Ok(client) => Some(client),
                Err(StyleSyncError::MissingCredential) => None,
                Err(error) => {
                    backend = LlmBackend::Unavailable {
                        reason: error.to_string(),
                    };
                    None
                }
            }
        };

        Self {
            backend,
            config: Arc::new(config),
            client,
            credential,
        }
    }

    /// A copy of this provider bound to a credential entered by the user.
    pub fn with_api_key(&self, api_key: &str) -> Self {
        let config = LlmConfig {
            api_key: Some(api_key.trim().to_string()),
            ..(*self.config).clone()
        };
        Self::build(config, CredentialSource::Session)
    }

    /// Configured and holding whatever credential the provider needs.
    pub fn is_available(&self) -> bool {
        self.client.is_some()
    }

    /// The provider itself is usable once a credential is supplied.
    pub fn is_configured(&self) -> bool {
        !matches!(self.backend, LlmBackend::Unavailable { .. })
    }

    pub fn backend(&self) -> &LlmBackend {
        &self.backend
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    pub fn credential_source(&self) -> CredentialSource {
        self.credential
    }

    pub fn base_url(&self) -> Option<&str> {
        match &self.backend {
            LlmBackend::Unavailable { .. } => None,
            LlmBackend::OpenAICompatible { base_url } => Some(base_url),
            _ => Some(self.config.base_url.as_deref().unwrap_or_else(|| {
                let (provider, _) = parse_llm_provider_model(&self.config.model);
                default_base_url(provider)
            })),
        }
    }

    fn unavailable_error(&self) -> StyleSyncError {
        match &self.backend {
            LlmBackend::Unavailable { reason } => StyleSyncError::LlmUnavailable(reason.clone()),
            _ => StyleSyncError::MissingCredential,
        }
    }
}

#[async_trait]
impl ModelGateway for LlmProvider {
    async fn generate_json(&self, request: &GatewayRequest) -> Result<Value> {
        let Some(client) = &self.client else {
            return Err(self.unavailable_error());
        };

        client.generate_json(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(model: &str, api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            model: model.to_string(),
            api_key: api_key.map(str::to_string),
            ..LlmConfig::default()
        }
    }

    #[test]
    fn test_gemini_without_key_needs_credential() {
        let provider = LlmProvider::new(&config("gemini/gemini-2.0-flash", None));

        assert_eq!(provider.backend(), &LlmBackend::Gemini);
        assert!(provider.is_configured());
        assert!(!provider.is_available());
        assert_eq!(provider.credential_source(), CredentialSource::Missing);
    }

    #[test]
    fn test_with_api_key_initializes() {
        let provider = LlmProvider::new(&config("gemini/gemini-2.0-flash", None));
        let bound = provider.with_api_key("  user-key ");

        assert!(bound.is_available());
        assert_eq!(bound.credential_source(), CredentialSource::Session);
        assert_eq!(bound.config().api_key.as_deref(), Some("user-key"));
        assert!(!provider.is_available());
    }

    #[test]
    fn test_local_provider_needs_no_key() {
        let provider = LlmProvider::new(&config("ollama/llava", None));

        assert!(provider.is_available());
        assert_eq!(provider.credential_source(), CredentialSource::NotRequired);
        assert_eq!(provider.base_url(), Some("http://localhost:11434/v1"));
    }

    #[test]
    fn test_unknown_provider_without_base_url_is_unavailable() {
        let provider = LlmProvider::new(&config("mystery-model", Some("key")));

        assert!(matches!(provider.backend(), LlmBackend::Unavailable { .. }));
        assert!(!provider.is_configured());
        assert_eq!(provider.base_url(), None);
    }

    #[tokio::test]
    async fn test_generate_without_credential_fails_fast() {
        let provider = LlmProvider::new(&config("openai/gpt-4o-mini", None));
        let request = GatewayRequest::new("Test", "system".into(), "user".into());

        let result = provider.generate_json(&request).await;
        assert!(matches!(result, Err(StyleSyncError::MissingCredential)));
    }
}
