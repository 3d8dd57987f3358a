use std::sync::Arc;

use crate::config::WardrobeConfig;
use crate::intelligence::{AttributeExtractor, RecommendationEngine};
use crate::llm::{CredentialSource, LlmBackend, LlmProvider, ModelGateway};

/// The per-session bot: one gateway shared by analysis and recommendations.
#[derive(Clone)]
pub struct Stylist {
    extractor: AttributeExtractor,
    recommender: RecommendationEngine,
    credential: CredentialSource,
    ready: bool,
    /// Set when the provider itself is misconfigured; no credential fixes it.
    unavailable: Option<String>,
}

impl Stylist {
    /// Bind to an arbitrary gateway, assumed ready.
    pub fn new(gateway: Arc<dyn ModelGateway>, config: &WardrobeConfig) -> Self {
        Self {
            extractor: AttributeExtractor::new(gateway.clone()),
            recommender: RecommendationEngine::new(gateway, config),
            credential: CredentialSource::NotRequired,
            ready: true,
            unavailable: None,
        }
    }

    /// Bind to a configured provider, carrying over its credential state.
    pub fn from_provider(provider: LlmProvider, config: &WardrobeConfig) -> Self {
        let credential = provider.credential_source();
        let ready = provider.is_available();
        let unavailable = match provider.backend() {
            LlmBackend::Unavailable { reason } => Some(reason.clone()),
            _ => None,
        };
        let gateway: Arc<dyn ModelGateway> = Arc::new(provider);

        Self {
            credential,
            ready,
            unavailable,
            ..Self::new(gateway, config)
        }
    }

    pub fn extractor(&self) -> &AttributeExtractor {
        &self.extractor
    }

    pub fn recommender(&self) -> &RecommendationEngine {
        &self.recommender
    }

    /// Whether the gateway has what it needs to serve requests.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn credential_source(&self) -> CredentialSource {
        self.credential
    }

    /// Why the provider cannot serve requests regardless of credential.
    pub fn unavailable_reason(&self) -> Option<&str> {
        self.unavailable.as_deref()
    }
}
