use std::sync::Arc;

use crate::config::Config;
use crate::intelligence::Stylist;
use crate::llm::LlmProvider;
use crate::services::SessionRegistry;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Provider built from the environment. Sessions derive their own
    /// provider from it when the user enters a credential.
    pub llm: LlmProvider,
    pub sessions: SessionRegistry,
}

impl AppState {
    pub fn new(config: Config, llm: LlmProvider) -> Self {
        let sessions =
            SessionRegistry::new(config.session.max_sessions, config.session.idle_timeout_secs);

        Self {
            config: Arc::new(config),
            llm,
            sessions,
        }
    }

    /// The bot for a new session: bound to `api_key` when given, otherwise
    /// to whatever credential the environment provides.
    pub fn stylist_for(&self, api_key: Option<&str>) -> Stylist {
        let provider = match api_key.map(str::trim).filter(|key| !key.is_empty()) {
            Some(key) => self.llm.with_api_key(key),
            None => self.llm.clone(),
        };
        Stylist::from_provider(provider, &self.config.wardrobe)
    }
}
