use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_env_opt<T: std::str::FromStr>(var: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Ignoring.", val, var, e);
                None
            }
        },
        Err(_) => None,
    }
}

/// Read a non-empty string variable. Blank values count as unset.
fn env_non_empty(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub const DEFAULT_PORT: u16 = 8501;
pub const DEFAULT_LLM_MODEL: &str = "gemini/gemini-2.0-flash";

/// Environment variables checked for the model credential, in priority order.
pub const CREDENTIAL_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "LLM_API_KEY"];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub wardrobe: WardrobeConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" | "" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// LLM configuration for the multimodal chat model
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    /// Credential from the environment. When absent, each session has to
    /// supply its own key before analysis or recommendations are possible.
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_LLM_MODEL.to_string(),
            api_key: None,
            base_url: None,
            timeout_secs: 60,
            max_retries: 2,
            temperature: 0.1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WardrobeConfig {
    pub max_upload_bytes: usize,
    pub default_recommendations: usize,
    pub max_recommendations: usize,
}

impl Default for WardrobeConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 20 * 1024 * 1024,
            default_recommendations: 3,
            max_recommendations: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub max_sessions: usize,
    pub idle_timeout_secs: u64,
    pub sweep_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: 1000,
            idle_timeout_secs: 3600,
            sweep_interval_secs: 60,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let llm_defaults = LlmConfig::default();
        let wardrobe_defaults = WardrobeConfig::default();
        let session_defaults = SessionConfig::default();

        Self {
            server: ServerConfig {
                host: env_non_empty("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_env_or("PORT", DEFAULT_PORT),
                log_format: parse_env_opt("LOG_FORMAT").unwrap_or(LogFormat::Pretty),
            },
            llm: LlmConfig {
                model: env_non_empty("LLM_MODEL").unwrap_or(llm_defaults.model),
                api_key: CREDENTIAL_ENV_VARS
                    .iter()
                    .find_map(|var| env_non_empty(var)),
                base_url: env_non_empty("LLM_BASE_URL"),
                timeout_secs: parse_env_or("LLM_TIMEOUT", llm_defaults.timeout_secs),
                max_retries: parse_env_or("LLM_MAX_RETRIES", llm_defaults.max_retries),
                temperature: parse_env_or("LLM_TEMPERATURE", llm_defaults.temperature),
            },
            wardrobe: WardrobeConfig {
                max_upload_bytes: parse_env_or(
                    "MAX_UPLOAD_BYTES",
                    wardrobe_defaults.max_upload_bytes,
                ),
                default_recommendations: parse_env_or(
                    "DEFAULT_RECOMMENDATIONS",
                    wardrobe_defaults.default_recommendations,
                ),
                max_recommendations: parse_env_or(
                    "MAX_RECOMMENDATIONS",
                    wardrobe_defaults.max_recommendations,
                ),
            },
            session: SessionConfig {
                max_sessions: parse_env_or("MAX_SESSIONS", session_defaults.max_sessions),
                idle_timeout_secs: parse_env_or(
                    "SESSION_IDLE_TIMEOUT_SECS",
                    session_defaults.idle_timeout_secs,
                ),
                sweep_interval_secs: parse_env_or(
                    "SESSION_SWEEP_INTERVAL_SECS",
                    session_defaults.sweep_interval_secs,
                ),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// Known LLM providers that use OpenAI-compatible APIs
pub const KNOWN_LLM_PROVIDERS: &[&str] = &["gemini", "openai", "openrouter", "ollama", "lmstudio"];

/// Parse an LLM model name into (provider, model) tuple.
pub fn parse_llm_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if KNOWN_LLM_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    // Default to treating the whole string as a local model
    ("local", model)
}
