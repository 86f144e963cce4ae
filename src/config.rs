use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_STYLE_MODEL_PATH: &str = "style_model.json";

pub const PREFERRED_MODELS: [&str; 6] = [
    "gemini-1.5-flash",
    "gemini-1.5-flash-001",
    "gemini-1.5-flash-8b",
    "gemini-2.0-flash-lite",
    "gemini-2.0-flash",
    "gemini-pro",
];
pub const FALLBACK_MODELS: [&str; 2] = ["gemini-1.5-flash", "gemini-pro"];
pub const FAST_TIER_MARKER: &str = "flash";

/// Rejects blank keys and the placeholders people leave in `.env` templates.
pub fn valid_api_key(key: &str) -> bool {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return false;
    }
    if trimmed.contains("...") || trimmed.contains("PASTE") {
        return false;
    }
    true
}

#[derive(Clone, Debug)]
pub struct ModelPreferences {
    pub preferred: Vec<String>,
    pub fallback: Vec<String>,
    pub tier_marker: String,
}

impl Default for ModelPreferences {
    fn default() -> Self {
        Self {
            preferred: PREFERRED_MODELS.iter().map(|s| s.to_string()).collect(),
            fallback: FALLBACK_MODELS.iter().map(|s| s.to_string()).collect(),
            tier_marker: FAST_TIER_MARKER.to_string(),
        }
    }
}

/// Built once at startup and shared read-only by every component.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub bind_addr: String,
    pub style_model_path: PathBuf,
    pub search_max_results: usize,
    pub url_fetch_timeout: Duration,
    pub llm_timeout: Duration,
    pub model_list_timeout: Duration,
    /// Zero disables caching of the model listing.
    pub model_list_ttl: Duration,
    pub models: ModelPreferences,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            style_model_path: PathBuf::from(DEFAULT_STYLE_MODEL_PATH),
            search_max_results: 4,
            url_fetch_timeout: Duration::from_secs(5),
            llm_timeout: Duration::from_secs(20),
            model_list_timeout: Duration::from_secs(10),
            model_list_ttl: Duration::ZERO,
            models: ModelPreferences::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_key = env::var("GOOGLE_API_KEY")
            .ok()
            .filter(|k| valid_api_key(k))
            .or_else(|| env::var("GEMINI_API_KEY").ok().filter(|k| valid_api_key(k)))
            .map(|k| k.trim().to_string());
        if api_key.is_none() {
            warn!("GOOGLE_API_KEY is missing; AI analysis will fail");
        }

        Self {
            api_key,
            api_base: env::var("GEMINI_API_BASE")
                .map(|b| b.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            style_model_path: env::var("STYLE_MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.style_model_path),
            search_max_results: env_parse("SEARCH_MAX_RESULTS").unwrap_or(defaults.search_max_results),
            url_fetch_timeout: env_secs("URL_FETCH_TIMEOUT_SECS").unwrap_or(defaults.url_fetch_timeout),
            llm_timeout: env_secs("LLM_TIMEOUT_SECS").unwrap_or(defaults.llm_timeout),
            model_list_timeout: env_secs("MODEL_LIST_TIMEOUT_SECS")
                .unwrap_or(defaults.model_list_timeout),
            model_list_ttl: env_secs("MODEL_LIST_TTL_SECS").unwrap_or(defaults.model_list_ttl),
            models: defaults.models,
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(var = name, value = %raw, "ignoring unparsable setting");
            None
        }
    }
}

fn env_secs(name: &str) -> Option<Duration> {
    env_parse::<u64>(name).map(Duration::from_secs)
}
