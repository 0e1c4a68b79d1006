//! Pitchside Configuration Management
//!
//! Handles configuration from environment variables and TOML files
//! with sensible defaults for development.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ResponseStyle;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Football data API configuration
    pub data_api: DataApiConfig,

    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Intent extractor configuration
    pub extractor: ExtractorConfig,

    /// Chat behaviour
    pub chat: ChatConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Server
        if let Ok(host) = std::env::var("API_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("API_PORT") {
            config.server.port = parse_var("API_PORT", port)?;
        }

        // Football data API
        if let Ok(url) = std::env::var("FOOTBALL_API_URL") {
            config.data_api.base_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(secs) = std::env::var("FOOTBALL_API_TIMEOUT_SECS") {
            config.data_api.timeout_secs = parse_var("FOOTBALL_API_TIMEOUT_SECS", secs)?;
        }
        if let Ok(secs) = std::env::var("CACHE_TTL_SECS") {
            config.data_api.cache_ttl_secs = parse_var("CACHE_TTL_SECS", secs)?;
        }

        // LLM
        if let Ok(provider) = std::env::var("LLM_PROVIDER") {
            config.llm.provider = provider.parse()?;
        }
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if config.llm.provider == LlmProvider::Gemini {
                config.llm.api_key = Some(key);
            }
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if config.llm.provider == LlmProvider::OpenAI {
                config.llm.api_key = Some(key);
            }
        }
        if let Ok(url) = std::env::var("OPENAI_BASE_URL") {
            config.llm.base_url = Some(url);
        }
        if let Ok(model) = std::env::var("LLM_MODEL") {
            config.llm.model = model;
        }

        // Extractor
        if let Ok(max) = std::env::var("MAX_INPUT_CHARS") {
            config.extractor.max_input_chars = parse_var("MAX_INPUT_CHARS", max)?;
        }

        // Chat
        if let Ok(style) = std::env::var("RESPONSE_STYLE") {
            config.chat.default_style =
                style.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "RESPONSE_STYLE".to_string(),
                    value: style,
                })?;
        }

        // Logging
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(format) = std::env::var("LOG_FORMAT") {
            config.logging.json_format = format.eq_ignore_ascii_case("json");
        }

        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        let env_config = Self::from_env()?;

        // Only override if env values differ from defaults
        if env_config.server.host != ServerConfig::default().host {
            self.server.host = env_config.server.host;
        }
        if env_config.server.port != ServerConfig::default().port {
            self.server.port = env_config.server.port;
        }
        if env_config.data_api.base_url != DataApiConfig::default().base_url {
            self.data_api.base_url = env_config.data_api.base_url;
        }
        if env_config.llm.provider != LlmConfig::default().provider {
            self.llm.provider = env_config.llm.provider;
        }
        if env_config.logging.level != LoggingConfig::default().level {
            self.logging.level = env_config.logging.level;
        }

        // Always use env for secrets
        if env_config.llm.api_key.is_some() {
            self.llm.api_key = env_config.llm.api_key;
        }

        Ok(self)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value,
    })
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Allowed origins for CORS (empty means same-origin only)
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: vec![],
        }
    }
}

/// Football data API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataApiConfig {
    /// Base URL of the Transfermarkt-compatible API
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,

    /// How long a response stays cached
    pub cache_ttl_secs: u64,

    /// Maximum number of cached responses
    pub cache_max_capacity: u64,

    /// Attempts per request when rate limited
    pub max_retries: u32,

    /// Backoff before the first retry; doubles on each attempt
    pub retry_base_delay_ms: u64,

    /// Number of moves fetched for "recent transfers"
    pub recent_transfers_limit: usize,
}

impl Default for DataApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://transfermarkt-api.fly.dev".to_string(),
            timeout_secs: 10,
            user_agent: "Football-Chatbot/1.0".to_string(),
            cache_ttl_secs: 3600,
            cache_max_capacity: 1_000,
            max_retries: 3,
            retry_base_delay_ms: 1000,
            recent_transfers_limit: 10,
        }
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// LLM provider to use
    pub provider: LlmProvider,

    /// API key; without one the template renderer is used
    pub api_key: Option<String>,

    /// API base URL override (OpenAI-compatible servers)
    pub base_url: Option<String>,

    /// Model name to use
    pub model: String,

    /// Maximum tokens for completion
    pub max_tokens: u32,

    /// Temperature for generation
    pub temperature: f32,

    /// Top-k sampling (Gemini only)
    pub top_k: u32,

    /// Nucleus sampling
    pub top_p: f32,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Gemini,
            api_key: None,
            base_url: None,
            model: "gemini-2.0-flash".to_string(),
            max_tokens: 300,
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            timeout_secs: 30,
        }
    }
}

impl LlmConfig {
    /// Whether an LLM can be called at all
    pub fn is_enabled(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|key| !key.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Supported LLM providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Gemini,
    OpenAI,
}

impl std::str::FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAI),
            _ => Err(ConfigError::InvalidValue {
                key: "LLM_PROVIDER".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Intent extractor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Longest accepted message, in characters
    pub max_input_chars: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_input_chars: 1000,
        }
    }
}

/// Chat behaviour
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ChatConfig {
    /// Style used when the caller does not pick one
    pub default_style: ResponseStyle,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,

    /// Include file/line in logs
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            include_location: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

impl From<ConfigError> for crate::PitchsideError {
    fn from(err: ConfigError) -> Self {
        crate::PitchsideError::ConfigError(err.to_string())
    }
}
