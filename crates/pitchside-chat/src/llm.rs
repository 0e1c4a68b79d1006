//! LLM client implementations
//!
//! Gemini `generateContent` and OpenAI-compatible chat completions, both
//! behind [`LlmClient`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pitchside_core::{LlmClient, LlmConfig, LlmProvider, PitchsideError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

fn http_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| PitchsideError::ConfigError(format!("HTTP client: {e}")))
}

// ============================================================================
// Gemini Client
// ============================================================================

/// Google Gemini API client
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    generation: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
    stop_sequences: Vec<String>,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GeminiClient {
    /// Create a new Gemini client with default sampling settings
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let config = LlmConfig {
            api_key: Some(api_key.into()),
            model: model.into(),
            ..Default::default()
        };
        Self::from_config(&config)
    }

    /// Create from config
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| PitchsideError::ConfigError("Gemini API key required".to_string()))?;

        Ok(Self {
            client: http_client(config.timeout_secs)?,
            api_key,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| GEMINI_BASE_URL.to_string()),
            model: config.model.clone(),
            generation: GenerationConfig {
                temperature: config.temperature,
                top_k: config.top_k,
                top_p: config.top_p,
                max_output_tokens: config.max_tokens,
                stop_sequences: Vec::new(),
            },
        })
    }

    /// Set custom base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: self.generation.clone(),
            safety_settings: SAFETY_CATEGORIES
                .into_iter()
                .map(|category| SafetySetting {
                    category,
                    threshold: "BLOCK_MEDIUM_AND_ABOVE",
                })
                .collect(),
        };

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url.trim_end_matches('/'),
                self.model
            ))
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| PitchsideError::LlmError(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PitchsideError::LlmError(format!(
                "Gemini error {status}: {error_text}"
            )));
        }

        let result: GeminiResponse = response
            .json()
            .await
            .map_err(|e| PitchsideError::LlmError(format!("Failed to parse response: {e}")))?;

        result
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|part| part.text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| PitchsideError::LlmError("No response generated".to_string()))
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

// ============================================================================
// OpenAI Client
// ============================================================================

/// OpenAI-compatible chat completions client
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

impl OpenAiClient {
    /// Create from config
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| PitchsideError::ConfigError("OpenAI API key required".to_string()))?;

        Ok(Self {
            client: http_client(config.timeout_secs)?,
            api_key,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| OPENAI_BASE_URL.to_string()),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
        })
    }

    /// Set custom base URL (for compatible servers)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = OpenAiRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
        };

        let response = self
            .client
            .post(format!(
                "{}/chat/completions",
                self.base_url.trim_end_matches('/')
            ))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| PitchsideError::LlmError(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PitchsideError::LlmError(format!(
                "OpenAI error: {error_text}"
            )));
        }

        let result: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| PitchsideError::LlmError(format!("Failed to parse response: {e}")))?;

        result
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| PitchsideError::LlmError("No response generated".to_string()))
    }

    fn name(&self) -> &str {
        "openai"
    }
}

// ============================================================================
// Factory function
// ============================================================================

/// Create an LLM client from config
///
/// Returns `Ok(None)` when no API key is configured, so callers render
/// answers from templates only.
pub fn create_llm_client(config: &LlmConfig) -> Result<Option<Arc<dyn LlmClient>>> {
    if !config.is_enabled() {
        return Ok(None);
    }

    let client: Arc<dyn LlmClient> = match config.provider {
        LlmProvider::Gemini => Arc::new(GeminiClient::from_config(config)?),
        LlmProvider::OpenAI => Arc::new(OpenAiClient::from_config(config)?),
    };
    Ok(Some(client))
}

// ============================================================================
// Tests
// ============================================================================
