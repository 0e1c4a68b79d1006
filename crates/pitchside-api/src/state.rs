//! Application state management

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;

use pitchside_chat::{create_llm_client, ChatOrchestrator, ResponseGenerator};
use pitchside_core::{AppConfig, Result};
use pitchside_data::{ResponseCache, TransfermarktClient};
use pitchside_intent::IntentProcessor;

/// Application state shared across handlers
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Chat pipeline
    pub chat: ChatOrchestrator,
    /// Data API response cache, when the data source has one
    pub cache: Option<ResponseCache>,
    /// Server start time
    pub start_time: Instant,
    /// Request counter
    pub request_count: AtomicU64,
}

impl AppState {
    /// Create new application state around an existing chat pipeline
    pub fn new(config: AppConfig, chat: ChatOrchestrator, cache: Option<ResponseCache>) -> Self {
        Self {
            config,
            chat,
            cache,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
        }
    }

    /// Wire the production pipeline from config
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let client = TransfermarktClient::from_config(&config.data_api)?;
        let cache = client.cache().clone();

        let llm = create_llm_client(&config.llm)?;
        match &llm {
            Some(llm) => tracing::info!(llm = llm.name(), "LLM responses enabled"),
            None => tracing::info!("No LLM API key configured, using template responses"),
        }

        let processor = IntentProcessor::with_config(&config.extractor);
        let chat = ChatOrchestrator::new(
            Arc::new(RwLock::new(processor)),
            Arc::new(client),
            ResponseGenerator::new(llm),
        )
        .with_recent_limit(config.data_api.recent_transfers_limit);

        Ok(Self::new(config, chat, Some(cache)))
    }

    /// Increment request counter
    pub fn increment_requests(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::SeqCst)
    }

    /// Get total request count
    pub fn get_request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
