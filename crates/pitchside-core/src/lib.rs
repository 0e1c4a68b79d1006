//! Pitchside Core - Domain models, traits, and shared types
//!
//! This crate defines the abstractions shared by every Pitchside crate:
//! - Intent labels and extracted entities
//! - The extraction result handed from the interpreter to the chat layer
//! - Conversation context carried between turns
//! - Football data payloads returned by the data source
//! - Common error types
//! - Collaborator traits (LLM client, football data source)
//! - Configuration management and tracing setup

pub mod config;
pub mod football;
pub mod telemetry;

pub use config::{
    AppConfig, ChatConfig, ConfigError, DataApiConfig, ExtractorConfig, LlmConfig, LlmProvider,
    LoggingConfig, ServerConfig,
};
pub use football::{
    ClubProfile, FootballData, LeagueTable, MarketValueHistory, MarketValuePoint, PlayerProfile,
    TableRow, TransferRecord,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for Pitchside operations
#[derive(Error, Debug)]
pub enum PitchsideError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Data source error: {0}")]
    DataSourceError(String),

    #[error("Rate limited by {0}")]
    RateLimited(String),

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, PitchsideError>;

// ============================================================================
// Intents
// ============================================================================

/// Closed set of intents the interpreter can assign to a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    PlayerInfo,
    PlayerStats,
    TeamInfo,
    TeamStats,
    Transfers,
    MarketValue,
    Comparison,
    LeagueTable,
    RecentTransfers,
    Greeting,
    Help,
    GeneralQuestion,
    Error,
}

impl Intent {
    /// Every label, in declaration order
    pub const ALL: [Intent; 13] = [
        Intent::PlayerInfo,
        Intent::PlayerStats,
        Intent::TeamInfo,
        Intent::TeamStats,
        Intent::Transfers,
        Intent::MarketValue,
        Intent::Comparison,
        Intent::LeagueTable,
        Intent::RecentTransfers,
        Intent::Greeting,
        Intent::Help,
        Intent::GeneralQuestion,
        Intent::Error,
    ];

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlayerInfo => "player_info",
            Self::PlayerStats => "player_stats",
            Self::TeamInfo => "team_info",
            Self::TeamStats => "team_stats",
            Self::Transfers => "transfers",
            Self::MarketValue => "market_value",
            Self::Comparison => "comparison",
            Self::LeagueTable => "league_table",
            Self::RecentTransfers => "recent_transfers",
            Self::Greeting => "greeting",
            Self::Help => "help",
            Self::GeneralQuestion => "general_question",
            Self::Error => "error",
        }
    }

    /// Intents whose patterns capture a player name
    pub fn expects_player_name(&self) -> bool {
        matches!(
            self,
            Self::PlayerInfo | Self::PlayerStats | Self::Transfers | Self::MarketValue
        )
    }

    /// Intents whose patterns capture a team name
    pub fn expects_team_name(&self) -> bool {
        matches!(self, Self::TeamInfo | Self::TeamStats)
    }

    /// Intents whose patterns capture a league name
    pub fn expects_league_name(&self) -> bool {
        matches!(self, Self::LeagueTable)
    }

    /// Intents that are complete without any entity
    pub fn is_self_contained(&self) -> bool {
        matches!(self, Self::Greeting | Self::Help | Self::RecentTransfers)
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Intent {
    type Err = PitchsideError;

    fn from_str(s: &str) -> Result<Self> {
        let label = s.trim().to_lowercase();
        Intent::ALL
            .into_iter()
            .find(|intent| intent.as_str() == label)
            .ok_or_else(|| PitchsideError::ValidationError(format!("Unknown intent: {s}")))
    }
}

// ============================================================================
// Entities
// ============================================================================

/// Proper-noun entity kinds that can be carried over between turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    PlayerName,
    TeamName,
    LeagueName,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [
        EntityKind::PlayerName,
        EntityKind::TeamName,
        EntityKind::LeagueName,
    ];

    /// Key used in the serialized entity map
    pub fn key(&self) -> &'static str {
        match self {
            Self::PlayerName => "player_name",
            Self::TeamName => "team_name",
            Self::LeagueName => "league_name",
        }
    }

    /// Whether `intent` declares this kind as its subject
    pub fn expected_by(&self, intent: Intent) -> bool {
        match self {
            Self::PlayerName => intent.expects_player_name(),
            Self::TeamName => intent.expects_team_name(),
            Self::LeagueName => intent.expects_league_name(),
        }
    }
}

/// Entities extracted from a message
///
/// Serializes as a flat map: absent kinds are omitted and `numbers` is
/// omitted when empty. Setters drop blank values, so no serialized key
/// ever carries an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub league_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,

    /// Numeric tokens in input order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub numbers: Vec<String>,

    /// Left-hand comparison operand
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity1: Option<String>,

    /// Right-hand comparison operand
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity2: Option<String>,
}

impl Entities {
    /// True when no entity of any kind is present
    pub fn is_empty(&self) -> bool {
        self.player_name.is_none()
            && self.team_name.is_none()
            && self.league_name.is_none()
            && self.position.is_none()
            && self.numbers.is_empty()
            && self.entity1.is_none()
            && self.entity2.is_none()
    }

    /// Non-blank value of a proper-noun kind
    pub fn get(&self, kind: EntityKind) -> Option<&str> {
        let value = match kind {
            EntityKind::PlayerName => &self.player_name,
            EntityKind::TeamName => &self.team_name,
            EntityKind::LeagueName => &self.league_name,
        };
        value.as_deref().filter(|v| !v.trim().is_empty())
    }

    /// Set a proper-noun kind; blank values are ignored
    pub fn set(&mut self, kind: EntityKind, value: impl Into<String>) {
        let Some(value) = non_blank(value.into()) else {
            return;
        };
        match kind {
            EntityKind::PlayerName => self.player_name = Some(value),
            EntityKind::TeamName => self.team_name = Some(value),
            EntityKind::LeagueName => self.league_name = Some(value),
        }
    }

    /// Set the position; blank values are ignored
    pub fn set_position(&mut self, value: impl Into<String>) {
        if let Some(value) = non_blank(value.into()) {
            self.position = Some(value);
        }
    }

    /// Set both comparison operands, or neither
    pub fn set_comparison(&mut self, left: impl Into<String>, right: impl Into<String>) {
        if let (Some(left), Some(right)) = (non_blank(left.into()), non_blank(right.into())) {
            self.entity1 = Some(left);
            self.entity2 = Some(right);
        }
    }

    /// Both comparison operands, when present
    pub fn comparison_pair(&self) -> Option<(&str, &str)> {
        match (self.entity1.as_deref(), self.entity2.as_deref()) {
            (Some(left), Some(right)) if !left.trim().is_empty() && !right.trim().is_empty() => {
                Some((left, right))
            }
            _ => None,
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

// ============================================================================
// Extraction Result
// ============================================================================

/// Structured outcome of interpreting one user message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Classified intent
    pub intent: Intent,

    /// Extracted entities
    pub entities: Entities,

    /// Lower-cased, trimmed input (empty on failure)
    pub original_text: String,

    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,

    /// False when the input was rejected or interpretation failed
    pub success: bool,

    /// Reason for failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionResult {
    /// Result for input that failed validation
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            intent: Intent::GeneralQuestion,
            entities: Entities::default(),
            original_text: String::new(),
            confidence: 0.0,
            success: false,
            error: Some(reason.into()),
        }
    }

    /// Result for an unexpected internal failure
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            intent: Intent::Error,
            entities: Entities::default(),
            original_text: String::new(),
            confidence: 0.0,
            success: false,
            error: Some(message.into()),
        }
    }
}

// ============================================================================
// Conversation Context
// ============================================================================

/// State carried from one chat turn to the next
///
/// Owned by the caller; the interpreter only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationContext {
    /// Intent of the previous turn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_intent: Option<Intent>,

    /// Entities of the previous turn
    #[serde(default)]
    pub last_entities: Entities,

    /// Data fetched for the previous turn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_data: Option<FootballData>,
}

impl ConversationContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context as if `intent` with `entities` was the previous turn
    pub fn after(intent: Intent, entities: Entities) -> Self {
        Self {
            last_intent: Some(intent),
            last_entities: entities,
            last_data: None,
        }
    }

    /// Replace the context with the outcome of the latest turn
    pub fn record_turn(&mut self, result: &ExtractionResult, data: &FootballData) {
        self.last_intent = Some(result.intent);
        self.last_entities = result.entities.clone();
        self.last_data = if data.is_absent() {
            None
        } else {
            Some(data.clone())
        };
    }

    /// Forget everything
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when no previous turn is recorded
    pub fn is_empty(&self) -> bool {
        self.last_intent.is_none() && self.last_entities.is_empty() && self.last_data.is_none()
    }
}

// ============================================================================
// Response Style
// ============================================================================

/// Tone of the rendered answer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseStyle {
    #[default]
    Casual,
    Professional,
    Detailed,
}

impl ResponseStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Casual => "Casual",
            Self::Professional => "Professional",
            Self::Detailed => "Detailed",
        }
    }
}

impl std::fmt::Display for ResponseStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ResponseStyle {
    type Err = PitchsideError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "casual" => Ok(Self::Casual),
            "professional" => Ok(Self::Professional),
            "detailed" => Ok(Self::Detailed),
            _ => Err(PitchsideError::ValidationError(format!(
                "Unknown response style: {s}"
            ))),
        }
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Trait for LLM clients
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate a completion for the prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Trait for football data backends
///
/// `Ok(None)` means the backend answered but knows nothing matching the
/// name; `Err` means the backend could not be queried.
#[async_trait::async_trait]
pub trait FootballDataSource: Send + Sync {
    /// Profile of the best match for a player name
    async fn player_profile(&self, name: &str) -> Result<Option<PlayerProfile>>;

    /// Transfer history of the best match for a player name
    async fn player_transfers(&self, name: &str) -> Result<Option<Vec<TransferRecord>>>;

    /// Market value history of the best match for a player name
    async fn player_market_value(&self, name: &str) -> Result<Option<MarketValueHistory>>;

    /// Profile of the best match for a club name
    async fn club_profile(&self, name: &str) -> Result<Option<ClubProfile>>;

    /// Current table of the first competition whose name contains `name`
    async fn league_table(&self, name: &str) -> Result<Option<LeagueTable>>;

    /// Latest transfers across all clubs
    async fn recent_transfers(&self, limit: usize) -> Result<Vec<TransferRecord>>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

// ============================================================================
// Tests
// ============================================================================
