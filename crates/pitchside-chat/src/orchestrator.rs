//! Chat-turn orchestration
//!
//! One call per user message: interpret, fetch the data the intent needs,
//! render the reply, then advance the caller's conversation context.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use pitchside_core::{
    ConversationContext, DataApiConfig, EntityKind, ExtractionResult, FootballData,
    FootballDataSource, Intent, ResponseStyle, Result,
};
use pitchside_intent::IntentProcessor;

use crate::responder::ResponseGenerator;
use crate::suggestions::quick_replies;

/// Reply sent when the message itself could not be interpreted
pub const ERROR_REPLY: &str =
    "I'm sorry, I encountered an error processing your request. Please try rephrasing your question.";

/// Outcome of one chat turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Rendered answer
    pub reply: String,

    /// How the message was interpreted
    pub extraction: ExtractionResult,

    /// Suggested follow-up questions
    pub quick_replies: Vec<String>,

    /// Kind of data the answer was based on
    pub data_kind: String,
}

/// Drives a conversation turn by turn
///
/// Holds no conversation state of its own; callers own the
/// [`ConversationContext`] and pass it to every turn.
#[derive(Clone)]
pub struct ChatOrchestrator {
    processor: Arc<RwLock<IntentProcessor>>,
    data: Arc<dyn FootballDataSource>,
    responder: ResponseGenerator,
    recent_limit: usize,
}

impl ChatOrchestrator {
    pub fn new(
        processor: Arc<RwLock<IntentProcessor>>,
        data: Arc<dyn FootballDataSource>,
        responder: ResponseGenerator,
    ) -> Self {
        Self {
            processor,
            data,
            responder,
            recent_limit: DataApiConfig::default().recent_transfers_limit,
        }
    }

    /// Number of transfers fetched for `recent_transfers`
    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }

    /// Shared interpreter, for pattern administration
    pub fn processor(&self) -> Arc<RwLock<IntentProcessor>> {
        Arc::clone(&self.processor)
    }

    pub fn responder(&self) -> &ResponseGenerator {
        &self.responder
    }

    /// Answer one message and advance `context`
    ///
    /// Rejected or failed interpretations get [`ERROR_REPLY`] and leave the
    /// context untouched.
    pub async fn handle_turn(
        &self,
        message: &str,
        context: &mut ConversationContext,
        style: ResponseStyle,
    ) -> ChatTurn {
        let extraction = self.processor.read().await.process(message, Some(&*context));

        if !extraction.success {
            debug!(error = ?extraction.error, "Message not interpreted");
            return ChatTurn {
                reply: ERROR_REPLY.to_string(),
                quick_replies: quick_replies(extraction.intent, &extraction.entities),
                extraction,
                data_kind: FootballData::Absent.kind().to_string(),
            };
        }

        let data = self.fetch(&extraction).await;
        let reply = self
            .responder
            .generate(&extraction, &data, message, context, style)
            .await;

        context.record_turn(&extraction, &data);

        info!(
            target: "interaction",
            user_input = message,
            intent = %extraction.intent,
            entities = %serde_json::to_string(&extraction.entities).unwrap_or_default(),
            data = data.kind(),
            response_length = reply.chars().count(),
            "Interaction"
        );

        ChatTurn {
            reply,
            quick_replies: quick_replies(extraction.intent, &extraction.entities),
            data_kind: data.kind().to_string(),
            extraction,
        }
    }

    /// Data for an interpreted message; any failure reads as absent data
    pub async fn fetch(&self, extraction: &ExtractionResult) -> FootballData {
        let intent = extraction.intent;
        match self.try_fetch(extraction).await {
            Ok(data) => data,
            Err(e) => {
                error!(%intent, source = self.data.name(), "Data fetch failed: {}", e);
                FootballData::Absent
            }
        }
    }

    async fn try_fetch(&self, extraction: &ExtractionResult) -> Result<FootballData> {
        let entities = &extraction.entities;
        let player = entities.get(EntityKind::PlayerName);
        let team = entities.get(EntityKind::TeamName);
        let league = entities.get(EntityKind::LeagueName);

        let data = match (extraction.intent, player, team, league) {
            (Intent::PlayerInfo | Intent::PlayerStats, Some(name), _, _) => self
                .data
                .player_profile(name)
                .await?
                .map(FootballData::Player),
            (Intent::TeamInfo | Intent::TeamStats, _, Some(name), _) => self
                .data
                .club_profile(name)
                .await?
                .map(FootballData::Club),
            (Intent::Transfers, Some(name), _, _) => self
                .data
                .player_transfers(name)
                .await?
                .map(FootballData::Transfers),
            (Intent::MarketValue, Some(name), _, _) => self
                .data
                .player_market_value(name)
                .await?
                .map(FootballData::MarketValue),
            (Intent::LeagueTable, _, _, Some(name)) => self
                .data
                .league_table(name)
                .await?
                .map(FootballData::Table),
            (Intent::RecentTransfers, _, _, _) => Some(FootballData::RecentTransfers(
                self.data.recent_transfers(self.recent_limit).await?,
            )),
            _ => None,
        };

        Ok(data.unwrap_or_default())
    }
}
