//! Intent processor
//!
//! Turns one user message into an [`ExtractionResult`]: validate, normalise,
//! classify, extract entities, fill gaps from the conversation context and
//! score the outcome.

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tracing::{debug, error, info, warn};

use pitchside_core::{
    ConversationContext, Entities, EntityKind, ExtractionResult, ExtractorConfig, Intent,
};

use crate::entities::EntityExtractor;
use crate::patterns::PatternTable;

const BASE_CONFIDENCE: f32 = 0.5;
const ENTITY_BONUS: f32 = 0.3;
const SELF_CONTAINED_BONUS: f32 = 0.4;

/// Why a message was rejected before interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputRejection {
    #[error("Input is empty")]
    Empty,

    #[error("Input must be a string")]
    NotAString,

    #[error("Input contains only whitespace")]
    Whitespace,

    #[error("Input is too long")]
    TooLong,
}

/// Rule-based intent and entity interpreter
#[derive(Debug, Clone)]
pub struct IntentProcessor {
    table: PatternTable,
    extractor: EntityExtractor,
    max_input_chars: usize,
}

impl IntentProcessor {
    /// Processor with the built-in rules and default limits
    pub fn new() -> Self {
        Self::with_config(&ExtractorConfig::default())
    }

    /// Processor with the built-in rules and the given limits
    pub fn with_config(config: &ExtractorConfig) -> Self {
        Self::with_table(PatternTable::new(), config)
    }

    /// Processor over a custom pattern table
    pub fn with_table(table: PatternTable, config: &ExtractorConfig) -> Self {
        Self {
            table,
            extractor: EntityExtractor::new(),
            max_input_chars: config.max_input_chars,
        }
    }

    /// Interpret one message
    ///
    /// Never panics: invalid input and internal failures are reported in
    /// the result with `success == false`.
    pub fn process(&self, input: &str, context: Option<&ConversationContext>) -> ExtractionResult {
        if let Err(rejection) = self.validate_input(input) {
            warn!(reason = %rejection, "Rejected input");
            return ExtractionResult::invalid(rejection.to_string());
        }

        let text = input.trim().to_lowercase();

        match panic::catch_unwind(AssertUnwindSafe(|| self.interpret(&text, context))) {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(error = %message, "Interpretation failed");
                ExtractionResult::failure(message)
            }
        }
    }

    fn interpret(&self, text: &str, context: Option<&ConversationContext>) -> ExtractionResult {
        let intent = self.classify(text);
        let mut entities = self.extract_entities(text, intent);

        if let Some(context) = context {
            entities = apply_context(entities, context);
        }

        let confidence = score(intent, &entities);
        debug!(%intent, confidence, "Interpreted message");

        ExtractionResult {
            intent,
            entities,
            original_text: text.to_string(),
            confidence,
            success: true,
            error: None,
        }
    }

    /// Check a raw message against the input rules
    pub fn validate_input(&self, input: &str) -> Result<(), InputRejection> {
        if input.is_empty() {
            return Err(InputRejection::Empty);
        }
        if input.trim().is_empty() {
            return Err(InputRejection::Whitespace);
        }
        if input.chars().count() > self.max_input_chars {
            return Err(InputRejection::TooLong);
        }
        Ok(())
    }

    /// Intent of lower-cased, trimmed text
    pub fn classify(&self, text: &str) -> Intent {
        self.table.classify(text)
    }

    /// Entities of lower-cased, trimmed text for a classified intent
    pub fn extract_entities(&self, text: &str, intent: Intent) -> Entities {
        self.extractor.extract(text, intent, &self.table)
    }

    /// Add a pattern for an intent label
    ///
    /// Returns false, leaving the table untouched, when either argument is
    /// blank, the label is unknown or `error`, or the pattern does not
    /// compile.
    pub fn add_pattern(&mut self, intent: &str, pattern: &str) -> bool {
        if intent.trim().is_empty() || pattern.is_empty() {
            warn!("Intent and pattern must be non-empty");
            return false;
        }

        let intent: Intent = match intent.parse() {
            Ok(Intent::Error) | Err(_) => {
                warn!(intent, "Unknown intent label");
                return false;
            }
            Ok(intent) => intent,
        };

        match self.table.add(intent, pattern) {
            Ok(()) => {
                info!(%intent, pattern, "Added custom pattern");
                true
            }
            Err(e) => {
                error!("{}", e);
                false
            }
        }
    }

    /// Intents in classification order
    pub fn supported_intents(&self) -> Vec<Intent> {
        self.table.intents()
    }

    /// Longest accepted message, in characters
    pub fn max_input_chars(&self) -> usize {
        self.max_input_chars
    }
}

impl Default for IntentProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Fill missing proper-noun entities from the previous turn
///
/// A kind is carried over only when the previous intent was about that
/// kind, so a club mentioned in a player question does not leak forward.
pub fn apply_context(mut entities: Entities, context: &ConversationContext) -> Entities {
    let Some(last_intent) = context.last_intent else {
        return entities;
    };

    for kind in EntityKind::ALL {
        if entities.get(kind).is_some() || !kind.expected_by(last_intent) {
            continue;
        }
        if let Some(previous) = context.last_entities.get(kind) {
            debug!(entity = kind.key(), value = previous, "Carried entity from context");
            entities.set(kind, previous);
        }
    }

    entities
}

/// Confidence in an interpretation
pub fn score(intent: Intent, entities: &Entities) -> f32 {
    let mut confidence = BASE_CONFIDENCE;

    let has_subject = if intent.expects_player_name() {
        entities.get(EntityKind::PlayerName).is_some()
    } else if intent.expects_team_name() {
        entities.get(EntityKind::TeamName).is_some()
    } else if intent.expects_league_name() {
        entities.get(EntityKind::LeagueName).is_some()
    } else if intent == Intent::Comparison {
        entities.comparison_pair().is_some()
    } else {
        false
    };

    if has_subject {
        confidence += ENTITY_BONUS;
    }
    if intent.is_self_contained() {
        confidence += SELF_CONTAINED_BONUS;
    }

    confidence.min(1.0)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Unknown internal error".to_string()
    }
}
