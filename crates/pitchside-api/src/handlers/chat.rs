//! Chat and interpretation handlers

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use pitchside_chat::{quick_replies, ERROR_REPLY};
use pitchside_core::{ConversationContext, ExtractionResult, FootballData, ResponseStyle};
use pitchside_intent::InputRejection;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use utoipa::ToSchema;

/// Chat request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// User message; anything other than a JSON string is rejected
    #[schema(value_type = String, example = "Tell me about Lionel Messi")]
    pub message: Value,

    /// Context returned by the previous turn
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub context: Option<ConversationContext>,

    /// Casual, Professional or Detailed
    #[serde(default)]
    #[schema(example = "Casual")]
    pub style: Option<String>,
}

/// Chat response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    /// Rendered answer
    pub reply: String,

    /// How the message was interpreted
    #[schema(value_type = Object)]
    pub extraction: ExtractionResult,

    /// Suggested follow-up questions
    pub quick_replies: Vec<String>,

    /// Kind of data the answer was based on
    #[schema(example = "player")]
    pub data_kind: String,

    /// Context to send with the next turn
    #[schema(value_type = Object)]
    pub context: ConversationContext,
}

/// Interpretation request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct IntentRequest {
    #[schema(value_type = String, example = "What is Haaland's market value?")]
    pub message: Value,

    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub context: Option<ConversationContext>,
}

/// Answer one chat message
#[utoipa::path(
    post,
    path = "/api/v1/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Answer generated", body = ChatResponse),
        (status = 400, description = "Unknown response style", body = crate::error::ApiError)
    )
)]
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let style = match request.style.as_deref() {
        Some(style) => style.parse::<ResponseStyle>()?,
        None => state.config.chat.default_style,
    };
    let mut context = request.context.unwrap_or_default();

    let Value::String(message) = request.message else {
        debug!("Rejected non-string chat message");
        let extraction = ExtractionResult::invalid(InputRejection::NotAString.to_string());
        return Ok(Json(ChatResponse {
            reply: ERROR_REPLY.to_string(),
            quick_replies: quick_replies(extraction.intent, &extraction.entities),
            extraction,
            data_kind: FootballData::Absent.kind().to_string(),
            context,
        }));
    };

    let turn = state.chat.handle_turn(&message, &mut context, style).await;

    Ok(Json(ChatResponse {
        reply: turn.reply,
        extraction: turn.extraction,
        quick_replies: turn.quick_replies,
        data_kind: turn.data_kind,
        context,
    }))
}

/// Interpret a message without answering it
#[utoipa::path(
    post,
    path = "/api/v1/intent",
    tag = "chat",
    request_body = IntentRequest,
    responses(
        (status = 200, description = "Interpretation result")
    )
)]
pub async fn intent_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<IntentRequest>,
) -> impl IntoResponse {
    state.increment_requests();

    let result = match request.message {
        Value::String(message) => {
            let processor = state.chat.processor();
            let processor = processor.read().await;
            processor.process(&message, request.context.as_ref())
        }
        _ => ExtractionResult::invalid(InputRejection::NotAString.to_string()),
    };

    Json(result)
}
