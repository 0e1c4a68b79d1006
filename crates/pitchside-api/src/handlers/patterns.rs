//! Intent catalogue and runtime pattern handlers

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

/// Supported intents
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IntentsResponse {
    #[schema(example = json!(["player_info", "transfers"]))]
    pub intents: Vec<String>,
    /// Longest accepted message, in characters
    pub max_input_chars: usize,
}

/// New classification pattern
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddPatternRequest {
    /// Intent label the pattern votes for
    #[schema(example = "transfers")]
    pub intent: String,
    /// Regular expression matched against lower-cased input
    #[schema(example = "\\bsigned\\b")]
    pub pattern: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddPatternResponse {
    pub intent: String,
    pub pattern: String,
    pub added: bool,
}

/// List the intents the interpreter can assign
#[utoipa::path(
    get,
    path = "/api/v1/intents",
    tag = "patterns",
    responses(
        (status = 200, description = "Supported intents", body = IntentsResponse)
    )
)]
pub async fn list_intents(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let processor = state.chat.processor();
    let processor = processor.read().await;

    Json(IntentsResponse {
        intents: processor
            .supported_intents()
            .iter()
            .map(|intent| intent.as_str().to_string())
            .collect(),
        max_input_chars: processor.max_input_chars(),
    })
}

/// Register an extra classification pattern
#[utoipa::path(
    post,
    path = "/api/v1/patterns",
    tag = "patterns",
    request_body = AddPatternRequest,
    responses(
        (status = 201, description = "Pattern added", body = AddPatternResponse),
        (status = 400, description = "Pattern does not compile", body = crate::error::ApiError)
    )
)]
pub async fn add_pattern(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddPatternRequest>,
) -> Result<impl IntoResponse, AppError> {
    let processor = state.chat.processor();
    let added = processor
        .write()
        .await
        .add_pattern(&request.intent, &request.pattern);

    if !added {
        return Err(AppError::BadRequest(format!(
            "Pattern '{}' could not be added",
            request.pattern
        )));
    }

    info!(intent = %request.intent, pattern = %request.pattern, "Pattern added");
    Ok((
        StatusCode::CREATED,
        Json(AddPatternResponse {
            intent: request.intent,
            pattern: request.pattern,
            added,
        }),
    ))
}
