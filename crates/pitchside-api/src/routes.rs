//! API route definitions

use crate::handlers::{cache, chat, patterns};
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

/// Create API v1 routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Conversation
        .route("/chat", post(chat::chat_handler))
        .route("/intent", post(chat::intent_handler))
        // Interpreter administration
        .route("/intents", get(patterns::list_intents))
        .route("/patterns", post(patterns::add_pattern))
        // Data API cache
        .route("/cache/stats", get(cache::cache_stats))
        .route("/cache", delete(cache::clear_cache))
}
