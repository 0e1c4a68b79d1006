//! Pitchside API - HTTP server for the football chatbot
//!
//! Exposes chat turns, message interpretation, interpreter administration
//! and data cache control as JSON endpoints.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::chat::chat_handler,
        handlers::chat::intent_handler,
        handlers::patterns::list_intents,
        handlers::patterns::add_pattern,
        handlers::cache::cache_stats,
        handlers::cache::clear_cache,
    ),
    components(schemas(
        error::ApiError,
        handlers::health::HealthResponse,
        handlers::chat::ChatRequest,
        handlers::chat::ChatResponse,
        handlers::chat::IntentRequest,
        handlers::patterns::IntentsResponse,
        handlers::patterns::AddPatternRequest,
        handlers::patterns::AddPatternResponse,
        handlers::cache::CacheStatsResponse,
        handlers::cache::CacheClearedResponse,
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "chat", description = "Conversation and interpretation"),
        (name = "patterns", description = "Interpreter administration"),
        (name = "cache", description = "Data API cache"),
    )
)]
pub struct ApiDoc;

/// Build the full application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Any origin when none are configured, otherwise only the listed ones
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}
