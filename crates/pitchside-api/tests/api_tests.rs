//! API integration tests against stub collaborators

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tower::ServiceExt;

use pitchside_api::{create_router, state::AppState};
use pitchside_chat::{ChatOrchestrator, ResponseGenerator};
use pitchside_core::{
    AppConfig, ClubProfile, FootballDataSource, LeagueTable, MarketValueHistory, PlayerProfile,
    Result, TransferRecord,
};
use pitchside_data::ResponseCache;
use pitchside_intent::IntentProcessor;

/// Data source that only knows Lionel Messi
struct StubFootball;

#[async_trait]
impl FootballDataSource for StubFootball {
    async fn player_profile(&self, name: &str) -> Result<Option<PlayerProfile>> {
        Ok(name.contains("Messi").then(|| PlayerProfile {
            name: Some("Lionel Messi".to_string()),
            club: Some("Inter Miami".to_string()),
            position: Some("Right Winger".to_string()),
            ..Default::default()
        }))
    }

    async fn player_transfers(&self, _name: &str) -> Result<Option<Vec<TransferRecord>>> {
        Ok(None)
    }

    async fn player_market_value(&self, _name: &str) -> Result<Option<MarketValueHistory>> {
        Ok(None)
    }

    async fn club_profile(&self, _name: &str) -> Result<Option<ClubProfile>> {
        Ok(None)
    }

    async fn league_table(&self, _name: &str) -> Result<Option<LeagueTable>> {
        Ok(None)
    }

    async fn recent_transfers(&self, _limit: usize) -> Result<Vec<TransferRecord>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "stub"
    }
}

fn test_state(cache: Option<ResponseCache>) -> Arc<AppState> {
    let chat = ChatOrchestrator::new(
        Arc::new(RwLock::new(IntentProcessor::new())),
        Arc::new(StubFootball),
        ResponseGenerator::templates_only(),
    );
    Arc::new(AppState::new(AppConfig::default(), chat, cache))
}

fn test_app() -> Router {
    create_router(test_state(None))
}

/// Helper to create a test request
fn create_json_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");

    match body {
        Some(json_body) => builder
            .body(Body::from(serde_json::to_string(&json_body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = test_app();

    let (status, json) = send(&app, create_json_request("GET", "/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert!(json.get("llm").is_none());
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = test_app();

    let (status, json) = send(
        &app,
        create_json_request("GET", "/api-docs/openapi.json", None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["paths"]["/api/v1/chat"].is_object());
}

// =============================================================================
// Chat
// =============================================================================

#[tokio::test]
async fn test_chat_turn_and_follow_up() {
    let app = test_app();

    let (status, first) = send(
        &app,
        create_json_request(
            "POST",
            "/api/v1/chat",
            Some(json!({"message": "Tell me about Lionel Messi"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["extraction"]["intent"], "player_info");
    assert_eq!(first["data_kind"], "player");
    assert!(first["reply"]
        .as_str()
        .unwrap()
        .contains("currently plays for Inter Miami"));
    assert_eq!(first["context"]["last_intent"], "player_info");
    assert_eq!(first["quick_replies"][0], "Lionel Messi stats");

    let (status, second) = send(
        &app,
        create_json_request(
            "POST",
            "/api/v1/chat",
            Some(json!({
                "message": "player stats",
                "context": first["context"],
                "style": "professional"
            })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["extraction"]["intent"], "player_stats");
    assert_eq!(
        second["extraction"]["entities"]["player_name"],
        "Lionel Messi"
    );
    assert!(second["reply"]
        .as_str()
        .unwrap()
        .starts_with("**Statistics for Lionel Messi**"));
}

#[tokio::test]
async fn test_chat_rejects_non_string_message() {
    let app = test_app();

    let (status, json) = send(
        &app,
        create_json_request("POST", "/api/v1/chat", Some(json!({"message": 42}))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["extraction"]["success"], false);
    assert_eq!(json["extraction"]["error"], "Input must be a string");
    assert!(json["reply"].as_str().unwrap().starts_with("I'm sorry"));
    assert_eq!(json["data_kind"], "absent");
}

#[tokio::test]
async fn test_chat_unknown_style_is_bad_request() {
    let app = test_app();

    let (status, json) = send(
        &app,
        create_json_request(
            "POST",
            "/api/v1/chat",
            Some(json!({"message": "hello", "style": "shouty"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_intent_endpoint() {
    let app = test_app();

    let (status, json) = send(
        &app,
        create_json_request(
            "POST",
            "/api/v1/intent",
            Some(json!({"message": "Tell me about Lionel Messi"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["intent"], "player_info");
    assert_eq!(json["entities"]["player_name"], "Lionel Messi");
    assert_eq!(json["success"], true);

    let (_, json) = send(
        &app,
        create_json_request("POST", "/api/v1/intent", Some(json!({"message": "   "}))),
    )
    .await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Input contains only whitespace");
}

#[tokio::test]
async fn test_request_counter() {
    let state = test_state(None);
    let app = create_router(Arc::clone(&state));

    for _ in 0..2 {
        send(
            &app,
            create_json_request("POST", "/api/v1/intent", Some(json!({"message": "hi"}))),
        )
        .await;
    }

    assert_eq!(state.get_request_count(), 2);
}

// =============================================================================
// Patterns
// =============================================================================

#[tokio::test]
async fn test_list_intents() {
    let app = test_app();

    let (status, json) = send(&app, create_json_request("GET", "/api/v1/intents", None)).await;

    assert_eq!(status, StatusCode::OK);
    let intents: Vec<&str> = json["intents"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(intents.contains(&"player_info"));
    assert!(intents.contains(&"recent_transfers"));
    assert_eq!(json["max_input_chars"], 1000);
}

#[tokio::test]
async fn test_add_pattern_changes_classification() {
    let app = test_app();

    let (status, json) = send(
        &app,
        create_json_request(
            "POST",
            "/api/v1/patterns",
            Some(json!({"intent": "help", "pattern": r"\bbanter\b"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["added"], true);

    let (_, json) = send(
        &app,
        create_json_request("POST", "/api/v1/intent", Some(json!({"message": "banter"}))),
    )
    .await;
    assert_eq!(json["intent"], "help");
}

#[tokio::test]
async fn test_add_invalid_pattern() {
    let app = test_app();

    let (status, _) = send(
        &app,
        create_json_request(
            "POST",
            "/api/v1/patterns",
            Some(json!({"intent": "help", "pattern": "(unclosed"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        create_json_request(
            "POST",
            "/api/v1/patterns",
            Some(json!({"intent": "weather", "pattern": "rain"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Cache
// =============================================================================

#[tokio::test]
async fn test_cache_stats_and_clear() {
    let cache = ResponseCache::new(Duration::from_secs(60), 100);
    cache.put("player_search?q=messi", json!({"id": "28003"})).await;
    cache.get("player_search?q=messi").await;
    let app = create_router(test_state(Some(cache)));

    let (status, json) = send(&app, create_json_request("GET", "/api/v1/cache/stats", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cached_items"], 1);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["writes"], 1);
    assert_eq!(json["ttl_secs"], 60);

    let (status, json) = send(&app, create_json_request("DELETE", "/api/v1/cache", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cleared"], true);

    let (_, json) = send(&app, create_json_request("GET", "/api/v1/cache/stats", None)).await;
    assert_eq!(json["cached_items"], 0);
    assert_eq!(json["hits"], 0);
}

#[tokio::test]
async fn test_cache_missing() {
    let app = test_app();

    let (status, json) = send(&app, create_json_request("GET", "/api/v1/cache/stats", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}
