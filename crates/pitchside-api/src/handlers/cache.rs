//! Data API cache handlers

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

/// Cache statistics
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CacheStatsResponse {
    pub name: String,
    pub cached_items: u64,
    pub ttl_secs: u64,
    pub hits: u64,
    pub misses: u64,
    pub writes: u64,
    #[schema(example = 0.75)]
    pub hit_rate: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CacheClearedResponse {
    pub cleared: bool,
}

/// Report data API cache usage
#[utoipa::path(
    get,
    path = "/api/v1/cache/stats",
    tag = "cache",
    responses(
        (status = 200, description = "Cache statistics", body = CacheStatsResponse),
        (status = 404, description = "No cache configured", body = crate::error::ApiError)
    )
)]
pub async fn cache_stats(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let cache = state
        .cache
        .as_ref()
        .ok_or_else(|| AppError::NotFound("Cache".to_string()))?;
    let report = cache.report().await;

    Ok(Json(CacheStatsResponse {
        name: report.name,
        cached_items: report.cached_items,
        ttl_secs: report.ttl_secs,
        hits: report.hits,
        misses: report.misses,
        writes: report.writes,
        hit_rate: report.hit_rate,
    }))
}

/// Drop every cached data API response
#[utoipa::path(
    delete,
    path = "/api/v1/cache",
    tag = "cache",
    responses(
        (status = 200, description = "Cache cleared", body = CacheClearedResponse),
        (status = 404, description = "No cache configured", body = crate::error::ApiError)
    )
)]
pub async fn clear_cache(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let cache = state
        .cache
        .as_ref()
        .ok_or_else(|| AppError::NotFound("Cache".to_string()))?;
    cache.clear().await;
    info!("Data API cache cleared");

    Ok(Json(CacheClearedResponse { cleared: true }))
}
