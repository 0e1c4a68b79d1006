//! Transfermarkt API client
//!
//! Looks entities up by name through the search endpoints, then fetches
//! the detail record of the first hit. Responses are cached, and requests
//! answered with `429 Too Many Requests` are retried with exponential
//! backoff.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use pitchside_core::football::value_to_text;
use pitchside_core::{
    ClubProfile, DataApiConfig, FootballDataSource, LeagueTable, MarketValueHistory,
    PitchsideError, PlayerProfile, Result, TransferRecord,
};

use crate::cache::{cache_key, ResponseCache};

/// HTTP client for a Transfermarkt-compatible REST API
pub struct TransfermarktClient {
    client: Client,
    base_url: String,
    cache: ResponseCache,
    max_retries: u32,
    retry_base_delay: Duration,
}

impl TransfermarktClient {
    /// Create from config
    pub fn from_config(config: &DataApiConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PitchsideError::ConfigError(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cache: ResponseCache::from_config(config),
            max_retries: config.max_retries.max(1),
            retry_base_delay: Duration::from_millis(config.retry_base_delay_ms),
        })
    }

    /// Response cache shared by all requests
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// GET an endpoint as JSON, through the cache
    async fn get_json(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value> {
        let key = cache_key(endpoint, params);
        if let Some(cached) = self.cache.get(&key).await {
            debug!(endpoint, "Cache hit");
            return Ok(cached);
        }

        let url = format!("{}{}", self.base_url, endpoint);
        let mut attempt = 0;

        let response = loop {
            let response = self
                .client
                .get(&url)
                .query(params)
                .send()
                .await
                .map_err(|e| PitchsideError::DataSourceError(format!("Request failed: {e}")))?;

            if response.status() != StatusCode::TOO_MANY_REQUESTS {
                break response;
            }

            attempt += 1;
            if attempt >= self.max_retries {
                return Err(PitchsideError::RateLimited(self.base_url.clone()));
            }

            let delay = backoff_delay(self.retry_base_delay, attempt);
            warn!(endpoint, attempt, ?delay, "Rate limited, backing off");
            tokio::time::sleep(delay).await;
        };

        let status = response.status();
        if !status.is_success() {
            return Err(PitchsideError::DataSourceError(format!(
                "{endpoint} returned {status}"
            )));
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| PitchsideError::DataSourceError(format!("Invalid JSON: {e}")))?;

        self.cache.put(key, data.clone()).await;
        Ok(data)
    }

    /// First search hit for a name, with its id
    async fn first_hit(&self, endpoint: &str, name: &str) -> Result<Option<(String, Value)>> {
        let data = self
            .get_json(endpoint, &[("query", name.to_string())])
            .await?;

        let hit = list_field(data, "results").into_iter().next();
        Ok(hit.and_then(|hit| {
            let id = hit.get("id").and_then(value_to_text)?;
            Some((id, hit))
        }))
    }

    /// Detail record of the first search hit, enriched with the hit's fields
    async fn enriched_detail(
        &self,
        search: &str,
        detail_prefix: &str,
        name: &str,
    ) -> Result<Option<Value>> {
        let Some((id, hit)) = self.first_hit(search, name).await? else {
            debug!(search, name, "No search results");
            return Ok(None);
        };

        let detail = self.get_json(&format!("{detail_prefix}/{id}"), &[]).await?;
        Ok(Some(merge_objects(detail, hit)))
    }

    async fn player_id(&self, name: &str) -> Result<Option<String>> {
        Ok(self
            .first_hit("/players/search", name)
            .await?
            .map(|(id, _)| id))
    }
}

#[async_trait]
impl FootballDataSource for TransfermarktClient {
    async fn player_profile(&self, name: &str) -> Result<Option<PlayerProfile>> {
        match self.enriched_detail("/players/search", "/players", name).await? {
            Some(value) => decode(value).map(Some),
            None => Ok(None),
        }
    }

    async fn player_transfers(&self, name: &str) -> Result<Option<Vec<TransferRecord>>> {
        let Some(id) = self.player_id(name).await? else {
            return Ok(None);
        };

        let data = self
            .get_json(&format!("/players/{id}/transfers"), &[])
            .await?;
        decode_list(list_field(data, "transfers")).map(Some)
    }

    async fn player_market_value(&self, name: &str) -> Result<Option<MarketValueHistory>> {
        let Some(id) = self.player_id(name).await? else {
            return Ok(None);
        };

        let data = self
            .get_json(&format!("/players/{id}/market-value"), &[])
            .await?;
        if data.is_null() {
            return Ok(None);
        }
        decode(data).map(Some)
    }

    async fn club_profile(&self, name: &str) -> Result<Option<ClubProfile>> {
        match self.enriched_detail("/clubs/search", "/clubs", name).await? {
            Some(value) => decode(value).map(Some),
            None => Ok(None),
        }
    }

    async fn league_table(&self, name: &str) -> Result<Option<LeagueTable>> {
        let data = self.get_json("/competitions", &[]).await?;
        let wanted = name.to_lowercase();

        let competition = list_field(data, "competitions").into_iter().find(|comp| {
            comp.get("name")
                .and_then(Value::as_str)
                .map(|comp_name| comp_name.to_lowercase().contains(&wanted))
                .unwrap_or(false)
        });

        let Some(competition) = competition else {
            debug!(name, "No matching competition");
            return Ok(None);
        };
        let Some(id) = competition.get("id").and_then(value_to_text) else {
            return Ok(None);
        };

        let data = self
            .get_json(&format!("/competitions/{id}/tables"), &[])
            .await?;
        if data.is_null() {
            return Ok(None);
        }

        let mut table: LeagueTable = decode(data)?;
        if table.competition.is_none() {
            table.competition = competition.get("name").and_then(value_to_text);
        }
        Ok(Some(table))
    }

    async fn recent_transfers(&self, limit: usize) -> Result<Vec<TransferRecord>> {
        let data = self
            .get_json("/transfers/recent", &[("limit", limit.to_string())])
            .await?;
        decode_list(list_field(data, "transfers"))
    }

    fn name(&self) -> &str {
        "transfermarkt"
    }
}

/// Array stored under `field`, or empty
fn list_field(data: Value, field: &str) -> Vec<Value> {
    match data {
        Value::Object(mut map) => match map.remove(field) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Overlay the fields of `hit` onto `detail`
fn merge_objects(detail: Value, hit: Value) -> Value {
    match (detail, hit) {
        (Value::Object(mut detail), Value::Object(hit)) => {
            detail.extend(hit);
            Value::Object(detail)
        }
        (Value::Object(detail), _) => Value::Object(detail),
        (_, Value::Object(hit)) => Value::Object(hit),
        _ => Value::Object(Map::new()),
    }
}

/// Delay before retry `attempt` (1-based): `base * 2^(attempt - 1)`, saturating
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| PitchsideError::DataSourceError(format!("Unexpected payload: {e}")))
}

fn decode_list<T: DeserializeOwned>(items: Vec<Value>) -> Result<Vec<T>> {
    items.into_iter().map(decode::<T>).collect()
}
