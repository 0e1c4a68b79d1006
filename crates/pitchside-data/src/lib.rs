//! Pitchside Data - Football data fetching
//!
//! Implements [`pitchside_core::FootballDataSource`] over a
//! Transfermarkt-compatible REST API, with a TTL response cache and
//! backoff on rate limiting.

pub mod cache;
pub mod client;

pub use cache::{CacheReport, CacheStats, ResponseCache};
pub use client::TransfermarktClient;
