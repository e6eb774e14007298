use serde::{Deserialize, Serialize};
use crate::models::domain::{Archetype, MatchResult, RecommendationSet};
use crate::services::CacheStats;

/// Response for the match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub result: MatchResult,
    pub recommendations: RecommendationSet,
}

/// Response for the hybrid endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HybridResponse {
    pub hybrid: Archetype,
    pub compatibility: u8,
    pub recommendations: RecommendationSet,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub catalog_version: u32,
    pub archetypes: usize,
    /// Match cache counters, absent when caching is disabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheStats>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
