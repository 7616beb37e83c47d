//! Cache entry value types (§3 CachedLLMResponse, CachedTTSResponse; §4.4)

use crate::session::OptimizationTier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedLLMResponse {
    pub query_text: String,
    pub normalized_query: String,
    pub response_text: String,
    pub optimization_tier: OptimizationTier,
    /// Invariant (§3, §8): only `true` entries are ever stored.
    pub guardrail_safe: bool,
    pub token_count: u32,
    pub stored_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl CachedLLMResponse {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let ttl = chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::zero());
        now - self.stored_at > ttl
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedTTSResponse {
    pub text_hash: String,
    pub voice_id: String,
    pub provider: String,
    pub codec: String,
    pub sample_rate: u32,
    #[serde(with = "base64_bytes")]
    pub audio: Vec<u8>,
    pub stored_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl CachedTTSResponse {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let ttl = chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::zero());
        now - self.stored_at > ttl
    }
}

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_ttl() {
        let now = Utc::now();
        let entry = CachedLLMResponse {
            query_text: "hi".into(),
            normalized_query: "hi".into(),
            response_text: "hello".into(),
            optimization_tier: OptimizationTier::Balanced,
            guardrail_safe: true,
            token_count: 1,
            stored_at: now - chrono::Duration::seconds(100),
            ttl: Duration::from_secs(50),
        };
        assert!(entry.is_expired(now));
    }

    #[test]
    fn not_expired_within_ttl() {
        let now = Utc::now();
        let entry = CachedLLMResponse {
            query_text: "hi".into(),
            normalized_query: "hi".into(),
            response_text: "hello".into(),
            optimization_tier: OptimizationTier::Balanced,
            guardrail_safe: true,
            token_count: 1,
            stored_at: now - chrono::Duration::seconds(10),
            ttl: Duration::from_secs(50),
        };
        assert!(!entry.is_expired(now));
    }
}
