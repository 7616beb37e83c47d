//! `session_metrics` table repository: one row per session, upserted after
//! every turn.

use crate::{PersistenceError, ScyllaClient};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::str::FromStr;
use voice_agent_core::{RunningMean, SessionMetrics};

#[async_trait]
pub trait SessionMetricsStore: Send + Sync {
    async fn upsert(&self, metrics: &SessionMetrics) -> Result<(), PersistenceError>;
    async fn get(&self, session_id: uuid::Uuid) -> Result<Option<SessionMetrics>, PersistenceError>;
}

#[derive(Clone)]
pub struct ScyllaSessionMetricsStore {
    client: ScyllaClient,
}

impl ScyllaSessionMetricsStore {
    pub fn new(client: ScyllaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SessionMetricsStore for ScyllaSessionMetricsStore {
    async fn upsert(&self, metrics: &SessionMetrics) -> Result<(), PersistenceError> {
        let query = format!(
            "INSERT INTO {}.session_metrics (
                session_id, successful_turns, failed_turns, interrupted_turns,
                asr_latency_mean, asr_latency_count, llm_latency_mean, llm_latency_count,
                translate_latency_mean, translate_latency_count, tts_latency_mean, tts_latency_count,
                total_latency_mean, total_latency_count, llm_exact_cache_hits, llm_semantic_cache_hits,
                tts_cache_hits, tts_fallback_count, guardrail_layer1_violations, guardrail_layer3_violations,
                total_cost, asr_confidence_mean, asr_confidence_count
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            self.client.keyspace()
        );

        self.client
            .session()
            .query_unpaged(
                query,
                (
                    metrics.session_id,
                    metrics.successful_turns as i64,
                    metrics.failed_turns as i64,
                    metrics.interrupted_turns as i64,
                    metrics.asr_latency_ms.mean,
                    metrics.asr_latency_ms.count as i64,
                    metrics.llm_latency_ms.mean,
                    metrics.llm_latency_ms.count as i64,
                    metrics.translate_latency_ms.mean,
                    metrics.translate_latency_ms.count as i64,
                    metrics.tts_latency_ms.mean,
                    metrics.tts_latency_ms.count as i64,
                    metrics.total_latency_ms.mean,
                    metrics.total_latency_ms.count as i64,
                    metrics.llm_exact_cache_hits as i64,
                    metrics.llm_semantic_cache_hits as i64,
                    metrics.tts_cache_hits as i64,
                    metrics.tts_fallback_count as i64,
                    metrics.guardrail_layer1_violations as i64,
                    metrics.guardrail_layer3_violations as i64,
                    metrics.total_cost.to_string(),
                    metrics.asr_confidence.mean,
                    metrics.asr_confidence.count as i64,
                ),
            )
            .await?;

        Ok(())
    }

    async fn get(&self, session_id: uuid::Uuid) -> Result<Option<SessionMetrics>, PersistenceError> {
        let query = format!(
            "SELECT session_id, successful_turns, failed_turns, interrupted_turns,
                    asr_latency_mean, asr_latency_count, llm_latency_mean, llm_latency_count,
                    translate_latency_mean, translate_latency_count, tts_latency_mean, tts_latency_count,
                    total_latency_mean, total_latency_count, llm_exact_cache_hits, llm_semantic_cache_hits,
                    tts_cache_hits, tts_fallback_count, guardrail_layer1_violations, guardrail_layer3_violations,
                    total_cost, asr_confidence_mean, asr_confidence_count
             FROM {}.session_metrics WHERE session_id = ?",
            self.client.keyspace()
        );

        let result = self.client.session().query_unpaged(query, (session_id,)).await?;
        let Some(rows) = result.rows else { return Ok(None) };
        let Some(row) = rows.into_iter().next() else { return Ok(None) };

        #[allow(clippy::type_complexity)]
        let (
            session_id,
            successful_turns,
            failed_turns,
            interrupted_turns,
            asr_latency_mean,
            asr_latency_count,
            llm_latency_mean,
            llm_latency_count,
            translate_latency_mean,
            translate_latency_count,
            tts_latency_mean,
            tts_latency_count,
            total_latency_mean,
            total_latency_count,
            llm_exact_cache_hits,
            llm_semantic_cache_hits,
            tts_cache_hits,
            tts_fallback_count,
            guardrail_layer1_violations,
            guardrail_layer3_violations,
            total_cost,
            asr_confidence_mean,
            asr_confidence_count,
        ): (
            uuid::Uuid,
            i64,
            i64,
            i64,
            f64,
            i64,
            f64,
            i64,
            f64,
            i64,
            f64,
            i64,
            f64,
            i64,
            i64,
            i64,
            i64,
            i64,
            i64,
            i64,
            String,
            f64,
            i64,
        ) = row.into_typed().map_err(|e| PersistenceError::InvalidData(e.to_string()))?;

        Ok(Some(SessionMetrics {
            session_id,
            successful_turns: successful_turns as u64,
            failed_turns: failed_turns as u64,
            interrupted_turns: interrupted_turns as u64,
            asr_latency_ms: RunningMean { mean: asr_latency_mean, count: asr_latency_count as u64 },
            llm_latency_ms: RunningMean { mean: llm_latency_mean, count: llm_latency_count as u64 },
            translate_latency_ms: RunningMean { mean: translate_latency_mean, count: translate_latency_count as u64 },
            tts_latency_ms: RunningMean { mean: tts_latency_mean, count: tts_latency_count as u64 },
            total_latency_ms: RunningMean { mean: total_latency_mean, count: total_latency_count as u64 },
            llm_exact_cache_hits: llm_exact_cache_hits as u64,
            llm_semantic_cache_hits: llm_semantic_cache_hits as u64,
            tts_cache_hits: tts_cache_hits as u64,
            tts_fallback_count: tts_fallback_count as u64,
            guardrail_layer1_violations: guardrail_layer1_violations as u64,
            guardrail_layer3_violations: guardrail_layer3_violations as u64,
            total_cost: Decimal::from_str(&total_cost).map_err(|e| PersistenceError::InvalidData(e.to_string()))?,
            asr_confidence: RunningMean { mean: asr_confidence_mean, count: asr_confidence_count as u64 },
        }))
    }
}
