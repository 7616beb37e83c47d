//! Session metrics rollup (§3 SessionMetrics)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A running mean maintained via the Welford-style recurrence
/// `mean' = mean + (x - mean) / n`, avoiding the need to retain every sample.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RunningMean {
    pub mean: f64,
    pub count: u64,
}

impl RunningMean {
    pub fn update(&mut self, sample: f64) {
        self.count += 1;
        self.mean += (sample - self.mean) / self.count as f64;
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionMetrics {
    pub session_id: Uuid,
    pub successful_turns: u64,
    pub failed_turns: u64,
    pub interrupted_turns: u64,

    pub asr_latency_ms: RunningMean,
    pub llm_latency_ms: RunningMean,
    pub translate_latency_ms: RunningMean,
    pub tts_latency_ms: RunningMean,
    pub total_latency_ms: RunningMean,

    pub llm_exact_cache_hits: u64,
    pub llm_semantic_cache_hits: u64,
    pub tts_cache_hits: u64,
    pub tts_fallback_count: u64,

    pub guardrail_layer1_violations: u64,
    pub guardrail_layer3_violations: u64,

    pub total_cost: Decimal,
    pub asr_confidence: RunningMean,
}

impl SessionMetrics {
    pub fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            total_cost: Decimal::ZERO,
            ..Default::default()
        }
    }

    pub fn total_turns(&self) -> u64 {
        self.successful_turns + self.failed_turns + self.interrupted_turns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_turns_equals_sum_of_terminal_counters() {
        let mut metrics = SessionMetrics::new(Uuid::new_v4());
        metrics.successful_turns = 3;
        metrics.failed_turns = 1;
        metrics.interrupted_turns = 2;
        assert_eq!(metrics.total_turns(), 6);
    }

    #[test]
    fn running_mean_matches_arithmetic_mean() {
        let mut mean = RunningMean::default();
        for sample in [10.0, 20.0, 30.0] {
            mean.update(sample);
        }
        assert!((mean.mean - 20.0).abs() < 1e-9);
        assert_eq!(mean.count, 3);
    }
}
