//! Optimization policy (§4.1): the single authority mapping an
//! `OptimizationTier` to the knob bundle every other component receives as
//! an input. No component reads environment/config directly for these
//! values — they go through here.

use once_cell::sync::Lazy;
use voice_agent_core::OptimizationTier;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizationProfile {
    pub temperature: f32,
    pub max_tokens: u32,
    /// Number of RAG chunks to retrieve; 0 disables RAG for this tier.
    pub rag_depth: u32,
    pub semantic_cache_enabled: bool,
    pub semantic_cache_threshold: f32,
    pub llm_cache_ttl_seconds: u64,
    pub partial_asr_confidence_threshold: f32,
    pub min_prefix_words_for_speculation: u32,
    pub response_word_cap: Option<u32>,
    pub streaming_enabled: bool,
    pub parallel_execution: bool,
    pub provider_timeout_ms: u64,
}

static PROFILES: Lazy<[OptimizationProfile; 5]> = Lazy::new(|| {
    [
        OptimizationProfile {
            temperature: 0.3,
            max_tokens: 600,
            rag_depth: 10,
            semantic_cache_enabled: true,
            semantic_cache_threshold: 0.75,
            llm_cache_ttl_seconds: 3600,
            partial_asr_confidence_threshold: 0.9,
            min_prefix_words_for_speculation: 8,
            response_word_cap: None,
            streaming_enabled: false,
            parallel_execution: false,
            provider_timeout_ms: 12_000,
        },
        OptimizationProfile {
            temperature: 0.45,
            max_tokens: 500,
            rag_depth: 6,
            semantic_cache_enabled: true,
            semantic_cache_threshold: 0.72,
            llm_cache_ttl_seconds: 2700,
            partial_asr_confidence_threshold: 0.85,
            min_prefix_words_for_speculation: 6,
            response_word_cap: None,
            streaming_enabled: true,
            parallel_execution: false,
            provider_timeout_ms: 10_000,
        },
        OptimizationProfile {
            temperature: 0.7,
            max_tokens: 400,
            rag_depth: 3,
            semantic_cache_enabled: false,
            semantic_cache_threshold: 0.7,
            llm_cache_ttl_seconds: 1800,
            partial_asr_confidence_threshold: 0.8,
            min_prefix_words_for_speculation: 5,
            response_word_cap: Some(150),
            streaming_enabled: true,
            parallel_execution: true,
            provider_timeout_ms: 8_000,
        },
        OptimizationProfile {
            temperature: 0.8,
            max_tokens: 300,
            rag_depth: 1,
            semantic_cache_enabled: false,
            semantic_cache_threshold: 0.7,
            llm_cache_ttl_seconds: 900,
            partial_asr_confidence_threshold: 0.7,
            min_prefix_words_for_speculation: 4,
            response_word_cap: Some(80),
            streaming_enabled: true,
            parallel_execution: true,
            provider_timeout_ms: 6_000,
        },
        OptimizationProfile {
            temperature: 0.9,
            max_tokens: 200,
            rag_depth: 0,
            semantic_cache_enabled: false,
            semantic_cache_threshold: 0.7,
            llm_cache_ttl_seconds: 600,
            partial_asr_confidence_threshold: 0.6,
            min_prefix_words_for_speculation: 3,
            response_word_cap: Some(50),
            streaming_enabled: true,
            parallel_execution: true,
            provider_timeout_ms: 4_000,
        },
    ]
});

/// Pure tier → knobs mapping. Stateless; safe to call from any thread.
pub struct OptimizationPolicy;

impl OptimizationPolicy {
    pub fn profile(tier: OptimizationTier) -> OptimizationProfile {
        PROFILES[tier as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_from_quality_to_speed() {
        let profiles: Vec<_> =
            OptimizationTier::ALL.iter().map(|t| OptimizationPolicy::profile(*t)).collect();

        for window in profiles.windows(2) {
            let (a, b) = (window[0], window[1]);
            assert!(a.temperature <= b.temperature, "temperature must be non-decreasing");
            assert!(a.max_tokens >= b.max_tokens, "max_tokens must be non-increasing");
            assert!(a.rag_depth >= b.rag_depth, "rag_depth must be non-increasing");
            assert!(
                a.llm_cache_ttl_seconds >= b.llm_cache_ttl_seconds,
                "cache ttl must be non-increasing"
            );
            assert!(
                (a.streaming_enabled as u8) <= (b.streaming_enabled as u8),
                "streaming must be non-decreasing"
            );
        }
    }

    #[test]
    fn quality_profile_matches_representative_values() {
        let quality = OptimizationPolicy::profile(OptimizationTier::Quality);
        assert_eq!(quality.temperature, 0.3);
        assert_eq!(quality.max_tokens, 600);
        assert_eq!(quality.rag_depth, 10);
        assert!(quality.semantic_cache_enabled);
    }

    #[test]
    fn speed_profile_matches_representative_values() {
        let speed = OptimizationPolicy::profile(OptimizationTier::Speed);
        assert_eq!(speed.temperature, 0.9);
        assert_eq!(speed.max_tokens, 200);
        assert_eq!(speed.rag_depth, 0);
        assert!(!speed.semantic_cache_enabled);
        assert_eq!(speed.response_word_cap, Some(50));
    }
}
