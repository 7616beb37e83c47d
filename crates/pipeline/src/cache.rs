//! Cache tier (§4.4): LLM exact+semantic lookup and TTS exact lookup, both
//! with per-key single-flight coordination so concurrent identical requests
//! share one upstream call instead of racing duplicate ones.
//!
//! Grounded on the corpus's `Arc<RwLock<_>>`-per-session state pattern
//! (`agent/voice_session.rs`), generalized here to a keyed map rather than a
//! single session's state.

use crate::PipelineError;
use dashmap::DashMap;
use parking_lot::Mutex as SyncMutex;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex as AsyncMutex;
use voice_agent_core::{CachedLLMResponse, CachedTTSResponse, OptimizationTier};

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

fn stable_key(parts: &[&str]) -> String {
    use std::hash::{Hash, Hasher};
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    for part in parts {
        part.hash(&mut hasher);
    }
    format!("{:016x}", hasher.finish())
}

fn jaccard(a: &str, b: &str) -> f32 {
    use std::collections::HashSet;
    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();
    if words_a.is_empty() && words_b.is_empty() {
        return 1.0;
    }
    let intersection = words_a.intersection(&words_b).count();
    let union = words_a.union(&words_b).count();
    if union == 0 {
        0.0
    } else {
        intersection as f32 / union as f32
    }
}

/// Per-key "one computation in flight" coordination (§4.4, §5). A caller that
/// loses the race blocks on the lock rather than duplicating the upstream
/// call; `compute` must re-check the cache after acquiring the lock, since
/// the winner may have already populated it.
#[derive(Default)]
struct SingleFlight {
    locks: DashMap<String, Arc<AsyncMutex<()>>>,
}

impl SingleFlight {
    fn new() -> Self {
        Self::default()
    }

    async fn run<F, Fut, T>(&self, key: &str, compute: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let lock = self.locks.entry(key.to_string()).or_insert_with(|| Arc::new(AsyncMutex::new(()))).clone();
        let _guard = lock.lock().await;
        compute().await
    }
}

const MAX_SEMANTIC_SCAN: usize = 100;

/// Exact + semantic (Jaccard, per-tier) lookup over `CachedLLMResponse`
/// entries (§4.4).
pub struct LlmCache {
    entries: DashMap<String, CachedLLMResponse>,
    /// Rolling index of exact keys per tier, newest first, bounding the
    /// semantic scan to the newest `MAX_SEMANTIC_SCAN` queries (§4.4).
    tier_index: DashMap<OptimizationTier, SyncMutex<VecDeque<String>>>,
    single_flight: SingleFlight,
}

pub enum LlmLookup {
    Hit(CachedLLMResponse),
    Miss,
}

impl Default for LlmCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmCache {
    pub fn new() -> Self {
        Self { entries: DashMap::new(), tier_index: DashMap::new(), single_flight: SingleFlight::new() }
    }

    fn exact_key(normalized_query: &str, tier: OptimizationTier) -> String {
        stable_key(&[normalized_query, &format!("{:?}", tier)])
    }

    /// Exact then (if enabled) semantic lookup, per §4.4's tie-break rule:
    /// exact wins whenever both could hit.
    pub fn lookup(
        &self,
        query_text: &str,
        tier: OptimizationTier,
        semantic_enabled: bool,
        semantic_threshold: f32,
    ) -> LlmLookup {
        let normalized = normalize(query_text);
        let now = chrono::Utc::now();

        let exact_key = Self::exact_key(&normalized, tier);
        if let Some(entry) = self.entries.get(&exact_key) {
            if !entry.is_expired(now) {
                return LlmLookup::Hit(entry.clone());
            }
            drop(entry);
            self.entries.remove(&exact_key);
        }

        if !semantic_enabled {
            return LlmLookup::Miss;
        }

        let Some(index) = self.tier_index.get(&tier) else { return LlmLookup::Miss };
        let keys: Vec<String> = index.lock().iter().take(MAX_SEMANTIC_SCAN).cloned().collect();
        drop(index);

        let mut best: Option<(f32, DateTime_, CachedLLMResponse)> = None;
        for key in keys {
            let Some(entry) = self.entries.get(&key) else { continue };
            if entry.is_expired(now) {
                continue;
            }
            let score = jaccard(&normalized, &entry.normalized_query);
            if score < semantic_threshold {
                continue;
            }
            let candidate = (score, entry.stored_at, entry.clone());
            best = match best {
                None => Some(candidate),
                Some((best_score, best_time, _)) if score > best_score || (score == best_score && candidate.1 > best_time) => {
                    Some(candidate)
                }
                Some(existing) => Some(existing),
            };
        }

        match best {
            Some((_, _, entry)) => LlmLookup::Hit(entry),
            None => LlmLookup::Miss,
        }
    }

    /// Store policy (§4.4): only ever called by the orchestrator when
    /// `guardrail_safe = true` and the LLM stage produced a fresh response.
    pub fn store(&self, query_text: &str, tier: OptimizationTier, response_text: String, token_count: u32, ttl: Duration) {
        let normalized = normalize(query_text);
        let key = Self::exact_key(&normalized, tier);

        let entry = CachedLLMResponse {
            query_text: query_text.to_string(),
            normalized_query: normalized,
            response_text,
            optimization_tier: tier,
            guardrail_safe: true,
            token_count,
            stored_at: chrono::Utc::now(),
            ttl,
        };
        self.entries.insert(key.clone(), entry);

        let index = self.tier_index.entry(tier).or_insert_with(|| SyncMutex::new(VecDeque::new()));
        let mut index = index.lock();
        index.push_front(key);
        index.truncate(MAX_SEMANTIC_SCAN);
    }

    /// Runs `compute` with single-flight coordination when both lookups
    /// miss. `compute` returns `(response_text, guardrail_safe, token_count)`
    /// — a fresh response is written back only when `guardrail_safe` holds
    /// (§4.4 write policy), so a caller that lost the race and still misses
    /// after acquiring the lock does not silently repeat the same unsafe
    /// response into the cache. Returns `(response_text, was_cache_hit)`.
    pub async fn get_or_compute<F, Fut>(
        &self,
        query_text: &str,
        tier: OptimizationTier,
        semantic_enabled: bool,
        semantic_threshold: f32,
        ttl: Duration,
        compute: F,
    ) -> Result<(String, bool), PipelineError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(String, bool, u32), PipelineError>>,
    {
        if let LlmLookup::Hit(entry) = self.lookup(query_text, tier, semantic_enabled, semantic_threshold) {
            return Ok((entry.response_text, true));
        }

        let key = Self::exact_key(&normalize(query_text), tier);
        self.single_flight
            .run(&key, || async {
                if let LlmLookup::Hit(entry) = self.lookup(query_text, tier, semantic_enabled, semantic_threshold) {
                    return Ok((entry.response_text, true));
                }
                let (text, guardrail_safe, token_count) = compute().await?;
                if guardrail_safe {
                    self.store(query_text, tier, text.clone(), token_count, ttl);
                }
                Ok((text, false))
            })
            .await
    }
}

type DateTime_ = chrono::DateTime<chrono::Utc>;

/// Exact-only cache over synthesized audio (§4.4).
pub struct TtsCache {
    entries: DashMap<String, CachedTTSResponse>,
    single_flight: SingleFlight,
}

impl Default for TtsCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TtsCache {
    pub fn new() -> Self {
        Self { entries: DashMap::new(), single_flight: SingleFlight::new() }
    }

    pub fn key(text: &str, voice_id: &str, provider: &str, codec: &str, sample_rate: u32, tuning: &voice_agent_core::VoiceTuning) -> String {
        stable_key(&[
            text,
            voice_id,
            provider,
            codec,
            &sample_rate.to_string(),
            &format!("{:?}", tuning),
        ])
    }

    pub fn lookup(&self, key: &str) -> Option<CachedTTSResponse> {
        let entry = self.entries.get(key)?;
        if entry.is_expired(chrono::Utc::now()) {
            drop(entry);
            self.entries.remove(key);
            return None;
        }
        Some(entry.clone())
    }

    pub fn store(&self, key: String, entry: CachedTTSResponse) {
        self.entries.insert(key, entry);
    }

    /// Single-flight around a TTS provider call, re-checking the cache after
    /// acquiring the per-key lock in case a concurrent caller already filled
    /// it (§4.4 concurrency).
    pub async fn get_or_compute<F, Fut>(&self, key: &str, compute: F) -> Result<CachedTTSResponse, PipelineError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CachedTTSResponse, PipelineError>>,
    {
        if let Some(hit) = self.lookup(key) {
            return Ok(hit);
        }

        self.single_flight
            .run(key, || async {
                if let Some(hit) = self.lookup(key) {
                    return Ok(hit);
                }
                let entry = compute().await?;
                self.store(key.to_string(), entry.clone());
                Ok(entry)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn jaccard_identical_sets_scores_one() {
        assert_eq!(jaccard("what is the weather", "what is the weather"), 1.0);
    }

    #[test]
    fn jaccard_disjoint_sets_scores_zero() {
        assert_eq!(jaccard("hello world", "foo bar"), 0.0);
    }

    #[test]
    fn exact_hit_after_store() {
        let cache = LlmCache::new();
        cache.store("What's the weather?", OptimizationTier::Balanced, "Sunny.".to_string(), 10, Duration::from_secs(60));

        match cache.lookup("What's the weather?", OptimizationTier::Balanced, false, 0.7) {
            LlmLookup::Hit(entry) => assert_eq!(entry.response_text, "Sunny."),
            LlmLookup::Miss => panic!("expected exact hit"),
        }
    }

    #[test]
    fn semantic_hit_on_similar_query_when_enabled() {
        let cache = LlmCache::new();
        cache.store("what is the weather today", OptimizationTier::Quality, "Sunny.".to_string(), 10, Duration::from_secs(60));

        match cache.lookup("what's the weather today", OptimizationTier::Quality, true, 0.5) {
            LlmLookup::Hit(entry) => assert_eq!(entry.response_text, "Sunny."),
            LlmLookup::Miss => panic!("expected semantic hit"),
        }
    }

    #[test]
    fn semantic_lookup_disabled_misses_even_with_similar_query() {
        let cache = LlmCache::new();
        cache.store("what is the weather today", OptimizationTier::Quality, "Sunny.".to_string(), 10, Duration::from_secs(60));

        assert!(matches!(
            cache.lookup("what is the weather today now", OptimizationTier::Quality, false, 0.1),
            LlmLookup::Miss
        ));
    }

    #[tokio::test]
    async fn concurrent_get_or_compute_calls_compute_once() {
        let cache = Arc::new(LlmCache::new());
        let calls = Arc::new(AtomicU32::new(0));

        let mut handles = Vec::new();
        for _ in 0..5 {
            let cache = cache.clone();
            let calls = calls.clone();
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_compute(
                        "same query",
                        OptimizationTier::Balanced,
                        false,
                        0.7,
                        Duration::from_secs(60),
                        || async move {
                            calls.fetch_add(1, Ordering::SeqCst);
                            tokio::time::sleep(Duration::from_millis(20)).await;
                            Ok(("answer".to_string(), true, 5))
                        },
                    )
                    .await
            }));
        }

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // The winner's store happens before its lock guard drops, so every
        // other waiter re-checks into a hit instead of calling compute.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn tts_cache_key_is_stable_for_same_inputs() {
        let tuning = voice_agent_core::VoiceTuning::default();
        let key1 = TtsCache::key("hello", "meera", "sarvam", "mp3", 22050, &tuning);
        let key2 = TtsCache::key("hello", "meera", "sarvam", "mp3", 22050, &tuning);
        assert_eq!(key1, key2);
    }
}
