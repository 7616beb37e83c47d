//! Turn orchestrator (§4.8): the per-turn pipeline that sequences ASR,
//! guardrails, RAG, LLM generation, Translate, and TTS behind one
//! cancellable call.
//!
//! There is no teacher pipeline driver to adapt this from — the corpus's own
//! orchestrator drives on-device VAD/STT/TTS inference, an architecture this
//! crate does not carry (every provider here is a `reqwest` adapter reached
//! through a registry). This module is instead built from the other
//! idioms already established in this workspace: registries keyed by
//! provider name (`voice_agent_llm`), the interrupt fabric's per-stage
//! checkpoints (`voice_agent_core::interrupt`), and the cache tier's
//! single-flight coordination (`cache.rs`).

use std::sync::Arc;
use std::time::{Duration, Instant};

use uuid::Uuid;

use voice_agent_config::{OptimizationPolicy, OptimizationProfile, VoiceRegistry};
use voice_agent_core::{
    CachedTTSResponse, CancellationToken, CheckResult, CostEntry, GuardrailViolation,
    InterruptFabric, Language, OptimizationTier, StageLatencies, TranslateConfig, Turn,
    TurnResult, TurnStatus, VoiceTuning,
};
use voice_agent_llm::{AsrRegistry, LlmRegistry, PromptBuilder, TranslateRegistry, TtsRegistry};
use voice_agent_persistence::GuardrailViolationStore;
use voice_agent_rag::retriever::HybridRetriever;
use voice_agent_rag::vector_store::VectorStore;

use crate::cache::{LlmCache, LlmLookup, TtsCache};
use crate::cost::CostRecorder;
use crate::guardrail::GuardrailEngine;
use crate::PipelineError;

const CLARIFICATION_RESPONSE: &str =
    "Sorry, I didn't catch that clearly. Could you say that again?";
const LLM_FAILURE_RESPONSE: &str =
    "I'm having trouble putting together a response right now. Could you try again?";

/// Where synthesized audio bytes end up. Neither the cache-entry model nor
/// the turn record specifies a concrete blob store — `audio_ref` is clearly
/// meant to be an external reference — so this seam lets one be plugged in
/// without touching orchestration logic.
pub trait AudioSink: Send + Sync {
    fn store(&self, session_id: Uuid, turn_id: Uuid, audio: &CachedTTSResponse) -> Option<String>;
}

/// Default sink: fabricates a reference without persisting bytes anywhere.
#[derive(Default)]
pub struct NullAudioSink;

impl AudioSink for NullAudioSink {
    fn store(&self, _session_id: Uuid, turn_id: Uuid, _audio: &CachedTTSResponse) -> Option<String> {
        Some(format!("turn:{turn_id}"))
    }
}

/// RAG is optional: a deployment without a vector store configured simply
/// skips retrieval regardless of tier.
pub struct RagDeps {
    pub retriever: Arc<HybridRetriever>,
    pub vector_store: Arc<VectorStore>,
}

pub struct OrchestratorDeps {
    pub asr_registry: Arc<AsrRegistry>,
    pub llm_registry: Arc<LlmRegistry>,
    pub translate_registry: Arc<TranslateRegistry>,
    pub tts_registry: Arc<TtsRegistry>,
    pub rag: Option<RagDeps>,
    pub llm_cache: Arc<LlmCache>,
    pub tts_cache: Arc<TtsCache>,
    pub guardrail: Arc<GuardrailEngine>,
    pub cost_recorder: Arc<CostRecorder>,
    pub guardrail_violations: Arc<dyn GuardrailViolationStore>,
    pub interrupt_fabric: Arc<InterruptFabric>,
    pub audio_sink: Arc<dyn AudioSink>,
    /// `SessionConfiguration` carries no ASR provider choice (§4.2); the
    /// orchestrator falls back to one fixed provider for every turn.
    pub default_asr_provider: String,
    pub fallback_tts_provider: String,
}

pub enum TurnContent {
    Audio { bytes: Vec<u8>, hinted_language: Option<Language> },
    Text { text: String },
}

pub struct TurnInput {
    /// Pre-allocated by the caller (e.g. the session manager) so it can be
    /// recorded as the session's active turn before the turn actually runs,
    /// rather than only learning the id once the turn has already finished.
    pub turn_id: Uuid,
    pub session_id: Uuid,
    pub optimization_tier: OptimizationTier,
    pub target_language: Language,
    pub translation_config: TranslateConfig,
    pub content: TurnContent,
    pub system_prompt: String,
    pub llm_provider: String,
    pub llm_model: String,
    pub tts_provider: String,
    pub tts_voice_id: Option<String>,
    pub tts_tuning: VoiceTuning,
}

pub struct Orchestrator {
    deps: OrchestratorDeps,
}

impl Orchestrator {
    pub fn new(deps: OrchestratorDeps) -> Self {
        Self { deps }
    }

    async fn persist_violations(&self, violations: &[GuardrailViolation]) {
        for violation in violations {
            if let Err(e) = self.deps.guardrail_violations.insert(violation).await {
                tracing::warn!(error = %e, "failed to persist guardrail violation, continuing");
            }
        }
    }

    async fn record_cost(&self, entry: CostEntry) {
        if let Err(e) = self.deps.cost_recorder.record(entry).await {
            tracing::warn!(error = %e, "failed to record cost entry, continuing");
        }
    }

    /// Steps 1-12 of the turn pipeline (§4.8).
    pub async fn process_turn(&self, input: TurnInput) -> Result<TurnResult, PipelineError> {
        let turn_start = Instant::now();
        let profile = OptimizationPolicy::profile(input.optimization_tier);

        // Step 1: allocate turn, get a cancellation token.
        let mut turn = Turn::new(input.session_id);
        turn.turn_id = input.turn_id;
        let turn_id = turn.turn_id;
        let token = self.deps.interrupt_fabric.start_turn(input.session_id, turn_id);
        let mut latencies = StageLatencies::default();

        // Step 2: ASR (skipped for text-entered turns).
        let transcript_text = match input.content {
            TurnContent::Text { text } => text,
            TurnContent::Audio { bytes, hinted_language } => {
                token.checkpoint()?;
                let asr = self
                    .deps
                    .asr_registry
                    .get(&self.deps.default_asr_provider)
                    .ok_or_else(|| PipelineError::ProviderNotFound("asr", self.deps.default_asr_provider.clone()))?;

                let stage_start = Instant::now();
                let hint = hinted_language.or(Some(input.target_language));
                let asr_out = asr.transcribe(&bytes, hint, input.session_id, turn_id).await?;
                token.checkpoint()?;
                latencies.asr_ms = Some(stage_start.elapsed().as_millis() as u64);

                self.record_cost(CostEntry::asr(
                    input.session_id,
                    turn_id,
                    asr.provider_name(),
                    asr_out.duration_ms,
                    asr.price_per_second(),
                    input.optimization_tier,
                ))
                .await;

                if asr_out.confidence < profile.partial_asr_confidence_threshold {
                    turn.transcript = Some(asr_out.text);
                    turn.finish(TurnStatus::Successful);
                    self.deps.interrupt_fabric.finish_turn(turn_id);
                    latencies.total_ms = Some(turn_start.elapsed().as_millis() as u64);
                    return Ok(TurnResult {
                        turn_id,
                        transcript: turn.transcript,
                        response_text: CLARIFICATION_RESPONSE.to_string(),
                        translated_text: None,
                        audio_ref: None,
                        latencies,
                        guardrail_safe: true,
                        status: TurnStatus::Successful,
                    });
                }

                asr_out.text
            }
        };
        turn.transcript = Some(transcript_text.clone());

        // Step 3: guardrail layer 1.
        token.checkpoint()?;
        let layer1 = self.deps.guardrail.check_pre_input(input.session_id, turn_id, &transcript_text);
        self.persist_violations(layer1.violations()).await;

        let (response_text, guardrail_safe) = if let CheckResult::Blocked { safe_response, .. } = layer1 {
            (safe_response, false)
        } else {
            // Step 4: RAG (tier-gated).
            let rag_context = self.retrieve_rag_context(&transcript_text, &profile).await?;

            // Steps 5-8: the LLM stage (cache lookup, generate, guardrail
            // layer 3, conditional cache write) collapse into one helper.
            token.checkpoint()?;
            self.run_llm_stage(&input, &transcript_text, rag_context, &profile, turn_id, &token, &mut latencies).await?
        };
        turn.response_text = Some(response_text.clone());
        turn.guardrail_safe = guardrail_safe;

        // Step 9: translate if needed.
        token.checkpoint()?;
        let stage_start = Instant::now();
        let translated_text = self
            .maybe_translate(&response_text, input.target_language, &input.translation_config, input.session_id, turn_id, input.optimization_tier)
            .await;
        if translated_text.is_some() {
            latencies.translate_ms = Some(stage_start.elapsed().as_millis() as u64);
        }

        // Step 10-11: resolve voice, then TTS (with single-flight cache).
        token.checkpoint()?;
        let stage_start = Instant::now();
        let synthesis_text = translated_text.as_deref().unwrap_or(&response_text);
        let audio_ref = self
            .synthesize(&input, synthesis_text, input.target_language, input.session_id, turn_id, input.optimization_tier, &token)
            .await;
        latencies.tts_ms = Some(stage_start.elapsed().as_millis() as u64);

        // Step 12: finalize.
        turn.translated_text = translated_text.clone();
        turn.audio_ref = audio_ref.clone();
        turn.finish(TurnStatus::Successful);
        self.deps.interrupt_fabric.finish_turn(turn_id);
        latencies.total_ms = Some(turn_start.elapsed().as_millis() as u64);

        Ok(TurnResult {
            turn_id,
            transcript: turn.transcript,
            response_text,
            translated_text,
            audio_ref,
            latencies,
            guardrail_safe,
            status: TurnStatus::Successful,
        })
    }

    async fn retrieve_rag_context(&self, query: &str, profile: &OptimizationProfile) -> Result<Option<String>, PipelineError> {
        if profile.rag_depth == 0 {
            return Ok(None);
        }
        let Some(rag) = &self.deps.rag else { return Ok(None) };

        let results = rag.retriever.search(query, &rag.vector_store, None).await?;
        if results.is_empty() {
            return Ok(None);
        }

        Ok(Some(
            results
                .into_iter()
                .take(profile.rag_depth as usize)
                .map(|r| r.content)
                .collect::<Vec<_>>()
                .join("\n\n"),
        ))
    }

    /// Steps 5-8. Returns `(text, guardrail_safe)`.
    async fn run_llm_stage(
        &self,
        input: &TurnInput,
        transcript_text: &str,
        rag_context: Option<String>,
        profile: &OptimizationProfile,
        turn_id: Uuid,
        token: &CancellationToken,
        latencies: &mut StageLatencies,
    ) -> Result<(String, bool), PipelineError> {
        let llm = self
            .deps
            .llm_registry
            .get(&input.llm_provider)
            .ok_or_else(|| PipelineError::ProviderNotFound("llm", input.llm_provider.clone()))?;

        // Cache lookup happens outside `get_or_compute` so a hit can be cost-
        // attributed against the model's real pricing (the cached entry only
        // remembers token count, not which provider/price produced it —
        // the currently-configured provider's metadata stands in).
        let lookup = self.deps.llm_cache.lookup(
            transcript_text,
            input.optimization_tier,
            profile.semantic_cache_enabled,
            profile.semantic_cache_threshold,
        );
        if let LlmLookup::Hit(cached) = lookup {
            if let Some(meta) = llm.model_metadata(&input.llm_model) {
                let counterfactual = CostEntry::llm(
                    input.session_id,
                    turn_id,
                    llm.provider_name(),
                    0,
                    cached.token_count,
                    meta.price_per_input_token,
                    meta.price_per_output_token,
                    input.optimization_tier,
                );
                self.record_cost(CostEntry::cache_hit(counterfactual)).await;
            }
            return Ok((cached.response_text, true));
        }

        let system_prompt = self.deps.guardrail.augment_system_prompt(&input.system_prompt);
        let ttl = Duration::from_secs(profile.llm_cache_ttl_seconds);

        let session_id = input.session_id;
        let llm_model = input.llm_model.clone();
        let temperature = profile.temperature;
        let max_tokens = profile.max_tokens;
        let transcript_owned = transcript_text.to_string();
        let tier = input.optimization_tier;

        let guardrail = self.deps.guardrail.clone();
        let violation_store = self.deps.guardrail_violations.clone();
        let cost_recorder = self.deps.cost_recorder.clone();
        let llm_for_closure = llm.clone();
        let token = token.clone();

        let measured_llm_ms = Arc::new(parking_lot::Mutex::new(None::<u64>));
        let measured_llm_ms_clone = measured_llm_ms.clone();

        let (text, _was_cache_hit) = self
            .deps
            .llm_cache
            .get_or_compute(transcript_text, input.optimization_tier, profile.semantic_cache_enabled, profile.semantic_cache_threshold, ttl, move || async move {
                let mut builder = PromptBuilder::new().with_system_prompt(system_prompt).user_message(transcript_owned);
                if let Some(context) = rag_context {
                    builder = builder.with_rag_context(context);
                }
                let messages = builder.build();

                token.checkpoint()?;
                let stage_start = Instant::now();
                let generated = llm_for_closure.generate(&messages, &llm_model, temperature, max_tokens, session_id, turn_id).await;
                token.checkpoint()?;
                *measured_llm_ms_clone.lock() = Some(stage_start.elapsed().as_millis() as u64);

                let generated = match generated {
                    Ok(out) => out,
                    Err(_) => return Ok((LLM_FAILURE_RESPONSE.to_string(), false, 0)),
                };

                if let Some(meta) = llm_for_closure.model_metadata(&llm_model) {
                    let entry = CostEntry::llm(
                        session_id,
                        turn_id,
                        llm_for_closure.provider_name(),
                        generated.input_tokens,
                        generated.output_tokens,
                        meta.price_per_input_token,
                        meta.price_per_output_token,
                        tier,
                    );
                    if let Err(e) = cost_recorder.record(entry).await {
                        tracing::warn!(error = %e, "failed to record llm cost, continuing");
                    }
                }

                let layer3 = guardrail.check_post_output(session_id, turn_id, &generated.text);
                for violation in layer3.violations() {
                    if let Err(e) = violation_store.insert(violation).await {
                        tracing::warn!(error = %e, "failed to persist guardrail violation, continuing");
                    }
                }

                match layer3 {
                    CheckResult::Passed => Ok((generated.text, true, generated.output_tokens)),
                    CheckResult::Blocked { safe_response, .. } => Ok((safe_response, false, generated.output_tokens)),
                }
            })
            .await?;

        // A failed LLM call (provider error, not a guardrail block) is still
        // a "successful" turn from the caller's point of view (§4.8 failure
        // policy); the text just carries the generic fallback and is never
        // cached since `get_or_compute` only stores guardrail-safe writes.
        if let Some(ms) = *measured_llm_ms.lock() {
            latencies.llm_ms = Some(ms);
        }

        let guardrail_safe = text != LLM_FAILURE_RESPONSE;
        Ok((text, guardrail_safe))
    }

    async fn maybe_translate(
        &self,
        text: &str,
        target_language: Language,
        config: &TranslateConfig,
        session_id: Uuid,
        turn_id: Uuid,
        tier: OptimizationTier,
    ) -> Option<String> {
        // Without a language-identification stage of its own, generated text
        // is assumed English; translation only runs when the target differs
        // and a provider is registered for that pair.
        let source_language = Language::English;
        if source_language == target_language {
            return None;
        }

        let translate = self.deps.translate_registry.find_supporting(source_language, target_language)?;

        match translate.translate(text, source_language, target_language, config, session_id, turn_id).await {
            Ok(out) => {
                self.record_cost(CostEntry::translate(session_id, turn_id, translate.provider_name(), out.char_count, translate.price_per_char(), tier)).await;
                Some(out.text)
            }
            Err(e) => {
                tracing::warn!(error = %e, "translate failed, using untranslated response");
                None
            }
        }
    }

    async fn synthesize(
        &self,
        input: &TurnInput,
        text: &str,
        language: Language,
        session_id: Uuid,
        turn_id: Uuid,
        tier: OptimizationTier,
        token: &CancellationToken,
    ) -> Option<String> {
        let fallback_provider = self.deps.fallback_tts_provider.clone();
        let (descriptor, _step) =
            VoiceRegistry::resolve(&input.tts_provider, input.tts_voice_id.as_deref(), language, &fallback_provider)?;

        let codec = "pcm16";
        let sample_rate_hz = voice_agent_core::SampleRate::Hz22050;
        let cache_key = TtsCache::key(text, &descriptor.voice_id, &descriptor.provider, codec, sample_rate_hz.as_u32(), &input.tts_tuning);

        let text_owned = text.to_string();
        let voice_id = descriptor.voice_id.clone();
        let tuning = input.tts_tuning;
        let primary_provider = self.deps.tts_registry.get(&descriptor.provider);
        let fallback = self.deps.tts_registry.get(&fallback_provider);
        let cost_recorder = self.deps.cost_recorder.clone();
        let text_hash = cache_key.clone();
        let token = token.clone();

        let result = self
            .deps
            .tts_cache
            .get_or_compute(&cache_key, move || async move {
                token.checkpoint()?;

                let encoding = voice_agent_core::AudioEncoding::Pcm16;
                let mut last_err = None;
                for candidate in [primary_provider, fallback].into_iter().flatten() {
                    match candidate.synthesize(&text_owned, &voice_id, language, encoding, sample_rate_hz, &tuning, session_id, turn_id).await {
                        Ok(out) => {
                            let entry = CostEntry::tts(session_id, turn_id, candidate.provider_name(), out.character_count, candidate.price_per_char(), tier);
                            if let Err(e) = cost_recorder.record(entry).await {
                                tracing::warn!(error = %e, "failed to record tts cost, continuing");
                            }
                            return Ok(CachedTTSResponse {
                                text_hash: text_hash.clone(),
                                voice_id: voice_id.clone(),
                                provider: candidate.provider_name().to_string(),
                                codec: "pcm16".to_string(),
                                sample_rate: sample_rate_hz.as_u32(),
                                audio: out.audio_bytes,
                                stored_at: chrono::Utc::now(),
                                ttl: Duration::from_secs(3600),
                            });
                        }
                        Err(e) => last_err = Some(e),
                    }
                }
                Err(last_err.map(PipelineError::from).unwrap_or(PipelineError::VoiceNotResolved))
            })
            .await;

        match result {
            Ok(cached) => self.deps.audio_sink.store(session_id, turn_id, &cached),
            Err(e) => {
                tracing::warn!(error = %e, "tts failed on all providers, returning turn with no audio");
                None
            }
        }
    }
}
