//! Session manager (§4.9): the edge contract over a per-session stream of
//! client events, independent of whatever transport delivers them.
//!
//! Grounded on `VoiceSession`'s per-session `Arc<RwLock<_>>` state handle and
//! its `broadcast` event channel, generalized here to a multi-session map
//! keyed by session id (the same `DashMap<Id, _>` sharding idiom already used
//! by `InterruptFabric` and the cache tier) fronting the turn orchestrator
//! instead of an in-process STT/TTS loop.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};
use dashmap::DashMap;
use thiserror::Error;
use tokio::sync::Mutex as AsyncMutex;
use uuid::Uuid;

use voice_agent_core::{
    InterruptFabric, InterruptReason, Language, OptimizationTier, Session, SessionConfiguration,
    TranslateConfig, TurnResult, VoiceTuning,
};
use voice_agent_pipeline::orchestrator::{Orchestrator, TurnContent, TurnInput};
use voice_agent_pipeline::PipelineError;

#[derive(Debug, Error)]
pub enum SessionManagerError {
    #[error("unknown session: {0}")]
    SessionNotFound(Uuid),

    #[error("orchestrator error: {0}")]
    Orchestrator(#[from] PipelineError),

    #[error("invalid audio payload: {0}")]
    InvalidAudio(String),
}

/// Strips an optional `data:audio/...;base64,` prefix and decodes the rest.
/// Unit-tested directly; the out-of-scope transport is the only caller.
pub fn decode_audio_payload(payload: &str) -> Result<Vec<u8>, SessionManagerError> {
    let data = match payload.find(";base64,") {
        Some(idx) if payload.starts_with("data:") => &payload[idx + ";base64,".len()..],
        _ => payload,
    };
    STANDARD.decode(data).map_err(|e| SessionManagerError::InvalidAudio(e.to_string()))
}

pub enum ClientEvent {
    Start {
        session_id: Uuid,
        config_id: Option<String>,
        optimization_tier: Option<OptimizationTier>,
        target_language: Option<Language>,
    },
    AudioChunk {
        session_id: Uuid,
        bytes: Vec<u8>,
        optimization_tier: Option<OptimizationTier>,
    },
    Text {
        session_id: Uuid,
        text: String,
        optimization_tier: Option<OptimizationTier>,
        target_language: Option<Language>,
    },
    Interrupt {
        session_id: Uuid,
        turn_id: Uuid,
    },
    Stop {
        session_id: Uuid,
    },
}

pub enum ServerEvent {
    SessionStarted { session_id: Uuid },
    ConfigLoaded { optimization_tier: OptimizationTier, target_language: Language },
    Response(TurnResult),
    Interrupted { turn_id: Uuid, reason: InterruptReason },
    SessionStopped { session_id: Uuid },
}

struct SessionEntry {
    session: Session,
    configuration: Option<SessionConfiguration>,
}

/// Per-session turn settings the manager needs but `SessionConfiguration`
/// doesn't carry (ASR provider, default system prompt) live here rather than
/// being invented on `SessionConfiguration` itself.
#[derive(Clone)]
pub struct SessionDefaults {
    pub system_prompt: String,
    pub llm_provider: String,
    pub llm_model: String,
    pub tts_provider: String,
    pub tts_voice_id: Option<String>,
    pub tts_tuning: VoiceTuning,
    pub translation_config: TranslateConfig,
}

pub struct SessionManager {
    entries: DashMap<Uuid, Arc<AsyncMutex<SessionEntry>>>,
    orchestrator: Arc<Orchestrator>,
    /// The same fabric instance wired into the orchestrator's deps, so a
    /// turn cancelled here (with the event-appropriate reason) is observed
    /// by the orchestrator's checkpoints mid-flight.
    interrupt_fabric: Arc<InterruptFabric>,
    defaults: SessionDefaults,
}

impl SessionManager {
    pub fn new(orchestrator: Arc<Orchestrator>, interrupt_fabric: Arc<InterruptFabric>, defaults: SessionDefaults) -> Self {
        Self { entries: DashMap::new(), orchestrator, interrupt_fabric, defaults }
    }

    fn entry(&self, session_id: Uuid) -> Result<Arc<AsyncMutex<SessionEntry>>, SessionManagerError> {
        self.entries.get(&session_id).map(|e| e.clone()).ok_or(SessionManagerError::SessionNotFound(session_id))
    }

    pub async fn handle(&self, event: ClientEvent) -> Result<ServerEvent, SessionManagerError> {
        match event {
            ClientEvent::Start { session_id, config_id: _, optimization_tier, target_language } => {
                let session = Session {
                    session_id,
                    optimization_tier: optimization_tier.unwrap_or_default(),
                    target_language: target_language.unwrap_or(Language::FALLBACK),
                    created_at: chrono::Utc::now(),
                    last_turn_id: None,
                    configuration_id: None,
                    active_turn_id: None,
                };
                let tier = session.optimization_tier;
                let lang = session.target_language;
                self.entries.insert(session_id, Arc::new(AsyncMutex::new(SessionEntry { session, configuration: None })));
                Ok(ServerEvent::ConfigLoaded { optimization_tier: tier, target_language: lang })
            }

            ClientEvent::AudioChunk { session_id, bytes, optimization_tier } => {
                // Audio is a speech event: any prior active turn is cancelled
                // as a barge-in, not a replacement (§4.9).
                self.cancel_active_turn(session_id, InterruptReason::UserBargeIn).await?;
                let (tier, target_language) = self.tier_and_language(session_id, optimization_tier, None).await?;
                let result = self
                    .run_turn(session_id, tier, target_language, TurnContent::Audio { bytes, hinted_language: None })
                    .await?;
                Ok(ServerEvent::Response(result))
            }

            ClientEvent::Text { session_id, text, optimization_tier, target_language } => {
                // A text event is not speech: a prior active turn is replaced,
                // not barge-in-interrupted (§4.9).
                self.cancel_active_turn(session_id, InterruptReason::Replaced).await?;
                let (tier, target_language) = self.tier_and_language(session_id, optimization_tier, target_language).await?;
                let result = self.run_turn(session_id, tier, target_language, TurnContent::Text { text }).await?;
                Ok(ServerEvent::Response(result))
            }

            ClientEvent::Interrupt { session_id, turn_id: _ } => {
                let entry = self.entry(session_id)?;
                let cancelled_turn_id = entry.lock().await.session.active_turn_id;
                self.cancel_active_turn(session_id, InterruptReason::UserBargeIn).await?;
                Ok(ServerEvent::Interrupted {
                    turn_id: cancelled_turn_id.unwrap_or(Uuid::nil()),
                    reason: InterruptReason::UserBargeIn,
                })
            }

            ClientEvent::Stop { session_id } => {
                self.cancel_active_turn(session_id, InterruptReason::Manual).await?;
                self.entries.remove(&session_id);
                Ok(ServerEvent::SessionStopped { session_id })
            }
        }
    }

    async fn tier_and_language(
        &self,
        session_id: Uuid,
        optimization_tier: Option<OptimizationTier>,
        target_language: Option<Language>,
    ) -> Result<(OptimizationTier, Language), SessionManagerError> {
        let entry = self.entry(session_id)?;
        let guard = entry.lock().await;
        Ok((
            optimization_tier.unwrap_or(guard.session.optimization_tier),
            target_language.unwrap_or(guard.session.target_language),
        ))
    }

    async fn cancel_active_turn(&self, session_id: Uuid, reason: InterruptReason) -> Result<(), SessionManagerError> {
        let Some(entry) = self.entries.get(&session_id) else { return Ok(()) };
        let entry = entry.clone();
        let mut guard = entry.lock().await;
        if let Some(turn_id) = guard.session.active_turn_id.take() {
            self.interrupt_fabric.cancel(session_id, turn_id, reason);
        }
        Ok(())
    }

    async fn run_turn(
        &self,
        session_id: Uuid,
        tier: OptimizationTier,
        target_language: Language,
        content: TurnContent,
    ) -> Result<TurnResult, SessionManagerError> {
        let turn_id = Uuid::new_v4();
        let input = TurnInput {
            turn_id,
            session_id,
            optimization_tier: tier,
            target_language,
            translation_config: self.defaults.translation_config.clone(),
            content,
            system_prompt: self.defaults.system_prompt.clone(),
            llm_provider: self.defaults.llm_provider.clone(),
            llm_model: self.defaults.llm_model.clone(),
            tts_provider: self.defaults.tts_provider.clone(),
            tts_voice_id: self.defaults.tts_voice_id.clone(),
            tts_tuning: self.defaults.tts_tuning,
        };

        let entry = self.entry(session_id)?;
        {
            let mut guard = entry.lock().await;
            guard.session.active_turn_id = Some(turn_id);
        }

        let result = self.orchestrator.process_turn(input).await?;

        let mut guard = entry.lock().await;
        guard.session.last_turn_id = Some(result.turn_id);
        if guard.session.active_turn_id == Some(turn_id) {
            guard.session.active_turn_id = None;
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_raw_base64_payload() {
        let encoded = STANDARD.encode(b"hello");
        assert_eq!(decode_audio_payload(&encoded).unwrap(), b"hello");
    }

    #[test]
    fn strips_data_url_prefix_before_decoding() {
        let encoded = STANDARD.encode(b"hello");
        let payload = format!("data:audio/wav;base64,{encoded}");
        assert_eq!(decode_audio_payload(&payload).unwrap(), b"hello");
    }

    #[test]
    fn invalid_base64_is_an_error_not_a_panic() {
        assert!(decode_audio_payload("not valid base64!!").is_err());
    }
}
