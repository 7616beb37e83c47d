//! Core traits and types for the voice agent
//!
//! This crate provides foundational types shared across every other crate:
//! provider trait surfaces (ASR/LLM/Translate/TTS), the turn and session
//! data model, the interrupt fabric, cost and metrics recording, and
//! guardrail/PII types.

pub mod audio;
pub mod cache_types;
pub mod config_preset;
pub mod cost;
pub mod error;
pub mod feedback;
pub mod guardrail;
pub mod interrupt;
pub mod language;
pub mod metrics;
pub mod money;
pub mod pii;
pub mod session;
pub mod traits;
pub mod turn;
pub mod voice;

pub use audio::{AudioEncoding, AudioFrame, Channels, SampleRate};
pub use cache_types::{CachedLLMResponse, CachedTTSResponse};
pub use config_preset::{configurations_to_demote, SessionConfiguration};
pub use cost::{CostEntry, Service, UnitType};
pub use error::{Error, ProviderError, ProviderErrorKind, Result};
pub use feedback::{BuiltinDeletionForbidden, InvalidRating, RatingType, SystemPrompt, UserFeedback};
pub use guardrail::{CheckResult, GuardrailLayer, GuardrailViolation, Severity};
pub use interrupt::{CancellationToken, Cancelled, InterruptFabric};
pub use language::{Language, Script};
pub use metrics::{RunningMean, SessionMetrics};
pub use money::{round_money, MONEY_SCALE};
pub use pii::{DetectionMethod, PIIEntity, PIISeverity, PIIType, RedactionStrategy};
pub use session::{OptimizationTier, Session};
pub use turn::{InterruptReason, StageLatencies, Turn, TurnResult, TurnStatus};
pub use voice::{VoiceDescriptor, VoiceGender, VoiceTuning, VoiceTuningError};

pub use traits::{
    Asr, AsrOutput, FinishReason, FormalityBand, Llm, LlmOutput, Message, ModelMetadata,
    PreserveDomain, Role, Translate, TranslateConfig, TranslateOutput, Tts, TtsOutput,
};
