//! Turn orchestration: cache tier, guardrail engine, cost recorder, and the
//! turn orchestrator that sequences ASR, guardrails, RAG, LLM, Translate,
//! and TTS into one conversational turn.

pub mod cache;
pub mod cost;
pub mod guardrail;
pub mod orchestrator;

pub use cache::{LlmCache, LlmLookup, TtsCache};
pub use cost::CostRecorder;
pub use guardrail::{GuardrailEngine, GuardrailEngineConfig};
pub use orchestrator::{AudioSink, NullAudioSink, Orchestrator, OrchestratorDeps, TurnInput};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("provider error: {0}")]
    Provider(#[from] voice_agent_core::ProviderError),

    #[error("persistence error: {0}")]
    Persistence(#[from] voice_agent_persistence::PersistenceError),

    #[error("rag error: {0}")]
    Rag(#[from] voice_agent_rag::RagError),

    #[error("no {0} provider registered: {1}")]
    ProviderNotFound(&'static str, String),

    #[error("no voice could be resolved for the target language")]
    VoiceNotResolved,

    #[error("turn cancelled: {0:?}")]
    Cancelled(voice_agent_core::InterruptReason),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<voice_agent_core::Cancelled> for PipelineError {
    fn from(cancelled: voice_agent_core::Cancelled) -> Self {
        PipelineError::Cancelled(cancelled.0)
    }
}

impl From<voice_agent_core::Error> for PipelineError {
    fn from(err: voice_agent_core::Error) -> Self {
        match err {
            voice_agent_core::Error::Provider(e) => PipelineError::Provider(e),
            voice_agent_core::Error::Cancelled => {
                PipelineError::Cancelled(voice_agent_core::InterruptReason::Manual)
            }
            other => PipelineError::Configuration(other.to_string()),
        }
    }
}

impl From<PipelineError> for voice_agent_core::Error {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Provider(e) => voice_agent_core::Error::Provider(e),
            PipelineError::Persistence(e) => voice_agent_core::Error::Persistence(e.to_string()),
            PipelineError::Rag(e) => voice_agent_core::Error::Rag(e.to_string()),
            PipelineError::Cancelled(_) => voice_agent_core::Error::Cancelled,
            other => voice_agent_core::Error::Configuration(other.to_string()),
        }
    }
}
