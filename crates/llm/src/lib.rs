//! ASR/LLM/Translate/TTS provider adapters, plus prompt assembly.
//!
//! Each vendor gets its own adapter implementing one of
//! `voice_agent_core::{Asr, Llm, Translate, Tts}`; `retry` holds the shared
//! backoff policy and `prompt` assembles the message list handed to
//! `Llm::generate`.

pub mod anthropic;
pub mod asr;
pub mod openai;
pub mod prompt;
pub mod retry;
pub mod sarvam;
pub mod translate;
pub mod tts;

pub use anthropic::{AnthropicConfig, AnthropicLlm};
pub use asr::{SarvamAsr, SarvamAsrConfig};
pub use openai::{OpenAiConfig, OpenAiLlm};
pub use prompt::PromptBuilder;
pub use sarvam::{SarvamConfig, SarvamLlm};
pub use translate::{SarvamTranslate, SarvamTranslateConfig};
pub use tts::{SarvamTts, SarvamTtsConfig};

use std::collections::HashMap;
use std::sync::Arc;
use voice_agent_core::{Asr, Llm, Translate, Tts};

/// Maps provider name (`"openai"`, `"anthropic"`, `"sarvam"`) to a live
/// adapter. The orchestrator looks providers up by name rather than holding
/// concrete adapter types, so a tier's configured provider is just data.
#[derive(Default, Clone)]
pub struct LlmRegistry {
    providers: HashMap<String, Arc<dyn Llm>>,
}

impl LlmRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: Arc<dyn Llm>) {
        self.providers.insert(provider.provider_name().to_string(), provider);
    }

    pub fn get(&self, provider_name: &str) -> Option<Arc<dyn Llm>> {
        self.providers.get(provider_name).cloned()
    }
}

/// Maps provider name to a live Translate adapter, mirroring `LlmRegistry`.
#[derive(Default, Clone)]
pub struct TranslateRegistry {
    providers: HashMap<String, Arc<dyn Translate>>,
}

impl TranslateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: Arc<dyn Translate>) {
        self.providers.insert(provider.provider_name().to_string(), provider);
    }

    pub fn get(&self, provider_name: &str) -> Option<Arc<dyn Translate>> {
        self.providers.get(provider_name).cloned()
    }

    /// First registered provider whose `supported_pairs` covers `(source, target)`.
    pub fn find_supporting(
        &self,
        source: voice_agent_core::Language,
        target: voice_agent_core::Language,
    ) -> Option<Arc<dyn Translate>> {
        self.providers.values().find(|p| p.supports_pair(source, target)).cloned()
    }
}

/// Maps provider name to a live ASR adapter, mirroring `LlmRegistry`.
#[derive(Default, Clone)]
pub struct AsrRegistry {
    providers: HashMap<String, Arc<dyn Asr>>,
}

impl AsrRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: Arc<dyn Asr>) {
        self.providers.insert(provider.provider_name().to_string(), provider);
    }

    pub fn get(&self, provider_name: &str) -> Option<Arc<dyn Asr>> {
        self.providers.get(provider_name).cloned()
    }
}

/// Maps provider name to a live TTS adapter, mirroring `LlmRegistry`.
#[derive(Default, Clone)]
pub struct TtsRegistry {
    providers: HashMap<String, Arc<dyn Tts>>,
}

impl TtsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: Arc<dyn Tts>) {
        self.providers.insert(provider.provider_name().to_string(), provider);
    }

    pub fn get(&self, provider_name: &str) -> Option<Arc<dyn Tts>> {
        self.providers.get(provider_name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use voice_agent_core::{FinishReason, LlmOutput, Message, ModelMetadata, Result};

    struct StubLlm;

    #[async_trait]
    impl Llm for StubLlm {
        async fn generate(
            &self,
            _messages: &[Message],
            _model: &str,
            _temperature: f32,
            _max_tokens: u32,
            _session_id: uuid::Uuid,
            _turn_id: uuid::Uuid,
        ) -> Result<LlmOutput> {
            Ok(LlmOutput {
                text: "stub".to_string(),
                input_tokens: 0,
                output_tokens: 0,
                finish_reason: FinishReason::Stop,
            })
        }

        fn provider_name(&self) -> &str {
            "stub"
        }

        fn models(&self) -> &[ModelMetadata] {
            &[]
        }
    }

    #[test]
    fn registry_looks_up_providers_by_name() {
        let mut registry = LlmRegistry::new();
        registry.register(Arc::new(StubLlm));

        assert!(registry.get("stub").is_some());
        assert!(registry.get("missing").is_none());
    }

    struct StubTranslate {
        pairs: Vec<(voice_agent_core::Language, voice_agent_core::Language)>,
    }

    #[async_trait]
    impl Translate for StubTranslate {
        async fn translate(
            &self,
            text: &str,
            _source: voice_agent_core::Language,
            _target: voice_agent_core::Language,
            _config: &voice_agent_core::TranslateConfig,
            _session_id: uuid::Uuid,
            _turn_id: uuid::Uuid,
        ) -> Result<voice_agent_core::TranslateOutput> {
            Ok(voice_agent_core::TranslateOutput {
                char_count: text.chars().count() as u32,
                text: text.to_string(),
            })
        }

        fn provider_name(&self) -> &str {
            "stub-translate"
        }

        fn price_per_char(&self) -> rust_decimal::Decimal {
            rust_decimal::Decimal::ZERO
        }

        fn supported_pairs(&self) -> &[(voice_agent_core::Language, voice_agent_core::Language)] {
            &self.pairs
        }
    }

    #[test]
    fn translate_registry_finds_provider_supporting_pair() {
        use voice_agent_core::Language;

        let mut registry = TranslateRegistry::new();
        registry.register(Arc::new(StubTranslate { pairs: vec![(Language::Hindi, Language::English)] }));

        assert!(registry.find_supporting(Language::Hindi, Language::English).is_some());
        assert!(registry.find_supporting(Language::Tamil, Language::English).is_none());
    }

    struct StubAsr;

    #[async_trait]
    impl Asr for StubAsr {
        async fn transcribe(
            &self,
            _audio_bytes: &[u8],
            _language_hint: Option<voice_agent_core::Language>,
            _session_id: uuid::Uuid,
            _turn_id: uuid::Uuid,
        ) -> Result<voice_agent_core::AsrOutput> {
            unimplemented!()
        }

        fn provider_name(&self) -> &str {
            "stub-asr"
        }

        fn price_per_second(&self) -> rust_decimal::Decimal {
            rust_decimal::Decimal::ZERO
        }
    }

    struct StubTts;

    #[async_trait]
    impl Tts for StubTts {
        async fn synthesize(
            &self,
            _text: &str,
            _voice_id: &str,
            _language: voice_agent_core::Language,
            _codec: voice_agent_core::AudioEncoding,
            _sample_rate: voice_agent_core::SampleRate,
            _tuning: &voice_agent_core::VoiceTuning,
            _session_id: uuid::Uuid,
            _turn_id: uuid::Uuid,
        ) -> Result<voice_agent_core::TtsOutput> {
            unimplemented!()
        }

        fn provider_name(&self) -> &str {
            "stub-tts"
        }

        fn price_per_char(&self) -> rust_decimal::Decimal {
            rust_decimal::Decimal::ZERO
        }
    }

    #[test]
    fn asr_and_tts_registries_look_up_providers_by_name() {
        let mut asr_registry = AsrRegistry::new();
        asr_registry.register(Arc::new(StubAsr));
        assert!(asr_registry.get("stub-asr").is_some());
        assert!(asr_registry.get("missing").is_none());

        let mut tts_registry = TtsRegistry::new();
        tts_registry.register(Arc::new(StubTts));
        assert!(tts_registry.get("stub-tts").is_some());
        assert!(tts_registry.get("missing").is_none());
    }
}
