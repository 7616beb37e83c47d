//! Speech-to-text provider surface (§4.2)

use crate::error::Result;
use crate::language::Language;
use async_trait::async_trait;
use uuid::Uuid;

/// Result of one transcription call. `duration_ms` is the wall-clock audio
/// duration submitted, not processing time — it is what cost recording
/// (§4.6) bills against.
#[derive(Debug, Clone)]
pub struct AsrOutput {
    pub text: String,
    pub detected_language: Option<Language>,
    pub confidence: f32,
    pub duration_ms: u64,
}

/// Implementations: one per cloud ASR vendor (Sarvam, Whisper/OpenAI, ...),
/// each a thin `reqwest` adapter over the vendor's HTTP API.
#[async_trait]
pub trait Asr: Send + Sync {
    /// Transcribe a chunk of audio. `language_hint` of `None` requests
    /// auto-detection where the provider supports it; providers that don't
    /// must fall back to `Language::FALLBACK`.
    async fn transcribe(
        &self,
        audio_bytes: &[u8],
        language_hint: Option<Language>,
        session_id: Uuid,
        turn_id: Uuid,
    ) -> Result<AsrOutput>;

    /// Stable provider identifier used in cost entries and logs.
    fn provider_name(&self) -> &str;

    /// Price per second of audio submitted, in the provider's billing
    /// currency, used by §4.6's ASR cost formula.
    fn price_per_second(&self) -> rust_decimal::Decimal;
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct MockAsr;

    #[async_trait]
    impl Asr for MockAsr {
        async fn transcribe(
            &self,
            _audio_bytes: &[u8],
            language_hint: Option<Language>,
            _session_id: Uuid,
            _turn_id: Uuid,
        ) -> Result<AsrOutput> {
            Ok(AsrOutput {
                text: "hello".into(),
                detected_language: Some(language_hint.unwrap_or(Language::FALLBACK)),
                confidence: 0.9,
                duration_ms: 1200,
            })
        }

        fn provider_name(&self) -> &str {
            "mock"
        }

        fn price_per_second(&self) -> rust_decimal::Decimal {
            rust_decimal::Decimal::new(2, 3)
        }
    }

    #[tokio::test]
    async fn falls_back_to_default_language_with_no_hint() {
        let asr = MockAsr;
        let out = asr
            .transcribe(&[], None, Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap();
        assert_eq!(out.detected_language, Some(Language::FALLBACK));
    }
}
