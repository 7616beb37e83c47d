//! Text-to-speech provider surface (§4.2)

use crate::audio::{AudioEncoding, SampleRate};
use crate::error::Result;
use crate::language::Language;
use crate::voice::VoiceTuning;
use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct TtsOutput {
    pub audio_bytes: Vec<u8>,
    pub codec: AudioEncoding,
    pub sample_rate: SampleRate,
    pub character_count: u32,
}

/// Implementations: one per TTS vendor (Sarvam, ElevenLabs, ...), each a
/// thin `reqwest` adapter over the vendor's HTTP API.
#[async_trait]
pub trait Tts: Send + Sync {
    async fn synthesize(
        &self,
        text: &str,
        voice_id: &str,
        language: Language,
        codec: AudioEncoding,
        sample_rate: SampleRate,
        tuning: &VoiceTuning,
        session_id: Uuid,
        turn_id: Uuid,
    ) -> Result<TtsOutput>;

    fn provider_name(&self) -> &str;

    fn price_per_char(&self) -> rust_decimal::Decimal;
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct MockTts;

    #[async_trait]
    impl Tts for MockTts {
        async fn synthesize(
            &self,
            text: &str,
            _voice_id: &str,
            _language: Language,
            codec: AudioEncoding,
            sample_rate: SampleRate,
            _tuning: &VoiceTuning,
            _session_id: Uuid,
            _turn_id: Uuid,
        ) -> Result<TtsOutput> {
            Ok(TtsOutput {
                audio_bytes: vec![0u8; text.len()],
                codec,
                sample_rate,
                character_count: text.chars().count() as u32,
            })
        }

        fn provider_name(&self) -> &str {
            "mock"
        }

        fn price_per_char(&self) -> rust_decimal::Decimal {
            rust_decimal::Decimal::new(3, 5)
        }
    }

    #[tokio::test]
    async fn character_count_matches_input_text() {
        let tts = MockTts;
        let out = tts
            .synthesize(
                "hello",
                "v1",
                Language::English,
                AudioEncoding::Pcm16,
                SampleRate::Hz16000,
                &VoiceTuning::default(),
                Uuid::new_v4(),
                Uuid::new_v4(),
            )
            .await
            .unwrap();
        assert_eq!(out.character_count, 5);
    }
}
