//! Sarvam-hosted text-to-speech adapter, implementing `voice_agent_core::Tts`.

use crate::retry::with_retries;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;
use voice_agent_core::{
    AudioEncoding, Error, Language, ProviderError, ProviderErrorKind, Result, SampleRate, Tts,
    TtsOutput, VoiceTuning,
};

#[derive(Debug, Clone)]
pub struct SarvamTtsConfig {
    pub api_key: String,
    pub endpoint: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl SarvamTtsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: "https://api.sarvam.ai/text-to-speech".to_string(),
            timeout: Duration::from_secs(15),
            max_retries: 3,
        }
    }
}

pub struct SarvamTts {
    config: SarvamTtsConfig,
    client: Client,
    supported_languages: Vec<Language>,
}

impl SarvamTts {
    pub fn new(config: SarvamTtsConfig) -> std::result::Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Configuration(e.to_string()))?;

        let supported_languages = vec![
            Language::English,
            Language::Hindi,
            Language::Tamil,
            Language::Telugu,
            Language::Bengali,
            Language::Marathi,
            Language::Gujarati,
            Language::Kannada,
            Language::Malayalam,
            Language::Punjabi,
            Language::Odia,
        ];

        Ok(Self { config, client, supported_languages })
    }

    pub fn supports_language(&self, language: Language) -> bool {
        self.supported_languages.contains(&language)
    }
}

#[derive(Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
    target_language_code: &'a str,
    speaker: &'a str,
    pitch: f32,
    pace: f32,
    loudness: f32,
    sample_rate: u32,
}

#[derive(Deserialize)]
struct SynthesizeResponse {
    audios: Vec<String>,
}

#[async_trait]
impl Tts for SarvamTts {
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
    ) -> Result<TtsOutput> {
        let request = SynthesizeRequest {
            text,
            target_language_code: language.code(),
            speaker: voice_id,
            pitch: tuning.pitch,
            pace: tuning.pace,
            loudness: tuning.loudness,
            sample_rate: sample_rate.as_u32(),
        };

        let audio_b64 = with_retries(self.config.max_retries, |attempt| {
            let request = &request;
            async move {
                tracing::debug!(%session_id, %turn_id, attempt, voice_id, %language, "sarvam synthesize attempt");

                let response = self
                    .client
                    .post(&self.config.endpoint)
                    .header("api-subscription-key", &self.config.api_key)
                    .json(request)
                    .send()
                    .await
                    .map_err(|e| {
                        if e.is_timeout() {
                            ProviderError::new("sarvam-tts", ProviderErrorKind::Timeout, e.to_string())
                        } else {
                            ProviderError::new("sarvam-tts", ProviderErrorKind::Network, e.to_string())
                        }
                    })?;

                let status = response.status();
                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    return Err(ProviderError::from_status("sarvam-tts", status.as_u16(), body));
                }

                let parsed: SynthesizeResponse = response.json().await.map_err(|e| {
                    ProviderError::new("sarvam-tts", ProviderErrorKind::Http5xx(502), e.to_string())
                })?;

                parsed.audios.into_iter().next().ok_or_else(|| {
                    ProviderError::new("sarvam-tts", ProviderErrorKind::Http5xx(502), "no audio in response")
                })
            }
        })
        .await
        .map_err(Error::Provider)?;

        let audio_bytes = STANDARD.decode(audio_b64).map_err(|e| {
            Error::Provider(ProviderError::new("sarvam-tts", ProviderErrorKind::Http5xx(502), e.to_string()))
        })?;

        Ok(TtsOutput { audio_bytes, codec, sample_rate, character_count: text.chars().count() as u32 })
    }

    fn provider_name(&self) -> &str {
        "sarvam-tts"
    }

    fn price_per_char(&self) -> Decimal {
        dec!(0.000015)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supports_language_checks_catalog() {
        let tts = SarvamTts::new(SarvamTtsConfig::new("key")).unwrap();
        assert!(tts.supports_language(Language::Hindi));
        assert!(!tts.supports_language(Language::Sanskrit));
    }
}
