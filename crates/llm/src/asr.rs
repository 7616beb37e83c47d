//! Sarvam-hosted speech-to-text adapter, implementing `voice_agent_core::Asr`.

use crate::retry::with_retries;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;
use voice_agent_core::{
    Asr, AsrOutput, Error, Language, ProviderError, ProviderErrorKind, Result,
};

#[derive(Debug, Clone)]
pub struct SarvamAsrConfig {
    pub api_key: String,
    pub endpoint: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl SarvamAsrConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: "https://api.sarvam.ai/speech-to-text".to_string(),
            timeout: Duration::from_secs(20),
            max_retries: 3,
        }
    }
}

pub struct SarvamAsr {
    config: SarvamAsrConfig,
    client: Client,
}

impl SarvamAsr {
    pub fn new(config: SarvamAsrConfig) -> std::result::Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Configuration(e.to_string()))?;

        Ok(Self { config, client })
    }
}

#[derive(Deserialize)]
struct TranscribeResponse {
    transcript: String,
    language_code: Option<String>,
}

#[async_trait]
impl Asr for SarvamAsr {
    async fn transcribe(
        &self,
        audio_bytes: &[u8],
        language_hint: Option<Language>,
        session_id: Uuid,
        turn_id: Uuid,
    ) -> Result<AsrOutput> {
        let duration_ms = estimate_pcm16_duration_ms(audio_bytes, 16_000);
        let audio = audio_bytes.to_vec();
        let language_code = language_hint.map(|l| l.code());

        let transcript = with_retries(self.config.max_retries, |attempt| {
            let audio = audio.clone();
            async move {
                tracing::debug!(%session_id, %turn_id, attempt, ?language_code, "sarvam transcribe attempt");

                let mut form = Form::new().part(
                    "file",
                    Part::bytes(audio).file_name("audio.wav").mime_str("audio/wav").map_err(|e| {
                        ProviderError::new("sarvam-asr", ProviderErrorKind::Network, e.to_string())
                    })?,
                );
                if let Some(code) = language_code {
                    form = form.text("language_code", code);
                } else {
                    form = form.text("language_code", "unknown");
                }

                let response = self
                    .client
                    .post(&self.config.endpoint)
                    .header("api-subscription-key", &self.config.api_key)
                    .multipart(form)
                    .send()
                    .await
                    .map_err(|e| {
                        if e.is_timeout() {
                            ProviderError::new("sarvam-asr", ProviderErrorKind::Timeout, e.to_string())
                        } else {
                            ProviderError::new("sarvam-asr", ProviderErrorKind::Network, e.to_string())
                        }
                    })?;

                let status = response.status();
                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    return Err(ProviderError::from_status("sarvam-asr", status.as_u16(), body));
                }

                response.json::<TranscribeResponse>().await.map_err(|e| {
                    ProviderError::new("sarvam-asr", ProviderErrorKind::Http5xx(502), e.to_string())
                })
            }
        })
        .await
        .map_err(Error::Provider)?;

        Ok(AsrOutput {
            detected_language: transcript
                .language_code
                .as_deref()
                .and_then(Language::from_code)
                .or(language_hint),
            text: transcript.transcript,
            confidence: 0.9,
            duration_ms,
        })
    }

    fn provider_name(&self) -> &str {
        "sarvam-asr"
    }

    fn price_per_second(&self) -> Decimal {
        dec!(0.00417)
    }
}

/// 16-bit mono PCM duration, used when the caller doesn't already know the
/// wall-clock length of the submitted audio.
fn estimate_pcm16_duration_ms(audio_bytes: &[u8], sample_rate: u32) -> u64 {
    let samples = audio_bytes.len() / 2;
    (samples as u64 * 1000) / sample_rate as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_estimate_matches_sample_count() {
        let audio = vec![0u8; 16_000 * 2];
        assert_eq!(estimate_pcm16_duration_ms(&audio, 16_000), 1000);
    }
}
