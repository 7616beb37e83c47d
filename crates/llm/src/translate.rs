//! Sarvam-hosted translate adapter, implementing
//! `voice_agent_core::traits::translate::Translate`.

use crate::retry::with_retries;
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;
use voice_agent_core::{
    Error, FormalityBand, Language, ProviderError, ProviderErrorKind, Result, Translate,
    TranslateConfig, TranslateOutput,
};

#[derive(Debug, Clone)]
pub struct SarvamTranslateConfig {
    pub api_key: String,
    pub endpoint: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl SarvamTranslateConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: "https://api.sarvam.ai/translate".to_string(),
            timeout: Duration::from_secs(15),
            max_retries: 3,
        }
    }
}

pub struct SarvamTranslate {
    config: SarvamTranslateConfig,
    client: Client,
    pairs: Vec<(Language, Language)>,
}

impl SarvamTranslate {
    pub fn new(config: SarvamTranslateConfig) -> std::result::Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Configuration(e.to_string()))?;

        let indic_languages = [
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
        let mut pairs = Vec::with_capacity(indic_languages.len() * 2);
        for lang in indic_languages {
            pairs.push((lang, Language::English));
            pairs.push((Language::English, lang));
        }

        Ok(Self { config, client, pairs })
    }
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    input: &'a str,
    source_language_code: &'a str,
    target_language_code: &'a str,
    mode: &'static str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    translated_text: String,
}

fn mode_for(config: &TranslateConfig) -> &'static str {
    match config.formality_band() {
        FormalityBand::Formal => "formal",
        FormalityBand::Conversational => "classic-colloquial",
        FormalityBand::Informal => "modern-colloquial",
    }
}

#[async_trait]
impl Translate for SarvamTranslate {
    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
        config: &TranslateConfig,
        session_id: Uuid,
        turn_id: Uuid,
    ) -> Result<TranslateOutput> {
        let request = TranslateRequest {
            input: text,
            source_language_code: source.code(),
            target_language_code: target.code(),
            mode: mode_for(config),
        };

        let response_text = with_retries(self.config.max_retries, |attempt| {
            let request = &request;
            async move {
                tracing::debug!(%session_id, %turn_id, attempt, source = %source, target = %target, "sarvam translate attempt");

                let response = self
                    .client
                    .post(&self.config.endpoint)
                    .header("api-subscription-key", &self.config.api_key)
                    .json(request)
                    .send()
                    .await
                    .map_err(|e| {
                        if e.is_timeout() {
                            ProviderError::new("sarvam-translate", ProviderErrorKind::Timeout, e.to_string())
                        } else {
                            ProviderError::new("sarvam-translate", ProviderErrorKind::Network, e.to_string())
                        }
                    })?;

                let status = response.status();
                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    return Err(ProviderError::from_status("sarvam-translate", status.as_u16(), body));
                }

                let parsed: TranslateResponse = response.json().await.map_err(|e| {
                    ProviderError::new("sarvam-translate", ProviderErrorKind::Http5xx(502), e.to_string())
                })?;

                Ok(parsed.translated_text)
            }
        })
        .await
        .map_err(Error::Provider)?;

        Ok(TranslateOutput { char_count: response_text.chars().count() as u32, text: response_text })
    }

    fn provider_name(&self) -> &str {
        "sarvam-translate"
    }

    fn price_per_char(&self) -> Decimal {
        dec!(0.00002)
    }

    fn supported_pairs(&self) -> &[(Language, Language)] {
        &self.pairs
    }
}
