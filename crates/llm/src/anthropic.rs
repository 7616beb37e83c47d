//! Anthropic Messages API adapter, implementing `voice_agent_core::Llm`.

use crate::retry::with_retries;
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;
use voice_agent_core::{
    Error, FinishReason, Llm, LlmOutput, Message, ModelMetadata, ProviderError, ProviderErrorKind,
    Result, Role,
};

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    pub api_key: String,
    pub endpoint: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl AnthropicConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: "https://api.anthropic.com/v1".to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 3,
        }
    }
}

pub struct AnthropicLlm {
    config: AnthropicConfig,
    client: Client,
    models: Vec<ModelMetadata>,
}

impl AnthropicLlm {
    pub fn new(config: AnthropicConfig) -> std::result::Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Configuration(e.to_string()))?;

        let models = vec![
            ModelMetadata {
                model_id: "claude-3-5-sonnet-latest".to_string(),
                price_per_input_token: dec!(0.000003),
                price_per_output_token: dec!(0.000015),
                context_window: 200_000,
                supports_system_prompt: true,
            },
            ModelMetadata {
                model_id: "claude-3-5-haiku-latest".to_string(),
                price_per_input_token: dec!(0.0000008),
                price_per_output_token: dec!(0.000004),
                context_window: 200_000,
                supports_system_prompt: true,
            },
        ];

        Ok(Self { config, client, models })
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<AnthropicMessage>,
}

#[derive(Serialize)]
struct AnthropicMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
    usage: AnthropicUsage,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

/// Anthropic puts the system prompt in a dedicated field, not the messages
/// array — split it out here so callers can pass a uniform `Message` list.
fn split_system_prompt(messages: &[Message]) -> (Option<String>, Vec<AnthropicMessage>) {
    let mut system = None;
    let mut rest = Vec::with_capacity(messages.len());
    for message in messages {
        match message.role {
            Role::System => system = Some(message.content.clone()),
            Role::User => rest.push(AnthropicMessage { role: "user", content: message.content.clone() }),
            Role::Assistant => {
                rest.push(AnthropicMessage { role: "assistant", content: message.content.clone() })
            }
        }
    }
    (system, rest)
}

#[async_trait]
impl Llm for AnthropicLlm {
    async fn generate(
        &self,
        messages: &[Message],
        model: &str,
        temperature: f32,
        max_tokens: u32,
        session_id: Uuid,
        turn_id: Uuid,
    ) -> Result<LlmOutput> {
        let (system, rest) = split_system_prompt(messages);
        let request = MessagesRequest { model, max_tokens, temperature, system, messages: rest };

        let output = with_retries(self.config.max_retries, |attempt| {
            let request = &request;
            async move {
                tracing::debug!(%session_id, %turn_id, attempt, model, "anthropic generate attempt");

                let response = self
                    .client
                    .post(format!("{}/messages", self.config.endpoint))
                    .header("x-api-key", &self.config.api_key)
                    .header("anthropic-version", ANTHROPIC_VERSION)
                    .json(request)
                    .send()
                    .await
                    .map_err(|e| {
                        if e.is_timeout() {
                            ProviderError::new("anthropic", ProviderErrorKind::Timeout, e.to_string())
                        } else {
                            ProviderError::new("anthropic", ProviderErrorKind::Network, e.to_string())
                        }
                    })?;

                let status = response.status();
                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    return Err(ProviderError::from_status("anthropic", status.as_u16(), body));
                }

                let parsed: MessagesResponse = response.json().await.map_err(|e| {
                    ProviderError::new("anthropic", ProviderErrorKind::Http5xx(502), e.to_string())
                })?;

                let text = parsed.content.into_iter().map(|b| b.text).collect::<Vec<_>>().join("");

                Ok(LlmOutput {
                    text,
                    input_tokens: parsed.usage.input_tokens,
                    output_tokens: parsed.usage.output_tokens,
                    finish_reason: match parsed.stop_reason.as_deref() {
                        Some("max_tokens") => FinishReason::MaxTokens,
                        _ => FinishReason::Stop,
                    },
                })
            }
        })
        .await
        .map_err(Error::Provider)?;

        Ok(output)
    }

    fn provider_name(&self) -> &str {
        "anthropic"
    }

    fn models(&self) -> &[ModelMetadata] {
        &self.models
    }
}
