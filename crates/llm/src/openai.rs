//! OpenAI chat-completions adapter, implementing `voice_agent_core::Llm`.

use crate::retry::with_retries;
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use uuid::Uuid;
use voice_agent_core::{
    Error, FinishReason, Llm, LlmOutput, Message, ModelMetadata, ProviderError, ProviderErrorKind,
    Result, Role,
};

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub endpoint: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
        }
    }
}

pub struct OpenAiLlm {
    config: OpenAiConfig,
    client: Client,
    models: Vec<ModelMetadata>,
}

impl OpenAiLlm {
    pub fn new(config: OpenAiConfig) -> std::result::Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Configuration(e.to_string()))?;

        let models = vec![
            ModelMetadata {
                model_id: "gpt-4o".to_string(),
                price_per_input_token: dec!(0.0000025),
                price_per_output_token: dec!(0.00001),
                context_window: 128_000,
                supports_system_prompt: true,
            },
            ModelMetadata {
                model_id: "gpt-4o-mini".to_string(),
                price_per_input_token: dec!(0.00000015),
                price_per_output_token: dec!(0.0000006),
                context_window: 128_000,
                supports_system_prompt: true,
            },
        ];

        Ok(Self { config, client, models })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

fn role_str(role: voice_agent_core::Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

#[async_trait]
impl Llm for OpenAiLlm {
    async fn generate(
        &self,
        messages: &[Message],
        model: &str,
        temperature: f32,
        max_tokens: u32,
        session_id: Uuid,
        turn_id: Uuid,
    ) -> Result<LlmOutput> {
        let request = ChatRequest {
            model,
            messages: messages
                .iter()
                .map(|m| ChatMessage { role: role_str(m.role), content: m.content.clone() })
                .collect(),
            max_tokens,
            temperature,
        };

        let output = with_retries(self.config.max_retries, |attempt| {
            let request = &request;
            let started = Instant::now();
            async move {
                tracing::debug!(%session_id, %turn_id, attempt, model, "openai generate attempt");

                let response = self
                    .client
                    .post(format!("{}/chat/completions", self.config.endpoint))
                    .bearer_auth(&self.config.api_key)
                    .json(request)
                    .send()
                    .await
                    .map_err(|e| {
                        if e.is_timeout() {
                            ProviderError::new("openai", ProviderErrorKind::Timeout, e.to_string())
                        } else {
                            ProviderError::new("openai", ProviderErrorKind::Network, e.to_string())
                        }
                    })?;

                let status = response.status();
                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    return Err(ProviderError::from_status("openai", status.as_u16(), body));
                }

                let parsed: ChatResponse = response.json().await.map_err(|e| {
                    ProviderError::new("openai", ProviderErrorKind::Http5xx(502), e.to_string())
                })?;

                let choice = parsed.choices.into_iter().next().ok_or_else(|| {
                    ProviderError::new("openai", ProviderErrorKind::Http5xx(502), "no choices in response")
                })?;

                let _ = started.elapsed();
                Ok(LlmOutput {
                    text: choice.message.content,
                    input_tokens: parsed.usage.as_ref().map(|u| u.prompt_tokens).unwrap_or(0),
                    output_tokens: parsed.usage.as_ref().map(|u| u.completion_tokens).unwrap_or(0),
                    finish_reason: match choice.finish_reason.as_deref() {
                        Some("length") => FinishReason::MaxTokens,
                        Some("content_filter") => FinishReason::ContentFilter,
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
        "openai"
    }

    fn models(&self) -> &[ModelMetadata] {
        &self.models
    }
}
