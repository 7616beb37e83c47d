//! LLM provider surface (§4.2)

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    MaxTokens,
    ContentFilter,
}

#[derive(Debug, Clone)]
pub struct LlmOutput {
    pub text: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub finish_reason: FinishReason,
}

/// Per-model pricing and capability metadata, used by the optimization
/// policy (§4.1) to pick a model for a tier and by cost recording (§4.6)
/// to price generations.
#[derive(Debug, Clone)]
pub struct ModelMetadata {
    pub model_id: String,
    pub price_per_input_token: rust_decimal::Decimal,
    pub price_per_output_token: rust_decimal::Decimal,
    pub context_window: u32,
    pub supports_system_prompt: bool,
}

/// Implementations: one per LLM vendor (OpenAI, Anthropic, Sarvam-hosted
/// open models), each a thin `reqwest` adapter over the vendor's chat API.
#[async_trait]
pub trait Llm: Send + Sync {
    async fn generate(
        &self,
        messages: &[Message],
        model: &str,
        temperature: f32,
        max_tokens: u32,
        session_id: Uuid,
        turn_id: Uuid,
    ) -> Result<LlmOutput>;

    fn provider_name(&self) -> &str;

    /// Models this provider serves, with pricing (§4.6 billing inputs).
    fn models(&self) -> &[ModelMetadata];

    fn model_metadata(&self, model_id: &str) -> Option<&ModelMetadata> {
        self.models().iter().find(|m| m.model_id == model_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    struct MockLlm {
        models: Vec<ModelMetadata>,
    }

    #[async_trait]
    impl Llm for MockLlm {
        async fn generate(
            &self,
            messages: &[Message],
            _model: &str,
            _temperature: f32,
            _max_tokens: u32,
            _session_id: Uuid,
            _turn_id: Uuid,
        ) -> Result<LlmOutput> {
            Ok(LlmOutput {
                text: format!("echo: {}", messages.last().map(|m| m.content.as_str()).unwrap_or("")),
                input_tokens: 10,
                output_tokens: 5,
                finish_reason: FinishReason::Stop,
            })
        }

        fn provider_name(&self) -> &str {
            "mock"
        }

        fn models(&self) -> &[ModelMetadata] {
            &self.models
        }
    }

    #[test]
    fn looks_up_model_metadata_by_id() {
        let llm = MockLlm {
            models: vec![ModelMetadata {
                model_id: "gpt-4o-mini".into(),
                price_per_input_token: dec!(0.00000015),
                price_per_output_token: dec!(0.0000006),
                context_window: 128_000,
                supports_system_prompt: true,
            }],
        };
        assert!(llm.model_metadata("gpt-4o-mini").is_some());
        assert!(llm.model_metadata("nonexistent").is_none());
    }
}
