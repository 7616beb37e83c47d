//! Crate-wide error type

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("external provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("guardrail engine error: {0}")]
    Guardrail(String),

    #[error("cache error: {0}")]
    Cache(String),

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("turn cancelled")]
    Cancelled,

    #[error("invalid language code: {0}")]
    InvalidLanguage(String),

    #[error("llm error: {0}")]
    Llm(String),

    #[error("rag error: {0}")]
    Rag(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Error surfaced by an outbound provider call (ASR/LLM/Translate/TTS).
///
/// `retryable` distinguishes transient failures (5xx, network, timeout, 429)
/// from permanent ones (4xx other than 429), per the retry policy in
/// component design §4.2.
#[derive(Error, Debug, Clone)]
#[error("provider {provider} error ({kind:?}): {message}")]
pub struct ProviderError {
    pub provider: String,
    pub kind: ProviderErrorKind,
    pub message: String,
    pub retryable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    Network,
    Timeout,
    Http4xx(u16),
    Http5xx(u16),
    Cancelled,
    Unsupported,
}

impl ProviderError {
    pub fn new(provider: impl Into<String>, kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        let retryable = matches!(
            kind,
            ProviderErrorKind::Network | ProviderErrorKind::Timeout | ProviderErrorKind::Http5xx(_)
        ) || matches!(kind, ProviderErrorKind::Http4xx(429));
        Self {
            provider: provider.into(),
            kind,
            message: message.into(),
            retryable,
        }
    }

    pub fn cancelled(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            kind: ProviderErrorKind::Cancelled,
            message: "cancelled".to_string(),
            retryable: false,
        }
    }

    pub fn from_status(provider: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        let kind = if status == 429 || (500..600).contains(&status) {
            ProviderErrorKind::Http5xx(status)
        } else {
            ProviderErrorKind::Http4xx(status)
        };
        Self::new(provider, kind, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_on_5xx_and_429() {
        assert!(ProviderError::from_status("sarvam", 500, "boom").retryable);
        assert!(ProviderError::from_status("sarvam", 429, "rate limited").retryable);
    }

    #[test]
    fn non_retryable_on_other_4xx() {
        assert!(!ProviderError::from_status("sarvam", 400, "bad request").retryable);
        assert!(!ProviderError::from_status("sarvam", 401, "unauthorized").retryable);
    }
}
