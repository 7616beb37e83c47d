//! Configuration management for the voice agent
//!
//! Supports loading configuration from files (`config/{env}.yaml`,
//! `config/default.yaml`) layered under `VOICE_AGENT__`-prefixed environment
//! variables. Also owns the optimization policy (§4.1) and voice registry
//! (§4.3): every other crate receives these knobs as inputs rather than
//! reading environment/config directly.

pub mod policy;
pub mod settings;
pub mod voice_registry;

pub use policy::{OptimizationPolicy, OptimizationProfile};
pub use settings::{
    load_settings, AuthConfig, ObservabilityConfig, PersistenceConfig, ProviderConfig,
    RateLimitConfig, RuntimeEnvironment, ServerConfig, Settings,
};
pub use voice_registry::{VoiceRegistry, VoiceResolutionStep, FALLBACK_LANGUAGE};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment error: {0}")]
    Environment(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
