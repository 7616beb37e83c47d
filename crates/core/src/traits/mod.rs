//! Provider trait surfaces (§4.2): the seams pipeline stages call through,
//! implemented by vendor-specific HTTP adapters in the `llm` and `pipeline`
//! crates.

pub mod asr;
pub mod llm;
pub mod translate;
pub mod tts;

pub use asr::{Asr, AsrOutput};
pub use llm::{FinishReason, Llm, LlmOutput, Message, ModelMetadata, Role};
pub use translate::{FormalityBand, PreserveDomain, Translate, TranslateConfig, TranslateOutput};
pub use tts::{Tts, TtsOutput};
