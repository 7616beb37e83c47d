//! Text-level support for the guardrail and translate stages: regex-based
//! PII detection (guardrail layer 3) and writing-system detection ahead of
//! translation.

pub mod pii;
pub mod script;

pub use script::ScriptDetector;
