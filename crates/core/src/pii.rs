//! PII type taxonomy shared between the guardrail engine (layer 3) and any
//! persistence-layer redaction helpers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PIIType {
    Email,
    Phone,
    CardNumber,
    GovernmentId,
    Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PIISeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionMethod {
    Regex,
    Keyword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedactionStrategy {
    /// Replace the whole match with a fixed mask token, e.g. `[REDACTED]`.
    FullMask,
    /// Keep the last few characters visible, e.g. `****1234`.
    PartialMask,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PIIEntity {
    pub pii_type: PIIType,
    pub matched_text: String,
    pub start: usize,
    pub end: usize,
    pub severity: PIISeverity,
    pub method: DetectionMethod,
}
