//! Guardrail violation records and the tagged check-result variant
//! (§3 GuardrailViolation, §4.5, §9 "Runtime typing around guardrail results")

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuardrailLayer {
    PreInput = 1,
    InPrompt = 2,
    PostOutput = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardrailViolation {
    pub session_id: Uuid,
    pub turn_id: Uuid,
    pub layer: GuardrailLayer,
    pub rule_id: String,
    pub severity: Severity,
    pub redacted_input_sample: Option<String>,
    pub redacted_output_sample: Option<String>,
    pub safe_fallback_response: Option<String>,
    pub metadata: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl GuardrailViolation {
    pub fn new(session_id: Uuid, turn_id: Uuid, layer: GuardrailLayer, rule_id: impl Into<String>, severity: Severity) -> Self {
        Self {
            session_id,
            turn_id,
            layer,
            rule_id: rule_id.into(),
            severity,
            redacted_input_sample: None,
            redacted_output_sample: None,
            safe_fallback_response: None,
            metadata: serde_json::Value::Null,
            timestamp: Utc::now(),
        }
    }
}

/// Tagged variant for a guardrail pass, replacing runtime structural
/// inspection (§9). Downstream code branches on the variant, never probes
/// `violations.is_empty()` to decide pass/fail.
#[derive(Debug, Clone)]
pub enum CheckResult {
    Passed,
    Blocked {
        violations: Vec<GuardrailViolation>,
        safe_response: String,
    },
}

impl CheckResult {
    pub fn is_blocked(&self) -> bool {
        matches!(self, CheckResult::Blocked { .. })
    }

    pub fn violations(&self) -> &[GuardrailViolation] {
        match self {
            CheckResult::Passed => &[],
            CheckResult::Blocked { violations, .. } => violations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passed_has_no_violations() {
        assert!(CheckResult::Passed.violations().is_empty());
        assert!(!CheckResult::Passed.is_blocked());
    }

    #[test]
    fn blocked_carries_violations_and_safe_response() {
        let violation = GuardrailViolation::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            GuardrailLayer::PreInput,
            "blocked_keyword",
            Severity::High,
        );
        let result = CheckResult::Blocked {
            violations: vec![violation],
            safe_response: "I can't help with that.".to_string(),
        };
        assert!(result.is_blocked());
        assert_eq!(result.violations().len(), 1);
    }
}
