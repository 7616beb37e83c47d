//! PII pattern detection for guardrail layer 3 (post-LLM check).
//!
//! Generalizes the corpus's regex-based Indian PII detector (Aadhaar/PAN/
//! phone patterns) to the universal patterns post-LLM output needs: card
//! numbers, email addresses, phone numbers, and government ID numbers.

use once_cell::sync::Lazy;
use regex::Regex;
use voice_agent_core::{DetectionMethod, PIIEntity, PIISeverity, PIIType};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b").unwrap());

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\+?\d{1,3}[-\s]?)?\b([6-9]\d{9})\b").unwrap());

static CARD_NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:\d[-\s]?){13,19}\b").unwrap());

/// PAN-shaped government ID: 5 letters, 4 digits, 1 letter.
static GOVERNMENT_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z]{5}\d{4}[A-Z]\b").unwrap());

/// Scans `text` for PII and returns every match found, in order of appearance.
pub fn detect(text: &str) -> Vec<PIIEntity> {
    let mut entities = Vec::new();

    for m in EMAIL_PATTERN.find_iter(text) {
        entities.push(PIIEntity {
            pii_type: PIIType::Email,
            matched_text: m.as_str().to_string(),
            start: m.start(),
            end: m.end(),
            severity: PIISeverity::Medium,
            method: DetectionMethod::Regex,
        });
    }

    for m in PHONE_PATTERN.find_iter(text) {
        entities.push(PIIEntity {
            pii_type: PIIType::Phone,
            matched_text: m.as_str().to_string(),
            start: m.start(),
            end: m.end(),
            severity: PIISeverity::High,
            method: DetectionMethod::Regex,
        });
    }

    for m in CARD_NUMBER_PATTERN.find_iter(text) {
        let digit_count = m.as_str().chars().filter(|c| c.is_ascii_digit()).count();
        if digit_count >= 13 {
            entities.push(PIIEntity {
                pii_type: PIIType::CardNumber,
                matched_text: m.as_str().to_string(),
                start: m.start(),
                end: m.end(),
                severity: PIISeverity::Critical,
                method: DetectionMethod::Regex,
            });
        }
    }

    for m in GOVERNMENT_ID_PATTERN.find_iter(text) {
        entities.push(PIIEntity {
            pii_type: PIIType::GovernmentId,
            matched_text: m.as_str().to_string(),
            start: m.start(),
            end: m.end(),
            severity: PIISeverity::Critical,
            method: DetectionMethod::Regex,
        });
    }

    entities.sort_by_key(|e| e.start);
    entities
}

/// Redacts every detected entity in `text`, applying `strategy` per match.
pub fn redact(text: &str, strategy: voice_agent_core::RedactionStrategy) -> String {
    use voice_agent_core::RedactionStrategy;

    let entities = detect(text);
    let mut result = String::with_capacity(text.len());
    let mut cursor = 0;

    for entity in &entities {
        if entity.start < cursor {
            continue;
        }
        result.push_str(&text[cursor..entity.start]);
        let replacement = match strategy {
            RedactionStrategy::FullMask => "[REDACTED]".to_string(),
            RedactionStrategy::PartialMask => {
                let visible = 4.min(entity.matched_text.len());
                let tail = &entity.matched_text[entity.matched_text.len() - visible..];
                format!("{}{}", "*".repeat(entity.matched_text.len() - visible), tail)
            }
        };
        result.push_str(&replacement);
        cursor = entity.end;
    }
    result.push_str(&text[cursor..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_phone_number() {
        let entities = detect("call me back at 9876543210");
        assert!(entities.iter().any(|e| e.pii_type == PIIType::Phone));
    }

    #[test]
    fn detects_email() {
        let entities = detect("reach me at jane.doe@example.com please");
        assert!(entities.iter().any(|e| e.pii_type == PIIType::Email));
    }

    #[test]
    fn detects_government_id() {
        let entities = detect("my PAN is ABCDE1234F");
        assert!(entities.iter().any(|e| e.pii_type == PIIType::GovernmentId));
    }

    #[test]
    fn clean_text_has_no_entities() {
        assert!(detect("what's the weather like today?").is_empty());
    }

    #[test]
    fn redaction_masks_full_match() {
        let redacted = redact("call 9876543210 now", voice_agent_core::RedactionStrategy::FullMask);
        assert!(redacted.contains("[REDACTED]"));
        assert!(!redacted.contains("9876543210"));
    }
}
