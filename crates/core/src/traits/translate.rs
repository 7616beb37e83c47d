//! Translation provider surface (§4.2)

use crate::error::Result;
use crate::language::Language;
use async_trait::async_trait;
use uuid::Uuid;

/// Fixed domain vocabularies that get swapped for stable opaque placeholders
/// before a translate call and restored verbatim after (§4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreserveDomain {
    Tech,
    Business,
    Medical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormalityBand {
    Formal,
    Conversational,
    Informal,
}

#[derive(Debug, Clone)]
pub struct TranslateConfig {
    /// 0-100; banded into formal (<34), conversational (34-66), informal (>66).
    pub formality_level: u8,
    pub code_mixing_enabled: bool,
    /// 0-100; share of English loanwords to retain when code-mixing is on.
    pub english_ratio: u8,
    pub preserve_domains: Vec<PreserveDomain>,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            formality_level: 50,
            code_mixing_enabled: true,
            english_ratio: 15,
            preserve_domains: Vec::new(),
        }
    }
}

impl TranslateConfig {
    pub fn formality_band(&self) -> FormalityBand {
        match self.formality_level {
            0..=33 => FormalityBand::Formal,
            34..=66 => FormalityBand::Conversational,
            _ => FormalityBand::Informal,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TranslateOutput {
    pub text: String,
    pub char_count: u32,
}

/// Implementations: one per translation vendor, each a thin `reqwest`
/// adapter over the vendor's HTTP API.
#[async_trait]
pub trait Translate: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
        config: &TranslateConfig,
        session_id: Uuid,
        turn_id: Uuid,
    ) -> Result<TranslateOutput>;

    fn provider_name(&self) -> &str;

    fn price_per_char(&self) -> rust_decimal::Decimal;

    /// Pairs this provider can translate between, for routing (§4.1/§4.2).
    fn supported_pairs(&self) -> &[(Language, Language)];

    fn supports_pair(&self, source: Language, target: Language) -> bool {
        self.supported_pairs().iter().any(|(s, t)| *s == source && *t == target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct MockTranslate {
        pairs: Vec<(Language, Language)>,
    }

    #[async_trait]
    impl Translate for MockTranslate {
        async fn translate(
            &self,
            text: &str,
            _source: Language,
            _target: Language,
            _config: &TranslateConfig,
            _session_id: Uuid,
            _turn_id: Uuid,
        ) -> Result<TranslateOutput> {
            Ok(TranslateOutput { text: text.to_string(), char_count: text.chars().count() as u32 })
        }

        fn provider_name(&self) -> &str {
            "mock"
        }

        fn price_per_char(&self) -> rust_decimal::Decimal {
            rust_decimal::Decimal::new(1, 5)
        }

        fn supported_pairs(&self) -> &[(Language, Language)] {
            &self.pairs
        }
    }

    #[test]
    fn supports_pair_checks_declared_pairs_only() {
        let translator = MockTranslate { pairs: vec![(Language::English, Language::Hindi)] };
        assert!(translator.supports_pair(Language::English, Language::Hindi));
        assert!(!translator.supports_pair(Language::Hindi, Language::Tamil));
    }

    #[test]
    fn formality_level_bands_correctly() {
        let mut config = TranslateConfig { formality_level: 10, ..Default::default() };
        assert_eq!(config.formality_band(), FormalityBand::Formal);
        config.formality_level = 50;
        assert_eq!(config.formality_band(), FormalityBand::Conversational);
        config.formality_level = 90;
        assert_eq!(config.formality_band(), FormalityBand::Informal);
    }
}
