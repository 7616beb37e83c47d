//! Voice registry (§4.3): deterministic language → provider-preference voice
//! lookup.

use once_cell::sync::Lazy;
use voice_agent_core::{Language, VoiceDescriptor, VoiceGender};

/// Single documented fallback voice used when no provider serves the
/// requested (provider, language) pair at all (§4.3 step 4).
pub const FALLBACK_LANGUAGE: Language = Language::English;

static CATALOG: Lazy<Vec<VoiceDescriptor>> = Lazy::new(|| {
    vec![
        VoiceDescriptor {
            provider: "sarvam".into(),
            voice_id: "meera".into(),
            display_name: "Meera".into(),
            supported_languages: vec![
                Language::Hindi,
                Language::Tamil,
                Language::Telugu,
                Language::Bengali,
                Language::Marathi,
                Language::Gujarati,
                Language::Kannada,
                Language::Malayalam,
                Language::Punjabi,
                Language::Odia,
            ],
            gender: VoiceGender::Female,
            is_custom: false,
        },
        VoiceDescriptor {
            provider: "sarvam".into(),
            voice_id: "arvind".into(),
            display_name: "Arvind".into(),
            supported_languages: vec![
                Language::Hindi,
                Language::Tamil,
                Language::Telugu,
                Language::Bengali,
                Language::Marathi,
                Language::Gujarati,
                Language::Kannada,
                Language::Malayalam,
            ],
            gender: VoiceGender::Male,
            is_custom: false,
        },
        VoiceDescriptor {
            provider: "elevenlabs".into(),
            voice_id: "rachel".into(),
            display_name: "Rachel".into(),
            supported_languages: vec![Language::English],
            gender: VoiceGender::Female,
            is_custom: false,
        },
        VoiceDescriptor {
            provider: "elevenlabs".into(),
            voice_id: "adam".into(),
            display_name: "Adam".into(),
            supported_languages: vec![Language::English],
            gender: VoiceGender::Male,
            is_custom: false,
        },
    ]
});

/// What step of the §4.3 lookup policy produced the result, for logging
/// language downgrades.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceResolutionStep {
    ExactMatch,
    ProviderLanguageDefault,
    FallbackProviderLanguageDefault,
    FallbackLanguageDefault,
}

pub struct VoiceRegistry;

impl VoiceRegistry {
    /// Resolve a voice per the ordered §4.3 lookup policy.
    pub fn resolve(
        requested_provider: &str,
        requested_voice_id: Option<&str>,
        language: Language,
        fallback_provider: &str,
    ) -> Option<(VoiceDescriptor, VoiceResolutionStep)> {
        if let Some(voice_id) = requested_voice_id {
            if let Some(voice) = CATALOG.iter().find(|v| {
                v.provider == requested_provider && v.voice_id == voice_id && v.supports(language)
            }) {
                return Some((voice.clone(), VoiceResolutionStep::ExactMatch));
            }
        }

        if let Some(voice) =
            CATALOG.iter().find(|v| v.provider == requested_provider && v.supports(language))
        {
            return Some((voice.clone(), VoiceResolutionStep::ProviderLanguageDefault));
        }

        if let Some(voice) =
            CATALOG.iter().find(|v| v.provider == fallback_provider && v.supports(language))
        {
            return Some((voice.clone(), VoiceResolutionStep::FallbackProviderLanguageDefault));
        }

        CATALOG
            .iter()
            .find(|v| v.provider == fallback_provider && v.supports(FALLBACK_LANGUAGE))
            .map(|v| (v.clone(), VoiceResolutionStep::FallbackLanguageDefault))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_wins_when_requested() {
        let (voice, step) =
            VoiceRegistry::resolve("sarvam", Some("meera"), Language::Hindi, "sarvam").unwrap();
        assert_eq!(voice.voice_id, "meera");
        assert_eq!(step, VoiceResolutionStep::ExactMatch);
    }

    #[test]
    fn falls_back_to_provider_default_for_unrequested_voice() {
        let (voice, step) = VoiceRegistry::resolve("sarvam", None, Language::Tamil, "sarvam").unwrap();
        assert_eq!(voice.provider, "sarvam");
        assert_eq!(step, VoiceResolutionStep::ProviderLanguageDefault);
    }

    #[test]
    fn falls_back_to_fallback_provider_when_requested_unsupported() {
        let (voice, step) =
            VoiceRegistry::resolve("elevenlabs", None, Language::Tamil, "sarvam").unwrap();
        assert_eq!(voice.provider, "sarvam");
        assert_eq!(step, VoiceResolutionStep::FallbackProviderLanguageDefault);
    }

    #[test]
    fn falls_back_to_fallback_language_when_nothing_supports_requested_language() {
        let (voice, step) =
            VoiceRegistry::resolve("elevenlabs", None, Language::Sanskrit, "elevenlabs").unwrap();
        assert_eq!(voice.provider, "elevenlabs");
        assert_eq!(step, VoiceResolutionStep::FallbackLanguageDefault);
    }
}
