//! Language codes and script detection types

use serde::{Deserialize, Serialize};
use std::fmt;

/// A supported spoken/written language: English plus the 22 scheduled
/// Indian languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    English,
    Hindi,
    Tamil,
    Telugu,
    Bengali,
    Marathi,
    Gujarati,
    Kannada,
    Malayalam,
    Punjabi,
    Odia,
    Assamese,
    Urdu,
    Kashmiri,
    Sindhi,
    Konkani,
    Dogri,
    Bodo,
    Maithili,
    Santali,
    Nepali,
    Manipuri,
    Sanskrit,
}

impl Language {
    /// BCP-47-ish code used on the wire and in provider requests.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en-IN",
            Language::Hindi => "hi-IN",
            Language::Tamil => "ta-IN",
            Language::Telugu => "te-IN",
            Language::Bengali => "bn-IN",
            Language::Marathi => "mr-IN",
            Language::Gujarati => "gu-IN",
            Language::Kannada => "kn-IN",
            Language::Malayalam => "ml-IN",
            Language::Punjabi => "pa-IN",
            Language::Odia => "or-IN",
            Language::Assamese => "as-IN",
            Language::Urdu => "ur-IN",
            Language::Kashmiri => "ks-IN",
            Language::Sindhi => "sd-IN",
            Language::Konkani => "kok-IN",
            Language::Dogri => "doi-IN",
            Language::Bodo => "brx-IN",
            Language::Maithili => "mai-IN",
            Language::Santali => "sat-IN",
            Language::Nepali => "ne-IN",
            Language::Manipuri => "mni-IN",
            Language::Sanskrit => "sa-IN",
        }
    }

    /// The fallback language any provider is assumed to support, used by the
    /// voice registry's final downgrade step (§4.3).
    pub const FALLBACK: Language = Language::English;

    pub fn from_code(code: &str) -> Option<Self> {
        let base = code.split('-').next().unwrap_or(code).to_ascii_lowercase();
        Some(match base.as_str() {
            "en" => Language::English,
            "hi" => Language::Hindi,
            "ta" => Language::Tamil,
            "te" => Language::Telugu,
            "bn" => Language::Bengali,
            "mr" => Language::Marathi,
            "gu" => Language::Gujarati,
            "kn" => Language::Kannada,
            "ml" => Language::Malayalam,
            "pa" => Language::Punjabi,
            "or" => Language::Odia,
            "as" => Language::Assamese,
            "ur" => Language::Urdu,
            "ks" => Language::Kashmiri,
            "sd" => Language::Sindhi,
            "kok" => Language::Konkani,
            "doi" => Language::Dogri,
            "brx" => Language::Bodo,
            "mai" => Language::Maithili,
            "sat" => Language::Santali,
            "ne" => Language::Nepali,
            "mni" => Language::Manipuri,
            "sa" => Language::Sanskrit,
            _ => return None,
        })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Writing system, used by script-detection heuristics ahead of translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Script {
    Latin,
    Devanagari,
    Tamil,
    Telugu,
    Bengali,
    Gujarati,
    Kannada,
    Malayalam,
    Gurmukhi,
    Odia,
    PersoArabic,
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_code() {
        for lang in [Language::Hindi, Language::English, Language::Sanskrit, Language::Urdu] {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
    }

    #[test]
    fn unknown_code_is_none() {
        assert_eq!(Language::from_code("xx-XX"), None);
    }
}
