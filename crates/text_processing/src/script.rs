//! Writing-system detection ahead of translation: picks the dominant
//! `voice_agent_core::Script` in a string by counting characters per Unicode
//! block.

use std::collections::HashMap;
use voice_agent_core::Script;

pub struct ScriptDetector;

impl ScriptDetector {
    /// Returns the most frequent script among the text's letters, or
    /// `Script::Other` if the text has no letters.
    pub fn detect(text: &str) -> Script {
        let mut counts: HashMap<Script, usize> = HashMap::new();

        for c in text.chars() {
            if let Some(script) = Self::script_of(c) {
                *counts.entry(script).or_insert(0) += 1;
            }
        }

        counts.into_iter().max_by_key(|(_, count)| *count).map(|(script, _)| script).unwrap_or(Script::Other)
    }

    fn script_of(c: char) -> Option<Script> {
        if !c.is_alphabetic() {
            return None;
        }
        let point = c as u32;
        Some(match point {
            0x0041..=0x005A | 0x0061..=0x007A | 0x00C0..=0x00FF => Script::Latin,
            0x0900..=0x097F => Script::Devanagari,
            0x0B80..=0x0BFF => Script::Tamil,
            0x0C00..=0x0C7F => Script::Telugu,
            0x0980..=0x09FF => Script::Bengali,
            0x0A80..=0x0AFF => Script::Gujarati,
            0x0C80..=0x0CFF => Script::Kannada,
            0x0D00..=0x0D7F => Script::Malayalam,
            0x0A00..=0x0A7F => Script::Gurmukhi,
            0x0B00..=0x0B7F => Script::Odia,
            0x0600..=0x06FF => Script::PersoArabic,
            _ => Script::Other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_latin() {
        assert_eq!(ScriptDetector::detect("hello there"), Script::Latin);
    }

    #[test]
    fn detects_devanagari() {
        assert_eq!(ScriptDetector::detect("नमस्ते दुनिया"), Script::Devanagari);
    }

    #[test]
    fn mixed_script_picks_majority() {
        assert_eq!(ScriptDetector::detect("hi नमस्ते कैसे हो आप"), Script::Devanagari);
    }

    #[test]
    fn digits_only_is_other() {
        assert_eq!(ScriptDetector::detect("12345"), Script::Other);
    }
}
