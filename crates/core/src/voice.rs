//! Voice descriptors and TTS tuning knobs (§3 VoiceDescriptor, §4.2 TTS)

use crate::language::Language;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoiceGender {
    Male,
    Female,
    Neutral,
}

/// A voice a TTS provider can synthesize with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceDescriptor {
    pub provider: String,
    pub voice_id: String,
    pub display_name: String,
    pub supported_languages: Vec<Language>,
    pub gender: VoiceGender,
    pub is_custom: bool,
}

impl VoiceDescriptor {
    pub fn supports(&self, language: Language) -> bool {
        self.supported_languages.contains(&language)
    }
}

/// Prosody tuning knobs for TTS synthesis (§4.2).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceTuning {
    pub pitch: f32,
    pub pace: f32,
    pub loudness: f32,
}

impl Default for VoiceTuning {
    fn default() -> Self {
        Self {
            pitch: 0.0,
            pace: 1.0,
            loudness: 1.0,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VoiceTuningError {
    #[error("pitch {0} out of range [-0.75, 0.75]")]
    PitchOutOfRange(String),
    #[error("pace {0} out of range [0.3, 3.0]")]
    PaceOutOfRange(String),
    #[error("loudness {0} out of range [0, 3.0]")]
    LoudnessOutOfRange(String),
}

impl VoiceTuning {
    pub fn validate(&self) -> Result<(), VoiceTuningError> {
        if !(-0.75..=0.75).contains(&self.pitch) {
            return Err(VoiceTuningError::PitchOutOfRange(self.pitch.to_string()));
        }
        if !(0.3..=3.0).contains(&self.pace) {
            return Err(VoiceTuningError::PaceOutOfRange(self.pace.to_string()));
        }
        if !(0.0..=3.0).contains(&self.loudness) {
            return Err(VoiceTuningError::LoudnessOutOfRange(self.loudness.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tuning_is_valid() {
        assert!(VoiceTuning::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_pitch() {
        let tuning = VoiceTuning { pitch: 1.0, ..Default::default() };
        assert!(matches!(tuning.validate(), Err(VoiceTuningError::PitchOutOfRange(_))));
    }

    #[test]
    fn voice_descriptor_supports_language() {
        let voice = VoiceDescriptor {
            provider: "sarvam".into(),
            voice_id: "meera".into(),
            display_name: "Meera".into(),
            supported_languages: vec![Language::Hindi, Language::English],
            gender: VoiceGender::Female,
            is_custom: false,
        };
        assert!(voice.supports(Language::Hindi));
        assert!(!voice.supports(Language::Tamil));
    }
}
