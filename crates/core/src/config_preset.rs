//! Named session configuration presets (§3 SessionConfiguration, §6 CRUD)

use crate::language::Language;
use crate::session::OptimizationTier;
use crate::voice::VoiceTuning;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfiguration {
    pub id: Uuid,
    pub owner: String,
    pub name: String,
    pub llm_provider: String,
    pub llm_model: String,
    pub tts_provider: String,
    pub tts_voice_id: String,
    pub tts_tuning: VoiceTuning,
    pub optimization_tier: OptimizationTier,
    pub target_language: Language,
    pub rag_enabled: bool,
    pub system_prompt_id: Option<Uuid>,
    pub system_prompt_text: Option<String>,
    pub is_default: bool,
}

/// Enforce "at most one row per owner has `default = true`" (§3 invariant) by
/// returning the ids that must be demoted when `incoming` is written as the
/// new default for its owner, rather than performing the write itself — the
/// persistence layer calls this before issuing the update.
pub fn configurations_to_demote<'a>(
    existing: impl Iterator<Item = &'a SessionConfiguration>,
    incoming_owner: &str,
    incoming_id: Uuid,
) -> Vec<Uuid> {
    existing
        .filter(|c| c.owner == incoming_owner && c.is_default && c.id != incoming_id)
        .map(|c| c.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preset(owner: &str, is_default: bool) -> SessionConfiguration {
        SessionConfiguration {
            id: Uuid::new_v4(),
            owner: owner.to_string(),
            name: "preset".into(),
            llm_provider: "openai".into(),
            llm_model: "gpt-4o".into(),
            tts_provider: "sarvam".into(),
            tts_voice_id: "meera".into(),
            tts_tuning: VoiceTuning::default(),
            optimization_tier: OptimizationTier::Balanced,
            target_language: Language::English,
            rag_enabled: false,
            system_prompt_id: None,
            system_prompt_text: None,
            is_default,
        }
    }

    #[test]
    fn at_most_one_default_per_owner() {
        let existing_default = preset("alice", true);
        let new_default = preset("alice", true);
        let existing = vec![existing_default.clone()];

        let demoted = configurations_to_demote(existing.iter(), "alice", new_default.id);
        assert_eq!(demoted, vec![existing_default.id]);
    }

    #[test]
    fn different_owners_do_not_collide() {
        let bobs = preset("bob", true);
        let existing = vec![bobs];
        let new_default = preset("alice", true);
        let demoted = configurations_to_demote(existing.iter(), "alice", new_default.id);
        assert!(demoted.is_empty());
    }
}
