//! Session identity and the optimization tier (§3 Session, §4.1)

use crate::language::Language;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named point on the quality-versus-latency curve (§4.1, glossary).
/// Ordered from highest quality to highest speed; `Ord` follows that order so
/// the optimization policy's monotonicity invariant can be asserted with
/// plain comparisons in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationTier {
    Quality,
    BalancedQuality,
    Balanced,
    BalancedSpeed,
    Speed,
}

impl OptimizationTier {
    pub const ALL: [OptimizationTier; 5] = [
        OptimizationTier::Quality,
        OptimizationTier::BalancedQuality,
        OptimizationTier::Balanced,
        OptimizationTier::BalancedSpeed,
        OptimizationTier::Speed,
    ];
}

impl Default for OptimizationTier {
    fn default() -> Self {
        OptimizationTier::Balanced
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: Uuid,
    pub optimization_tier: OptimizationTier,
    pub target_language: Language,
    pub created_at: DateTime<Utc>,
    pub last_turn_id: Option<Uuid>,
    pub configuration_id: Option<Uuid>,
    /// Whether a turn is currently active. Enforced as at most one by the
    /// session manager / interrupt fabric, not by this struct alone.
    pub active_turn_id: Option<Uuid>,
}

impl Session {
    pub fn new(optimization_tier: OptimizationTier, target_language: Language) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            optimization_tier,
            target_language,
            created_at: Utc::now(),
            last_turn_id: None,
            configuration_id: None,
            active_turn_id: None,
        }
    }

    pub fn has_active_turn(&self) -> bool {
        self.active_turn_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_ordering_is_quality_to_speed() {
        assert!(OptimizationTier::Quality < OptimizationTier::Speed);
        let mut tiers = OptimizationTier::ALL;
        tiers.sort();
        assert_eq!(tiers, OptimizationTier::ALL);
    }

    #[test]
    fn new_session_has_no_active_turn() {
        let session = Session::new(OptimizationTier::Balanced, Language::English);
        assert!(!session.has_active_turn());
    }
}
