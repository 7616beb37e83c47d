//! Cost attribution (§3 CostEntry, §4.6 cost recorder)

use crate::money::round_money;
use crate::session::OptimizationTier;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    Asr,
    Llm,
    Translate,
    Tts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    Tokens,
    Characters,
    AudioMs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEntry {
    pub session_id: Uuid,
    pub turn_id: Uuid,
    pub service: Service,
    pub provider: String,
    pub operation: String,
    pub units: Decimal,
    pub unit_type: UnitType,
    pub cost: Decimal,
    pub cached: bool,
    pub optimization_tier: OptimizationTier,
    pub timestamp: DateTime<Utc>,
    /// Counterfactual cost this entry would have incurred had it not been a
    /// cache hit, for "cache savings" reporting (§4.6). `None` on non-cached
    /// entries.
    pub counterfactual_cost: Option<Decimal>,
}

impl CostEntry {
    fn base(
        session_id: Uuid,
        turn_id: Uuid,
        service: Service,
        provider: impl Into<String>,
        operation: impl Into<String>,
        units: Decimal,
        unit_type: UnitType,
        cost: Decimal,
        tier: OptimizationTier,
    ) -> Self {
        Self {
            session_id,
            turn_id,
            service,
            provider: provider.into(),
            operation: operation.into(),
            units,
            unit_type,
            cost: round_money(cost),
            cached: false,
            optimization_tier: tier,
            timestamp: Utc::now(),
            counterfactual_cost: None,
        }
    }

    pub fn asr(session_id: Uuid, turn_id: Uuid, provider: impl Into<String>, duration_ms: u64, price_per_second: Decimal, tier: OptimizationTier) -> Self {
        let seconds = Decimal::from(duration_ms) / Decimal::from(1000);
        let cost = seconds * price_per_second;
        Self::base(session_id, turn_id, Service::Asr, provider, "transcribe", seconds, UnitType::AudioMs, cost, tier)
    }

    pub fn llm(
        session_id: Uuid,
        turn_id: Uuid,
        provider: impl Into<String>,
        input_tokens: u32,
        output_tokens: u32,
        price_per_input_token: Decimal,
        price_per_output_token: Decimal,
        tier: OptimizationTier,
    ) -> Self {
        let cost = Decimal::from(input_tokens) * price_per_input_token
            + Decimal::from(output_tokens) * price_per_output_token;
        let units = Decimal::from(input_tokens + output_tokens);
        Self::base(session_id, turn_id, Service::Llm, provider, "generate", units, UnitType::Tokens, cost, tier)
    }

    pub fn translate(session_id: Uuid, turn_id: Uuid, provider: impl Into<String>, char_count: u32, price_per_char: Decimal, tier: OptimizationTier) -> Self {
        let cost = Decimal::from(char_count) * price_per_char;
        Self::base(session_id, turn_id, Service::Translate, provider, "translate", Decimal::from(char_count), UnitType::Characters, cost, tier)
    }

    pub fn tts(session_id: Uuid, turn_id: Uuid, provider: impl Into<String>, char_count: u32, price_per_char: Decimal, tier: OptimizationTier) -> Self {
        let cost = Decimal::from(char_count) * price_per_char;
        Self::base(session_id, turn_id, Service::Tts, provider, "synthesize", Decimal::from(char_count), UnitType::Characters, cost, tier)
    }

    /// A cache-hit entry: `cost = 0` always (universal invariant, §8), with
    /// the cost the call would have incurred recorded as `counterfactual`.
    pub fn cache_hit(mut entry: Self) -> Self {
        entry.counterfactual_cost = Some(entry.cost);
        entry.cost = Decimal::ZERO;
        entry.cached = true;
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ids() -> (Uuid, Uuid) {
        (Uuid::new_v4(), Uuid::new_v4())
    }

    #[test]
    fn asr_cost_formula() {
        let (s, t) = ids();
        let entry = CostEntry::asr(s, t, "sarvam", 2000, dec!(0.01), OptimizationTier::Balanced);
        assert_eq!(entry.cost, round_money(dec!(0.02)));
    }

    #[test]
    fn llm_cost_formula() {
        let (s, t) = ids();
        let entry = CostEntry::llm(s, t, "openai", 100, 50, dec!(0.000003), dec!(0.000006), OptimizationTier::Balanced);
        let expected = dec!(100) * dec!(0.000003) + dec!(50) * dec!(0.000006);
        assert_eq!(entry.cost, round_money(expected));
    }

    #[test]
    fn cache_hit_entries_are_always_zero_cost() {
        let (s, t) = ids();
        let priced = CostEntry::llm(s, t, "openai", 100, 50, dec!(0.000003), dec!(0.000006), OptimizationTier::Balanced);
        let counterfactual = priced.cost;
        let cached = CostEntry::cache_hit(priced);
        assert!(cached.cached);
        assert_eq!(cached.cost, Decimal::ZERO);
        assert_eq!(cached.counterfactual_cost, Some(counterfactual));
    }
}
