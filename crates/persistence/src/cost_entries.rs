//! `cost_entries` table repository

use crate::{PersistenceError, ScyllaClient};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::str::FromStr;
use voice_agent_core::{CostEntry, OptimizationTier, Service, UnitType};

fn service_str(s: Service) -> &'static str {
    match s {
        Service::Asr => "asr",
        Service::Llm => "llm",
        Service::Translate => "translate",
        Service::Tts => "tts",
    }
}

fn unit_type_str(u: UnitType) -> &'static str {
    match u {
        UnitType::Tokens => "tokens",
        UnitType::Characters => "characters",
        UnitType::AudioMs => "audio_ms",
    }
}

#[async_trait]
pub trait CostEntryStore: Send + Sync {
    async fn insert(&self, entry: &CostEntry) -> Result<(), PersistenceError>;
    async fn for_session(&self, session_id: uuid::Uuid) -> Result<Vec<CostEntry>, PersistenceError>;
}

#[derive(Clone)]
pub struct ScyllaCostEntryStore {
    client: ScyllaClient,
}

impl ScyllaCostEntryStore {
    pub fn new(client: ScyllaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CostEntryStore for ScyllaCostEntryStore {
    async fn insert(&self, entry: &CostEntry) -> Result<(), PersistenceError> {
        let query = format!(
            "INSERT INTO {}.cost_entries (
                session_id, created_at, turn_id, service, provider, operation,
                units, unit_type, cost, cached, optimization_tier, counterfactual_cost
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            self.client.keyspace()
        );

        self.client
            .session()
            .query_unpaged(
                query,
                (
                    entry.session_id,
                    entry.timestamp.timestamp_millis(),
                    entry.turn_id,
                    service_str(entry.service),
                    &entry.provider,
                    &entry.operation,
                    entry.units.to_string(),
                    unit_type_str(entry.unit_type),
                    entry.cost.to_string(),
                    entry.cached,
                    format!("{:?}", entry.optimization_tier),
                    entry.counterfactual_cost.map(|c| c.to_string()),
                ),
            )
            .await?;

        Ok(())
    }

    async fn for_session(&self, session_id: uuid::Uuid) -> Result<Vec<CostEntry>, PersistenceError> {
        let query = format!(
            "SELECT session_id, created_at, turn_id, service, provider, operation,
                    units, unit_type, cost, cached, optimization_tier, counterfactual_cost
             FROM {}.cost_entries WHERE session_id = ?",
            self.client.keyspace()
        );

        let result = self.client.session().query_unpaged(query, (session_id,)).await?;
        let Some(rows) = result.rows else { return Ok(Vec::new()) };

        rows.into_iter()
            .map(|row| {
                let (session_id, created_at, turn_id, service, provider, operation, units, unit_type, cost, cached, tier, counterfactual): (
                    uuid::Uuid,
                    i64,
                    uuid::Uuid,
                    String,
                    String,
                    String,
                    String,
                    String,
                    String,
                    bool,
                    String,
                    Option<String>,
                ) = row.into_typed().map_err(|e| PersistenceError::InvalidData(e.to_string()))?;

                Ok(CostEntry {
                    session_id,
                    turn_id,
                    service: parse_service(&service),
                    provider,
                    operation,
                    units: Decimal::from_str(&units).map_err(|e| PersistenceError::InvalidData(e.to_string()))?,
                    unit_type: parse_unit_type(&unit_type),
                    cost: Decimal::from_str(&cost).map_err(|e| PersistenceError::InvalidData(e.to_string()))?,
                    cached,
                    optimization_tier: parse_tier(&tier),
                    timestamp: chrono::DateTime::from_timestamp_millis(created_at).unwrap_or_else(chrono::Utc::now),
                    counterfactual_cost: counterfactual
                        .map(|c| Decimal::from_str(&c))
                        .transpose()
                        .map_err(|e| PersistenceError::InvalidData(e.to_string()))?,
                })
            })
            .collect()
    }
}

fn parse_service(s: &str) -> Service {
    match s {
        "asr" => Service::Asr,
        "translate" => Service::Translate,
        "tts" => Service::Tts,
        _ => Service::Llm,
    }
}

fn parse_unit_type(s: &str) -> UnitType {
    match s {
        "characters" => UnitType::Characters,
        "audio_ms" => UnitType::AudioMs,
        _ => UnitType::Tokens,
    }
}

fn parse_tier(s: &str) -> OptimizationTier {
    OptimizationTier::ALL.into_iter().find(|t| format!("{:?}", t) == s).unwrap_or_default()
}
