//! `guardrail_violations` table repository

use crate::{PersistenceError, ScyllaClient};
use async_trait::async_trait;
use voice_agent_core::{GuardrailLayer, GuardrailViolation, Severity};

fn severity_str(s: Severity) -> &'static str {
    match s {
        Severity::Low => "low",
        Severity::Medium => "medium",
        Severity::High => "high",
        Severity::Critical => "critical",
    }
}

#[async_trait]
pub trait GuardrailViolationStore: Send + Sync {
    async fn insert(&self, violation: &GuardrailViolation) -> Result<(), PersistenceError>;
    async fn recent_for_session(
        &self,
        session_id: uuid::Uuid,
        limit: i32,
    ) -> Result<Vec<GuardrailViolation>, PersistenceError>;
}

#[derive(Clone)]
pub struct ScyllaGuardrailViolationStore {
    client: ScyllaClient,
}

impl ScyllaGuardrailViolationStore {
    pub fn new(client: ScyllaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GuardrailViolationStore for ScyllaGuardrailViolationStore {
    async fn insert(&self, violation: &GuardrailViolation) -> Result<(), PersistenceError> {
        let query = format!(
            "INSERT INTO {}.guardrail_violations (
                session_id, created_at, turn_id, layer, rule_id, severity,
                redacted_input_sample, redacted_output_sample, safe_fallback_response, metadata_json
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            self.client.keyspace()
        );

        self.client
            .session()
            .query_unpaged(
                query,
                (
                    violation.session_id,
                    violation.timestamp.timestamp_millis(),
                    violation.turn_id,
                    violation.layer as i32,
                    &violation.rule_id,
                    severity_str(violation.severity),
                    &violation.redacted_input_sample,
                    &violation.redacted_output_sample,
                    &violation.safe_fallback_response,
                    violation.metadata.to_string(),
                ),
            )
            .await?;

        Ok(())
    }

    async fn recent_for_session(
        &self,
        session_id: uuid::Uuid,
        limit: i32,
    ) -> Result<Vec<GuardrailViolation>, PersistenceError> {
        let query = format!(
            "SELECT session_id, created_at, turn_id, layer, rule_id, severity,
                    redacted_input_sample, redacted_output_sample, safe_fallback_response, metadata_json
             FROM {}.guardrail_violations WHERE session_id = ? LIMIT ?",
            self.client.keyspace()
        );

        let result = self.client.session().query_unpaged(query, (session_id, limit)).await?;
        let Some(rows) = result.rows else { return Ok(Vec::new()) };

        rows.into_iter()
            .map(|row| {
                let (session_id, created_at, turn_id, layer, rule_id, severity, input_sample, output_sample, safe_fallback, metadata_json): (
                    uuid::Uuid,
                    i64,
                    uuid::Uuid,
                    i32,
                    String,
                    String,
                    Option<String>,
                    Option<String>,
                    Option<String>,
                    Option<String>,
                ) = row.into_typed().map_err(|e| PersistenceError::InvalidData(e.to_string()))?;

                Ok(GuardrailViolation {
                    session_id,
                    turn_id,
                    layer: parse_layer(layer),
                    rule_id,
                    severity: parse_severity(&severity),
                    redacted_input_sample: input_sample,
                    redacted_output_sample: output_sample,
                    safe_fallback_response: safe_fallback,
                    metadata: metadata_json
                        .and_then(|s| serde_json::from_str(&s).ok())
                        .unwrap_or(serde_json::Value::Null),
                    timestamp: chrono::DateTime::from_timestamp_millis(created_at).unwrap_or_else(chrono::Utc::now),
                })
            })
            .collect()
    }
}

fn parse_layer(layer: i32) -> GuardrailLayer {
    match layer {
        1 => GuardrailLayer::PreInput,
        2 => GuardrailLayer::InPrompt,
        _ => GuardrailLayer::PostOutput,
    }
}

fn parse_severity(s: &str) -> Severity {
    match s {
        "low" => Severity::Low,
        "medium" => Severity::Medium,
        "critical" => Severity::Critical,
        _ => Severity::High,
    }
}
