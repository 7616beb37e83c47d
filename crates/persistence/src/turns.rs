//! `turns` table repository

use crate::{PersistenceError, ScyllaClient};
use async_trait::async_trait;
use chrono::TimeZone;
use voice_agent_core::{InterruptReason, StageLatencies, Turn, TurnStatus};

#[async_trait]
pub trait TurnStore: Send + Sync {
    async fn insert(&self, turn: &Turn) -> Result<(), PersistenceError>;
    async fn recent_for_session(&self, session_id: uuid::Uuid, limit: i32) -> Result<Vec<Turn>, PersistenceError>;
}

#[derive(Clone)]
pub struct ScyllaTurnStore {
    client: ScyllaClient,
}

impl ScyllaTurnStore {
    pub fn new(client: ScyllaClient) -> Self {
        Self { client }
    }
}

fn status_str(status: &TurnStatus) -> &'static str {
    match status {
        TurnStatus::Successful => "successful",
        TurnStatus::Failed => "failed",
        TurnStatus::Interrupted { .. } => "interrupted",
    }
}

fn interrupt_reason_str(status: &TurnStatus) -> Option<&'static str> {
    match status.interrupt_reason()? {
        InterruptReason::UserBargeIn => Some("user_barge_in"),
        InterruptReason::Timeout => Some("timeout"),
        InterruptReason::Error => Some("error"),
        InterruptReason::Manual => Some("manual"),
        InterruptReason::Replaced => Some("replaced"),
    }
}

#[async_trait]
impl TurnStore for ScyllaTurnStore {
    async fn insert(&self, turn: &Turn) -> Result<(), PersistenceError> {
        let query = format!(
            "INSERT INTO {}.turns (
                session_id, created_at, turn_id, finished_at, status, interrupt_reason,
                asr_ms, llm_ms, translate_ms, tts_ms, total_ms,
                transcript, response_text, translated_text, audio_ref, guardrail_safe
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            self.client.keyspace()
        );

        let (status, interrupt_reason) = match &turn.status {
            Some(status) => (Some(status_str(status)), interrupt_reason_str(status)),
            None => (None, None),
        };
        let StageLatencies { asr_ms, llm_ms, translate_ms, tts_ms, total_ms } = turn.latencies;

        self.client
            .session()
            .query_unpaged(
                query,
                (
                    turn.session_id,
                    turn.started_at.timestamp_millis(),
                    turn.turn_id,
                    turn.finished_at.map(|t| t.timestamp_millis()),
                    status,
                    interrupt_reason,
                    asr_ms.map(|v| v as i64),
                    llm_ms.map(|v| v as i64),
                    translate_ms.map(|v| v as i64),
                    tts_ms.map(|v| v as i64),
                    total_ms.map(|v| v as i64),
                    &turn.transcript,
                    &turn.response_text,
                    &turn.translated_text,
                    &turn.audio_ref,
                    turn.guardrail_safe,
                ),
            )
            .await?;

        Ok(())
    }

    async fn recent_for_session(&self, session_id: uuid::Uuid, limit: i32) -> Result<Vec<Turn>, PersistenceError> {
        let query = format!(
            "SELECT session_id, created_at, turn_id, transcript, response_text, translated_text, audio_ref, guardrail_safe
             FROM {}.turns WHERE session_id = ? LIMIT ?",
            self.client.keyspace()
        );

        let result = self.client.session().query_unpaged(query, (session_id, limit)).await?;
        let Some(rows) = result.rows else { return Ok(Vec::new()) };

        let mut turns = Vec::with_capacity(rows.len());
        for row in rows {
            let (session_id, started_at, turn_id, transcript, response_text, translated_text, audio_ref, guardrail_safe): (
                uuid::Uuid,
                i64,
                uuid::Uuid,
                Option<String>,
                Option<String>,
                Option<String>,
                Option<String>,
                bool,
            ) = row.into_typed().map_err(|e| PersistenceError::InvalidData(e.to_string()))?;

            let mut turn = Turn::new(session_id);
            turn.turn_id = turn_id;
            turn.started_at = chrono::Utc
                .timestamp_millis_opt(started_at)
                .single()
                .unwrap_or_else(chrono::Utc::now);
            turn.transcript = transcript;
            turn.response_text = response_text;
            turn.translated_text = translated_text;
            turn.audio_ref = audio_ref;
            turn.guardrail_safe = guardrail_safe;
            turns.push(turn);
        }

        Ok(turns)
    }
}
