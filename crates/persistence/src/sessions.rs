//! `sessions` table repository

use crate::{PersistenceError, ScyllaClient};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use voice_agent_core::{Language, OptimizationTier, Session};

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn upsert(&self, session: &Session) -> Result<(), PersistenceError>;
    async fn get(&self, session_id: uuid::Uuid) -> Result<Option<Session>, PersistenceError>;
}

#[derive(Clone)]
pub struct ScyllaSessionStore {
    client: ScyllaClient,
}

impl ScyllaSessionStore {
    pub fn new(client: ScyllaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SessionStore for ScyllaSessionStore {
    async fn upsert(&self, session: &Session) -> Result<(), PersistenceError> {
        let query = format!(
            "INSERT INTO {}.sessions (
                session_id, optimization_tier, target_language, created_at,
                last_turn_id, configuration_id, active_turn_id
            ) VALUES (?, ?, ?, ?, ?, ?, ?)",
            self.client.keyspace()
        );

        self.client
            .session()
            .query_unpaged(
                query,
                (
                    session.session_id,
                    format!("{:?}", session.optimization_tier),
                    session.target_language.code(),
                    session.created_at.timestamp_millis(),
                    session.last_turn_id,
                    session.configuration_id,
                    session.active_turn_id,
                ),
            )
            .await?;

        tracing::debug!(session_id = %session.session_id, "session upserted");
        Ok(())
    }

    async fn get(&self, session_id: uuid::Uuid) -> Result<Option<Session>, PersistenceError> {
        let query = format!(
            "SELECT session_id, optimization_tier, target_language, created_at,
                    last_turn_id, configuration_id, active_turn_id
             FROM {}.sessions WHERE session_id = ?",
            self.client.keyspace()
        );

        let result = self.client.session().query_unpaged(query, (session_id,)).await?;

        let Some(rows) = result.rows else { return Ok(None) };
        let Some(row) = rows.into_iter().next() else { return Ok(None) };

        let (session_id, tier, language, created_at, last_turn_id, configuration_id, active_turn_id): (
            uuid::Uuid,
            String,
            String,
            i64,
            Option<uuid::Uuid>,
            Option<uuid::Uuid>,
            Option<uuid::Uuid>,
        ) = row.into_typed().map_err(|e| PersistenceError::InvalidData(e.to_string()))?;

        Ok(Some(Session {
            session_id,
            optimization_tier: parse_tier(&tier),
            target_language: Language::from_code(&language).unwrap_or(Language::FALLBACK),
            created_at: Utc.timestamp_millis_opt(created_at).single().unwrap_or_else(Utc::now),
            last_turn_id,
            configuration_id,
            active_turn_id,
        }))
    }
}

fn parse_tier(s: &str) -> OptimizationTier {
    OptimizationTier::ALL
        .into_iter()
        .find(|t| format!("{:?}", t) == s)
        .unwrap_or_default()
}
