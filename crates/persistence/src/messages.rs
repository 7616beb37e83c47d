//! `messages` table repository: the per-turn conversation history the prompt
//! builder reloads as `Message` history on the next turn.

use crate::{PersistenceError, ScyllaClient};
use async_trait::async_trait;
use chrono::Utc;
use voice_agent_core::{Message, Role};

fn role_str(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

fn role_from_str(s: &str) -> Role {
    match s {
        "system" => Role::System,
        "assistant" => Role::Assistant,
        _ => Role::User,
    }
}

#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn append(
        &self,
        session_id: uuid::Uuid,
        turn_id: uuid::Uuid,
        sequence: i32,
        message: &Message,
    ) -> Result<(), PersistenceError>;

    async fn history_for_turn(&self, turn_id: uuid::Uuid) -> Result<Vec<Message>, PersistenceError>;
}

#[derive(Clone)]
pub struct ScyllaMessageStore {
    client: ScyllaClient,
}

impl ScyllaMessageStore {
    pub fn new(client: ScyllaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MessageStore for ScyllaMessageStore {
    async fn append(
        &self,
        session_id: uuid::Uuid,
        turn_id: uuid::Uuid,
        sequence: i32,
        message: &Message,
    ) -> Result<(), PersistenceError> {
        let query = format!(
            "INSERT INTO {}.messages (turn_id, sequence, session_id, role, content, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            self.client.keyspace()
        );

        self.client
            .session()
            .query_unpaged(
                query,
                (turn_id, sequence, session_id, role_str(message.role), &message.content, Utc::now().timestamp_millis()),
            )
            .await?;

        Ok(())
    }

    async fn history_for_turn(&self, turn_id: uuid::Uuid) -> Result<Vec<Message>, PersistenceError> {
        let query = format!(
            "SELECT role, content FROM {}.messages WHERE turn_id = ? ORDER BY sequence ASC",
            self.client.keyspace()
        );

        let result = self.client.session().query_unpaged(query, (turn_id,)).await?;
        let Some(rows) = result.rows else { return Ok(Vec::new()) };

        rows.into_iter()
            .map(|row| {
                let (role, content): (String, String) =
                    row.into_typed().map_err(|e| PersistenceError::InvalidData(e.to_string()))?;
                Ok(Message { role: role_from_str(&role), content })
            })
            .collect()
    }
}
