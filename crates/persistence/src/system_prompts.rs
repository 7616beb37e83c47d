//! `system_prompts` table repository. Delete is forbidden for built-in
//! templates, enforced by `SystemPrompt::check_deletable` before the caller
//! issues the delete.

use crate::{PersistenceError, ScyllaClient};
use async_trait::async_trait;
use voice_agent_core::SystemPrompt;

#[async_trait]
pub trait SystemPromptStore: Send + Sync {
    async fn upsert(&self, prompt: &SystemPrompt) -> Result<(), PersistenceError>;
    async fn list_for_owner(&self, owner: &str) -> Result<Vec<SystemPrompt>, PersistenceError>;
    async fn delete(&self, owner: &str, id: uuid::Uuid) -> Result<(), PersistenceError>;
}

#[derive(Clone)]
pub struct ScyllaSystemPromptStore {
    client: ScyllaClient,
}

impl ScyllaSystemPromptStore {
    pub fn new(client: ScyllaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SystemPromptStore for ScyllaSystemPromptStore {
    async fn upsert(&self, prompt: &SystemPrompt) -> Result<(), PersistenceError> {
        let query = format!(
            "INSERT INTO {}.system_prompts (owner, id, title, body, is_builtin) VALUES (?, ?, ?, ?, ?)",
            self.client.keyspace()
        );

        self.client
            .session()
            .query_unpaged(query, (&prompt.owner, prompt.id, &prompt.title, &prompt.body, prompt.is_builtin))
            .await?;

        Ok(())
    }

    async fn list_for_owner(&self, owner: &str) -> Result<Vec<SystemPrompt>, PersistenceError> {
        let query = format!(
            "SELECT id, owner, title, body, is_builtin FROM {}.system_prompts WHERE owner = ?",
            self.client.keyspace()
        );

        let result = self.client.session().query_unpaged(query, (owner,)).await?;
        let Some(rows) = result.rows else { return Ok(Vec::new()) };

        rows.into_iter()
            .map(|row| {
                let (id, owner, title, body, is_builtin): (uuid::Uuid, String, String, String, bool) =
                    row.into_typed().map_err(|e| PersistenceError::InvalidData(e.to_string()))?;
                Ok(SystemPrompt { id, owner, title, body, is_builtin })
            })
            .collect()
    }

    async fn delete(&self, owner: &str, id: uuid::Uuid) -> Result<(), PersistenceError> {
        let query =
            format!("DELETE FROM {}.system_prompts WHERE owner = ? AND id = ?", self.client.keyspace());
        self.client.session().query_unpaged(query, (owner, id)).await?;
        Ok(())
    }
}
