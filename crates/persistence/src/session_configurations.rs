//! `session_configurations` table repository. Callers must call
//! `voice_agent_core::configurations_to_demote` and clear `is_default` on the
//! returned ids before writing a new default — this store performs no
//! cross-row invariant enforcement itself.

use crate::{PersistenceError, ScyllaClient};
use async_trait::async_trait;
use voice_agent_core::{Language, OptimizationTier, SessionConfiguration, VoiceTuning};

#[async_trait]
pub trait SessionConfigurationStore: Send + Sync {
    async fn upsert(&self, config: &SessionConfiguration) -> Result<(), PersistenceError>;
    async fn list_for_owner(&self, owner: &str) -> Result<Vec<SessionConfiguration>, PersistenceError>;
    async fn set_default_flag(&self, owner: &str, id: uuid::Uuid, is_default: bool) -> Result<(), PersistenceError>;
}

#[derive(Clone)]
pub struct ScyllaSessionConfigurationStore {
    client: ScyllaClient,
}

impl ScyllaSessionConfigurationStore {
    pub fn new(client: ScyllaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SessionConfigurationStore for ScyllaSessionConfigurationStore {
    async fn upsert(&self, config: &SessionConfiguration) -> Result<(), PersistenceError> {
        let tuning_json = serde_json::to_string(&config.tts_tuning)
            .map_err(|e| PersistenceError::InvalidData(e.to_string()))?;

        let query = format!(
            "INSERT INTO {}.session_configurations (
                owner, id, name, llm_provider, llm_model, tts_provider, tts_voice_id, tts_tuning_json,
                optimization_tier, target_language, rag_enabled, system_prompt_id, system_prompt_text, is_default
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            self.client.keyspace()
        );

        self.client
            .session()
            .query_unpaged(
                query,
                (
                    &config.owner,
                    config.id,
                    &config.name,
                    &config.llm_provider,
                    &config.llm_model,
                    &config.tts_provider,
                    &config.tts_voice_id,
                    tuning_json,
                    format!("{:?}", config.optimization_tier),
                    config.target_language.code(),
                    config.rag_enabled,
                    config.system_prompt_id,
                    &config.system_prompt_text,
                    config.is_default,
                ),
            )
            .await?;

        Ok(())
    }

    async fn list_for_owner(&self, owner: &str) -> Result<Vec<SessionConfiguration>, PersistenceError> {
        let query = format!(
            "SELECT owner, id, name, llm_provider, llm_model, tts_provider, tts_voice_id, tts_tuning_json,
                    optimization_tier, target_language, rag_enabled, system_prompt_id, system_prompt_text, is_default
             FROM {}.session_configurations WHERE owner = ?",
            self.client.keyspace()
        );

        let result = self.client.session().query_unpaged(query, (owner,)).await?;
        let Some(rows) = result.rows else { return Ok(Vec::new()) };

        rows.into_iter()
            .map(|row| {
                #[allow(clippy::type_complexity)]
                let (
                    owner,
                    id,
                    name,
                    llm_provider,
                    llm_model,
                    tts_provider,
                    tts_voice_id,
                    tuning_json,
                    tier,
                    language,
                    rag_enabled,
                    system_prompt_id,
                    system_prompt_text,
                    is_default,
                ): (
                    String,
                    uuid::Uuid,
                    String,
                    String,
                    String,
                    String,
                    String,
                    String,
                    String,
                    String,
                    bool,
                    Option<uuid::Uuid>,
                    Option<String>,
                    bool,
                ) = row.into_typed().map_err(|e| PersistenceError::InvalidData(e.to_string()))?;

                Ok(SessionConfiguration {
                    id,
                    owner,
                    name,
                    llm_provider,
                    llm_model,
                    tts_provider,
                    tts_voice_id,
                    tts_tuning: serde_json::from_str::<VoiceTuning>(&tuning_json).unwrap_or_default(),
                    optimization_tier: parse_tier(&tier),
                    target_language: Language::from_code(&language).unwrap_or(Language::FALLBACK),
                    rag_enabled,
                    system_prompt_id,
                    system_prompt_text,
                    is_default,
                })
            })
            .collect()
    }

    async fn set_default_flag(&self, owner: &str, id: uuid::Uuid, is_default: bool) -> Result<(), PersistenceError> {
        let query = format!(
            "UPDATE {}.session_configurations SET is_default = ? WHERE owner = ? AND id = ?",
            self.client.keyspace()
        );
        self.client.session().query_unpaged(query, (is_default, owner, id)).await?;
        Ok(())
    }
}

fn parse_tier(s: &str) -> OptimizationTier {
    OptimizationTier::ALL.into_iter().find(|t| format!("{:?}", t) == s).unwrap_or_default()
}
