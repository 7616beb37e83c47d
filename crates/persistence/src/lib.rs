//! ScyllaDB persistence layer: one repository module per table in the
//! persisted-state layout (external interfaces, table list).

pub mod client;
pub mod cost_entries;
pub mod error;
pub mod guardrail_violations;
pub mod messages;
pub mod schema;
pub mod session_configurations;
pub mod session_metrics;
pub mod sessions;
pub mod system_prompts;
pub mod turns;
pub mod user_feedback;

pub use client::{ScyllaClient, ScyllaConfig};
pub use cost_entries::{CostEntryStore, ScyllaCostEntryStore};
pub use error::PersistenceError;
pub use guardrail_violations::{GuardrailViolationStore, ScyllaGuardrailViolationStore};
pub use messages::{MessageStore, ScyllaMessageStore};
pub use session_configurations::{ScyllaSessionConfigurationStore, SessionConfigurationStore};
pub use session_metrics::{ScyllaSessionMetricsStore, SessionMetricsStore};
pub use sessions::{ScyllaSessionStore, SessionStore};
pub use system_prompts::{ScyllaSystemPromptStore, SystemPromptStore};
pub use turns::{ScyllaTurnStore, TurnStore};
pub use user_feedback::{ScyllaUserFeedbackStore, UserFeedbackStore};

/// Connects to ScyllaDB, ensures the schema exists, and wires one repository
/// per table.
pub async fn init(config: ScyllaConfig) -> Result<PersistenceLayer, PersistenceError> {
    let client = ScyllaClient::connect(config).await?;
    client.ensure_schema().await?;

    Ok(PersistenceLayer {
        sessions: ScyllaSessionStore::new(client.clone()),
        turns: ScyllaTurnStore::new(client.clone()),
        messages: ScyllaMessageStore::new(client.clone()),
        guardrail_violations: ScyllaGuardrailViolationStore::new(client.clone()),
        cost_entries: ScyllaCostEntryStore::new(client.clone()),
        session_metrics: ScyllaSessionMetricsStore::new(client.clone()),
        user_feedback: ScyllaUserFeedbackStore::new(client.clone()),
        system_prompts: ScyllaSystemPromptStore::new(client.clone()),
        session_configurations: ScyllaSessionConfigurationStore::new(client),
    })
}

/// Combined persistence layer with one repository per table.
pub struct PersistenceLayer {
    pub sessions: ScyllaSessionStore,
    pub turns: ScyllaTurnStore,
    pub messages: ScyllaMessageStore,
    pub guardrail_violations: ScyllaGuardrailViolationStore,
    pub cost_entries: ScyllaCostEntryStore,
    pub session_metrics: ScyllaSessionMetricsStore,
    pub user_feedback: ScyllaUserFeedbackStore,
    pub system_prompts: ScyllaSystemPromptStore,
    pub session_configurations: ScyllaSessionConfigurationStore,
}
