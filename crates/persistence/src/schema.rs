//! ScyllaDB schema creation for the nine core tables (external interfaces,
//! persisted state layout). Money columns are `TEXT` holding a `Decimal`'s
//! canonical string form (`rust_decimal` serializes this way throughout the
//! workspace) rather than CQL `DECIMAL`, so no extra scylla feature flag is
//! needed for round-tripping.

use crate::error::PersistenceError;
use scylla::Session;

pub async fn create_keyspace(session: &Session, keyspace: &str, replication_factor: u8) -> Result<(), PersistenceError> {
    let query = format!(
        "CREATE KEYSPACE IF NOT EXISTS {} WITH replication = {{'class': 'SimpleStrategy', 'replication_factor': {}}}",
        keyspace, replication_factor
    );

    session
        .query_unpaged(query, &[])
        .await
        .map_err(|e| PersistenceError::SchemaError(format!("failed to create keyspace: {}", e)))?;

    Ok(())
}

async fn exec(session: &Session, keyspace: &str, table: &str, ddl: &str) -> Result<(), PersistenceError> {
    let query = format!(ddl, keyspace);
    session
        .query_unpaged(query, &[])
        .await
        .map_err(|e| PersistenceError::SchemaError(format!("failed to create {} table: {}", table, e)))?;
    Ok(())
}

pub async fn create_tables(session: &Session, keyspace: &str) -> Result<(), PersistenceError> {
    exec(
        session,
        keyspace,
        "sessions",
        r#"CREATE TABLE IF NOT EXISTS {}.sessions (
            session_id UUID,
            optimization_tier TEXT,
            target_language TEXT,
            created_at TIMESTAMP,
            last_turn_id UUID,
            configuration_id UUID,
            active_turn_id UUID,
            PRIMARY KEY (session_id)
        )"#,
    )
    .await?;

    exec(
        session,
        keyspace,
        "turns",
        r#"CREATE TABLE IF NOT EXISTS {}.turns (
            session_id UUID,
            created_at TIMESTAMP,
            turn_id UUID,
            finished_at TIMESTAMP,
            status TEXT,
            interrupt_reason TEXT,
            asr_ms BIGINT,
            llm_ms BIGINT,
            translate_ms BIGINT,
            tts_ms BIGINT,
            total_ms BIGINT,
            transcript TEXT,
            response_text TEXT,
            translated_text TEXT,
            audio_ref TEXT,
            guardrail_safe BOOLEAN,
            PRIMARY KEY ((session_id), created_at, turn_id)
        ) WITH CLUSTERING ORDER BY (created_at DESC, turn_id DESC)"#,
    )
    .await?;

    exec(
        session,
        keyspace,
        "messages",
        r#"CREATE TABLE IF NOT EXISTS {}.messages (
            turn_id UUID,
            sequence INT,
            session_id UUID,
            role TEXT,
            content TEXT,
            created_at TIMESTAMP,
            PRIMARY KEY ((turn_id), sequence)
        ) WITH CLUSTERING ORDER BY (sequence ASC)"#,
    )
    .await?;

    exec(
        session,
        keyspace,
        "guardrail_violations",
        r#"CREATE TABLE IF NOT EXISTS {}.guardrail_violations (
            session_id UUID,
            created_at TIMESTAMP,
            turn_id UUID,
            layer INT,
            rule_id TEXT,
            severity TEXT,
            redacted_input_sample TEXT,
            redacted_output_sample TEXT,
            safe_fallback_response TEXT,
            metadata_json TEXT,
            PRIMARY KEY ((session_id), created_at, turn_id)
        ) WITH CLUSTERING ORDER BY (created_at DESC, turn_id DESC)"#,
    )
    .await?;

    exec(
        session,
        keyspace,
        "cost_entries",
        r#"CREATE TABLE IF NOT EXISTS {}.cost_entries (
            session_id UUID,
            created_at TIMESTAMP,
            turn_id UUID,
            service TEXT,
            provider TEXT,
            operation TEXT,
            units TEXT,
            unit_type TEXT,
            cost TEXT,
            cached BOOLEAN,
            optimization_tier TEXT,
            counterfactual_cost TEXT,
            PRIMARY KEY ((session_id), created_at, turn_id, service)
        ) WITH CLUSTERING ORDER BY (created_at DESC, turn_id DESC, service ASC)"#,
    )
    .await?;

    exec(
        session,
        keyspace,
        "session_metrics",
        r#"CREATE TABLE IF NOT EXISTS {}.session_metrics (
            session_id UUID,
            successful_turns BIGINT,
            failed_turns BIGINT,
            interrupted_turns BIGINT,
            asr_latency_mean DOUBLE,
            asr_latency_count BIGINT,
            llm_latency_mean DOUBLE,
            llm_latency_count BIGINT,
            translate_latency_mean DOUBLE,
            translate_latency_count BIGINT,
            tts_latency_mean DOUBLE,
            tts_latency_count BIGINT,
            total_latency_mean DOUBLE,
            total_latency_count BIGINT,
            llm_exact_cache_hits BIGINT,
            llm_semantic_cache_hits BIGINT,
            tts_cache_hits BIGINT,
            tts_fallback_count BIGINT,
            guardrail_layer1_violations BIGINT,
            guardrail_layer3_violations BIGINT,
            total_cost TEXT,
            asr_confidence_mean DOUBLE,
            asr_confidence_count BIGINT,
            PRIMARY KEY (session_id)
        )"#,
    )
    .await?;

    exec(
        session,
        keyspace,
        "user_feedback",
        r#"CREATE TABLE IF NOT EXISTS {}.user_feedback (
            session_id UUID,
            created_at TIMESTAMP,
            turn_id UUID,
            rating INT,
            rating_type TEXT,
            comment TEXT,
            PRIMARY KEY ((session_id), created_at, turn_id)
        ) WITH CLUSTERING ORDER BY (created_at DESC, turn_id DESC)"#,
    )
    .await?;

    exec(
        session,
        keyspace,
        "system_prompts",
        r#"CREATE TABLE IF NOT EXISTS {}.system_prompts (
            owner TEXT,
            id UUID,
            title TEXT,
            body TEXT,
            is_builtin BOOLEAN,
            PRIMARY KEY ((owner), id)
        )"#,
    )
    .await?;

    exec(
        session,
        keyspace,
        "session_configurations",
        r#"CREATE TABLE IF NOT EXISTS {}.session_configurations (
            owner TEXT,
            id UUID,
            name TEXT,
            llm_provider TEXT,
            llm_model TEXT,
            tts_provider TEXT,
            tts_voice_id TEXT,
            tts_tuning_json TEXT,
            optimization_tier TEXT,
            target_language TEXT,
            rag_enabled BOOLEAN,
            system_prompt_id UUID,
            system_prompt_text TEXT,
            is_default BOOLEAN,
            PRIMARY KEY ((owner), id)
        )"#,
    )
    .await?;

    tracing::info!("all tables created successfully");
    Ok(())
}
