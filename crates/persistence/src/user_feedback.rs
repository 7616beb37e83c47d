//! `user_feedback` table repository

use crate::{PersistenceError, ScyllaClient};
use async_trait::async_trait;
use voice_agent_core::{RatingType, UserFeedback};

fn rating_type_str(t: RatingType) -> &'static str {
    match t {
        RatingType::Thumbs => "thumbs",
        RatingType::Stars => "stars",
    }
}

fn parse_rating_type(s: &str) -> RatingType {
    match s {
        "stars" => RatingType::Stars,
        _ => RatingType::Thumbs,
    }
}

#[async_trait]
pub trait UserFeedbackStore: Send + Sync {
    async fn insert(&self, feedback: &UserFeedback) -> Result<(), PersistenceError>;
    async fn for_session(&self, session_id: uuid::Uuid) -> Result<Vec<UserFeedback>, PersistenceError>;
}

#[derive(Clone)]
pub struct ScyllaUserFeedbackStore {
    client: ScyllaClient,
}

impl ScyllaUserFeedbackStore {
    pub fn new(client: ScyllaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserFeedbackStore for ScyllaUserFeedbackStore {
    async fn insert(&self, feedback: &UserFeedback) -> Result<(), PersistenceError> {
        let query = format!(
            "INSERT INTO {}.user_feedback (session_id, created_at, turn_id, rating, rating_type, comment)
             VALUES (?, ?, ?, ?, ?, ?)",
            self.client.keyspace()
        );

        self.client
            .session()
            .query_unpaged(
                query,
                (
                    feedback.session_id,
                    feedback.timestamp.timestamp_millis(),
                    feedback.turn_id,
                    feedback.rating,
                    rating_type_str(feedback.rating_type),
                    &feedback.comment,
                ),
            )
            .await?;

        Ok(())
    }

    async fn for_session(&self, session_id: uuid::Uuid) -> Result<Vec<UserFeedback>, PersistenceError> {
        let query = format!(
            "SELECT session_id, created_at, turn_id, rating, rating_type, comment
             FROM {}.user_feedback WHERE session_id = ?",
            self.client.keyspace()
        );

        let result = self.client.session().query_unpaged(query, (session_id,)).await?;
        let Some(rows) = result.rows else { return Ok(Vec::new()) };

        rows.into_iter()
            .map(|row| {
                let (session_id, created_at, turn_id, rating, rating_type, comment): (
                    uuid::Uuid,
                    i64,
                    Option<uuid::Uuid>,
                    i32,
                    String,
                    Option<String>,
                ) = row.into_typed().map_err(|e| PersistenceError::InvalidData(e.to_string()))?;

                Ok(UserFeedback {
                    session_id,
                    turn_id,
                    rating,
                    rating_type: parse_rating_type(&rating_type),
                    comment,
                    timestamp: chrono::DateTime::from_timestamp_millis(created_at).unwrap_or_else(chrono::Utc::now),
                })
            })
            .collect()
    }
}
