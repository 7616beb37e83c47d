//! User feedback and system prompts (§0 supplemental entities, §6 RPCs)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingType {
    Thumbs,
    Stars,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserFeedback {
    pub session_id: Uuid,
    pub turn_id: Option<Uuid>,
    pub rating: i32,
    pub rating_type: RatingType,
    pub comment: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("rating {rating} invalid for rating_type {rating_type:?}")]
pub struct InvalidRating {
    pub rating: i32,
    pub rating_type: RatingType,
}

impl UserFeedback {
    /// Validates `rating ∈ {-1,+1}` for `thumbs` and `rating ∈ [1,5]` for
    /// `stars` (§6), returning the stable 400-equivalent validation error.
    pub fn validate_rating(rating: i32, rating_type: RatingType) -> Result<(), InvalidRating> {
        let valid = match rating_type {
            RatingType::Thumbs => rating == -1 || rating == 1,
            RatingType::Stars => (1..=5).contains(&rating),
        };
        if valid {
            Ok(())
        } else {
            Err(InvalidRating { rating, rating_type })
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemPrompt {
    pub id: Uuid,
    pub owner: String,
    pub title: String,
    pub body: String,
    pub is_builtin: bool,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("built-in system prompt templates cannot be deleted")]
pub struct BuiltinDeletionForbidden;

impl SystemPrompt {
    pub fn check_deletable(&self) -> Result<(), BuiltinDeletionForbidden> {
        if self.is_builtin {
            Err(BuiltinDeletionForbidden)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbs_accepts_only_plus_minus_one() {
        assert!(UserFeedback::validate_rating(1, RatingType::Thumbs).is_ok());
        assert!(UserFeedback::validate_rating(-1, RatingType::Thumbs).is_ok());
        assert!(UserFeedback::validate_rating(0, RatingType::Thumbs).is_err());
    }

    #[test]
    fn stars_accepts_one_through_five() {
        assert!(UserFeedback::validate_rating(1, RatingType::Stars).is_ok());
        assert!(UserFeedback::validate_rating(5, RatingType::Stars).is_ok());
        assert!(UserFeedback::validate_rating(0, RatingType::Stars).is_err());
        assert!(UserFeedback::validate_rating(6, RatingType::Stars).is_err());
    }

    #[test]
    fn builtin_prompts_cannot_be_deleted() {
        let prompt = SystemPrompt {
            id: Uuid::new_v4(),
            owner: "system".into(),
            title: "default".into(),
            body: "you are a helpful assistant".into(),
            is_builtin: true,
        };
        assert!(prompt.check_deletable().is_err());
    }
}
