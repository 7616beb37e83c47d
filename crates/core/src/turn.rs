//! Turn lifecycle types (§3 Turn, §4.7 state machine)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reason a turn was interrupted, set only when `status` is `Interrupted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterruptReason {
    UserBargeIn,
    Timeout,
    Error,
    Manual,
    /// A newer turn for the same session pre-empted this one (§4.7).
    Replaced,
}

/// Terminal status of a turn. The `Interrupted` variant carries its own
/// reason so "exactly one terminal status, reason set iff interrupted" is
/// enforced by the type rather than by two independently-settable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TurnStatus {
    Successful,
    Failed,
    Interrupted { reason: InterruptReason },
}

impl TurnStatus {
    pub fn is_terminal(&self) -> bool {
        true
    }

    pub fn interrupt_reason(&self) -> Option<InterruptReason> {
        match self {
            TurnStatus::Interrupted { reason } => Some(*reason),
            _ => None,
        }
    }
}

/// Per-stage wall-clock latency, milliseconds. Any stage that was skipped is
/// `None`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StageLatencies {
    pub asr_ms: Option<u64>,
    pub llm_ms: Option<u64>,
    pub translate_ms: Option<u64>,
    pub tts_ms: Option<u64>,
    pub total_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub turn_id: Uuid,
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub status: Option<TurnStatus>,
    pub latencies: StageLatencies,
    pub transcript: Option<String>,
    pub response_text: Option<String>,
    pub translated_text: Option<String>,
    pub audio_ref: Option<String>,
    pub guardrail_safe: bool,
}

impl Turn {
    pub fn new(session_id: Uuid) -> Self {
        Self {
            turn_id: Uuid::new_v4(),
            session_id,
            started_at: Utc::now(),
            finished_at: None,
            status: None,
            latencies: StageLatencies::default(),
            transcript: None,
            response_text: None,
            translated_text: None,
            audio_ref: None,
            guardrail_safe: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_none()
    }

    /// Finalize the turn with a terminal status. Idempotent in the sense that
    /// calling it twice keeps the first terminal status (terminal states are
    /// absorbing, §4.7).
    pub fn finish(&mut self, status: TurnStatus) {
        if self.status.is_some() {
            return;
        }
        self.finished_at = Some(Utc::now());
        self.status = Some(status);
    }

    /// `finish_time >= start_time` invariant check, used in tests and
    /// assertions rather than enforced structurally (timestamps come from the
    /// system clock).
    pub fn finished_after_started(&self) -> bool {
        match self.finished_at {
            Some(f) => f >= self.started_at,
            None => true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResult {
    pub turn_id: Uuid,
    pub transcript: Option<String>,
    pub response_text: String,
    pub translated_text: Option<String>,
    pub audio_ref: Option<String>,
    pub latencies: StageLatencies,
    pub guardrail_safe: bool,
    pub status: TurnStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_turn_is_active_with_no_terminal_status() {
        let turn = Turn::new(Uuid::new_v4());
        assert!(turn.is_active());
        assert!(turn.status.is_none());
    }

    #[test]
    fn finish_is_absorbing() {
        let mut turn = Turn::new(Uuid::new_v4());
        turn.finish(TurnStatus::Successful);
        turn.finish(TurnStatus::Failed);
        assert_eq!(turn.status, Some(TurnStatus::Successful));
    }

    #[test]
    fn interrupted_carries_reason() {
        let mut turn = Turn::new(Uuid::new_v4());
        turn.finish(TurnStatus::Interrupted { reason: InterruptReason::UserBargeIn });
        assert_eq!(
            turn.status.unwrap().interrupt_reason(),
            Some(InterruptReason::UserBargeIn)
        );
    }

    #[test]
    fn finish_time_not_before_start_time() {
        let mut turn = Turn::new(Uuid::new_v4());
        assert!(turn.finished_after_started());
        turn.finish(TurnStatus::Successful);
        assert!(turn.finished_after_started());
    }
}
