//! Interrupt fabric (§4.7)
//!
//! Generalizes the teacher's per-session `broadcast::Sender<()>` shutdown
//! signal (`agent::voice_session::VoiceSession`) to a per-(session, turn)
//! cancellation token with a cleanup-callback registry, as required by the
//! orchestrator's per-stage checkpoints.

use crate::turn::InterruptReason;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

pub type CleanupFn = Box<dyn FnOnce() + Send + 'static>;

/// A handle a pipeline stage holds for the duration of one turn. Cheap to
/// clone; all clones observe the same cancellation state.
#[derive(Clone)]
pub struct CancellationToken {
    session_id: Uuid,
    turn_id: Uuid,
    cancelled: Arc<AtomicBool>,
    reason: Arc<Mutex<Option<InterruptReason>>>,
    cleanups: Arc<Mutex<Vec<CleanupFn>>>,
}

/// Sentinel propagated by stage signatures when a checkpoint observes
/// cancellation (§9 "Exceptions-as-control-flow"). Not an error: callers
/// match on it explicitly rather than treating it as a failure to log.
#[derive(Debug, Clone, Copy)]
pub struct Cancelled(pub InterruptReason);

impl CancellationToken {
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn turn_id(&self) -> Uuid {
        self.turn_id
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// A stage calls this at every checkpoint (§4.7, §5): before the call, on
    /// every retry iteration, after the call returns, after any guardrail
    /// check.
    pub fn checkpoint(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            let reason = self.reason.lock().unwrap_or(InterruptReason::Manual);
            Err(Cancelled(reason))
        } else {
            Ok(())
        }
    }

    /// Register a cleanup to run on cancel or normal turn finish. Cleanups
    /// must be idempotent and fast (§4.7); this fabric does not enforce
    /// timing, only ordering (LIFO, most-recently-registered first).
    pub fn register_cleanup(&self, cleanup: impl FnOnce() + Send + 'static) {
        self.cleanups.lock().push(Box::new(cleanup));
    }

    fn cancel(&self, reason: InterruptReason) {
        // Cancellation is edge-triggered and idempotent (§5): only the first
        // caller's reason sticks, later callers are no-ops.
        if self
            .cancelled
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            *self.reason.lock() = Some(reason);
            self.run_cleanups();
        }
    }

    fn run_cleanups(&self) {
        let mut cleanups = self.cleanups.lock();
        for cleanup in cleanups.drain(..).rev() {
            cleanup();
        }
    }
}

/// Process-wide registry of active turn tokens, one entry per (session,
/// turn). Constructed once at startup and shared via `Arc` (§9 "Global
/// singletons... model as long-lived handles... injected into the
/// orchestrator").
#[derive(Default)]
pub struct InterruptFabric {
    tokens: DashMap<Uuid, CancellationToken>,
    active_turn_by_session: DashMap<Uuid, Uuid>,
}

impl InterruptFabric {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new turn. If the session already has an active turn, it is
    /// cancelled first with `reason = replaced` (§4.7 cancellation cascade).
    pub fn start_turn(&self, session_id: Uuid, turn_id: Uuid) -> CancellationToken {
        if let Some(existing_turn) = self.active_turn_by_session.get(&session_id).map(|e| *e.value()) {
            if existing_turn != turn_id {
                self.cancel(session_id, existing_turn, InterruptReason::Replaced);
            }
        }

        let token = CancellationToken {
            session_id,
            turn_id,
            cancelled: Arc::new(AtomicBool::new(false)),
            reason: Arc::new(Mutex::new(None)),
            cleanups: Arc::new(Mutex::new(Vec::new())),
        };
        self.tokens.insert(turn_id, token.clone());
        self.active_turn_by_session.insert(session_id, turn_id);
        token
    }

    pub fn is_cancelled(&self, turn_id: Uuid) -> bool {
        self.tokens.get(&turn_id).map(|t| t.is_cancelled()).unwrap_or(false)
    }

    pub fn cancel(&self, session_id: Uuid, turn_id: Uuid, reason: InterruptReason) {
        if let Some(token) = self.tokens.get(&turn_id) {
            token.cancel(reason);
        }
        self.clear_active_if_matches(session_id, turn_id);
    }

    pub fn register_cleanup(&self, turn_id: Uuid, cleanup: impl FnOnce() + Send + 'static) {
        if let Some(token) = self.tokens.get(&turn_id) {
            token.register_cleanup(cleanup);
        }
    }

    /// Normal end-of-turn: runs any remaining cleanups and frees the slot.
    pub fn finish_turn(&self, turn_id: Uuid) {
        if let Some((_, token)) = self.tokens.remove(&turn_id) {
            token.run_cleanups();
            self.clear_active_if_matches(token.session_id, turn_id);
        }
    }

    fn clear_active_if_matches(&self, session_id: Uuid, turn_id: Uuid) {
        if let Some(active) = self.active_turn_by_session.get(&session_id).map(|e| *e.value()) {
            if active == turn_id {
                self.active_turn_by_session.remove(&session_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn cancel_is_idempotent_and_runs_cleanup_once() {
        let fabric = InterruptFabric::new();
        let session_id = Uuid::new_v4();
        let turn_id = Uuid::new_v4();
        let token = fabric.start_turn(session_id, turn_id);

        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();
        token.register_cleanup(move || {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        fabric.cancel(session_id, turn_id, InterruptReason::UserBargeIn);
        fabric.cancel(session_id, turn_id, InterruptReason::Timeout);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(token.checkpoint().is_err());
    }

    #[test]
    fn new_turn_replaces_active_turn_for_session() {
        let fabric = InterruptFabric::new();
        let session_id = Uuid::new_v4();
        let turn1 = Uuid::new_v4();
        let turn2 = Uuid::new_v4();

        let token1 = fabric.start_turn(session_id, turn1);
        assert!(token1.checkpoint().is_ok());

        let _token2 = fabric.start_turn(session_id, turn2);
        assert!(token1.checkpoint().is_err());
    }

    #[test]
    fn finish_turn_runs_cleanups() {
        let fabric = InterruptFabric::new();
        let session_id = Uuid::new_v4();
        let turn_id = Uuid::new_v4();
        let token = fabric.start_turn(session_id, turn_id);

        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();
        token.register_cleanup(move || {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        fabric.finish_turn(turn_id);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
