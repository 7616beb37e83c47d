//! Cost recorder (§4.6): dual in-memory + durable cost tracking, with a
//! running per-session total that tolerates entries arriving out of order
//! (concurrent turns can finish and report cost in any sequence) and
//! durable writes serialized per session so they land in one order even
//! though sessions are recorded fully concurrently (§5).
//!
//! Grounded on the persistence crate's one-repository-per-table shape;
//! `CostRecorder` is a thin coordinator in front of `CostEntryStore`.

use dashmap::DashMap;
use parking_lot::Mutex as SyncMutex;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;
use uuid::Uuid;
use voice_agent_persistence::CostEntryStore;

use crate::PipelineError;

pub struct CostRecorder {
    store: Arc<dyn CostEntryStore>,
    session_totals: DashMap<Uuid, SyncMutex<Decimal>>,
    session_write_locks: DashMap<Uuid, Arc<AsyncMutex<()>>>,
}

impl CostRecorder {
    pub fn new(store: Arc<dyn CostEntryStore>) -> Self {
        Self { store, session_totals: DashMap::new(), session_write_locks: DashMap::new() }
    }

    /// Updates the in-memory rollup immediately, then writes durably. The
    /// in-memory total is visible to callers before the durable write lands,
    /// and is correct regardless of the arrival order of concurrent turns'
    /// entries since it only ever adds.
    pub async fn record(&self, entry: voice_agent_core::CostEntry) -> Result<(), PipelineError> {
        let session_id = entry.session_id;

        *self
            .session_totals
            .entry(session_id)
            .or_insert_with(|| SyncMutex::new(Decimal::ZERO))
            .lock() += entry.cost;

        let lock = self
            .session_write_locks
            .entry(session_id)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        self.store.insert(&entry).await.map_err(PipelineError::Persistence)
    }

    /// Current in-memory rollup for a session, `Decimal::ZERO` if nothing
    /// has been recorded yet.
    pub fn session_cost(&self, session_id: Uuid) -> Decimal {
        self.session_totals.get(&session_id).map(|total| *total.lock()).unwrap_or(Decimal::ZERO)
    }

    /// Recomputes a session's total straight from durable storage, for
    /// reconciliation against the in-memory rollup (e.g. after a restart).
    pub async fn durable_session_cost(&self, session_id: Uuid) -> Result<Decimal, PipelineError> {
        let entries = self.store.for_session(session_id).await.map_err(PipelineError::Persistence)?;
        Ok(entries.iter().map(|e| e.cost).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use voice_agent_core::{CostEntry, OptimizationTier};
    use voice_agent_persistence::PersistenceError;

    #[derive(Default)]
    struct FakeCostStore {
        inserts: AtomicUsize,
    }

    #[async_trait]
    impl CostEntryStore for FakeCostStore {
        async fn insert(&self, _entry: &CostEntry) -> Result<(), PersistenceError> {
            self.inserts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn for_session(&self, _session_id: Uuid) -> Result<Vec<CostEntry>, PersistenceError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn record_accumulates_in_memory_total_regardless_of_order() {
        let store: Arc<FakeCostStore> = Arc::new(FakeCostStore::default());
        let recorder = CostRecorder::new(store);
        let session_id = Uuid::new_v4();

        let second = CostEntry::llm(session_id, Uuid::new_v4(), "openai", 10, 10, dec!(0.01), dec!(0.01), OptimizationTier::Balanced);
        let first = CostEntry::asr(session_id, Uuid::new_v4(), "sarvam", 1000, dec!(0.01), OptimizationTier::Balanced);

        recorder.record(second).await.unwrap();
        recorder.record(first).await.unwrap();

        assert!(recorder.session_cost(session_id) > Decimal::ZERO);
    }

    #[tokio::test]
    async fn record_writes_durably_once_per_entry() {
        let store = Arc::new(FakeCostStore::default());
        let recorder = CostRecorder::new(store.clone());
        let session_id = Uuid::new_v4();

        let entry = CostEntry::tts(session_id, Uuid::new_v4(), "sarvam-tts", 100, dec!(0.000015), OptimizationTier::Balanced);
        recorder.record(entry).await.unwrap();

        assert_eq!(store.inserts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unseen_session_has_zero_cost() {
        let store: Arc<FakeCostStore> = Arc::new(FakeCostStore::default());
        let recorder = CostRecorder::new(store);
        assert_eq!(recorder.session_cost(Uuid::new_v4()), Decimal::ZERO);
    }
}
