//! In-memory deposit store.
//!
//! # Responsibility
//! - Provide a substitute [`FixedDepositRepository`] with the same
//!   pre/post-conditions as the SQLite store, for tests and callers that
//!   need no durability.
//!
//! # Invariants
//! - Id assignment is monotonic and never reused within the store's
//!   lifetime, matching the durable store.
//! - Live-view semantics (replay, ordering, no-op mutations publish
//!   nothing) are identical to the durable store.

use crate::alarm::{AlarmScheduler, NoopAlarmScheduler};
use crate::live::LiveView;
use crate::model::deposit::{DepositId, FixedDeposit};
use crate::repo::deposit_repo::{FixedDepositRepository, StoreResult};
use crate::repo::views::{DepositViews, Touched};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

struct MemoryState {
    rows: BTreeMap<DepositId, FixedDeposit>,
    next_id: DepositId,
}

/// Volatile deposit store keyed by id.
pub struct MemoryFixedDepositStore {
    state: Mutex<MemoryState>,
    alarms: Arc<dyn AlarmScheduler>,
    views: DepositViews,
}

impl MemoryFixedDepositStore {
    /// Creates an empty store with no alarm wiring.
    pub fn new() -> Self {
        Self::with_alarm_scheduler(Arc::new(NoopAlarmScheduler))
    }

    /// Creates an empty store forwarding `reschedule_alarms` to `alarms`.
    pub fn with_alarm_scheduler(alarms: Arc<dyn AlarmScheduler>) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
            alarms,
            views: DepositViews::new(Vec::new()),
        }
    }
}

impl Default for MemoryFixedDepositStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedDepositRepository for MemoryFixedDepositStore {
    fn get_all_fixed_deposits(&self) -> LiveView<Vec<FixedDeposit>> {
        self.views.all_view()
    }

    fn get_fixed_deposit_by_id(&self, id: DepositId) -> LiveView<Option<FixedDeposit>> {
        self.views.by_id_view(id)
    }

    fn get_total_invested_amount(&self) -> LiveView<Option<f64>> {
        self.views.invested_view()
    }

    fn get_total_maturity_amount(&self) -> LiveView<Option<f64>> {
        self.views.maturity_view()
    }

    fn add_fixed_deposit(&self, deposit: &FixedDeposit) -> StoreResult<DepositId> {
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;

        let mut stored = deposit.clone();
        stored.id = id;
        state.rows.insert(id, stored);

        // BTreeMap iteration is id-ordered, matching the durable store.
        let records = state.rows.values().cloned().collect();
        self.views.publish_snapshot(records, Touched::One(id));
        Ok(id)
    }

    fn update_fixed_deposit(&self, deposit: &FixedDeposit) -> StoreResult<()> {
        let mut state = self.state.lock();
        let Some(slot) = state.rows.get_mut(&deposit.id) else {
            // Missing id is a silent no-op; nothing is published.
            return Ok(());
        };

        let created_at = slot.created_at;
        *slot = deposit.clone();
        slot.created_at = created_at;

        let records = state.rows.values().cloned().collect();
        self.views.publish_snapshot(records, Touched::One(deposit.id));
        Ok(())
    }

    fn delete_fixed_deposit(&self, id: DepositId) -> StoreResult<()> {
        let mut state = self.state.lock();
        if state.rows.remove(&id).is_none() {
            return Ok(());
        }

        let records = state.rows.values().cloned().collect();
        self.views.publish_snapshot(records, Touched::One(id));
        Ok(())
    }

    fn delete_all_fixed_deposits(&self) -> StoreResult<()> {
        let mut state = self.state.lock();
        state.rows.clear();
        self.views.publish_snapshot(Vec::new(), Touched::All);
        Ok(())
    }

    fn reschedule_alarms(&self) {
        self.alarms.reschedule_alarms();
    }
}
