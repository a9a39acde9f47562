//! Shared live-view registry for deposit stores.
//!
//! Both store implementations funnel committed state through this registry,
//! which keeps one [`LiveSource`] per query key (full list, each requested
//! id, both aggregates) and republishes them after every committed
//! mutation.

use crate::live::{LiveSource, LiveView};
use crate::model::deposit::{DepositId, FixedDeposit};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Which per-id views a mutation can have affected.
pub(crate) enum Touched {
    One(DepositId),
    All,
}

pub(crate) struct DepositViews {
    all: LiveSource<Vec<FixedDeposit>>,
    invested: LiveSource<Option<f64>>,
    maturity: LiveSource<Option<f64>>,
    by_id: Mutex<HashMap<DepositId, LiveSource<Option<FixedDeposit>>>>,
}

impl DepositViews {
    /// Builds the registry from the committed records, ordered by id.
    pub(crate) fn new(records: Vec<FixedDeposit>) -> Self {
        let (invested, maturity) = aggregate_sums(&records);
        Self {
            all: LiveSource::new(records),
            invested: LiveSource::new(invested),
            maturity: LiveSource::new(maturity),
            by_id: Mutex::new(HashMap::new()),
        }
    }

    /// Snapshot of the committed records backing the views.
    pub(crate) fn snapshot(&self) -> Vec<FixedDeposit> {
        self.all.current()
    }

    pub(crate) fn all_view(&self) -> LiveView<Vec<FixedDeposit>> {
        self.all.view()
    }

    pub(crate) fn invested_view(&self) -> LiveView<Option<f64>> {
        self.invested.view()
    }

    pub(crate) fn maturity_view(&self) -> LiveView<Option<f64>> {
        self.maturity.view()
    }

    /// Per-id view, registered on first request so later mutations can
    /// reach it. The initial value comes from the committed snapshot.
    pub(crate) fn by_id_view(&self, id: DepositId) -> LiveView<Option<FixedDeposit>> {
        let mut by_id = self.by_id.lock();
        by_id
            .entry(id)
            .or_insert_with(|| {
                let current = self.all.current().into_iter().find(|record| record.id == id);
                LiveSource::new(current)
            })
            .view()
    }

    /// Publishes a freshly committed snapshot to every affected view.
    ///
    /// Aggregates are recomputed from the full snapshot each time, so they
    /// never drift from the row data.
    pub(crate) fn publish_snapshot(&self, records: Vec<FixedDeposit>, touched: Touched) {
        let (invested, maturity) = aggregate_sums(&records);
        self.all.publish(records.clone());
        self.invested.publish(invested);
        self.maturity.publish(maturity);

        let by_id = self.by_id.lock();
        match touched {
            Touched::One(id) => {
                if let Some(source) = by_id.get(&id) {
                    source.publish(records.into_iter().find(|record| record.id == id));
                }
            }
            Touched::All => {
                for (id, source) in by_id.iter() {
                    source.publish(records.iter().find(|record| record.id == *id).cloned());
                }
            }
        }
    }
}

/// Sums over all records; `None` (not zero) when there are no records, so
/// consumers can tell "no deposits yet" from "deposits summing to zero".
fn aggregate_sums(records: &[FixedDeposit]) -> (Option<f64>, Option<f64>) {
    if records.is_empty() {
        return (None, None);
    }
    let invested = records.iter().map(|record| record.principal_amount).sum();
    let maturity = records.iter().map(|record| record.maturity_amount).sum();
    (Some(invested), Some(maturity))
}
