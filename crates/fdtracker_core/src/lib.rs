//! Core persistence and live-query logic for the FD tracker.
//! This crate is the single source of truth for deposit data invariants.

pub mod alarm;
pub mod db;
pub mod live;
pub mod logging;
pub mod model;
pub mod prefs;
pub mod repo;
pub mod service;

pub use alarm::{AlarmScheduler, NoopAlarmScheduler, RecordingAlarmScheduler};
pub use live::{LiveView, Subscription};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::deposit::{DepositId, FixedDeposit, UNASSIGNED_DEPOSIT_ID};
pub use prefs::PreferenceStore;
pub use repo::deposit_repo::{
    FixedDepositRepository, SqliteFixedDepositStore, StoreError, StoreResult,
};
pub use repo::memory_repo::MemoryFixedDepositStore;
pub use service::deposit_service::DepositService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
