//! Alarm scheduler collaborator boundary.
//!
//! # Responsibility
//! - Define the seam through which the store asks the platform to rebuild
//!   maturity alarms.
//!
//! # Invariants
//! - `reschedule_alarms` is fire-and-forget: no arguments, no result, and
//!   implementations must be idempotent and non-blocking from the core's
//!   perspective.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Platform collaborator that rebuilds maturity alarms on request.
pub trait AlarmScheduler {
    fn reschedule_alarms(&self);
}

/// Scheduler that ignores every request. Default wiring when no platform
/// scheduler is attached.
pub struct NoopAlarmScheduler;

impl AlarmScheduler for NoopAlarmScheduler {
    fn reschedule_alarms(&self) {}
}

/// Scheduler that only counts invocations; the substitute used by tests
/// to verify forwarding.
#[derive(Default)]
pub struct RecordingAlarmScheduler {
    calls: AtomicUsize,
}

impl RecordingAlarmScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `reschedule_alarms` calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AlarmScheduler for RecordingAlarmScheduler {
    fn reschedule_alarms(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}
