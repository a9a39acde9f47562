//! Live view primitives for reactive query results.
//!
//! # Responsibility
//! - Provide a push-based, replay-on-subscribe value sequence shared
//!   between a store (publisher) and any number of consumers.
//!
//! # Invariants
//! - Subscribing delivers the current value first, then every published
//!   value in publish order.
//! - Subscribers are notified in registration order; delivery order per
//!   subscriber equals publish order.
//! - Every published value is delivered. Equal consecutive values are not
//!   deduplicated, so each committed mutation is observable.
//! - Dropping a [`Subscription`] cancels it; the publisher prunes the dead
//!   channel lazily on its next delivery and other subscribers are
//!   unaffected.

use parking_lot::Mutex;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

#[derive(Debug)]
struct Shared<T> {
    current: T,
    subscribers: Vec<Sender<T>>,
}

/// Publisher side of a live view. Owned by the store that maintains the
/// underlying data; one source exists per query key.
#[derive(Debug)]
pub struct LiveSource<T: Clone> {
    shared: Arc<Mutex<Shared<T>>>,
}

impl<T: Clone> LiveSource<T> {
    /// Creates a source holding `initial` as the current value.
    pub fn new(initial: T) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                current: initial,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Returns a consumer handle sharing this source's state.
    pub fn view(&self) -> LiveView<T> {
        LiveView {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Replaces the current value and delivers it to every live
    /// subscriber in registration order. Subscribers whose receiving end
    /// is gone are pruned here.
    pub fn publish(&self, value: T) {
        let mut shared = self.shared.lock();
        shared.current = value.clone();
        shared
            .subscribers
            .retain(|subscriber| subscriber.send(value.clone()).is_ok());
    }

    /// Snapshot of the current value.
    pub fn current(&self) -> T {
        self.shared.lock().current.clone()
    }

    /// Number of registered subscribers, including ones not yet pruned.
    pub fn subscriber_count(&self) -> usize {
        self.shared.lock().subscribers.len()
    }
}

/// Consumer handle for a live-updating query result.
///
/// `get` reads a snapshot without registering anything; `subscribe` yields
/// the full sequence of states starting from the current one.
pub struct LiveView<T: Clone> {
    shared: Arc<Mutex<Shared<T>>>,
}

impl<T: Clone> Clone for LiveView<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone> LiveView<T> {
    /// Snapshot of the current value. Never blocks on publishers beyond
    /// the brief registry lock.
    pub fn get(&self) -> T {
        self.shared.lock().current.clone()
    }

    /// Registers a subscriber. The value current at subscription time is
    /// queued immediately, so the first `next()` never blocks.
    pub fn subscribe(&self) -> Subscription<T> {
        let (sender, receiver) = channel();
        let mut shared = self.shared.lock();
        // Replay the current state before registering, so the sequence
        // always starts with a value and later publishes order after it.
        let _ = sender.send(shared.current.clone());
        shared.subscribers.push(sender);
        Subscription { receiver }
    }
}

/// One subscriber's ordered stream of values from a [`LiveView`].
///
/// Dropping the subscription cancels it.
pub struct Subscription<T> {
    receiver: Receiver<T>,
}

impl<T> Subscription<T> {
    /// Waits for the next value. Returns `None` once the publishing store
    /// is gone and all queued values were consumed.
    pub fn next(&self) -> Option<T> {
        self.receiver.recv().ok()
    }

    /// Returns the next queued value without blocking, or `None` when
    /// nothing is pending.
    pub fn try_next(&self) -> Option<T> {
        self.receiver.try_recv().ok()
    }

    /// Drains everything currently queued and returns the last value, or
    /// `None` when nothing is pending.
    pub fn latest(&self) -> Option<T> {
        let mut last = None;
        while let Some(value) = self.try_next() {
            last = Some(value);
        }
        last
    }
}

#[cfg(test)]
mod tests {
    use super::LiveSource;

    #[test]
    fn subscribe_replays_current_value() {
        let source = LiveSource::new(7_i32);
        let sub = source.view().subscribe();
        assert_eq!(sub.try_next(), Some(7));
        assert_eq!(sub.try_next(), None);
    }

    #[test]
    fn publishes_arrive_in_order_after_replay() {
        let source = LiveSource::new(0_i32);
        let sub = source.view().subscribe();
        source.publish(1);
        source.publish(2);
        source.publish(3);
        assert_eq!(sub.try_next(), Some(0));
        assert_eq!(sub.try_next(), Some(1));
        assert_eq!(sub.try_next(), Some(2));
        assert_eq!(sub.try_next(), Some(3));
        assert_eq!(sub.try_next(), None);
    }

    #[test]
    fn equal_values_are_not_deduplicated() {
        let source = LiveSource::new(true);
        let sub = source.view().subscribe();
        source.publish(true);
        source.publish(true);
        assert_eq!(sub.try_next(), Some(true));
        assert_eq!(sub.try_next(), Some(true));
        assert_eq!(sub.try_next(), Some(true));
        assert_eq!(sub.try_next(), None);
    }

    #[test]
    fn get_reads_latest_without_subscribing() {
        let source = LiveSource::new("a".to_string());
        let view = source.view();
        source.publish("b".to_string());
        assert_eq!(view.get(), "b");
        assert_eq!(source.subscriber_count(), 0);
    }

    #[test]
    fn dropped_subscription_is_pruned_and_others_keep_working() {
        let source = LiveSource::new(0_i32);
        let view = source.view();
        let first = view.subscribe();
        let second = view.subscribe();
        assert_eq!(source.subscriber_count(), 2);

        drop(first);
        source.publish(1);
        assert_eq!(source.subscriber_count(), 1);
        assert_eq!(second.try_next(), Some(0));
        assert_eq!(second.try_next(), Some(1));
    }

    #[test]
    fn latest_drains_to_last_queued_value() {
        let source = LiveSource::new(0_i32);
        let sub = source.view().subscribe();
        source.publish(1);
        source.publish(2);
        assert_eq!(sub.latest(), Some(2));
        assert_eq!(sub.try_next(), None);
    }
}
