//! Blocking handoff queue moving values from producers to suspended consumers.

use std::collections::VecDeque;
use std::pin::pin;

use tokio::sync::{Mutex, Notify};

/// A queue that hands values from producers to suspended consumers without
/// busy-waiting.
///
/// [`HandoffQueue::send`] appends a value and wakes at most one suspended
/// receiver; [`HandoffQueue::receive`] suspends until a value is available and
/// then takes the most recently sent one. Newest-first order is deliberate:
/// consumers of signal phases care about the latest published phase, not a
/// backlog of stale ones, so a slow consumer skips intermediate values instead
/// of draining them oldest-first.
///
/// Any number of tasks may send and receive concurrently on the same instance.
/// Each send pairs with exactly one available value; which of several waiting
/// receivers is woken first is unspecified.
#[derive(Debug)]
pub struct HandoffQueue<T> {
    /// Pending values, newest at the back.
    items: Mutex<VecDeque<T>>,
    /// Wakes one suspended receiver per sent value.
    item_added: Notify,
}

impl<T> HandoffQueue<T> {
    /// Creates a new empty queue.
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            item_added: Notify::new(),
        }
    }

    /// Appends `value` to the queue and wakes at most one suspended receiver.
    ///
    /// If no receiver is currently suspended, the notification is stored and
    /// consumed by the next [`HandoffQueue::receive`] call.
    pub async fn send(&self, value: T) {
        {
            let mut items = self.items.lock().await;
            items.push_back(value);
        }

        self.item_added.notify_one();
    }

    /// Suspends until the queue is non-empty, then removes and returns the most
    /// recently sent value.
    ///
    /// The caller registers for a wakeup before the lock is released, so a send
    /// landing between the emptiness check and the suspension cannot be missed.
    /// Cancellation is safe: a notification delivered to a receiver that is
    /// dropped before completing moves on to the next waiting receiver.
    pub async fn receive(&self) -> T {
        loop {
            let mut notified = pin!(self.item_added.notified());

            {
                let mut items = self.items.lock().await;
                if let Some(value) = items.pop_back() {
                    return value;
                }

                notified.as_mut().enable();
            }

            notified.await;
        }
    }

    /// Removes and returns the most recently sent value, or [`None`] if the
    /// queue is empty.
    pub async fn try_receive(&self) -> Option<T> {
        self.items.lock().await.pop_back()
    }
}

impl<T> Default for HandoffQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_receive_returns_newest_first() {
        let queue = HandoffQueue::new();

        queue.send(1).await;
        queue.send(2).await;

        assert_eq!(queue.receive().await, 2);
        assert_eq!(queue.receive().await, 1);
    }

    #[tokio::test]
    async fn test_receive_consumes_stored_notification() {
        let queue = HandoffQueue::new();

        queue.send(7).await;

        assert_eq!(queue.receive().await, 7);
    }

    #[tokio::test]
    async fn test_try_receive_does_not_suspend() {
        let queue: HandoffQueue<u32> = HandoffQueue::new();

        assert_eq!(queue.try_receive().await, None);

        queue.send(9).await;

        assert_eq!(queue.try_receive().await, Some(9));
        assert_eq!(queue.try_receive().await, None);
    }
}
