// src/engine/frontier.rs
// =============================================================================
// The frontier: the FIFO queue of addresses waiting for a fetch.
//
// How it works:
// - push() makes an address available to any worker, oldest-first, which
//   is what gives the crawl its breadth-first shape
// - An in-flight counter tracks addresses that were pushed but not yet
//   fully processed. The counter, not queue emptiness, is the signal for
//   "no more work will ever arrive": an empty queue can still receive
//   pushes from a worker that is mid-expansion
// - push() increments the counter before the address is enqueued, and
//   workers call task_done() only after expanding an item (pushing its
//   neighbors first), so the counter can never dip to zero while more
//   work is on the way
// - close() ends all dequeuing: next() returns None even if entries are
//   still queued. Used when the crawl limit is reached
// =============================================================================

use std::collections::VecDeque;
use std::pin::pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use tokio::sync::Notify;

// Ordered work queue shared by the worker pool
pub struct Frontier {
    queue: Mutex<VecDeque<String>>,
    in_flight: AtomicUsize,
    closed: AtomicBool,
    // Woken on every push, on the counter reaching zero, and on close();
    // waiters re-check state themselves
    wakeup: Notify,
}

impl Frontier {
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            in_flight: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
            wakeup: Notify::new(),
        }
    }

    // Enqueues an address for a later fetch. The in-flight increment
    // happens before the entry is visible so no consumer can watch the
    // counter hit zero while this push is still pending.
    pub fn push(&self, address: String) {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.queue
            .lock()
            .expect("frontier queue lock poisoned")
            .push_back(address);
        self.wakeup.notify_waiters();
    }

    // Removes and returns the oldest queued address
    pub fn pop(&self) -> Option<String> {
        self.queue
            .lock()
            .expect("frontier queue lock poisoned")
            .pop_front()
    }

    // A worker finished processing a dequeued address (success or failure).
    // When the last in-flight item completes, every waiter is woken so the
    // pool can observe completion.
    pub fn task_done(&self) {
        if self.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.wakeup.notify_waiters();
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    // Stops all further dequeues; queued entries are abandoned.
    // Idempotent.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.wakeup.notify_waiters();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    // The worker-side dequeue: returns the next address, cooperatively
    // waiting while the queue is empty but work is still in flight.
    // Returns None once the frontier is closed or the in-flight counter
    // has reached zero (no more work will ever arrive).
    pub async fn next(&self) -> Option<String> {
        loop {
            // Register with the waker before checking state, so a wakeup
            // fired between the check and the await cannot be missed
            let mut notified = pin!(self.wakeup.notified());
            notified.as_mut().enable();

            if self.is_closed() {
                return None;
            }
            if let Some(address) = self.pop() {
                return Some(address);
            }
            if self.in_flight() == 0 {
                return None;
            }

            notified.await;
        }
    }

    // Resolves once no more work will ever arrive: the in-flight counter
    // reached zero, or the frontier was closed early
    pub async fn drained(&self) {
        loop {
            let mut notified = pin!(self.wakeup.notified());
            notified.as_mut().enable();

            if self.is_closed() || self.in_flight() == 0 {
                return;
            }

            notified.await;
        }
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_pop_is_fifo() {
        let frontier = Frontier::new();
        frontier.push("https://a.example".to_string());
        frontier.push("https://b.example".to_string());
        frontier.push("https://c.example".to_string());

        assert_eq!(frontier.pop(), Some("https://a.example".to_string()));
        assert_eq!(frontier.pop(), Some("https://b.example".to_string()));
        assert_eq!(frontier.pop(), Some("https://c.example".to_string()));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_in_flight_counts_pushes_and_completions() {
        let frontier = Frontier::new();
        assert_eq!(frontier.in_flight(), 0);

        frontier.push("https://a.example".to_string());
        frontier.push("https://b.example".to_string());
        assert_eq!(frontier.in_flight(), 2);

        // Popping does not complete the item; only task_done does
        frontier.pop();
        assert_eq!(frontier.in_flight(), 2);

        frontier.task_done();
        assert_eq!(frontier.in_flight(), 1);
        frontier.task_done();
        assert_eq!(frontier.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_next_returns_none_when_idle() {
        let frontier = Frontier::new();
        // Nothing pushed, nothing in flight
        assert_eq!(frontier.next().await, None);
    }

    #[tokio::test]
    async fn test_next_returns_none_after_close_even_with_queued_work() {
        let frontier = Frontier::new();
        frontier.push("https://a.example".to_string());
        frontier.close();
        assert_eq!(frontier.next().await, None);
    }

    #[tokio::test]
    async fn test_next_waits_for_work_pushed_later() {
        let frontier = Arc::new(Frontier::new());

        // Keep one item in flight so next() blocks instead of returning None
        frontier.push("https://a.example".to_string());
        assert_eq!(frontier.next().await, Some("https://a.example".to_string()));

        let waiter = {
            let frontier = Arc::clone(&frontier);
            tokio::spawn(async move { frontier.next().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        frontier.push("https://b.example".to_string());

        assert_eq!(
            waiter.await.unwrap(),
            Some("https://b.example".to_string())
        );
    }

    #[tokio::test]
    async fn test_next_unblocks_when_last_task_completes() {
        let frontier = Arc::new(Frontier::new());
        frontier.push("https://a.example".to_string());
        frontier.pop();

        // A second worker waits while the first still holds its item
        let waiter = {
            let frontier = Arc::clone(&frontier);
            tokio::spawn(async move { frontier.next().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        frontier.task_done();

        // Counter hit zero with nothing queued: the waiter sees completion
        assert_eq!(waiter.await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_drained_resolves_on_close() {
        let frontier = Arc::new(Frontier::new());
        frontier.push("https://a.example".to_string());

        let drained = {
            let frontier = Arc::clone(&frontier);
            tokio::spawn(async move { frontier.drained().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        frontier.close();
        drained.await.unwrap();
    }
}
