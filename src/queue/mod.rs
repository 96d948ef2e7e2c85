//! Thread-safe FIFO queue shared between pipeline threads
//!
//! [`DataQueue`] is an unbounded multi-producer/multi-consumer queue built on
//! a `crossbeam_channel`. Blocking consumers receive straight from the
//! channel; async consumers wait on a `tokio::sync::Notify`. Both kinds can be
//! mixed on the same queue and every item is delivered to exactly one
//! consumer, in push order.
//!
//! Closing a queue drops its sender. Further pushes are rejected, while
//! already queued items stay poppable, so consumers drain to empty before
//! they see [`QueueError::Closed`].

pub mod config;
pub mod error;

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use tokio::sync::Notify;

use crate::stats::QueueStats;

pub use config::QueueConfig;
pub use error::{PushError, QueueError};

/// Multi-producer/multi-consumer FIFO queue
pub struct DataQueue<T> {
    /// Name used in log events and stats
    name: &'static str,

    /// `None` once the queue is closed
    tx: Mutex<Option<Sender<T>>>,

    rx: Receiver<T>,

    /// Wakes tasks waiting in `pop_async`
    notify: Notify,

    config: QueueConfig,

    pushed: AtomicU64,
    popped: AtomicU64,
    high_water: AtomicUsize,

    /// Set while depth is at or above `warn_depth`
    over_warn_depth: AtomicBool,
}

impl<T> DataQueue<T> {
    /// Create an empty queue with default configuration
    pub fn new(name: &'static str) -> Self {
        Self::with_config(name, QueueConfig::default())
    }

    /// Create an empty queue with custom configuration
    pub fn with_config(name: &'static str, config: QueueConfig) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            name,
            tx: Mutex::new(Some(tx)),
            rx,
            notify: Notify::new(),
            config,
            pushed: AtomicU64::new(0),
            popped: AtomicU64::new(0),
            high_water: AtomicUsize::new(0),
            over_warn_depth: AtomicBool::new(false),
        }
    }

    /// Queue name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Configuration the queue was built with
    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    // Only an `Option` swap happens under the lock, so the state behind a
    // poisoned lock is still valid.
    fn sender(&self) -> MutexGuard<'_, Option<Sender<T>>> {
        self.tx.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an item to the back of the queue
    ///
    /// Returns the item inside [`PushError`] if the queue is closed.
    pub fn push(&self, item: T) -> Result<(), PushError<T>> {
        {
            let tx = self.sender();
            let Some(tx) = tx.as_ref() else {
                return Err(PushError(item));
            };
            // The receiver lives as long as `self`, so this only fails if
            // the channel is gone
            tx.send(item).map_err(|e| PushError(e.into_inner()))?;
        }

        self.pushed.fetch_add(1, Ordering::Relaxed);
        self.notify.notify_one();

        let depth = self.rx.len();
        self.high_water.fetch_max(depth, Ordering::Relaxed);

        if let Some(warn_depth) = self.config.warn_depth {
            if depth < warn_depth {
                self.over_warn_depth.store(false, Ordering::Relaxed);
            } else if !self.over_warn_depth.swap(true, Ordering::Relaxed) {
                tracing::warn!(
                    queue = self.name,
                    depth = depth,
                    "Queue depth reached warning level"
                );
            }
        }

        Ok(())
    }

    fn received(&self, item: T) -> T {
        self.popped.fetch_add(1, Ordering::Relaxed);
        item
    }

    /// Remove the front item without blocking
    pub fn try_pop(&self) -> Result<T, QueueError> {
        match self.rx.try_recv() {
            Ok(item) => Ok(self.received(item)),
            Err(TryRecvError::Empty) => Err(QueueError::Empty),
            Err(TryRecvError::Disconnected) => Err(QueueError::Closed),
        }
    }

    /// Remove the front item, blocking the calling thread until one is pushed
    ///
    /// Returns [`QueueError::Closed`] once the queue is closed and empty.
    pub fn pop(&self) -> Result<T, QueueError> {
        self.rx
            .recv()
            .map(|item| self.received(item))
            .map_err(|_| QueueError::Closed)
    }

    /// Like [`pop`](Self::pop), giving up with [`QueueError::Timeout`] after `timeout`
    ///
    /// A timeout too large to represent as a deadline waits like `pop`.
    pub fn pop_timeout(&self, timeout: Duration) -> Result<T, QueueError> {
        match self.try_pop() {
            Err(QueueError::Empty) => {}
            result => return result,
        }

        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return self.pop();
        };

        match self.rx.recv_deadline(deadline) {
            Ok(item) => Ok(self.received(item)),
            Err(RecvTimeoutError::Timeout) => Err(QueueError::Timeout),
            Err(RecvTimeoutError::Disconnected) => Err(QueueError::Closed),
        }
    }

    /// Remove the front item, waiting asynchronously until one is pushed
    pub async fn pop_async(&self) -> Result<T, QueueError> {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            // Register before checking so a push between the check and the
            // await is not missed.
            notified.as_mut().enable();

            match self.try_pop() {
                Err(QueueError::Empty) => notified.await,
                result => return result,
            }
        }
    }

    /// Remove and return every queued item
    pub fn drain(&self) -> Vec<T> {
        let items: Vec<T> = self.rx.try_iter().collect();
        self.popped.fetch_add(items.len() as u64, Ordering::Relaxed);
        items
    }

    /// Close the queue
    ///
    /// Further pushes fail; queued items stay poppable. Every waiting
    /// consumer is woken. Closing twice is a no-op.
    pub fn close(&self) {
        let Some(tx) = self.sender().take() else {
            return;
        };
        // Blocked receivers see the disconnect once the last sender is gone
        drop(tx);
        self.notify.notify_waiters();

        tracing::debug!(queue = self.name, remaining = self.rx.len(), "Queue closed");
    }

    /// Check if the queue has been closed
    pub fn is_closed(&self) -> bool {
        self.sender().is_none()
    }

    /// Number of queued items
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Check if no items are queued
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Snapshot of the queue counters
    pub fn stats(&self) -> QueueStats {
        QueueStats {
            name: self.name,
            depth: self.rx.len(),
            high_water: self.high_water.load(Ordering::Relaxed),
            pushed: self.pushed.load(Ordering::Relaxed),
            popped: self.popped.load(Ordering::Relaxed),
            closed: self.is_closed(),
        }
    }
}

impl<T> std::fmt::Debug for DataQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataQueue")
            .field("name", &self.name)
            .field("len", &self.rx.len())
            .field("closed", &self.is_closed())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use tokio_test::{assert_pending, assert_ready_eq, task};

    use super::*;

    #[test]
    fn test_fifo_order() {
        let queue = DataQueue::new("test");

        queue.push(1).unwrap();
        queue.push(2).unwrap();
        queue.push(3).unwrap();

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(), Ok(1));
        assert_eq!(queue.try_pop(), Ok(2));
        assert_eq!(queue.pop_timeout(Duration::from_millis(10)), Ok(3));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_try_pop_empty() {
        let queue: DataQueue<u32> = DataQueue::new("test");

        assert_eq!(queue.try_pop(), Err(QueueError::Empty));
    }

    #[test]
    fn test_pop_timeout_expires() {
        let queue: DataQueue<u32> = DataQueue::new("test");
        let started = Instant::now();

        assert_eq!(
            queue.pop_timeout(Duration::from_millis(20)),
            Err(QueueError::Timeout)
        );
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_pop_timeout_unrepresentable_deadline() {
        let queue = Arc::new(DataQueue::new("test"));

        // Already queued: returned without computing a deadline
        queue.push(1u32).unwrap();
        assert_eq!(queue.pop_timeout(Duration::MAX), Ok(1));

        // Empty: waits like a blocking pop
        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.pop_timeout(Duration::MAX))
        };
        thread::sleep(Duration::from_millis(10));
        queue.push(2).unwrap();
        assert_eq!(consumer.join().unwrap(), Ok(2));

        queue.close();
        assert_eq!(queue.pop_timeout(Duration::MAX), Err(QueueError::Closed));
    }

    #[test]
    fn test_warn_depth_config_kept() {
        let queue: DataQueue<u8> =
            DataQueue::with_config("cfg", QueueConfig::default().warn_depth(3));

        assert_eq!(queue.config().warn_depth, Some(3));
        assert_eq!(DataQueue::<u8>::new("plain").config().warn_depth, None);
    }

    #[test]
    fn test_close_rejects_push_and_drains() {
        let queue = DataQueue::new("test");
        queue.push("a").unwrap();

        queue.close();
        assert!(queue.is_closed());

        // Rejected item comes back to the caller
        let err = queue.push("b").unwrap_err();
        assert_eq!(err.into_inner(), "b");

        // Queued item is still delivered before Closed
        assert_eq!(queue.pop(), Ok("a"));
        assert_eq!(queue.pop(), Err(QueueError::Closed));
        assert_eq!(queue.try_pop(), Err(QueueError::Closed));
    }

    #[test]
    fn test_close_wakes_blocked_consumer() {
        let queue: Arc<DataQueue<u32>> = Arc::new(DataQueue::new("test"));

        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.pop())
        };

        thread::sleep(Duration::from_millis(20));
        queue.close();

        assert_eq!(consumer.join().unwrap(), Err(QueueError::Closed));
    }

    #[test]
    fn test_blocking_pop_receives_from_other_thread() {
        let queue = Arc::new(DataQueue::new("test"));

        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.pop())
        };

        thread::sleep(Duration::from_millis(10));
        queue.push(42u32).unwrap();

        assert_eq!(consumer.join().unwrap(), Ok(42));
    }

    #[test]
    fn test_each_item_delivered_once() {
        let queue = Arc::new(DataQueue::new("test"));
        let producers = 4;
        let per_producer = 500u32;

        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    let mut got = Vec::new();
                    while let Ok(item) = queue.pop() {
                        got.push(item);
                    }
                    got
                })
            })
            .collect();

        let handles: Vec<_> = (0..producers)
            .map(|p| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    for i in 0..per_producer {
                        queue.push(p * per_producer + i).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        queue.close();

        let mut all: Vec<u32> = consumers
            .into_iter()
            .flat_map(|c| c.join().unwrap())
            .collect();
        all.sort_unstable();

        let expected: Vec<u32> = (0..producers * per_producer).collect();
        assert_eq!(all, expected);
    }

    #[test]
    fn test_drain() {
        let queue = DataQueue::new("test");
        queue.push(1).unwrap();
        queue.push(2).unwrap();

        assert_eq!(queue.drain(), vec![1, 2]);
        assert!(queue.is_empty());
        assert_eq!(queue.stats().popped, 2);
    }

    #[test]
    fn test_stats() {
        let queue = DataQueue::with_config("stats", QueueConfig::default().warn_depth(2));
        queue.push(1).unwrap();
        queue.push(2).unwrap();
        queue.push(3).unwrap();
        queue.pop().unwrap();

        let stats = queue.stats();
        assert_eq!(stats.name, "stats");
        assert_eq!(stats.depth, 2);
        assert_eq!(stats.high_water, 3);
        assert_eq!(stats.pushed, 3);
        assert_eq!(stats.popped, 1);
        assert!(!stats.closed);
    }

    #[test]
    fn test_pop_async_wakes_on_push() {
        let queue = DataQueue::new("test");
        let mut pop = task::spawn(queue.pop_async());

        assert_pending!(pop.poll());

        queue.push(7u32).unwrap();
        assert!(pop.is_woken());
        assert_ready_eq!(pop.poll(), Ok(7));
    }

    #[test]
    fn test_pop_async_wakes_on_close() {
        let queue: DataQueue<u32> = DataQueue::new("test");
        let mut pop = task::spawn(queue.pop_async());

        assert_pending!(pop.poll());

        queue.close();
        assert!(pop.is_woken());
        assert_ready_eq!(pop.poll(), Err(QueueError::Closed));
    }

    #[tokio::test]
    async fn test_pop_async_from_blocking_producer() {
        let queue = Arc::new(DataQueue::new("test"));

        let producer = {
            let queue = Arc::clone(&queue);
            std::thread::spawn(move || {
                for i in 0..10u32 {
                    queue.push(i).unwrap();
                }
            })
        };

        let mut got = Vec::new();
        for _ in 0..10 {
            got.push(queue.pop_async().await.unwrap());
        }
        producer.join().unwrap();

        assert_eq!(got, (0..10).collect::<Vec<_>>());
    }
}
