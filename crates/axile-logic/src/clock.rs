//! Virtual time: interval tickers and cancellable delayed tasks.
//!
//! Nothing in this crate reads the wall clock. The owner of a session feeds
//! elapsed milliseconds in through `advance`, and the [`Ticker`] converts them
//! into a whole number of logical ticks. Game state only ever sees ticks, so
//! callback jitter changes *when* a tick is observed but never *what* it does.
//!
//! ```
//! use axile_logic::clock::Ticker;
//!
//! let mut ticker = Ticker::new(1000);
//! ticker.start();
//! assert_eq!(ticker.advance(2500), 2);
//! assert_eq!(ticker.advance(500), 1);
//! ticker.stop();
//! assert_eq!(ticker.advance(5000), 0);
//! ```

use serde::{Deserialize, Serialize};

/// Fixed-interval tick source driven by elapsed time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticker {
    interval_ms: u64,
    carry_ms: u64,
    running: bool,
}

impl Ticker {
    /// Create a stopped ticker. An interval of 0 is treated as 1ms.
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            carry_ms: 0,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop ticking. A partially elapsed interval is dropped, the same way a
    /// cleared interval timer loses its pending callback.
    pub fn stop(&mut self) {
        self.running = false;
        self.carry_ms = 0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Feed elapsed milliseconds, returning how many whole ticks are due.
    pub fn advance(&mut self, elapsed_ms: u64) -> u32 {
        if !self.running {
            return 0;
        }
        let total = self.carry_ms.saturating_add(elapsed_ms);
        self.carry_ms = total % self.interval_ms;
        (total / self.interval_ms).min(u32::MAX as u64) as u32
    }
}

/// Identifier returned by [`DelayQueue::schedule`].
pub type TaskId = u64;

/// A task whose delay has elapsed.
#[derive(Debug, Clone, PartialEq)]
pub struct DueTask<T> {
    pub id: TaskId,
    /// Generation of the owner at scheduling time.
    pub generation: u64,
    pub payload: T,
}

#[derive(Debug, Clone)]
struct PendingTask<T> {
    id: TaskId,
    due_at_ms: u64,
    generation: u64,
    payload: T,
}

/// Delayed tasks on a virtual timeline.
///
/// Tasks are tagged with the owner's generation so that a reply scheduled for
/// a session that has since been replaced can be recognised and dropped.
#[derive(Debug, Clone)]
pub struct DelayQueue<T> {
    now_ms: u64,
    next_id: TaskId,
    pending: Vec<PendingTask<T>>,
}

impl<T> Default for DelayQueue<T> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_id: 1,
            pending: Vec::new(),
        }
    }
}

impl<T> DelayQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time of the queue.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Schedule `payload` to become due `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, generation: u64, payload: T) -> TaskId {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push(PendingTask {
            id,
            due_at_ms: self.now_ms.saturating_add(delay_ms),
            generation,
            payload,
        });
        id
    }

    /// Cancel a single task. Returns false if it already fired or never existed.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.id != id);
        self.pending.len() != before
    }

    /// Cancel every task scheduled under `generation`.
    pub fn cancel_generation(&mut self, generation: u64) -> usize {
        let before = self.pending.len();
        self.pending.retain(|t| t.generation != generation);
        before - self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Move time forward and return every task that became due, ordered by
    /// due time and then by scheduling order.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<DueTask<T>> {
        self.now_ms = self.now_ms.saturating_add(elapsed_ms);
        let now = self.now_ms;

        let mut due = Vec::new();
        let mut remaining = Vec::with_capacity(self.pending.len());
        for task in self.pending.drain(..) {
            if task.due_at_ms <= now {
                due.push(task);
            } else {
                remaining.push(task);
            }
        }
        self.pending = remaining;

        due.sort_by_key(|t| (t.due_at_ms, t.id));
        due.into_iter()
            .map(|t| DueTask {
                id: t.id,
                generation: t.generation,
                payload: t.payload,
            })
            .collect()
    }
}
