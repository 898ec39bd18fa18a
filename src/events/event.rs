//! # Events emitted by the controller.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Round events**: a run call partitioning, resolving or being cancelled
//! - **Task events**: per-task registration and execution lifecycle
//! - **Subscriber events**: delivery problems inside the subscriber fan-out
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use hands::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::TaskFailed)
//!     .with_task("fetch")
//!     .with_priority(2)
//!     .with_reason("boom");
//!
//! assert_eq!(ev.kind, EventKind::TaskFailed);
//! assert_eq!(ev.priority, Some(2));
//! assert_eq!(ev.reason.as_deref(), Some("boom"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of controller events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets `task` (subscriber name) and `reason` (panic message).
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets `task` (subscriber name) and `reason`.
    SubscriberOverflow,

    // === Round events ===
    /// A run call partitioned the pending tasks and launched the eligible set.
    ///
    /// Sets `round` and `count` (eligible tasks launched).
    RoundStarted,

    /// The stopping rule was satisfied.
    ///
    /// Sets `round` and `count` (completions observed).
    RoundResolved,

    /// The run context fired before the stopping rule was satisfied.
    ///
    /// Sets `round`, `count` (completions observed) and `reason` (context error).
    RoundCancelled,

    /// `run_all` launched the deferred set.
    ///
    /// Sets `round` and `count` (deferred tasks launched).
    DeferredLaunched,

    /// Every task ever launched has finished; the notifier is dispatched.
    AllDone,

    // === Task events ===
    /// Task registered.
    ///
    /// Sets `task` and `priority`.
    TaskAdded,

    /// Task body is about to execute.
    ///
    /// Sets `task`, `priority` and `round`.
    TaskStarting,

    /// Task body returned `Ok` or `Err(Canceled)`.
    ///
    /// Sets `task`, `priority` and `round`.
    TaskStopped,

    /// Task body returned an error or panicked.
    ///
    /// Sets `task`, `priority`, `round` and `reason`.
    TaskFailed,
}

/// Controller event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Task label (or `#<order>`), or subscriber name for subscriber events.
    pub task: Option<Arc<str>>,
    /// Task priority.
    pub priority: Option<i32>,
    /// Run call identifier (1-based, per controller).
    pub round: Option<u64>,
    /// Task count carried by round events.
    pub count: Option<u32>,
    /// Human-readable reason (errors, overflow details, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            task: None,
            priority: None,
            round: None,
            count: None,
            reason: None,
        }
    }

    /// Attaches a task (or subscriber) name.
    #[inline]
    pub fn with_task(mut self, task: impl Into<Arc<str>>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Attaches a task priority.
    #[inline]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Attaches a round identifier.
    #[inline]
    pub fn with_round(mut self, round: u64) -> Self {
        self.round = Some(round);
        self
    }

    /// Attaches a count (saturated to `u32::MAX`).
    #[inline]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(u32::try_from(count).unwrap_or(u32::MAX));
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_task(subscriber)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_task(subscriber)
            .with_reason(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_numbers_increase() {
        let a = Event::new(EventKind::TaskAdded);
        let b = Event::new(EventKind::TaskAdded);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn count_saturates() {
        let ev = Event::new(EventKind::RoundStarted).with_count(usize::MAX);
        assert_eq!(ev.count, Some(u32::MAX));
    }
}
