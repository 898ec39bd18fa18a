//! # Controller configuration.
//!
//! Provides [`ControllerConfig`], centralized settings for a [`Controller`](crate::Controller).
//!
//! ## Sentinel values
//! - `max_concurrent = 0` → unlimited (no semaphore created)
//! - `bus_capacity = 0`   → clamped to 1

/// Context handed to tasks launched in the deferred phase of `run_all`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeferredContext {
    /// A fresh context that never fires (default).
    ///
    /// Deferred tasks run in the background after the round returned, possibly
    /// because the round context already fired; they are not born cancelled.
    #[default]
    Fresh,
    /// The same context the eligible set received, even if it already fired.
    Inherit,
}

/// Configuration for a controller.
///
/// ## Field semantics
/// - `max_concurrent`: cap on concurrently executing task bodies (`0` = unlimited)
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by Bus)
/// - `deferred_context`: which context deferred tasks receive
#[derive(Clone, Debug)]
pub struct ControllerConfig {
    /// Maximum number of task bodies executing at once.
    ///
    /// Applies across rounds and phases. A launched task waiting for a permit is
    /// already counted as outstanding and already belongs to its round.
    pub max_concurrent: usize,

    /// Capacity of the event bus broadcast channel ring buffer.
    pub bus_capacity: usize,

    /// Context policy for the deferred phase of `run_all`.
    pub deferred_context: DeferredContext,
}

impl ControllerConfig {
    /// Returns the concurrency limit as an `Option` (`None` = unlimited).
    #[inline]
    pub fn concurrency_limit(&self) -> Option<usize> {
        if self.max_concurrent == 0 {
            None
        } else {
            Some(self.max_concurrent)
        }
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for ControllerConfig {
    /// Default configuration:
    ///
    /// - `max_concurrent = 0` (unlimited)
    /// - `bus_capacity = 1024`
    /// - `deferred_context = DeferredContext::Fresh`
    fn default() -> Self {
        Self {
            max_concurrent: 0,
            bus_capacity: 1024,
            deferred_context: DeferredContext::default(),
        }
    }
}
