//! # LogWriter — events rendered through `tracing`
//!
//! A minimal subscriber that turns incoming [`Event`]s into `tracing` records.
//! Install any `tracing` subscriber (e.g. `tracing-subscriber`) to see them.
//!
//! ## Levels
//! - `debug`: task start/stop, registrations
//! - `info`:  round start/resolution, deferred launch, drain
//! - `warn`:  task failures, cancelled rounds, subscriber overflow
//! - `error`: subscriber panics

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let task = e.task.as_deref().unwrap_or("-");
        let reason = e.reason.as_deref().unwrap_or("-");
        match e.kind {
            EventKind::TaskAdded => {
                debug!(seq = e.seq, task, priority = ?e.priority, "task added");
            }
            EventKind::TaskStarting => {
                debug!(seq = e.seq, task, priority = ?e.priority, round = ?e.round, "task starting");
            }
            EventKind::TaskStopped => {
                debug!(seq = e.seq, task, round = ?e.round, "task stopped");
            }
            EventKind::TaskFailed => {
                warn!(seq = e.seq, task, round = ?e.round, reason, "task failed");
            }
            EventKind::RoundStarted => {
                info!(seq = e.seq, round = ?e.round, eligible = ?e.count, "round started");
            }
            EventKind::RoundResolved => {
                info!(seq = e.seq, round = ?e.round, completed = ?e.count, "round resolved");
            }
            EventKind::RoundCancelled => {
                warn!(seq = e.seq, round = ?e.round, completed = ?e.count, reason, "round cancelled");
            }
            EventKind::DeferredLaunched => {
                info!(seq = e.seq, round = ?e.round, deferred = ?e.count, "deferred tasks launched");
            }
            EventKind::AllDone => {
                info!(seq = e.seq, "all launched tasks finished");
            }
            EventKind::SubscriberOverflow => {
                warn!(seq = e.seq, subscriber = task, reason, "subscriber overflow");
            }
            EventKind::SubscriberPanicked => {
                error!(seq = e.seq, subscriber = task, reason, "subscriber panicked");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
