//! # Execution round: evaluating a stopping rule over live completions.
//!
//! One [`Round`] exists per run call. It owns the receiving side of the
//! completion channel shared by the eligible tasks and races it against the
//! run context.
//!
//! ```text
//! eligible tasks ── send(order) ──► rx ─┐
//!                                       ├─► select! (biased)
//! ctx.done() ───────────────────────────┘     ├─ ctx fired         → Cancelled
//!                                             ├─ completed == need → Resolved
//!                                             └─ all senders gone  → Resolved
//! ```
//!
//! ## Rules
//! - Completions are counted in arrival order; each task sends once, so
//!   simultaneous completions count distinctly.
//! - The context is checked first on every wake-up: once it fired, the round
//!   reports cancellation even if completions are queued.
//! - A quorum of zero (empty eligible set) resolves without waiting.
//! - If every sender is dropped before the quorum is met (a task future was
//!   dropped by runtime shutdown), the round resolves instead of hanging.
//! - Dropping the round never affects the launched tasks.

use tokio::sync::mpsc;
use tracing::trace;

use crate::{context::Context, error::RunError};

/// How a round resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// The stopping rule was satisfied.
    Resolved {
        /// Completions observed.
        completed: usize,
    },
    /// The context fired first.
    Cancelled {
        /// Context error.
        cause: RunError,
        /// Completions observed before the context fired.
        completed: usize,
    },
}

impl Outcome {
    /// Completions observed by the round.
    pub fn completed(&self) -> usize {
        match *self {
            Outcome::Resolved { completed } | Outcome::Cancelled { completed, .. } => completed,
        }
    }

    /// Run-level result of the round.
    pub fn into_result(self) -> Result<(), RunError> {
        match self {
            Outcome::Resolved { .. } => Ok(()),
            Outcome::Cancelled { cause, .. } => Err(cause),
        }
    }
}

/// Runtime state of one run call's eligible phase.
pub(crate) struct Round {
    id: u64,
    quorum: usize,
    ctx: Context,
    rx: mpsc::UnboundedReceiver<usize>,
}

impl Round {
    /// Creates a round waiting for `quorum` completions on `rx`.
    pub fn new(id: u64, quorum: usize, ctx: Context, rx: mpsc::UnboundedReceiver<usize>) -> Self {
        Self {
            id,
            quorum,
            ctx,
            rx,
        }
    }

    /// Blocks until the stopping rule or the context resolves the round.
    pub async fn wait(mut self) -> Outcome {
        let mut completed = 0usize;

        while completed < self.quorum {
            tokio::select! {
                biased;
                cause = self.ctx.done() => {
                    return Outcome::Cancelled { cause, completed };
                }
                signal = self.rx.recv() => match signal {
                    Some(order) => {
                        completed += 1;
                        trace!(round = self.id, task = order, completed, need = self.quorum, "completion");
                    }
                    None => break,
                },
            }
        }
        Outcome::Resolved { completed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn zero_quorum_resolves_immediately() {
        let (_tx, rx) = mpsc::unbounded_channel();
        let ctx = Context::with_cancel();
        ctx.cancel();
        let out = Round::new(1, 0, ctx, rx).wait().await;
        assert_eq!(out, Outcome::Resolved { completed: 0 });
    }

    #[tokio::test]
    async fn resolves_at_quorum() {
        let (tx, rx) = mpsc::unbounded_channel();
        for order in 0..5 {
            tx.send(order).unwrap();
        }
        let out = Round::new(1, 3, Context::background(), rx).wait().await;
        assert_eq!(out, Outcome::Resolved { completed: 3 });
        assert_eq!(out.into_result(), Ok(()));
    }

    #[tokio::test(start_paused = true)]
    async fn context_wins_over_missing_completions() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(0).unwrap();
        let ctx = Context::with_timeout(Duration::from_millis(50));

        let out = Round::new(1, 2, ctx, rx).wait().await;
        assert_eq!(
            out,
            Outcome::Cancelled {
                cause: RunError::DeadlineExceeded,
                completed: 1
            }
        );
        assert_eq!(out.completed(), 1);
        assert_eq!(out.into_result(), Err(RunError::DeadlineExceeded));
        drop(tx);
    }

    #[tokio::test]
    async fn closed_channel_does_not_hang() {
        let (tx, rx) = mpsc::unbounded_channel::<usize>();
        drop(tx);
        let out = Round::new(1, 4, Context::background(), rx).wait().await;
        assert_eq!(out, Outcome::Resolved { completed: 0 });
    }
}
