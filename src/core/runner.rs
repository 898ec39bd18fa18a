//! # Launch and execute a single task.
//!
//! [`Launcher`] turns a [`TaskSpec`] into a spawned tokio task; [`run_once`] is the
//! body of that spawned task.
//!
//! ## Event flow
//!
//! ```text
//! Success / cooperative stop:
//!   TaskStarting → task.run(ctx) → Ok(()) | Err(Canceled) → TaskStopped
//!
//! Failure:
//!   TaskStarting → task.run(ctx) → Err(Fail)              → TaskFailed
//!
//! Panic:
//!   TaskStarting → task.run(ctx) → panic (caught)         → TaskFailed(task_panicked)
//! ```
//!
//! ## Rules
//! - Always publishes **exactly one** terminal event: `TaskStopped` or `TaskFailed`
//! - The outstanding unit is counted at launch and released after the body
//!   finished and the round was signalled, whatever the outcome
//! - The task error is swallowed here; it only travels on the bus

use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::{Semaphore, mpsc};
use tracing::trace;

use crate::{
    context::Context,
    core::tracker::Tracker,
    error::{TaskError, panic_message},
    events::{Bus, Event, EventKind},
    tasks::TaskSpec,
};

/// Completion signal sent to the round that launched a task.
pub(crate) type CompletionTx = mpsc::UnboundedSender<usize>;

/// Spawns launched tasks with shared bookkeeping.
#[derive(Clone)]
pub(crate) struct Launcher {
    bus: Bus,
    tracker: Arc<Tracker>,
    semaphore: Option<Arc<Semaphore>>,
}

impl Launcher {
    /// Creates a launcher over the controller's bus, tracker and optional permit pool.
    pub fn new(bus: Bus, tracker: Arc<Tracker>, semaphore: Option<Arc<Semaphore>>) -> Self {
        Self {
            bus,
            tracker,
            semaphore,
        }
    }

    /// Launches `spec` with `ctx`. Irrevocable once called.
    ///
    /// When `done` is set, the task's registration order is sent on it after the
    /// body finished.
    pub fn launch(&self, spec: TaskSpec, ctx: Context, round: u64, done: Option<CompletionTx>) {
        let outstanding = self.tracker.launch();
        let bus = self.bus.clone();
        let semaphore = self.semaphore.clone();

        tokio::spawn(async move {
            let _outstanding = outstanding;
            let _permit = match semaphore {
                Some(sem) => sem.acquire_owned().await.ok(),
                None => None,
            };

            let _ = run_once(&spec, ctx, round, &bus).await;

            if let Some(tx) = done {
                let _ = tx.send(spec.order());
            }
        });
    }
}

/// Executes the body of `spec` once, publishing lifecycle events to `bus`.
pub(crate) async fn run_once(
    spec: &TaskSpec,
    ctx: Context,
    round: u64,
    bus: &Bus,
) -> Result<(), TaskError> {
    let name = spec.display_name();
    bus.publish(
        Event::new(EventKind::TaskStarting)
            .with_task(Arc::clone(&name))
            .with_priority(spec.priority())
            .with_round(round),
    );

    let res = match std::panic::AssertUnwindSafe(spec.task().run(ctx))
        .catch_unwind()
        .await
    {
        Ok(res) => res,
        Err(panic_err) => Err(TaskError::Panicked {
            info: panic_message(&*panic_err),
        }),
    };

    match &res {
        Ok(()) | Err(TaskError::Canceled) => {
            trace!(task = %name, round, "task stopped");
            bus.publish(
                Event::new(EventKind::TaskStopped)
                    .with_task(name)
                    .with_priority(spec.priority())
                    .with_round(round),
            );
        }
        Err(e) => {
            trace!(task = %name, round, error = e.as_label(), "task failed");
            bus.publish(
                Event::new(EventKind::TaskFailed)
                    .with_task(name)
                    .with_priority(spec.priority())
                    .with_round(round)
                    .with_reason(e.to_string()),
            );
        }
    }
    res
}
