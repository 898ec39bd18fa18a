//! # Controller: task registration and run execution.
//!
//! The [`Controller`] accumulates tasks and executes them in rounds. Each run
//! call resolves its options into a [`RunConfig`], partitions the pending tasks
//! into an eligible and a deferred set, launches the eligible set, and waits for
//! its stopping rule (or its context). `run_all` then launches the deferred set
//! in the background.
//!
//! ## Run flow
//! ```text
//! run(opts) / run_all(opts)
//!   ├─► RunConfig::resolve(opts)
//!   ├─► tracker.hold()                          (no drain while the call is active)
//!   ├─► registry.partition(selector, run_all)
//!   │      ├─ eligible ─► launcher.launch(ctx, completion tx)   [RoundStarted]
//!   │      └─ deferred ─► DeferredBatch          (run_all only)
//!   ├─► Round::wait(quorum, ctx)
//!   │      ├─ Resolved   ─► [RoundResolved]
//!   │      └─ Cancelled  ─► [RoundCancelled]
//!   ├─► DeferredBatch::launch()                 [DeferredLaunched]
//!   └─► Ok(()) | Err(ctx error)
//!
//! every launched task ─► run_once ─► release ─► tracker ─► [AllDone] + notifier
//! ```
//!
//! ## Leak risk
//! Cancellation is cooperative. A round that returned early (first completion,
//! quorum, or a fired context) leaves its remaining tasks running; a task body
//! that never checks its [`Context`] keeps consuming resources until it finishes.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Semaphore, mpsc};
use tracing::debug;

use crate::{
    context::Context,
    core::{
        builder::ControllerBuilder,
        config::{ControllerConfig, DeferredContext},
        registry::{Partition, Registry},
        round::{Outcome, Round},
        runner::Launcher,
        tracker::Tracker,
    },
    error::{RunError, TaskError},
    events::{Bus, Event, EventKind},
    policies::{RunConfig, RunOption},
    tasks::{TaskFn, TaskOption, TaskRef, TaskSpec},
};

/// Registers tasks and runs them under completion policies.
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use std::time::Duration;
/// use hands::{Context, Controller, RunOption, TaskError};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let hits = Arc::new(AtomicU32::new(0));
/// let ctl = Controller::new();
///
/// for ms in [10_u64, 20, 30, 40] {
///     let hits = hits.clone();
///     ctl.add(move |_ctx: Context| {
///         let hits = hits.clone();
///         async move {
///             tokio::time::sleep(Duration::from_millis(ms)).await;
///             hits.fetch_add(1, Ordering::SeqCst);
///             Ok::<_, TaskError>(())
///         }
///     }, []);
/// }
///
/// ctl.run([RunOption::percentage(0.5)]).await.unwrap();
/// assert!(hits.load(Ordering::SeqCst) >= 2);
/// # }
/// ```
pub struct Controller {
    cfg: ControllerConfig,
    bus: Bus,
    registry: Registry,
    tracker: Arc<Tracker>,
    launcher: Launcher,
    rounds: AtomicU64,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    /// Creates a controller with the default configuration and no subscribers.
    ///
    /// Does not need a runtime; run calls do.
    pub fn new() -> Self {
        Self::builder(ControllerConfig::default()).build()
    }

    /// Starts building a controller with `cfg`.
    pub fn builder(cfg: ControllerConfig) -> ControllerBuilder {
        ControllerBuilder::new(cfg)
    }

    pub(crate) fn new_internal(cfg: ControllerConfig, bus: Bus) -> Self {
        let tracker = Tracker::new(bus.clone());
        let semaphore = cfg.concurrency_limit().map(Semaphore::new).map(Arc::new);
        let launcher = Launcher::new(bus.clone(), Arc::clone(&tracker), semaphore);
        Self {
            cfg,
            bus,
            registry: Registry::default(),
            tracker,
            launcher,
            rounds: AtomicU64::new(0),
        }
    }

    /// Registers a closure-backed task.
    ///
    /// Nothing runs until a run call launches it. A task added while a run is in
    /// progress is not part of that round; the next run call picks it up.
    pub fn add<F, Fut, I>(&self, f: F, opts: I)
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
        I: IntoIterator<Item = TaskOption>,
    {
        self.add_task(TaskFn::arc(f), opts);
    }

    /// Registers a task implementing [`Task`](crate::Task).
    pub fn add_task<I>(&self, task: TaskRef, opts: I)
    where
        I: IntoIterator<Item = TaskOption>,
    {
        let spec = self.registry.register(task, opts);
        self.bus.publish(
            Event::new(EventKind::TaskAdded)
                .with_task(spec.display_name())
                .with_priority(spec.priority()),
        );
    }

    /// Registers the callback fired once every launched task has finished.
    ///
    /// The callback fires on the first drain after registration, on a spawned
    /// task, and only once. Registering again replaces a callback that has not
    /// fired yet.
    pub fn done<F>(&self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.tracker.set_notifier(Box::new(callback));
    }

    /// Launches the eligible tasks and waits for the stopping rule.
    ///
    /// Tasks outside the selector are not launched and stay registered.
    /// Returns the context error if the context fired first.
    pub async fn run<I>(&self, opts: I) -> Result<(), RunError>
    where
        I: IntoIterator<Item = RunOption>,
    {
        self.execute(RunConfig::resolve(opts), false).await
    }

    /// Like [`Controller::run`], then launches every deferred task in the background.
    ///
    /// The deferred launch happens whether the round resolved or was cancelled
    /// (and also if this future is dropped mid-wait).
    pub async fn run_all<I>(&self, opts: I) -> Result<(), RunError>
    where
        I: IntoIterator<Item = RunOption>,
    {
        self.execute(RunConfig::resolve(opts), true).await
    }

    /// Total number of tasks ever registered.
    pub fn len(&self) -> usize {
        self.registry.registered()
    }

    /// Returns `true` if no task was ever registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of registered tasks not launched yet.
    pub fn pending(&self) -> usize {
        self.registry.pending()
    }

    /// Launched tasks that have not finished, plus run calls in progress.
    pub fn outstanding(&self) -> usize {
        self.tracker.outstanding()
    }

    /// Returns the controller configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.cfg
    }

    async fn execute(&self, cfg: RunConfig, launch_deferred: bool) -> Result<(), RunError> {
        let round = self.rounds.fetch_add(1, Ordering::Relaxed) + 1;
        let _hold = self.tracker.hold();

        let Partition { eligible, deferred } =
            self.registry.partition(&cfg.selector, launch_deferred);
        let quorum = cfg.stop.quorum(eligible.len());

        debug!(
            round,
            eligible = eligible.len(),
            deferred = deferred.len(),
            quorum,
            stop = ?cfg.stop,
            "round started"
        );
        self.bus.publish(
            Event::new(EventKind::RoundStarted)
                .with_round(round)
                .with_count(eligible.len()),
        );

        let deferred_ctx = match self.cfg.deferred_context {
            DeferredContext::Fresh => Context::background(),
            DeferredContext::Inherit => cfg.ctx.clone(),
        };
        let batch = DeferredBatch {
            launcher: self.launcher.clone(),
            bus: self.bus.clone(),
            specs: deferred,
            ctx: deferred_ctx,
            round,
        };

        let (tx, rx) = mpsc::unbounded_channel();
        for spec in eligible {
            self.launcher
                .launch(spec, cfg.ctx.clone(), round, Some(tx.clone()));
        }
        drop(tx);

        let outcome = Round::new(round, quorum, cfg.ctx, rx).wait().await;
        let completed = outcome.completed();
        let event = match outcome {
            Outcome::Resolved { .. } => {
                debug!(round, completed, "round resolved");
                Event::new(EventKind::RoundResolved)
            }
            Outcome::Cancelled { cause, .. } => {
                debug!(round, completed, cause = cause.as_label(), "round cancelled");
                Event::new(EventKind::RoundCancelled).with_reason(cause.to_string())
            }
        };
        self.bus
            .publish(event.with_round(round).with_count(completed));

        batch.launch();
        outcome.into_result()
    }
}

/// Deferred tasks taken by `run_all`, launched exactly once.
///
/// Launching on drop keeps the batch from being lost when the run future is
/// dropped before the round resolves.
struct DeferredBatch {
    launcher: Launcher,
    bus: Bus,
    specs: Vec<TaskSpec>,
    ctx: Context,
    round: u64,
}

impl DeferredBatch {
    fn launch(mut self) {
        self.launch_pending();
    }

    fn launch_pending(&mut self) {
        if self.specs.is_empty() {
            return;
        }
        let specs = std::mem::take(&mut self.specs);
        let count = specs.len();
        for spec in specs {
            self.launcher.launch(spec, self.ctx.clone(), self.round, None);
        }
        debug!(round = self.round, deferred = count, "deferred tasks launched");
        self.bus.publish(
            Event::new(EventKind::DeferredLaunched)
                .with_round(self.round)
                .with_count(count),
        );
    }
}

impl Drop for DeferredBatch {
    fn drop(&mut self) {
        self.launch_pending();
    }
}
