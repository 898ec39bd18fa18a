//! # hands
//!
//! **hands** runs a batch of independent async tasks under a completion policy:
//! return when the fastest finishes, when a quorum fraction finishes, or when a
//! priority-selected subset finishes, optionally firing the rest in the background.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   add(body, [priority, label])  ──►  Registry (ordered, not-yet-launched tasks)
//!                                             │
//!   run(opts) / run_all(opts)                 ▼
//!        │                         ┌──────────────────────┐
//!        └─► RunConfig::resolve ──►│ partition by Selector│
//!            (last write wins)     └───┬──────────────┬───┘
//!                                      ▼              ▼
//!                                  eligible        deferred
//!                                      │              │ (run_all only)
//!                          launch now, │              │ launch after the round
//!                          count toward│              │ resolves or is cancelled
//!                          StopRule    ▼              ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ Launcher: one tokio task per launched task                          │
//! │   run_once(task, ctx) ─► TaskStarting / TaskStopped / TaskFailed    │
//! │   completion ─► Round (eligible only) ; release ─► Tracker          │
//! └────────────┬─────────────────────────────────────────┬──────────────┘
//!              ▼                                         ▼
//!   Round::wait: quorum vs ctx.done()          Tracker: outstanding → 0
//!     └─► run returns Ok / Err(ctx error)        └─► AllDone + done() callback (once)
//! ```
//!
//! ### Stopping rules
//! ```text
//! RunOption::fastest()         first eligible completion
//! RunOption::percentage(p)     ceil(p × |eligible|) completions, at least 1
//! (default)                    every eligible task
//! RunOption::with_context(ctx) the run returns ctx's error if it fires first
//! ```
//!
//! ## Features
//! | Area              | Description                                               | Key types / traits                        |
//! |-------------------|-----------------------------------------------------------|-------------------------------------------|
//! | **Controller**    | Register tasks, run them in rounds, drain notification.   | [`Controller`], [`ControllerConfig`]      |
//! | **Policies**      | Eligibility selectors and stopping rules.                 | [`RunOption`], [`Selector`], [`StopRule`] |
//! | **Cancellation**  | Cooperative context with optional deadline.               | [`Context`]                               |
//! | **Tasks**         | Closures or trait objects receiving a context.            | [`Task`], [`TaskFn`], [`TaskOption`]      |
//! | **Errors**        | Run-level vs task-level errors, never conflated.          | [`RunError`], [`TaskError`]               |
//! | **Events**        | Lifecycle events fanned out to subscribers.               | [`Event`], [`Subscribe`]                  |
//!
//! ## Optional features
//! - `logging` (default): exports [`LogWriter`], which renders events through `tracing`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use hands::{Context, Controller, RunOption, TaskError, TaskOption};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let hits = Arc::new(AtomicU32::new(0));
//!     let ctl = Controller::new();
//!
//!     for p in 0..5 {
//!         let hits = hits.clone();
//!         ctl.add(
//!             move |ctx: Context| {
//!                 let hits = hits.clone();
//!                 async move {
//!                     if ctx.is_cancelled() {
//!                         return Err(TaskError::Canceled);
//!                     }
//!                     hits.fetch_add(1, Ordering::SeqCst);
//!                     Ok(())
//!                 }
//!             },
//!             [TaskOption::priority(p)],
//!         );
//!     }
//!
//!     // Only priorities 2 and 3 run now; the rest are launched afterwards.
//!     ctl.run_all([RunOption::between(2, 3)]).await?;
//!     assert!(hits.load(Ordering::SeqCst) >= 2);
//!     Ok(())
//! }
//! ```
mod context;
mod core;
mod error;
mod events;
mod policies;
mod subscribers;
mod tasks;

// ---- Public re-exports ----

pub use context::Context;
pub use core::{Controller, ControllerBuilder, ControllerConfig, DeferredContext};
pub use error::{RunError, TaskError};
pub use events::{Bus, Event, EventKind, WeakBus};
pub use policies::{RunConfig, RunOption, Selector, StopRule};
pub use subscribers::{Subscribe, SubscriberSet};
pub use tasks::{Task, TaskFn, TaskOption, TaskRef, TaskSpec};

// Optional: expose a built-in logger subscriber.
// Enabled by default; disable with `--no-default-features`.
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
