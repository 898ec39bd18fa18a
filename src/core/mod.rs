//! Runtime core: registration, rounds and completion tracking.
//!
//! The public API from this module is [`Controller`] (with its builder and
//! configuration).
//!
//! Internal modules:
//! - [`registry`]: ordered storage of tasks not launched yet;
//! - [`runner`]: launches one task and executes its body with event publishing;
//! - [`round`]: evaluates a stopping rule over live completions vs. the context;
//! - [`tracker`]: outstanding-work count and the one-shot notifier;
//! - [`controller`]: two-phase (eligible/deferred) run execution.

mod builder;
mod config;
mod controller;
mod registry;
mod round;
mod runner;
mod tracker;

pub use builder::ControllerBuilder;
pub use config::{ControllerConfig, DeferredContext};
pub use controller::Controller;
