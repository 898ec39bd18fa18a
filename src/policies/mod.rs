//! Run policies.
//!
//! This module groups the knobs that decide **which** registered tasks a run
//! launches immediately and **when** the run returns control to its caller.
//!
//! ## Contents
//! - [`Selector`]  eligibility predicate over task priority (all / range / set)
//! - [`StopRule`]  stopping rule (wait for all / first / quorum fraction)
//! - [`RunOption`] one option passed to a run call
//! - [`RunConfig`] the resolved configuration of a single run call
//!
//! ## Quick wiring
//! ```text
//! run([RunOption...])
//!      └─► RunConfig::resolve(options)       (applied in order, last write wins)
//!           ├─ selector.matches(priority) → eligible / deferred partition
//!           ├─ stop.quorum(|eligible|)    → completions needed before return
//!           └─ ctx                        → raced against the completions
//! ```
//!
//! ## Defaults
//! - `Selector::All`, `StopRule::WaitForAll`, `Context::background()`.

mod options;
mod selector;
mod stop;

pub use options::{RunConfig, RunOption};
pub use selector::Selector;
pub use stop::StopRule;
