//! # Run options and their resolution.
//!
//! A run call takes any number of [`RunOption`]s. Each option sets exactly one of
//! {selector, stopping rule, context}; [`RunConfig::resolve`] applies them in the
//! order given, so a later option of the same kind replaces an earlier one.
//!
//! ## Example
//! ```rust
//! use hands::{RunConfig, RunOption, Selector, StopRule};
//!
//! let cfg = RunConfig::resolve([
//!     RunOption::fastest(),
//!     RunOption::between(2, 3),
//!     RunOption::percentage(0.5),
//! ]);
//! assert_eq!(cfg.stop, StopRule::Fraction(0.5));
//! assert_eq!(cfg.selector, Selector::Between { low: 2, high: 3 });
//! ```

use crate::context::Context;
use crate::policies::{selector::Selector, stop::StopRule};

/// One option of a run call.
#[derive(Clone, Debug)]
pub enum RunOption {
    /// Sets the stopping rule.
    Stop(StopRule),
    /// Sets the eligibility selector.
    Select(Selector),
    /// Sets the cancellation context.
    Context(Context),
}

impl RunOption {
    /// Return on the first completion; every task eligible unless a selector says otherwise.
    pub fn fastest() -> Self {
        RunOption::Stop(StopRule::First)
    }

    /// Return once `ceil(fraction × eligible)` tasks completed (at least one).
    pub fn percentage(fraction: f64) -> Self {
        RunOption::Stop(StopRule::Fraction(fraction))
    }

    /// Return once every eligible task completed (the default rule).
    pub fn wait_for_all() -> Self {
        RunOption::Stop(StopRule::WaitForAll)
    }

    /// Only tasks with priority in `low..=high` are eligible.
    pub fn between(low: i32, high: i32) -> Self {
        RunOption::Select(Selector::Between { low, high })
    }

    /// Only tasks whose priority is in `priorities` are eligible.
    pub fn in_set<I>(priorities: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        RunOption::Select(Selector::In(priorities.into_iter().collect()))
    }

    /// Races the run against `ctx`; eligible tasks receive it as well.
    pub fn with_context(ctx: Context) -> Self {
        RunOption::Context(ctx)
    }
}

/// Resolved configuration of one run call.
///
/// Exists only for the duration of that call.
#[derive(Clone, Debug, Default)]
pub struct RunConfig {
    /// Eligibility predicate.
    pub selector: Selector,
    /// Stopping rule.
    pub stop: StopRule,
    /// Cancellation context.
    pub ctx: Context,
}

impl RunConfig {
    /// Applies `opts` in order on top of the defaults (last write wins per kind).
    pub fn resolve<I>(opts: I) -> Self
    where
        I: IntoIterator<Item = RunOption>,
    {
        opts.into_iter().fold(Self::default(), |mut cfg, opt| {
            match opt {
                RunOption::Stop(rule) => cfg.stop = rule,
                RunOption::Select(selector) => cfg.selector = selector,
                RunOption::Context(ctx) => cfg.ctx = ctx,
            }
            cfg
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_options_gives_defaults() {
        let cfg = RunConfig::resolve([]);
        assert_eq!(cfg.selector, Selector::All);
        assert_eq!(cfg.stop, StopRule::WaitForAll);
        assert!(!cfg.ctx.is_cancelled());
        cfg.ctx.cancel();
        assert!(!cfg.ctx.is_cancelled(), "default context is not cancelable");
    }

    #[test]
    fn fastest_leaves_eligibility_unrestricted() {
        let cfg = RunConfig::resolve([RunOption::fastest()]);
        assert_eq!(cfg.stop, StopRule::First);
        assert_eq!(cfg.selector, Selector::All);
    }

    #[test]
    fn selector_keeps_default_stop_rule() {
        let cfg = RunConfig::resolve([RunOption::in_set([2, 4])]);
        assert_eq!(cfg.selector, Selector::In([2, 4].into_iter().collect()));
        assert_eq!(cfg.stop, StopRule::WaitForAll);
    }

    #[test]
    fn last_write_wins_per_kind() {
        let cfg = RunConfig::resolve([
            RunOption::between(0, 1),
            RunOption::fastest(),
            RunOption::in_set([9]),
            RunOption::percentage(0.25),
        ]);
        assert_eq!(cfg.selector, Selector::In([9].into_iter().collect()));
        assert_eq!(cfg.stop, StopRule::Fraction(0.25));
    }

    #[test]
    fn context_option_is_carried() {
        let ctx = Context::with_cancel();
        let cfg = RunConfig::resolve([RunOption::with_context(ctx.clone())]);
        ctx.cancel();
        assert!(cfg.ctx.is_cancelled());
    }
}
