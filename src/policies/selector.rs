//! # Eligibility selectors.
//!
//! A [`Selector`] partitions the not-yet-launched tasks of a controller into the
//! **eligible** set (launched now) and the **deferred** set (launched later by
//! `run_all`, or left alone by `run`). The decision looks at the task priority only.

use std::collections::BTreeSet;

/// Eligibility predicate over task priorities.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selector {
    /// Every task is eligible.
    #[default]
    All,
    /// Priority in `low..=high`. Selects nothing when `low > high`.
    Between {
        /// Inclusive lower bound.
        low: i32,
        /// Inclusive upper bound.
        high: i32,
    },
    /// Priority is a member of the set. Selects nothing when the set is empty.
    In(BTreeSet<i32>),
}

impl Selector {
    /// Returns `true` if a task with `priority` belongs to the eligible set.
    pub fn matches(&self, priority: i32) -> bool {
        match self {
            Selector::All => true,
            Selector::Between { low, high } => (*low..=*high).contains(&priority),
            Selector::In(set) => set.contains(&priority),
        }
    }
}
