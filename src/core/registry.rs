//! # Task registry.
//!
//! Ordered storage of registered tasks that have not been launched yet.
//!
//! ## Rules
//! - Registration order is preserved in both partitions.
//! - A task leaves the registry the moment it is assigned to a launch phase, so it
//!   can never be launched twice.
//! - Partitioning happens under one lock: concurrent run calls get disjoint sets,
//!   and tasks added during a run wait for the next run call.

use parking_lot::Mutex;

use crate::policies::Selector;
use crate::tasks::{TaskOption, TaskRef, TaskSpec};

/// Result of partitioning the pending tasks for one run call.
#[derive(Debug, Default)]
pub(crate) struct Partition {
    /// Launched immediately; the stopping rule counts their completions.
    pub eligible: Vec<TaskSpec>,
    /// Launched after the round resolves (only when taken).
    pub deferred: Vec<TaskSpec>,
}

#[derive(Default)]
struct Inner {
    pending: Vec<TaskSpec>,
    registered: usize,
}

/// Registry of not-yet-launched tasks.
#[derive(Default)]
pub(crate) struct Registry {
    inner: Mutex<Inner>,
}

impl Registry {
    /// Appends a task and returns a copy of its spec.
    pub fn register<I>(&self, task: TaskRef, opts: I) -> TaskSpec
    where
        I: IntoIterator<Item = TaskOption>,
    {
        let mut inner = self.inner.lock();
        let spec = TaskSpec::new(task, inner.registered, opts);
        inner.registered += 1;
        inner.pending.push(spec.clone());
        spec
    }

    /// Splits the pending tasks by `selector`.
    ///
    /// Eligible tasks always leave the registry. Deferred tasks leave it only when
    /// `take_deferred` is set; otherwise they stay pending and the returned
    /// `deferred` list is empty.
    pub fn partition(&self, selector: &Selector, take_deferred: bool) -> Partition {
        let mut inner = self.inner.lock();
        let (eligible, rest): (Vec<TaskSpec>, Vec<TaskSpec>) = inner
            .pending
            .drain(..)
            .partition(|spec| selector.matches(spec.priority()));

        if take_deferred {
            Partition {
                eligible,
                deferred: rest,
            }
        } else {
            inner.pending = rest;
            Partition {
                eligible,
                deferred: Vec::new(),
            }
        }
    }

    /// Total number of tasks ever registered.
    pub fn registered(&self) -> usize {
        self.inner.lock().registered
    }

    /// Number of registered tasks not launched yet.
    pub fn pending(&self) -> usize {
        self.inner.lock().pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Context, TaskError, TaskFn};

    fn fill(reg: &Registry, priorities: &[i32]) {
        for p in priorities {
            let task: TaskRef = TaskFn::arc(|_ctx: Context| async { Ok::<_, TaskError>(()) });
            reg.register(task, [TaskOption::priority(*p)]);
        }
    }

    fn orders(specs: &[TaskSpec]) -> Vec<usize> {
        specs.iter().map(TaskSpec::order).collect()
    }

    #[test]
    fn partition_preserves_order() {
        let reg = Registry::default();
        fill(&reg, &[0, 3, 1, 2, 3, 4]);

        let part = reg.partition(&Selector::Between { low: 2, high: 3 }, true);
        assert_eq!(orders(&part.eligible), vec![1, 3, 4]);
        assert_eq!(orders(&part.deferred), vec![0, 2, 5]);
        assert_eq!(reg.pending(), 0);
        assert_eq!(reg.registered(), 6);
    }

    #[test]
    fn untaken_deferred_tasks_stay_pending() {
        let reg = Registry::default();
        fill(&reg, &[0, 1, 2]);

        let part = reg.partition(&Selector::In([1].into_iter().collect()), false);
        assert_eq!(orders(&part.eligible), vec![1]);
        assert!(part.deferred.is_empty());
        assert_eq!(reg.pending(), 2);

        // a later run only sees what is still pending
        let part = reg.partition(&Selector::All, false);
        assert_eq!(orders(&part.eligible), vec![0, 2]);
        assert_eq!(reg.pending(), 0);
    }

    #[test]
    fn launched_tasks_are_never_returned_again() {
        let reg = Registry::default();
        fill(&reg, &[0, 0]);
        assert_eq!(reg.partition(&Selector::All, true).eligible.len(), 2);
        let part = reg.partition(&Selector::All, true);
        assert!(part.eligible.is_empty());
        assert!(part.deferred.is_empty());
    }
}
