//! # Registered task and its attributes.
//!
//! [`TaskSpec`] is what the registry stores for every [`Controller::add`](crate::Controller::add):
//! the task itself plus the attributes the run policies look at.
//!
//! ## Rules
//! - Priority defaults to `0`, label to `None`.
//! - Options apply in order; a later `priority`/`label` overrides an earlier one.
//! - A spec is immutable once registered.

use std::fmt;
use std::sync::Arc;

use crate::tasks::task::TaskRef;

/// Registration option for a task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskOption {
    /// Sets the task priority used by `between`/`in_set` selectors.
    Priority(i32),
    /// Attaches a human-readable label (shown in events and logs).
    Label(Arc<str>),
}

impl TaskOption {
    /// Shorthand for [`TaskOption::Priority`].
    #[inline]
    pub fn priority(p: i32) -> Self {
        TaskOption::Priority(p)
    }

    /// Shorthand for [`TaskOption::Label`].
    #[inline]
    pub fn label(label: impl Into<Arc<str>>) -> Self {
        TaskOption::Label(label.into())
    }
}

/// A task registered on a controller.
#[derive(Clone)]
pub struct TaskSpec {
    task: TaskRef,
    priority: i32,
    label: Option<Arc<str>>,
    order: usize,
}

impl TaskSpec {
    /// Builds a spec for the `order`-th registered task, applying `opts` in order.
    pub(crate) fn new<I>(task: TaskRef, order: usize, opts: I) -> Self
    where
        I: IntoIterator<Item = TaskOption>,
    {
        let mut spec = Self {
            task,
            priority: 0,
            label: None,
            order,
        };
        for opt in opts {
            match opt {
                TaskOption::Priority(p) => spec.priority = p,
                TaskOption::Label(l) => spec.label = Some(l),
            }
        }
        spec
    }

    /// Returns reference to the task.
    pub fn task(&self) -> &TaskRef {
        &self.task
    }

    /// Returns the priority.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns the label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the 0-based registration order.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Name used in events: the label, or `#<order>` when unlabeled.
    pub fn display_name(&self) -> Arc<str> {
        match &self.label {
            Some(l) => Arc::clone(l),
            None => Arc::from(format!("#{}", self.order)),
        }
    }
}

impl fmt::Debug for TaskSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskSpec")
            .field("priority", &self.priority)
            .field("label", &self.label)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Context, TaskError, TaskFn};

    fn noop() -> TaskRef {
        TaskFn::arc(|_ctx: Context| async { Ok::<_, TaskError>(()) })
    }

    #[test]
    fn defaults_without_options() {
        let spec = TaskSpec::new(noop(), 3, []);
        assert_eq!(spec.priority(), 0);
        assert_eq!(spec.label(), None);
        assert_eq!(spec.order(), 3);
        assert_eq!(&*spec.display_name(), "#3");
    }

    #[test]
    fn last_option_of_a_kind_wins() {
        let spec = TaskSpec::new(
            noop(),
            0,
            [
                TaskOption::priority(1),
                TaskOption::label("first"),
                TaskOption::priority(7),
                TaskOption::label("sleep 100ms"),
            ],
        );
        assert_eq!(spec.priority(), 7);
        assert_eq!(spec.label(), Some("sleep 100ms"));
        assert_eq!(&*spec.display_name(), "sleep 100ms");
    }
}
