//! Error types used by the controller and by tasks.
//!
//! This module defines two independent error enums:
//!
//! - [`RunError`] — the only error a [`Controller::run`](crate::Controller::run) or
//!   [`Controller::run_all`](crate::Controller::run_all) call can return. It always
//!   originates from the supplied [`Context`](crate::Context).
//! - [`TaskError`] — errors returned by individual task bodies. They are observed by
//!   the engine (the task still counts as completed) and published on the event bus,
//!   but never escalated to the run caller.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use std::any::Any;

use thiserror::Error;

/// # Errors returned by a run call.
///
/// A run resolves with an error only when its cancellation context fires before
/// the stopping rule is satisfied.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunError {
    /// The context was cancelled manually.
    #[error("context canceled")]
    Canceled,

    /// The context deadline passed.
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

impl RunError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use hands::RunError;
    ///
    /// assert_eq!(RunError::DeadlineExceeded.as_label(), "run_deadline_exceeded");
    /// assert_eq!(RunError::Canceled.to_string(), "context canceled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RunError::Canceled => "run_canceled",
            RunError::DeadlineExceeded => "run_deadline_exceeded",
        }
    }
}

/// # Errors produced by task execution.
///
/// A task runs exactly once; none of these variants trigger a retry.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TaskError {
    /// Task body reported a failure.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Task observed its context and stopped early.
    #[error("context cancelled")]
    Canceled,

    /// Task body panicked; the panic was contained by the engine.
    #[error("task panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text.
        info: String,
    },
}

impl TaskError {
    /// Convenience constructor for [`TaskError::Fail`].
    pub fn fail(error: impl Into<String>) -> Self {
        TaskError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use hands::TaskError;
    ///
    /// let err = TaskError::fail("boom");
    /// assert_eq!(err.as_label(), "task_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Canceled => "task_canceled",
            TaskError::Panicked { .. } => "task_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TaskError::Fail { error } => format!("error: {error}"),
            TaskError::Canceled => "context cancelled".to_string(),
            TaskError::Panicked { info } => format!("panic: {info}"),
        }
    }
}

/// Renders a caught panic payload as text.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_error_messages_match_context_errors() {
        assert_eq!(RunError::Canceled.to_string(), "context canceled");
        assert_eq!(
            RunError::DeadlineExceeded.to_string(),
            "context deadline exceeded"
        );
        assert_eq!(RunError::Canceled.as_label(), "run_canceled");
    }

    #[test]
    fn task_error_labels() {
        assert_eq!(TaskError::fail("x").as_label(), "task_failed");
        assert_eq!(TaskError::Canceled.as_label(), "task_canceled");
        let p = TaskError::Panicked { info: "oops".into() };
        assert_eq!(p.as_label(), "task_panicked");
        assert_eq!(p.as_message(), "panic: oops");
        assert_eq!(p.to_string(), "task panicked: oops");
    }

    #[test]
    fn panic_payloads_render_as_text() {
        let s: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(&*s), "static");
        let s: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(&*s), "owned");
        let s: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(&*s), "unknown panic");
    }
}
