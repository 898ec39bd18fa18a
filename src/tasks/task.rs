//! # Task abstraction.
//!
//! A task receives a [`Context`] and may periodically check it to stop early.
//! The engine never interrupts a running body; a body that ignores its context
//! runs to natural completion even after its round has returned.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{context::Context, error::TaskError};

/// Shared handle to a task.
pub type TaskRef = Arc<dyn Task>;

/// # Asynchronous, cooperatively cancelable unit of work.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use hands::{Context, Task, TaskError};
///
/// struct Probe;
///
/// #[async_trait]
/// impl Task for Probe {
///     async fn run(&self, ctx: Context) -> Result<(), TaskError> {
///         if ctx.is_cancelled() {
///             return Err(TaskError::Canceled);
///         }
///         // do work...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Task: Send + Sync + 'static {
    /// Executes the task once.
    ///
    /// The returned error is observed by the engine but never surfaces from the run call.
    async fn run(&self, ctx: Context) -> Result<(), TaskError>;
}
