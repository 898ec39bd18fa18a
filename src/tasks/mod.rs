//! # Task abstractions and registration attributes.
//!
//! This module provides the core task-related types:
//! - [`Task`] - trait for implementing async, cooperatively cancelable tasks
//! - [`TaskFn`] - function-backed task implementation
//! - [`TaskRef`] - shared reference to a task (`Arc<dyn Task>`)
//! - [`TaskSpec`] - a registered task together with its priority, label and order
//! - [`TaskOption`] - registration options (priority, label)

mod spec;
mod task;
mod task_fn;

pub use spec::{TaskOption, TaskSpec};
pub use task::{Task, TaskRef};
pub use task_fn::TaskFn;
