//! # Cancellation context passed to runs and task bodies.
//!
//! A [`Context`] bundles a [`CancellationToken`] with an optional deadline. It is
//! the single cancellation signal a run call races its stopping rule against, and
//! the value every task body receives.
//!
//! ## Rules
//! - Cancellation is **cooperative**: firing a context never interrupts a task body;
//!   bodies must poll [`Context::is_cancelled`] or await [`Context::done`].
//! - The first cause is **latched**: [`RunError::Canceled`] for manual cancellation,
//!   [`RunError::DeadlineExceeded`] when the deadline passed first.
//! - A deadline context spawns a watcher (when created inside a runtime) that
//!   cancels the token at the deadline, so code awaiting [`Context::token`] wakes up too.
//! - [`Context::background`] cannot fire: its [`Context::token`] is a detached child.
//! - Deadlines use the tokio clock ([`tokio::time::Instant`]), so paused-time tests
//!   behave deterministically.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use hands::{Context, RunError};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let ctx = Context::with_timeout(Duration::from_millis(5));
//! assert_eq!(ctx.done().await, RunError::DeadlineExceeded);
//! assert!(ctx.is_cancelled());
//! # }
//! ```

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

use crate::error::RunError;

/// Cooperative cancellation signal with an optional deadline.
///
/// Cheap to clone; all clones observe the same cancellation.
#[derive(Clone, Debug)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
    cause: Arc<OnceLock<RunError>>,
    cancelable: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}

impl Context {
    fn build(token: CancellationToken, deadline: Option<Instant>, cancelable: bool) -> Self {
        Self {
            token,
            deadline,
            cause: Arc::new(OnceLock::new()),
            cancelable,
        }
    }

    /// A context that never fires. [`Context::cancel`] is a no-op on it.
    pub fn background() -> Self {
        Self::build(CancellationToken::new(), None, false)
    }

    /// A context fired by [`Context::cancel`].
    pub fn with_cancel() -> Self {
        Self::build(CancellationToken::new(), None, true)
    }

    /// A cancelable context that also fires once `timeout` has elapsed.
    ///
    /// Must be called inside a tokio runtime (the deadline is read from the tokio clock).
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// A cancelable context that also fires at `deadline`.
    ///
    /// Inside a tokio runtime a watcher task cancels the token at the deadline,
    /// so code awaiting [`Context::token`] wakes without anyone polling the context.
    pub fn with_deadline(deadline: Instant) -> Self {
        let ctx = Self::build(CancellationToken::new(), Some(deadline), true);
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let watch = ctx.clone();
            handle.spawn(async move {
                watch.done().await;
            });
        }
        ctx
    }

    /// Wraps an existing token; cancelling the token cancels the context.
    pub fn from_token(token: CancellationToken) -> Self {
        Self::build(token, None, true)
    }

    /// Returns a token cancelled when this context fires.
    ///
    /// On [`Context::background`] this is a detached child token: cancelling it
    /// never fires the context. Prefer awaiting [`Context::done`] in task bodies,
    /// which also observes the deadline outside a runtime-driven watcher.
    pub fn token(&self) -> CancellationToken {
        if self.cancelable {
            self.token.clone()
        } else {
            self.token.child_token()
        }
    }

    /// Returns the deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Cancels the context with [`RunError::Canceled`] unless it already fired.
    pub fn cancel(&self) {
        if !self.cancelable {
            return;
        }
        let _ = self.cause.get_or_init(|| RunError::Canceled);
        self.token.cancel();
    }

    /// Returns `true` once the context has fired (manually or by deadline).
    pub fn is_cancelled(&self) -> bool {
        self.err().is_some()
    }

    /// Returns the latched cause, or `None` while the context is live.
    pub fn err(&self) -> Option<RunError> {
        if let Some(cause) = self.cause.get() {
            return Some(*cause);
        }
        if self.deadline.is_some_and(|at| Instant::now() >= at) {
            return Some(self.expire());
        }
        if self.cancelable && self.token.is_cancelled() {
            return Some(*self.cause.get_or_init(|| RunError::Canceled));
        }
        None
    }

    /// Waits until the context fires and returns the cause.
    ///
    /// Pends forever on [`Context::background`].
    pub async fn done(&self) -> RunError {
        if !self.cancelable {
            return std::future::pending().await;
        }
        if let Some(cause) = self.err() {
            return cause;
        }
        match self.deadline {
            Some(at) => {
                tokio::select! {
                    _ = self.token.cancelled() => {}
                    _ = time::sleep_until(at) => return self.expire(),
                }
            }
            None => self.token.cancelled().await,
        }
        self.err().unwrap_or(RunError::Canceled)
    }

    fn expire(&self) -> RunError {
        let cause = *self.cause.get_or_init(|| RunError::DeadlineExceeded);
        self.token.cancel();
        cause
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_ignores_cancel() {
        let ctx = Context::background();
        ctx.cancel();
        assert!(!ctx.is_cancelled());
        assert_eq!(ctx.err(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn background_token_is_detached() {
        let ctx = Context::background();
        let token = ctx.token();
        token.cancel();
        assert!(token.is_cancelled());
        assert!(!ctx.is_cancelled());
        assert!(!ctx.token().is_cancelled());

        let fired = time::timeout(Duration::from_millis(50), ctx.done()).await;
        assert!(fired.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_cancels_token_without_polling() {
        let ctx = Context::with_timeout(Duration::from_millis(30));
        let token = ctx.token();
        time::timeout(Duration::from_millis(100), token.cancelled())
            .await
            .expect("token cancelled at the deadline");
        assert_eq!(ctx.err(), Some(RunError::DeadlineExceeded));
    }

    #[test]
    fn manual_cancel_is_latched() {
        let ctx = Context::with_cancel();
        let clone = ctx.clone();
        assert!(!clone.is_cancelled());
        ctx.cancel();
        assert_eq!(clone.err(), Some(RunError::Canceled));
        assert!(clone.token().is_cancelled());
    }

    #[test]
    fn external_token_cancels_context() {
        let token = CancellationToken::new();
        let ctx = Context::from_token(token.clone());
        token.cancel();
        assert_eq!(ctx.err(), Some(RunError::Canceled));
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_fires_with_deadline_exceeded() {
        let ctx = Context::with_timeout(Duration::from_millis(50));
        assert!(!ctx.is_cancelled());
        assert_eq!(ctx.done().await, RunError::DeadlineExceeded);
        assert!(ctx.token().is_cancelled());

        // cancel after expiry keeps the first cause
        ctx.cancel();
        assert_eq!(ctx.err(), Some(RunError::DeadlineExceeded));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_before_deadline_wins() {
        let ctx = Context::with_timeout(Duration::from_secs(10));
        let waiter = {
            let ctx = ctx.clone();
            tokio::spawn(async move { ctx.done().await })
        };
        time::sleep(Duration::from_millis(1)).await;
        ctx.cancel();
        assert_eq!(waiter.await.unwrap(), RunError::Canceled);
    }
}
