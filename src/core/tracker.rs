//! # Outstanding-work tracker and one-shot notifier.
//!
//! Counts work that is in flight on a controller and fires the registered
//! notifier when that count drains to zero.
//!
//! ## Architecture
//! ```text
//! run()/run_all() ──► hold()    ─┐
//! launch(task)    ──► launch()  ─┼─► outstanding += 1 ──► Outstanding guard
//!                                │
//! guard dropped   ──► release() ─┴─► outstanding -= 1
//!                                      └─ reached 0 and a task was launched
//!                                           since the last drain?
//!                                           ├─► publish AllDone
//!                                           └─► spawn notifier (taken, fires once)
//! ```
//!
//! ## Rules
//! - Every increment is paired with exactly one decrement through [`Outstanding`]'s `Drop`,
//!   so the count never goes negative and a panicking or aborted task still releases.
//! - A run call holds one unit for its whole duration: the eligible set draining
//!   before `run_all` launches the deferred set is not a drain.
//! - All transitions happen under one lock, so the zero transition is observed
//!   exactly once even with concurrent releases from unrelated rounds.
//! - The notifier runs on a spawned task, never inline in the releasing code.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::events::{Bus, Event, EventKind};

/// Callback fired when all launched work has finished.
pub(crate) type Notifier = Box<dyn FnOnce() + Send + 'static>;

#[derive(Default)]
struct State {
    outstanding: usize,
    launched_since_drain: bool,
    notifier: Option<Notifier>,
}

/// Shared outstanding-work counter of a controller.
pub(crate) struct Tracker {
    state: Mutex<State>,
    bus: Bus,
}

impl Tracker {
    /// Creates a new idle tracker.
    pub fn new(bus: Bus) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(State::default()),
            bus,
        })
    }

    /// Counts one unit of non-task work (a run call in progress).
    pub fn hold(self: &Arc<Self>) -> Outstanding {
        self.state.lock().outstanding += 1;
        Outstanding {
            tracker: Arc::clone(self),
        }
    }

    /// Counts one launched task.
    pub fn launch(self: &Arc<Self>) -> Outstanding {
        {
            let mut state = self.state.lock();
            state.outstanding += 1;
            state.launched_since_drain = true;
        }
        Outstanding {
            tracker: Arc::clone(self),
        }
    }

    /// Registers the notifier, replacing one that has not fired yet.
    pub fn set_notifier(&self, notifier: Notifier) {
        self.state.lock().notifier = Some(notifier);
    }

    /// Current outstanding count (run holds included).
    pub fn outstanding(&self) -> usize {
        self.state.lock().outstanding
    }

    fn release(&self) {
        let fired = {
            let mut state = self.state.lock();
            debug_assert!(state.outstanding > 0, "outstanding count underflow");
            state.outstanding = state.outstanding.saturating_sub(1);
            if state.outstanding > 0 || !state.launched_since_drain {
                return;
            }
            state.launched_since_drain = false;
            state.notifier.take()
        };

        debug!(notifier = fired.is_some(), "all launched tasks finished");
        self.bus.publish(Event::new(EventKind::AllDone));
        if let Some(notifier) = fired {
            dispatch(notifier);
        }
    }
}

/// Runs the notifier on its own task when a runtime is available.
fn dispatch(notifier: Notifier) {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move { notifier() });
        }
        Err(_) => notifier(),
    }
}

/// One counted unit of outstanding work; released on drop.
#[must_use = "dropping the guard releases the outstanding unit immediately"]
pub(crate) struct Outstanding {
    tracker: Arc<Tracker>,
}

impl Drop for Outstanding {
    fn drop(&mut self) {
        self.tracker.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::oneshot;

    fn counting(tracker: &Tracker) -> Arc<AtomicUsize> {
        let fired = Arc::new(AtomicUsize::new(0));
        let f = fired.clone();
        tracker.set_notifier(Box::new(move || {
            f.fetch_add(1, Ordering::SeqCst);
        }));
        fired
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    #[tokio::test]
    async fn fires_once_when_launched_work_drains() {
        let tracker = Tracker::new(Bus::new(8));
        let fired = counting(&tracker);

        let a = tracker.launch();
        let b = tracker.launch();
        assert_eq!(tracker.outstanding(), 2);
        drop(a);
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        drop(b);
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        // a second drain has nothing left to fire
        drop(tracker.launch());
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn hold_defers_the_drain() {
        let tracker = Tracker::new(Bus::new(8));
        let fired = counting(&tracker);

        let hold = tracker.hold();
        drop(tracker.launch());
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        drop(hold);
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn drain_without_launches_does_not_fire() {
        let tracker = Tracker::new(Bus::new(8));
        let fired = counting(&tracker);

        drop(tracker.hold());
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(tracker.outstanding(), 0);
    }

    #[tokio::test]
    async fn publishes_all_done() {
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();
        let tracker = Tracker::new(bus);
        let (tx, done) = oneshot::channel();
        tracker.set_notifier(Box::new(move || {
            let _ = tx.send(());
        }));

        drop(tracker.launch());
        assert_eq!(rx.recv().await.unwrap().kind, EventKind::AllDone);
        done.await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_releases_fire_exactly_once() {
        let tracker = Tracker::new(Bus::new(8));
        let fired = counting(&tracker);

        let hold = tracker.hold();
        let guards: Vec<Outstanding> = (0..64).map(|_| tracker.launch()).collect();
        let joins: Vec<_> = guards
            .into_iter()
            .map(|g| tokio::spawn(async move { drop(g) }))
            .collect();
        drop(hold);
        for j in joins {
            j.await.unwrap();
        }
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.outstanding(), 0);
    }
}
