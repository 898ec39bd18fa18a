//! # Event subscribers.
//!
//! This module provides the [`Subscribe`] trait and a fan-out [`SubscriberSet`]
//! delivering controller events to each subscriber through its own bounded queue.
//!
//! ## Architecture
//! ```text
//! Controller / tasks ── publish(Event) ──► Bus ──► listener ──► SubscriberSet::emit
//!                                                                 ├──► [queue] ──► LogWriter
//!                                                                 └──► [queue] ──► custom
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use async_trait::async_trait;
//! use hands::{Event, EventKind, Subscribe};
//!
//! struct FailureCounter;
//!
//! #[async_trait]
//! impl Subscribe for FailureCounter {
//!     async fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::TaskFailed {
//!             // increment failure counter
//!         }
//!     }
//! }
//! ```

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
