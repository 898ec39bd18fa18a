//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to publish
//! controller activity: registrations, round start/resolution, per-task
//! lifecycle, the deferred launch and the final drain.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Controller` (registration, rounds), `core::runner` (task
//!   lifecycle), `core::tracker` (drain), `SubscriberSet` workers (overflow/panic).
//! - **Consumers**: the controller's subscriber listener, which fans out to the
//!   configured [`Subscribe`](crate::Subscribe) implementations.

mod bus;
mod event;

pub use bus::{Bus, WeakBus};
pub use event::{Event, EventKind};
