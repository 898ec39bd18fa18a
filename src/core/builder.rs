use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

use super::{config::ControllerConfig, controller::Controller};
use crate::{
    events::Bus,
    subscribers::{Subscribe, SubscriberSet},
};

/// Builder for constructing a [`Controller`] with optional subscribers.
pub struct ControllerBuilder {
    cfg: ControllerConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl ControllerBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: ControllerConfig) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive controller events (rounds, task lifecycle, failures)
    /// through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the controller.
    ///
    /// With subscribers configured this spawns the fan-out listener and therefore
    /// must be called inside a tokio runtime. The listener stops once the
    /// controller and every task it launched are gone.
    pub fn build(self) -> Controller {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        if !self.subscribers.is_empty() {
            let subs = SubscriberSet::new(self.subscribers, &bus);
            spawn_listener(&bus, subs);
        }
        Controller::new_internal(self.cfg, bus)
    }
}

/// Forwards bus events to the subscriber set until the bus closes.
fn spawn_listener(bus: &Bus, subs: SubscriberSet) {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(ev) => subs.emit(&ev),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "subscriber listener lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
        subs.shutdown().await;
    });
}
