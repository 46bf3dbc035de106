//! Builder wiring for the debounce runtime.

use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::core::config::Config;
use crate::core::debouncer::Debouncer;
use crate::events::Bus;
use crate::subscribers::{Subscribe, SubscriberSet};

/// Builder for constructing a [`Debouncer`] with optional subscribers.
///
/// ## Example
/// ```rust
/// use quiesce::{Config, Debouncer};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let debouncer: std::sync::Arc<Debouncer<String>> =
///     Debouncer::builder(Config::default()).build();
/// # }
/// ```
pub struct DebouncerBuilder<K>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
{
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
    _key: PhantomData<fn(K)>,
}

impl<K> DebouncerBuilder<K>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
{
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
            _key: PhantomData,
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive runtime events (scheduling, supersedes, action
    /// outcomes, shutdown progress) through dedicated workers with bounded
    /// queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds and returns the debouncer instance.
    ///
    /// This consumes the builder and initializes all runtime components:
    /// - event bus for broadcasting
    /// - subscriber workers plus the bus → subscriber-set listener
    /// - pending registry and task tracker
    ///
    /// Must be called from within a tokio runtime when subscribers are set
    /// (their workers are spawned here).
    pub fn build(self) -> Arc<Debouncer<K>> {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let runtime_token = CancellationToken::new();

        if !self.subscribers.is_empty() {
            let subs = SubscriberSet::new(self.subscribers);
            Self::subscriber_listener(&bus, subs);
        }

        Arc::new(Debouncer::new_internal(self.cfg, bus, runtime_token))
    }

    /// Subscribes to the bus and forwards events to the subscriber set
    /// (fire-and-forget). The listener exits when the bus is dropped.
    fn subscriber_listener(bus: &Bus, subs: SubscriberSet) {
        let mut rx = bus.subscribe();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(ev) => subs.emit(&ev),
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            subs.shutdown().await;
        });
    }
}
