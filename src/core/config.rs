//! # Global runtime configuration.
//!
//! Provides [`Config`] centralized settings for the debounce runtime.
//!
//! Config is consumed by [`DebouncerBuilder`](crate::DebouncerBuilder), which
//! sizes the event bus and fixes the shutdown grace window at build time.

use std::time::Duration;

/// Global configuration for the debounce runtime.
///
/// Defines:
/// - **Shutdown behavior**: grace period for draining timer/action tasks
/// - **Event system**: bus capacity for event delivery
///
/// ## Field semantics
/// - `grace`: maximum wait for tasks to exit after [`Debouncer::shutdown`]
///   cancels them (`0s` = do not wait, report immediately)
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped)
///
/// [`Debouncer::shutdown`]: crate::Debouncer::shutdown
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum time to wait for timer and in-flight action tasks to exit
    /// during shutdown.
    ///
    /// When shutdown is requested:
    /// - all pending and in-flight tasks are cancelled via `CancellationToken`
    /// - the debouncer waits up to `grace` for them to exit
    /// - if exceeded, `shutdown` returns `RuntimeError::GraceExceeded`
    pub grace: Duration,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Slow receivers that lag behind more than `bus_capacity` messages will
    /// observe `Lagged` and skip older items. Minimum value is 1 (enforced by Bus).
    pub bus_capacity: usize,
}

impl Config {
    /// Returns a bus capacity clamped to a minimum of 1.
    ///
    /// The `Bus` uses this value to avoid constructing an invalid channel.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `grace = 5s` (debounced actions are expected to be short callbacks)
    /// - `bus_capacity = 1024` (good baseline)
    fn default() -> Self {
        Self {
            grace: Duration::from_secs(5),
            bus_capacity: 1024,
        }
    }
}
