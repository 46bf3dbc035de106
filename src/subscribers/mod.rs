//! # Event subscribers for the debounce runtime.
//!
//! This module provides the [`Subscribe`] trait and the [`SubscriberSet`]
//! fan-out used to deliver runtime events broadcast through the
//! [`Bus`](crate::events::Bus).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   submit()/timers ── publish(Event) ──► Bus ──► listener ──► SubscriberSet
//!                                                                  │
//!                                                        ┌─────────┼─────────┐
//!                                                        ▼         ▼         ▼
//!                                                    LogWriter  Metrics   Custom
//! ```
//!
//! ## Implementing custom subscribers
//! ```rust
//! use quiesce::{Subscribe, Event, EventKind};
//! use async_trait::async_trait;
//!
//! struct FailureCounter;
//!
//! #[async_trait]
//! impl Subscribe for FailureCounter {
//!     async fn on_event(&self, event: &Event) {
//!         if matches!(event.kind, EventKind::ActionFailed) {
//!             // increment failure counter
//!         }
//!     }
//! }
//! ```

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscriber;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;
