//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to runtime events emitted by the debouncer core and its
//! timer tasks.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Debouncer::submit`, timer tasks (`core/runner`),
//!   `Debouncer::shutdown`.
//! - **Consumers**: the listener spawned by `DebouncerBuilder::build` (fans
//!   out to `SubscriberSet`), plus any direct `Bus::subscribe` receivers.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
