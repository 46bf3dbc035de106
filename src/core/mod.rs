//! Runtime core: keyed debounce coordination and lifecycle.
//!
//! This module contains the embedded implementation of the debounce runtime.
//! The public API from this module is [`Debouncer`], [`DebouncerBuilder`] and
//! [`Config`].
//!
//! Internal modules:
//! - [`registry`]: pending-submission map with atomic per-key swap semantics;
//! - [`runner`]: drives one submission through its timer, slot release, and
//!   action execution with event publishing;
//! - [`debouncer`]: submit/supersede/shutdown coordination;
//! - [`builder`]: wires bus, subscribers, and registry together.

mod builder;
mod config;
mod debouncer;
mod registry;
mod runner;

pub use builder::DebouncerBuilder;
pub use config::Config;
pub use debouncer::Debouncer;
