//! Debounced actions: trait and function-backed implementation.
//!
//! This module defines the [`Action`] trait (async, cancel-aware) and a
//! convenient function-backed implementation [`ActionFn`]. The common handle
//! type is [`ActionRef`], an `Arc<dyn Action>` suitable for sharing across the
//! runtime.
//!
//! An action receives a `CancellationToken` derived from its submission. The
//! token fires when the submission is superseded by a newer one for the same
//! key or when the debouncer shuts down; long-running actions may observe it
//! to exit early. Checking it is optional — suppression of an already-started
//! action is best-effort by design.

mod action;
mod action_fn;

pub use action::{Action, ActionRef};
pub use action_fn::ActionFn;
