//! # Action abstraction.
//!
//! This module defines the [`Action`] trait, the unit of work a debouncer
//! schedules. The common handle type is [`ActionRef`], an `Arc<dyn Action>`.
//!
//! An action receives a [`CancellationToken`]. The token fires when the
//! submission is superseded or the debouncer shuts down; an action that has
//! already started may check it to stop cooperatively, but is not required to.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::ActionError;

/// Shared handle to an action (`Arc<dyn Action>`).
pub type ActionRef = Arc<dyn Action>;

/// # Asynchronous, cancel-aware unit of work.
///
/// An `Action` is executed at most once per submission, after the submission's
/// quiescence window elapses without a newer submission for the same key.
///
/// Returning [`ActionError::Canceled`] signals a graceful early exit in
/// response to cancellation; it is not reported as a failure.
///
/// # Example
/// ```
/// use tokio_util::sync::CancellationToken;
/// use async_trait::async_trait;
/// use quiesce::{Action, ActionError};
///
/// struct Flush;
///
/// #[async_trait]
/// impl Action for Flush {
///     async fn run(&self, ctx: CancellationToken) -> Result<(), ActionError> {
///         if ctx.is_cancelled() {
///             return Err(ActionError::Canceled);
///         }
///         // do work...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Action: Send + Sync + 'static {
    /// Executes the action until completion or cooperative cancellation.
    ///
    /// Long-running implementations should check `ctx.is_cancelled()` at safe
    /// points and exit promptly; short callbacks may ignore the token.
    async fn run(&self, ctx: CancellationToken) -> Result<(), ActionError>;
}
