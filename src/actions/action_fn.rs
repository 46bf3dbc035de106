//! # Function-backed action (`ActionFn`)
//!
//! [`ActionFn`] wraps a closure `F: Fn(CancellationToken) -> Fut`, producing a
//! fresh future per run. This avoids shared mutable state inside the closure;
//! if shared state is needed, capture an explicit `Arc<...>`.
//!
//! ## Example
//! ```rust
//! use tokio_util::sync::CancellationToken;
//! use quiesce::{ActionFn, ActionRef, ActionError};
//!
//! let save: ActionRef = ActionFn::arc(|ctx: CancellationToken| async move {
//!     if ctx.is_cancelled() {
//!         return Err(ActionError::Canceled);
//!     }
//!     // persist the document...
//!     Ok(())
//! });
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::actions::action::Action;
use crate::error::ActionError;

/// Function-backed action implementation.
///
/// Wraps a closure that *creates* a new future per run.
#[derive(Debug)]
pub struct ActionFn<F> {
    f: F,
}

impl<F> ActionFn<F> {
    /// Creates a new function-backed action.
    ///
    /// Prefer [`ActionFn::arc`] when you immediately need an [`ActionRef`](crate::ActionRef).
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the action and returns it as a shared handle (`Arc<dyn Action>`).
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F, Fut> Action for ActionFn<F>
where
    F: Fn(CancellationToken) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<(), ActionError>> + Send + 'static,
{
    async fn run(&self, ctx: CancellationToken) -> Result<(), ActionError> {
        (self.f)(ctx).await
    }
}
