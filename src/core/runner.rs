//! # Run a single scheduled submission.
//!
//! Drives one submission from "timer armed" to a terminal state: waits out the
//! quiescence window, releases the submission's registry slot, and executes
//! the action with panic isolation, publishing lifecycle events to [`Bus`].
//!
//! ## Event flow
//!
//! ```text
//! Superseded / shutdown before due:
//!   token fires → release own slot (guarded) → exit, no event
//!
//! Window elapsed:
//!   release own slot (guarded) → publish ActionFired
//!     → action.run() → Ok(())            → publish ActionCompleted
//!                    → Err(Canceled)     → publish ActionCompleted (graceful exit)
//!                    → Err(Fail)         → publish ActionFailed
//!                    → panic             → publish ActionFailed ("action panicked")
//! ```
//!
//! ## Rules
//! - The slot release is **guarded**: it only removes the entry whose
//!   submission id matches this task's. A newer entry installed while this
//!   task was waking up is left untouched.
//! - The slot is released **before** the action runs, so a failing or
//!   panicking action can never leave its key blocked.
//! - `sleep` is a minimum wait: the action never runs earlier than `delay`,
//!   and never on the submitter's call stack (`delay == 0` included).
//! - The wait is a **biased** select with the token polled first: a token
//!   cancelled before this task observes the elapsed window always wins, even
//!   when both branches are ready on the same poll (zero delay, or a
//!   supersede landing as the window expires). An action that never started
//!   is guaranteed suppressed.
//! - Cancellation that lands after the window elapsed is advisory: the action
//!   may observe the token and stop, or run to completion.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio_util::sync::CancellationToken;

use crate::actions::ActionRef;
use crate::core::registry::PendingMap;
use crate::events::{Bus, Event, EventKind};

/// Waits out the quiescence window and executes the action once, publishing
/// lifecycle events to `bus`.
///
/// `id` is the submission sequence number guarding the slot release; `repr`
/// is the key's `Debug` rendering used in events.
pub(crate) async fn run_scheduled<K>(
    key: K,
    repr: Arc<str>,
    id: u64,
    delay: Duration,
    token: CancellationToken,
    action: ActionRef,
    pending: Arc<PendingMap<K>>,
    bus: Bus,
) where
    K: Eq + Hash + Send + Sync + 'static,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => {
            // Superseded or shutdown. If superseded, the slot already holds
            // the newer entry and this is a no-op.
            pending.remove_if_current(&key, id);
            return;
        }
        _ = tokio::time::sleep(delay) => {}
    }

    // Due. Release our slot first so a concurrent submit sees an empty slot
    // rather than a stale entry, then hand the key to the action.
    pending.remove_if_current(&key, id);
    bus.publish(Event::new(EventKind::ActionFired).with_key(Arc::clone(&repr)));

    let fut = action.run(token.clone());
    match std::panic::AssertUnwindSafe(fut).catch_unwind().await {
        Ok(Ok(())) => publish_completed(&bus, repr),
        // Cooperative cancellation is a graceful exit, not a failure.
        Ok(Err(e)) if e.is_canceled() => publish_completed(&bus, repr),
        Ok(Err(e)) => publish_failed(&bus, repr, e.as_message()),
        Err(panic_err) => {
            publish_failed(&bus, repr, format!("action panicked: {panic_err:?}"));
        }
    }
}

/// Publishes `ActionCompleted` (success or graceful cancellation).
fn publish_completed(bus: &Bus, repr: Arc<str>) {
    bus.publish(Event::new(EventKind::ActionCompleted).with_key(repr));
}

/// Publishes `ActionFailed` with error details.
fn publish_failed(bus: &Bus, repr: Arc<str>, reason: String) {
    bus.publish(
        Event::new(EventKind::ActionFailed)
            .with_key(repr)
            .with_reason(reason),
    );
}
