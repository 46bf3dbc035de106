//! # Debouncer: keyed coordination of delayed actions.
//!
//! The [`Debouncer`] owns the pending-submission registry, the runtime
//! cancellation token, and the task tracker. It serializes the
//! "register new, supersede old" transition per key so no two callers can
//! race to leave two live pending tasks for the same key.
//!
//! ## Submission flow
//! ```text
//! submit(key, action, delay)
//!   ├─► reject if shutdown begun               (SubmitError::Rejected)
//!   ├─► allocate submission id, child token    (fresh cancellation handle)
//!   ├─► registry.replace(key, Pending)         (atomic put-and-get-previous)
//!   │       └─ displaced entry? → cancel it    (supersede, publish ActionSuperseded)
//!   ├─► tracker.spawn(run_scheduled(...))      (timer task, see core/runner)
//!   └─► re-check shutdown; withdraw + reject if it raced in
//! ```
//!
//! ## Per-key slot lifecycle
//! ```text
//! ABSENT ──submit──► PENDING ──window elapses──► RUNNING ──finish──► ABSENT
//!                      │   ▲                       │
//!            superseded│   │submit                 │ (slot already released;
//!                      ▼   │                       │  a new submit installs a
//!                    ABSENT┘                       ▼  fresh, independent entry)
//!                                               ABSENT
//! ```
//!
//! ## Rules
//! - For one key, a submission recognized by the registry after an earlier one
//!   guarantees the earlier action does not run (it is cancelled while
//!   pending). No ordering is guaranteed across different keys, nor between
//!   two racing submissions for the same key: whichever swap lands last wins.
//! - `delay` is a minimum wait, never an exact deadline.
//! - `submit` never blocks on action completion; the only synchronization is
//!   the per-key shard lock of the registry swap.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::Duration;

use tokio::time;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::actions::ActionRef;
use crate::core::builder::DebouncerBuilder;
use crate::core::config::Config;
use crate::core::registry::{Pending, PendingMap};
use crate::core::runner::run_scheduled;
use crate::error::{RuntimeError, SubmitError};
use crate::events::{Bus, Event, EventKind};

/// Keyed debounce coordinator.
///
/// For each key, at most one submission is pending at a time; a newer
/// submission displaces and cancels the older one. The action of the last
/// submission before the quiescence window elapses runs exactly once.
///
/// Construct via [`DebouncerBuilder`]; instances are independent, so tests can
/// run several side by side. The lifecycle is explicit:
/// construct → accept submissions → [`shutdown`](Self::shutdown) → reject.
///
/// ## Cancellation race
/// Suppression of a superseded submission is guaranteed only while it is
/// *pending*. If its quiescence window had already elapsed when the supersede
/// landed, the old action may be running; cancellation is then advisory (the
/// action may observe its token and stop early) and, in the worst case, the
/// old running action and the new pending one both execute for the same key.
pub struct Debouncer<K>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
{
    pending: Arc<PendingMap<K>>,
    bus: Bus,
    cfg: Config,
    /// Root token; every submission derives a child from it.
    runtime: CancellationToken,
    /// Tracks every spawned timer/action task for join-on-shutdown.
    tracker: TaskTracker,
    /// Submission sequence numbers for the guarded slot release.
    seq: AtomicU64,
}

impl<K> Debouncer<K>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
{
    /// Returns a builder for a debouncer with the given configuration.
    pub fn builder(cfg: Config) -> DebouncerBuilder<K> {
        DebouncerBuilder::new(cfg)
    }

    pub(crate) fn new_internal(cfg: Config, bus: Bus, runtime: CancellationToken) -> Self {
        Self {
            pending: Arc::new(PendingMap::new()),
            bus,
            cfg,
            runtime,
            tracker: TaskTracker::new(),
            seq: AtomicU64::new(0),
        }
    }

    /// Schedules `action` to run once `delay` elapses with no newer
    /// submission for `key`, superseding any pending submission for that key.
    ///
    /// Never blocks on action completion and never runs the action on the
    /// caller's stack, including `delay == 0`. Must be called from within a
    /// tokio runtime.
    ///
    /// # Errors
    /// Returns [`SubmitError::Rejected`] once [`shutdown`](Self::shutdown)
    /// has begun; the action is then guaranteed not to run.
    pub fn submit(&self, key: K, action: ActionRef, delay: Duration) -> Result<(), SubmitError> {
        if self.runtime.is_cancelled() {
            return Err(SubmitError::Rejected);
        }

        let id = self.seq.fetch_add(1, AtomicOrdering::Relaxed);
        let token = self.runtime.child_token();
        let repr: Arc<str> = Arc::from(format!("{key:?}"));

        // Atomic put-and-get-previous: the displaced entry, if any, is exactly
        // the submission this one supersedes.
        let prev = self.pending.replace(
            key.clone(),
            Pending {
                id,
                cancel: token.clone(),
            },
        );
        if let Some(prev) = prev {
            prev.cancel.cancel();
            self.bus
                .publish(Event::new(EventKind::ActionSuperseded).with_key(Arc::clone(&repr)));
        }

        self.tracker.spawn(run_scheduled(
            key.clone(),
            Arc::clone(&repr),
            id,
            delay,
            token,
            action,
            Arc::clone(&self.pending),
            self.bus.clone(),
        ));

        // A shutdown that raced with this call has already cancelled the
        // child token; withdraw the entry so the caller learns of the
        // rejection instead of the action being silently dropped.
        if self.runtime.is_cancelled() {
            self.pending.remove_if_current(&key, id);
            return Err(SubmitError::Rejected);
        }

        self.bus.publish(
            Event::new(EventKind::ActionScheduled)
                .with_key(repr)
                .with_delay(delay),
        );
        Ok(())
    }

    /// Stops accepting submissions and drains scheduled work.
    ///
    /// Cancels the runtime token (every pending timer exits without running
    /// its action; in-flight actions observe cooperative cancellation), then
    /// waits up to [`Config::grace`] for all tracked tasks to exit.
    ///
    /// Idempotent: repeated calls re-wait on the remaining tasks and do not
    /// re-publish `ShutdownRequested`.
    ///
    /// # Errors
    /// Returns [`RuntimeError::GraceExceeded`] when tasks are still live after
    /// the grace period.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        if !self.runtime.is_cancelled() {
            self.bus.publish(Event::new(EventKind::ShutdownRequested));
            self.runtime.cancel();
        }

        self.tracker.close();
        match time::timeout(self.cfg.grace, self.tracker.wait()).await {
            Ok(()) => {
                self.bus.publish(Event::new(EventKind::DrainCompleted));
                Ok(())
            }
            Err(_elapsed) => {
                let stuck = self.tracker.len();
                self.bus.publish(Event::new(EventKind::GraceExceeded));
                Err(RuntimeError::GraceExceeded {
                    grace: self.cfg.grace,
                    stuck,
                })
            }
        }
    }

    /// Number of keys with a pending (scheduled, not yet due) submission.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// True when no submission is pending for any key.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Handle to the event bus, for direct subscription.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }
}
