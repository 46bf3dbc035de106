//! # Runtime events emitted by the debouncer.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Submission events**: registry transitions (scheduled, superseded)
//! - **Execution events**: action flow (fired, completed, failed)
//! - **Shutdown events**: drain progress (requested, drained, grace exceeded)
//!
//! The [`Event`] struct carries additional metadata such as timestamps, the
//! rendered key, failure reasons, and the quiescence delay.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use quiesce::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::ActionScheduled)
//!     .with_key("\"doc-42\"")
//!     .with_delay(Duration::from_millis(300));
//!
//! assert_eq!(ev.kind, EventKind::ActionScheduled);
//! assert_eq!(ev.key.as_deref(), Some("\"doc-42\""));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Submission events ===
    /// A submission was accepted and its timer scheduled.
    ///
    /// Sets:
    /// - `key`: rendered key
    /// - `delay_ms`: quiescence delay (ms)
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ActionScheduled,

    /// A pending submission was displaced by a newer one for the same key
    /// and its cancellation was requested.
    ///
    /// Sets:
    /// - `key`: rendered key
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ActionSuperseded,

    // === Execution events ===
    /// A submission's quiescence window elapsed; its registry entry was
    /// released and the action is about to run.
    ///
    /// Sets:
    /// - `key`: rendered key
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ActionFired,

    /// The action finished (success **or** graceful cancellation exit).
    ///
    /// Sets:
    /// - `key`: rendered key
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ActionCompleted,

    /// The action failed (returned an error or panicked).
    ///
    /// Sets:
    /// - `key`: rendered key
    /// - `reason`: failure message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ActionFailed,

    // === Shutdown events ===
    /// Shutdown was requested; no further submissions are accepted.
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ShutdownRequested,

    /// All timer and action tasks exited within the configured grace period.
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    DrainCompleted,

    /// Grace period exceeded; some tasks were still live when the wait gave up.
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    GraceExceeded,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Rendered key (`Debug` form), if applicable.
    pub key: Option<Arc<str>>,
    /// Quiescence delay in milliseconds (compact).
    pub delay_ms: Option<u32>,
    /// Human-readable reason (errors, panic info, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            key: None,
            delay_ms: None,
            reason: None,
        }
    }

    /// Attaches a rendered key.
    #[inline]
    pub fn with_key(mut self, key: impl Into<Arc<str>>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Attaches a quiescence delay (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.delay_ms = Some(ms);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// True for terminal execution events (`ActionCompleted` / `ActionFailed`).
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, EventKind::ActionCompleted | EventKind::ActionFailed)
    }
}
