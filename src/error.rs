//! Error types used by the debounce runtime and actions.
//!
//! This module defines three error enums:
//!
//! - [`SubmitError`] — synchronous rejection of a submission.
//! - [`ActionError`] — errors raised by individual action executions.
//! - [`RuntimeError`] — errors raised by the runtime itself (shutdown drain).
//!
//! All types provide helper methods (`as_label`, `as_message`) for logging/metrics.
//! Action failures are contained to their key: they are published on the event
//! bus as `ActionFailed` and never propagate to unrelated callers.

use std::time::Duration;
use thiserror::Error;

/// # Synchronous rejection of a `submit` call.
///
/// A submission is never silently dropped: once [`Debouncer::shutdown`] has
/// begun, every further [`Debouncer::submit`] returns this error instead of
/// accepting work that would not run.
///
/// [`Debouncer::shutdown`]: crate::Debouncer::shutdown
/// [`Debouncer::submit`]: crate::Debouncer::submit
#[non_exhaustive]
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SubmitError {
    /// The debouncer is shutting down (or already shut down) and no longer
    /// accepts scheduled work.
    #[error("submission rejected: debouncer is shut down")]
    Rejected,
}

impl SubmitError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use quiesce::SubmitError;
    ///
    /// assert_eq!(SubmitError::Rejected.as_label(), "submit_rejected");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SubmitError::Rejected => "submit_rejected",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SubmitError::Rejected => "debouncer shut down; submission rejected".to_string(),
        }
    }
}

/// # Errors produced by action execution.
///
/// A failing action affects only its own key: the failure is reported as an
/// `ActionFailed` event and the key is immediately free for new submissions
/// (the registry entry is released before the attempt).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ActionError {
    /// Action execution failed.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Action observed cooperative cancellation and exited early.
    #[error("context cancelled")]
    Canceled,
}

impl ActionError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use quiesce::ActionError;
    ///
    /// let err = ActionError::Fail { error: "boom".into() };
    /// assert_eq!(err.as_label(), "action_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ActionError::Fail { .. } => "action_failed",
            ActionError::Canceled => "action_canceled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ActionError::Fail { error } => format!("error: {error}"),
            ActionError::Canceled => "context cancelled".to_string(),
        }
    }

    /// True for cooperative-cancellation exits, which are treated as graceful
    /// (published as `ActionCompleted`, not `ActionFailed`).
    pub fn is_canceled(&self) -> bool {
        matches!(self, ActionError::Canceled)
    }
}

/// # Errors produced by the debounce runtime.
///
/// These represent failures of the coordination layer itself, such as a
/// shutdown drain exceeding its grace period.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Shutdown grace period was exceeded; some scheduled or in-flight
    /// actions were still live when the wait gave up.
    #[error("shutdown grace {grace:?} exceeded; {stuck} task(s) still live")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Number of timer/action tasks that had not exited in time.
        stuck: usize,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use quiesce::RuntimeError;
    /// use std::time::Duration;
    ///
    /// let err = RuntimeError::GraceExceeded { grace: Duration::from_secs(5), stuck: 1 };
    /// assert_eq!(err.as_label(), "runtime_grace_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::GraceExceeded { .. } => "runtime_grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::GraceExceeded { grace, stuck } => {
                format!("grace exceeded after {grace:?}; stuck tasks={stuck}")
            }
        }
    }
}
