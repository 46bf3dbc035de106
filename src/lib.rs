//! # quiesce
//!
//! **quiesce** is a keyed debounce runtime for tokio.
//!
//! Given a key identifying a logical action, a delayed action, and a
//! quiescence delay, it guarantees that only the most recent submission for
//! that key within the quiescence window executes; earlier pending
//! submissions for the same key are superseded and cancelled. Submissions for
//! distinct keys are fully independent.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   submit(k1, a, d)   submit(k1, a', d)   submit(k2, b, d)
//!         │                  │                  │
//!         ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Debouncer (keyed coordinator)                                    │
//! │  - PendingMap (key → {id, cancel token}, atomic swap per key)     │
//! │  - TaskTracker (joins timer/action tasks on shutdown)             │
//! │  - Bus (broadcast events)                                         │
//! │  - SubscriberSet (fans out to user subscribers)                   │
//! └──────┬──────────────────────┬──────────────────────┬──────────────┘
//!        ▼                      ▼                      ▼
//!  ┌────────────┐        ┌────────────┐        ┌────────────┐
//!  │ timer task │        │ timer task │        │ timer task │
//!  │  (k1, old) │◄─cancel│  (k1, new) │        │    (k2)    │
//!  └────────────┘        └─────┬──────┘        └─────┬──────┘
//!                              │ window elapses      │
//!                              ▼                     ▼
//!                     release slot (guarded)  release slot (guarded)
//!                         action.run()            action.run()
//! ```
//!
//! ### Per-key lifecycle
//! ```text
//! submit(key, action, delay)
//!   ├─► Pending { id, token } swapped into PendingMap   (put-and-get-previous)
//!   │       └─ displaced entry cancelled                (supersede)
//!   └─► timer task: sleep(delay) vs token
//!         ├─ token fired  → release own slot (guarded), exit; action never runs
//!         └─ window done  → release own slot (guarded)
//!                           → run action (panic-isolated)
//!                           → ActionCompleted / ActionFailed
//! ```
//!
//! ## Guarantees and non-guarantees
//! - The action runs **no earlier than** `delay` after its submission and
//!   never on the submitter's stack, `delay == 0` included.
//! - For one key, a submission that the registry recognizes after an earlier
//!   one suppresses the earlier action entirely (it is cancelled while
//!   pending).
//! - Suppression of an **already-started** action is best-effort: its token
//!   is cancelled, but whether it stops early is up to the action. In the
//!   worst case an old running action and the new pending one both execute
//!   for the same key. See [`Debouncer::submit`].
//! - After [`Debouncer::shutdown`], `submit` fails with
//!   [`SubmitError::Rejected`] rather than silently dropping work.
//!
//! ## Features
//! | Area              | Description                                                          | Key types / traits                  |
//! |-------------------|----------------------------------------------------------------------|-------------------------------------|
//! | **Actions**       | Define actions as trait impls or closures.                           | [`Action`], [`ActionFn`], [`ActionRef`] |
//! | **Coordination**  | Keyed supersede/cancel of pending work, explicit lifecycle.          | [`Debouncer`], [`DebouncerBuilder`] |
//! | **Subscriber API**| Hook into runtime events (logging, metrics, custom subscribers).     | [`Subscribe`], [`SubscriberSet`]    |
//! | **Errors**        | Typed errors for submission, actions, and shutdown.                  | [`SubmitError`], [`ActionError`], [`RuntimeError`] |
//! | **Configuration** | Centralize runtime settings.                                         | [`Config`]                          |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use quiesce::{ActionFn, ActionRef, Config, Debouncer};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let debouncer = Debouncer::<String>::builder(Config::default()).build();
//!
//!     let save: ActionRef = ActionFn::arc(|_ctx: CancellationToken| async move {
//!         // persist the document...
//!         Ok::<_, quiesce::ActionError>(())
//!     });
//!
//!     // Three rapid submissions for one document; only the last will run
//!     // once 50ms pass without a newer one.
//!     for _ in 0..3 {
//!         debouncer.submit("doc-42".to_string(), save.clone(), Duration::from_millis(50))?;
//!     }
//!
//!     tokio::time::sleep(Duration::from_millis(80)).await;
//!     debouncer.shutdown().await?;
//!     Ok(())
//! }
//! ```

mod actions;
mod core;
mod error;
mod events;
mod subscribers;

// ---- Public re-exports ----

pub use actions::{Action, ActionFn, ActionRef};
pub use crate::core::{Config, Debouncer, DebouncerBuilder};
pub use error::{ActionError, RuntimeError, SubmitError};
pub use events::{Bus, Event, EventKind};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
