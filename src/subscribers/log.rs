//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//! This is primarily useful for development, debugging, and examples.
//!
//! ## Output format
//! ```text
//! [scheduled] key="doc-42" delay=300ms
//! [superseded] key="doc-42"
//! [fired] key="doc-42"
//! [completed] key="doc-42"
//! [failed] key="doc-42" err="disk full"
//! [shutdown-requested]
//! [drain-completed]
//! [grace-exceeded]
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};

use super::Subscribe;

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Prints human-readable event
/// descriptions to stdout for debugging and demonstration purposes.
///
/// Not intended for production use - implement a custom [`Subscribe`] for
/// structured logging or metrics collection.
#[derive(Default)]
pub struct LogWriter;

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::ActionScheduled => {
                println!(
                    "[scheduled] key={} delay={}ms",
                    e.key.as_deref().unwrap_or("?"),
                    e.delay_ms.unwrap_or(0)
                );
            }
            EventKind::ActionSuperseded => {
                println!("[superseded] key={}", e.key.as_deref().unwrap_or("?"));
            }
            EventKind::ActionFired => {
                println!("[fired] key={}", e.key.as_deref().unwrap_or("?"));
            }
            EventKind::ActionCompleted => {
                println!("[completed] key={}", e.key.as_deref().unwrap_or("?"));
            }
            EventKind::ActionFailed => {
                println!(
                    "[failed] key={} err={:?}",
                    e.key.as_deref().unwrap_or("?"),
                    e.reason
                );
            }
            EventKind::ShutdownRequested => {
                println!("[shutdown-requested]");
            }
            EventKind::DrainCompleted => {
                println!("[drain-completed]");
            }
            EventKind::GraceExceeded => {
                println!("[grace-exceeded]");
            }
        }
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
