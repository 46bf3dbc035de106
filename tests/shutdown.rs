//! Shutdown lifecycle: rejection of late submissions, cancellation of pending
//! work, idempotence, cooperative drain, and grace overrun reporting.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use quiesce::{ActionError, ActionFn, ActionRef, Config, Debouncer, RuntimeError, SubmitError};

fn counting(counter: Arc<AtomicUsize>) -> ActionRef {
    ActionFn::arc(move |_ctx: CancellationToken| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    })
}

#[tokio::test(start_paused = true)]
async fn submit_after_shutdown_is_rejected() {
    let debouncer = Debouncer::<&str>::builder(Config::default()).build();
    debouncer.shutdown().await.unwrap();

    let ran = Arc::new(AtomicUsize::new(0));
    let err = debouncer
        .submit("k", counting(Arc::clone(&ran)), Duration::from_millis(5))
        .unwrap_err();
    assert_eq!(err, SubmitError::Rejected);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(ran.load(Ordering::SeqCst), 0, "rejected action must not run");
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_pending_submissions() {
    let debouncer = Debouncer::<&str>::builder(Config::default()).build();
    let ran = Arc::new(AtomicUsize::new(0));

    debouncer
        .submit("k", counting(Arc::clone(&ran)), Duration::from_secs(10))
        .unwrap();
    assert_eq!(debouncer.pending_len(), 1);

    debouncer.shutdown().await.unwrap();

    tokio::time::sleep(Duration::from_secs(20)).await;
    assert_eq!(ran.load(Ordering::SeqCst), 0, "cancelled pending action ran");
    assert!(debouncer.is_idle());
}

#[tokio::test(start_paused = true)]
async fn shutdown_suppresses_an_accepted_zero_delay_submission() {
    // The submission is accepted and its window has already elapsed, but the
    // timer task has not polled yet when shutdown cancels it: the action must
    // never run even though sleep(0) and the token are ready together.
    let debouncer = Debouncer::<&str>::builder(Config::default()).build();
    let ran = Arc::new(AtomicUsize::new(0));

    debouncer
        .submit("k", counting(Arc::clone(&ran)), Duration::ZERO)
        .unwrap();
    debouncer.shutdown().await.unwrap();

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(ran.load(Ordering::SeqCst), 0, "never-started action ran after shutdown");
    assert!(debouncer.is_idle());
}

#[tokio::test(start_paused = true)]
async fn shutdown_is_idempotent() {
    let debouncer = Debouncer::<&str>::builder(Config::default()).build();
    debouncer.shutdown().await.unwrap();
    debouncer.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn cooperative_in_flight_action_drains_within_grace() {
    let debouncer = Debouncer::<&str>::builder(Config::default()).build();
    let observed_cancel = Arc::new(AtomicUsize::new(0));

    let cooperative = {
        let observed = Arc::clone(&observed_cancel);
        ActionFn::arc(move |ctx: CancellationToken| {
            let observed = Arc::clone(&observed);
            async move {
                tokio::select! {
                    _ = ctx.cancelled() => {
                        observed.fetch_add(1, Ordering::SeqCst);
                        Err(ActionError::Canceled)
                    }
                    _ = tokio::time::sleep(Duration::from_secs(600)) => Ok(()),
                }
            }
        })
    };

    debouncer.submit("k", cooperative, Duration::ZERO).unwrap();
    // Let the window elapse so the action is in flight before shutdown.
    tokio::time::sleep(Duration::from_millis(1)).await;

    debouncer.shutdown().await.unwrap();
    assert_eq!(observed_cancel.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn grace_overrun_is_reported_not_swallowed() {
    let cfg = Config {
        grace: Duration::from_secs(1),
        ..Config::default()
    };
    let debouncer = Debouncer::<&str>::builder(cfg).build();

    // Ignores its token entirely; will outlive any grace period.
    let stubborn: ActionRef = ActionFn::arc(|_ctx: CancellationToken| async move {
        tokio::time::sleep(Duration::from_secs(600)).await;
        Ok(())
    });

    debouncer.submit("k", stubborn, Duration::ZERO).unwrap();
    tokio::time::sleep(Duration::from_millis(1)).await;

    let err = debouncer.shutdown().await.unwrap_err();
    match err {
        RuntimeError::GraceExceeded { grace, stuck } => {
            assert_eq!(grace, Duration::from_secs(1));
            assert_eq!(stuck, 1);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
