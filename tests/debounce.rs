//! Debounce semantics: burst coalescing, key independence, deferral, and the
//! documented supersede-while-running race.
//!
//! All tests run under paused tokio time, so virtual delays are deterministic.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use quiesce::{ActionError, ActionFn, ActionRef, Config, Debouncer, EventKind};

/// Action that appends `label` to a shared log when it runs.
fn recording(log: Arc<Mutex<Vec<&'static str>>>, label: &'static str) -> ActionRef {
    ActionFn::arc(move |_ctx: CancellationToken| {
        let log = Arc::clone(&log);
        async move {
            log.lock().unwrap().push(label);
            Ok(())
        }
    })
}

#[tokio::test(start_paused = true)]
async fn burst_for_one_key_runs_only_the_last_action() {
    let debouncer = Debouncer::<&str>::builder(Config::default()).build();
    let log = Arc::new(Mutex::new(Vec::new()));

    for label in ["first", "second", "third"] {
        debouncer
            .submit("1", recording(Arc::clone(&log), label), Duration::from_secs(3))
            .unwrap();
    }

    tokio::time::sleep(Duration::from_secs(4)).await;

    assert_eq!(*log.lock().unwrap(), vec!["third"]);
    assert!(debouncer.is_idle());
}

#[tokio::test(start_paused = true)]
async fn distinct_keys_debounce_independently() {
    let debouncer = Debouncer::<&str>::builder(Config::default()).build();
    let log = Arc::new(Mutex::new(Vec::new()));

    for (key, first, second) in [("1", "k1-old", "k1-new"), ("2", "k2-old", "k2-new")] {
        debouncer
            .submit(key, recording(Arc::clone(&log), first), Duration::from_secs(3))
            .unwrap();
        debouncer
            .submit(key, recording(Arc::clone(&log), second), Duration::from_secs(3))
            .unwrap();
    }

    tokio::time::sleep(Duration::from_secs(4)).await;

    let ran = log.lock().unwrap();
    assert_eq!(ran.len(), 2, "exactly one execution per key, got {ran:?}");
    assert!(ran.contains(&"k1-new"));
    assert!(ran.contains(&"k2-new"));
}

#[tokio::test(start_paused = true)]
async fn zero_delay_still_defers_out_of_the_calling_stack() {
    let debouncer = Debouncer::<&str>::builder(Config::default()).build();
    let ran = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&ran);
    let action: ActionRef = ActionFn::arc(move |_ctx: CancellationToken| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    });

    debouncer.submit("k", action, Duration::ZERO).unwrap();

    // Nothing may run synchronously inside submit.
    assert_eq!(ran.load(Ordering::SeqCst), 0);

    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(ran.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn superseded_action_is_suppressed_even_when_already_due() {
    // Both submissions land before either timer task first polls, with the
    // window already elapsed (zero delay): the displaced submission's token
    // and its sleep are ready on the same poll, and cancellation must win.
    for _ in 0..50 {
        let debouncer = Debouncer::<&str>::builder(Config::default()).build();
        let log = Arc::new(Mutex::new(Vec::new()));

        debouncer
            .submit("k", recording(Arc::clone(&log), "first"), Duration::ZERO)
            .unwrap();
        debouncer
            .submit("k", recording(Arc::clone(&log), "second"), Duration::ZERO)
            .unwrap();

        tokio::time::sleep(Duration::from_millis(1)).await;

        assert_eq!(
            *log.lock().unwrap(),
            vec!["second"],
            "never-started superseded action must not run"
        );
    }
}

#[tokio::test(start_paused = true)]
async fn resubmitting_after_completion_is_a_fresh_cycle() {
    let debouncer = Debouncer::<&str>::builder(Config::default()).build();
    let log = Arc::new(Mutex::new(Vec::new()));

    debouncer
        .submit("k", recording(Arc::clone(&log), "a"), Duration::from_millis(10))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;

    // Superseding a completed (already self-removed) entry must be a no-op
    // for the old task and a normal schedule for the new one.
    debouncer
        .submit("k", recording(Arc::clone(&log), "b"), Duration::from_millis(10))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);
}

#[tokio::test(start_paused = true)]
async fn failing_action_is_reported_and_does_not_block_its_key() {
    let debouncer = Debouncer::<&str>::builder(Config::default()).build();
    let mut rx = debouncer.bus().subscribe();

    let failing: ActionRef = ActionFn::arc(|_ctx: CancellationToken| async move {
        Err(ActionError::Fail {
            error: "disk full".into(),
        })
    });
    debouncer.submit("k", failing, Duration::from_millis(5)).unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    let log = Arc::new(Mutex::new(Vec::new()));
    debouncer
        .submit("k", recording(Arc::clone(&log), "after"), Duration::from_millis(5))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert_eq!(*log.lock().unwrap(), vec!["after"]);

    let mut kinds = Vec::new();
    let mut terminal = 0;
    while let Ok(ev) = rx.try_recv() {
        if ev.is_terminal() {
            terminal += 1;
        }
        kinds.push(ev.kind);
    }
    assert!(kinds.contains(&EventKind::ActionFailed));
    // The key recovered: the follow-up submission fired and completed.
    assert!(kinds.contains(&EventKind::ActionCompleted));
    assert_eq!(terminal, 2, "one terminal event per fired submission");
}

#[tokio::test(start_paused = true)]
async fn supersede_events_are_published_per_displaced_submission() {
    let debouncer = Debouncer::<&str>::builder(Config::default()).build();
    let mut rx = debouncer.bus().subscribe();
    let log = Arc::new(Mutex::new(Vec::new()));

    for label in ["first", "second", "third"] {
        debouncer
            .submit("1", recording(Arc::clone(&log), label), Duration::from_secs(3))
            .unwrap();
    }
    tokio::time::sleep(Duration::from_secs(4)).await;

    let mut scheduled = 0;
    let mut superseded = 0;
    let mut fired = 0;
    while let Ok(ev) = rx.try_recv() {
        match ev.kind {
            EventKind::ActionScheduled => scheduled += 1,
            EventKind::ActionSuperseded => superseded += 1,
            EventKind::ActionFired => fired += 1,
            _ => {}
        }
    }
    assert_eq!(scheduled, 3);
    assert_eq!(superseded, 2);
    assert_eq!(fired, 1);
}

#[tokio::test(start_paused = true)]
async fn supersede_of_a_running_action_is_advisory() {
    let debouncer = Debouncer::<&str>::builder(Config::default()).build();
    let log = Arc::new(Mutex::new(Vec::new()));

    // Ignores its token: once started, it always completes.
    let stubborn = {
        let log = Arc::clone(&log);
        ActionFn::arc(move |_ctx: CancellationToken| {
            let log = Arc::clone(&log);
            async move {
                tokio::time::sleep(Duration::from_secs(2)).await;
                log.lock().unwrap().push("old-running");
                Ok(())
            }
        })
    };

    debouncer.submit("k", stubborn, Duration::from_secs(1)).unwrap();

    // Let the window elapse so the old action is in flight.
    tokio::time::sleep(Duration::from_millis(1500)).await;

    debouncer
        .submit("k", recording(Arc::clone(&log), "new"), Duration::from_secs(1))
        .unwrap();
    tokio::time::sleep(Duration::from_secs(3)).await;

    // Known race, documented behavior: both the old in-flight action and the
    // new submission run.
    let ran = log.lock().unwrap();
    assert_eq!(ran.len(), 2, "expected both executions, got {ran:?}");
    assert!(ran.contains(&"old-running"));
    assert!(ran.contains(&"new"));
}
