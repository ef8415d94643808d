//! Async commit lifecycle of Pagination

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::oneshot;
use tui_controls_components::{InteractionState, Pagination, PaginationProps};
use tui_controls_core::testing::{key_event, RenderHarness};
use tui_controls_core::{Commit, Component};

#[derive(Debug, Clone, PartialEq)]
enum Action {
    PageSet(i64),
}

/// A host whose commits settle when the test says so
#[derive(Default)]
struct GatedHost {
    calls: Mutex<Vec<i64>>,
    gates: Mutex<Vec<oneshot::Sender<Result<(), String>>>>,
}

impl GatedHost {
    fn set_value(&self, page: i64) -> Commit<Action> {
        self.calls.lock().unwrap().push(page);
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push(tx);
        Commit::action(Action::PageSet(page)).then(async move {
            match rx.await {
                Ok(outcome) => outcome,
                Err(_) => Ok(()),
            }
        })
    }

    fn release(&self, outcome: Result<(), String>) {
        let gate = self.gates.lock().unwrap().remove(0);
        let _ = gate.send(outcome);
    }

    fn calls(&self) -> Vec<i64> {
        self.calls.lock().unwrap().clone()
    }
}

fn next_page(
    pagination: &mut Pagination,
    value: i64,
    set_value: &dyn Fn(i64) -> Commit<Action>,
) -> Vec<Action> {
    pagination
        .handle_event(
            &key_event("right"),
            PaginationProps {
                value,
                min: 1,
                max: 10,
                is_focused: true,
                set_value,
            },
        )
        .into_iter()
        .collect()
}

fn screen(
    pagination: &mut Pagination,
    value: i64,
    set_value: &dyn Fn(i64) -> Commit<Action>,
) -> String {
    let mut render = RenderHarness::new(70, 1);
    render.render_to_string_plain(|frame| {
        pagination.render(
            frame,
            frame.area(),
            PaginationProps {
                value,
                min: 1,
                max: 10,
                is_focused: false,
                set_value,
            },
        )
    })
}

#[tokio::test]
async fn test_async_commit_is_busy_then_idle() {
    let host = GatedHost::default();
    let set_value = |page| host.set_value(page);
    let mut pagination = Pagination::new();

    assert_eq!(next_page(&mut pagination, 1, &set_value), vec![Action::PageSet(2)]);
    assert!(pagination.is_busy());
    assert!(screen(&mut pagination, 2, &set_value).ends_with("loading"));

    host.release(Ok(()));
    let settlement = tokio::time::timeout(Duration::from_millis(500), pagination.settled())
        .await
        .expect("timeout");

    assert_eq!(settlement.key, 2);
    assert!(settlement.is_ok());
    assert_eq!(pagination.state(), InteractionState::Idle);
    assert!(!screen(&mut pagination, 2, &set_value).contains("loading"));
}

#[tokio::test]
async fn test_rejected_commit_returns_to_idle_with_error() {
    let host = GatedHost::default();
    let set_value = |page| host.set_value(page);
    let mut pagination = Pagination::new();

    next_page(&mut pagination, 1, &set_value);
    host.release(Err("server unavailable".to_string()));

    let settlement = tokio::time::timeout(Duration::from_millis(500), pagination.settled())
        .await
        .expect("timeout");

    assert_eq!(
        settlement.error().map(ToString::to_string).as_deref(),
        Some("server unavailable")
    );
    assert!(!pagination.is_busy());

    // Not stuck: the next activation commits again
    assert_eq!(next_page(&mut pagination, 1, &set_value), vec![Action::PageSet(2)]);
    assert_eq!(host.calls(), vec![2, 2]);
}

#[tokio::test]
async fn test_commits_are_serialized() {
    let host = GatedHost::default();
    let set_value = |page| host.set_value(page);
    let mut pagination = Pagination::new();

    next_page(&mut pagination, 1, &set_value);
    for _ in 0..5 {
        assert!(next_page(&mut pagination, 2, &set_value).is_empty());
    }
    assert_eq!(host.calls(), vec![2]);
    assert!(pagination.poll_settled().is_none());

    host.release(Ok(()));
    tokio::time::timeout(Duration::from_millis(500), pagination.settled())
        .await
        .expect("timeout");
    assert_eq!(next_page(&mut pagination, 2, &set_value), vec![Action::PageSet(3)]);
    assert_eq!(host.calls(), vec![2, 3]);
}

#[tokio::test]
async fn test_drop_while_pending_is_safe() {
    let finished = Arc::new(AtomicBool::new(false));
    let (release, released) = oneshot::channel::<()>();
    let released = Mutex::new(Some(released));

    let set_value = {
        let finished = Arc::clone(&finished);
        move |page: i64| {
            let released = released.lock().unwrap().take();
            let finished = Arc::clone(&finished);
            Commit::action(Action::PageSet(page)).then_wait(async move {
                if let Some(released) = released {
                    let _ = released.await;
                }
                finished.store(true, Ordering::SeqCst);
            })
        }
    };

    let mut pagination = Pagination::new();
    next_page(&mut pagination, 1, &set_value);
    assert!(pagination.is_busy());

    drop(pagination);
    release.send(()).unwrap();

    // The host's future still runs to completion; its settlement goes nowhere
    tokio::time::timeout(Duration::from_millis(500), async {
        while !finished.load(Ordering::SeqCst) {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("commit future finished");
}

#[tokio::test(start_paused = true)]
async fn test_delayed_commit_in_select_loop() {
    let page = Arc::new(Mutex::new(1_i64));
    let set_value = {
        let page = Arc::clone(&page);
        move |next: i64| {
            *page.lock().unwrap() = next;
            Commit::action(Action::PageSet(next))
                .then_wait(tokio::time::sleep(Duration::from_millis(1000)))
        }
    };

    let mut pagination = Pagination::new();
    next_page(&mut pagination, 1, &set_value);
    assert_eq!(*page.lock().unwrap(), 2, "value updates before the commit settles");

    let started = tokio::time::Instant::now();
    let mut ticks = 0;
    let mut interval = tokio::time::interval(Duration::from_millis(250));
    loop {
        tokio::select! {
            _ = interval.tick() => {
                ticks += 1;
                assert!(pagination.is_busy());
            }
            settlement = pagination.settled() => {
                assert!(settlement.is_ok());
                break;
            }
        }
    }

    assert!(started.elapsed() >= Duration::from_millis(1000));
    assert!(ticks >= 4);
    assert!(!pagination.is_busy());
}
