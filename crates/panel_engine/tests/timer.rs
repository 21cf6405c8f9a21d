use std::sync::{Arc, Mutex};
use std::time::Duration;

use panel_core::Category;
use panel_engine::{ConfirmTimers, EngineEvent, EventSink};
use pretty_assertions::assert_eq;

#[derive(Default)]
struct TestSink {
    events: Mutex<Vec<EngineEvent>>,
}

impl TestSink {
    fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl EventSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

async fn advance(duration: Duration) {
    tokio::time::sleep(duration).await;
    // Let woken timer tasks run.
    tokio::task::yield_now().await;
}

#[tokio::test(start_paused = true)]
async fn timer_fires_after_window() {
    let sink = Arc::new(TestSink::default());
    let mut timers = ConfirmTimers::new();
    let runtime = tokio::runtime::Handle::current();

    timers.arm(&runtime, Category::Stale, 1, Duration::from_secs(3), sink.clone());
    advance(Duration::from_millis(2900)).await;
    assert!(sink.take().is_empty());

    advance(Duration::from_millis(200)).await;
    assert_eq!(
        sink.take(),
        vec![EngineEvent::ConfirmWindowElapsed {
            category: Category::Stale,
            token: 1,
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn cancelled_timer_never_fires() {
    let sink = Arc::new(TestSink::default());
    let mut timers = ConfirmTimers::new();
    let runtime = tokio::runtime::Handle::current();

    timers.arm(&runtime, Category::Launches, 4, Duration::from_secs(3), sink.clone());
    advance(Duration::from_secs(1)).await;
    timers.cancel(Category::Launches, 4);
    advance(Duration::from_secs(5)).await;

    assert!(sink.take().is_empty());
}

#[tokio::test(start_paused = true)]
async fn cancel_with_old_token_keeps_current_timer() {
    let sink = Arc::new(TestSink::default());
    let mut timers = ConfirmTimers::new();
    let runtime = tokio::runtime::Handle::current();

    timers.arm(&runtime, Category::NameDisc, 1, Duration::from_secs(3), sink.clone());
    timers.arm(&runtime, Category::NameDisc, 2, Duration::from_secs(3), sink.clone());
    timers.cancel(Category::NameDisc, 1);
    advance(Duration::from_secs(4)).await;

    // Re-arming cancelled token 1; token 2 still fires.
    assert_eq!(
        sink.take(),
        vec![EngineEvent::ConfirmWindowElapsed {
            category: Category::NameDisc,
            token: 2,
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn categories_time_out_independently() {
    let sink = Arc::new(TestSink::default());
    let mut timers = ConfirmTimers::new();
    let runtime = tokio::runtime::Handle::current();

    timers.arm(&runtime, Category::Stale, 1, Duration::from_secs(3), sink.clone());
    advance(Duration::from_secs(2)).await;
    timers.arm(&runtime, Category::Unauthorized, 2, Duration::from_secs(3), sink.clone());
    timers.cancel(Category::Stale, 1);
    advance(Duration::from_secs(4)).await;

    assert_eq!(
        sink.take(),
        vec![EngineEvent::ConfirmWindowElapsed {
            category: Category::Unauthorized,
            token: 2,
        }]
    );
}
