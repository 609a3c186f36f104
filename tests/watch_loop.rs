use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::{Duration, Instant, sleep};

use quiesce::debounce::{ActionId, DebounceWindow, Scheduler};
use quiesce::exec::ActionCommand;
use quiesce::types::WatchEventKind;
use quiesce::watch::{EventFilter, WatchLoop, WatchResult, build_globset};
use quiesce_test_utils::builders::{close_write, created, metadata, modified, moved_to};
use quiesce_test_utils::{RecordingRunner, init_tracing};

type TestResult = Result<(), Box<dyn Error>>;

fn watch_loop(
    runner: &RecordingRunner,
    kinds: &[WatchEventKind],
    exclude: &[&str],
) -> Result<(mpsc::UnboundedSender<WatchResult>, WatchLoop), Box<dyn Error>> {
    let command = ActionCommand::new(vec!["true".to_string()], false)?;
    let scheduler = Scheduler::new(DebounceWindow::from_secs(4), command, Arc::new(runner.clone()))
        .with_throttle(false);

    let patterns: Vec<String> = exclude.iter().map(|s| s.to_string()).collect();
    let filter = EventFilter::new(
        vec![PathBuf::from("/w")],
        kinds.to_vec(),
        build_globset(&patterns)?,
    );

    let (tx, rx) = mpsc::unbounded_channel();
    Ok((tx, WatchLoop::new(scheduler, filter, rx)))
}

#[tokio::test(start_paused = true)]
async fn queued_events_form_a_single_batch() -> TestResult {
    init_tracing();
    let runner = RecordingRunner::new();
    let (tx, wl) = watch_loop(&runner, &WatchEventKind::ALL, &[])?;

    tx.send(Ok(created("/w/a")))?;
    tx.send(Ok(modified("/w/a")))?;
    tx.send(Ok(close_write("/w/a")))?;
    tx.send(Ok(moved_to("/w/b")))?;
    drop(tx);

    let scheduler = wl.run().await;
    assert_eq!(scheduler.pending().map(|p| p.id()), Some(ActionId(1)));

    sleep(Duration::from_secs(10)).await;
    assert_eq!(runner.count(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn excluded_paths_and_unselected_kinds_never_schedule() -> TestResult {
    init_tracing();
    let runner = RecordingRunner::new();
    let (tx, wl) = watch_loop(
        &runner,
        &[WatchEventKind::CloseWrite, WatchEventKind::MovedTo],
        &["target/**", "**/*.swp"],
    )?;

    tx.send(Ok(created("/w/src/main.rs")))?;
    tx.send(Ok(modified("/w/src/main.rs")))?;
    tx.send(Ok(close_write("/w/target/debug/app")))?;
    tx.send(Ok(moved_to("/w/src/.main.rs.swp")))?;
    tx.send(Ok(metadata("/w/src/main.rs")))?;
    drop(tx);

    let scheduler = wl.run().await;
    assert!(!scheduler.is_scheduled());

    sleep(Duration::from_secs(10)).await;
    assert_eq!(runner.count(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn watcher_errors_are_absorbed() -> TestResult {
    init_tracing();
    let runner = RecordingRunner::new();
    let (tx, wl) = watch_loop(&runner, &WatchEventKind::ALL, &[])?;

    let handle = tokio::spawn(wl.run());

    tx.send(Err(notify::Error::generic("inotify queue overflow")))?;
    sleep(Duration::from_secs(1)).await;
    tx.send(Ok(created("/w/a")))?;
    sleep(Duration::from_secs(10)).await;
    assert_eq!(runner.count(), 1);

    drop(tx);
    let scheduler = handle.await?;
    assert!(!scheduler.is_scheduled());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn separate_bursts_each_fire() -> TestResult {
    init_tracing();
    let runner = RecordingRunner::new();
    let (tx, wl) = watch_loop(&runner, &WatchEventKind::ALL, &[])?;
    let handle = tokio::spawn(wl.run());

    tx.send(Ok(created("/w/a")))?;
    sleep(Duration::from_secs(1)).await;
    tx.send(Ok(modified("/w/a")))?;
    sleep(Duration::from_secs(10)).await;
    assert_eq!(runner.count(), 1);

    tx.send(Ok(modified("/w/b")))?;
    sleep(Duration::from_secs(10)).await;
    assert_eq!(runner.count(), 2);

    drop(tx);
    handle.await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn events_during_the_inline_throttle_become_the_next_batch() -> TestResult {
    init_tracing();
    let runner = RecordingRunner::new();
    let command = ActionCommand::new(vec!["true".to_string()], false)?;
    // Default scheduler: throttling on.
    let scheduler =
        Scheduler::new(DebounceWindow::from_secs(10), command, Arc::new(runner.clone()));
    let filter = EventFilter::new(
        vec![PathBuf::from("/w")],
        WatchEventKind::ALL.to_vec(),
        None,
    );
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(WatchLoop::new(scheduler, filter, rx).run());
    let origin = Instant::now();

    tx.send(Ok(created("/w/a")))?;
    sleep(Duration::from_secs(2)).await;
    // Arrives while the loop sleeps out the first half (t=0..5).
    tx.send(Ok(modified("/w/a")))?;

    // First batch schedules at t=5; the buffered one cancels it at once,
    // throttles until t=10 and fires at t=15.
    sleep(Duration::from_secs(30)).await;
    assert_eq!(runner.fire_offsets(origin), vec![15]);

    drop(tx);
    handle.await?;
    Ok(())
}
