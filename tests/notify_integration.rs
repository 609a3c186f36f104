//! End-to-end against a real `notify` watcher on a temp directory.

use std::error::Error;
use std::fs;
use std::sync::Arc;

use tempfile::tempdir;
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};

use quiesce::build_watch_loop;
use quiesce::watch::spawn_watcher;
use quiesce_test_utils::builders::MonitorConfigBuilder;
use quiesce_test_utils::{RecordingRunner, init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn writing_a_file_runs_the_action() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    let cfg = MonitorConfigBuilder::new(0, dir.path()).build();

    let runner = RecordingRunner::new();
    let (tx, rx) = mpsc::unbounded_channel();
    let watcher = spawn_watcher(cfg.directories(), tx)?;
    let wl = build_watch_loop(&cfg, Arc::new(runner.clone()), rx);
    let handle = tokio::spawn(wl.run());

    // Give the backend a moment to register the watch.
    sleep(Duration::from_millis(200)).await;
    fs::write(dir.path().join("touched.txt"), b"hello")?;

    with_timeout(async {
        while runner.count() == 0 {
            sleep(Duration::from_millis(50)).await;
        }
    })
    .await;
    assert!(runner.count() >= 1);

    assert_eq!(watcher.roots(), cfg.directories());
    handle.abort();
    Ok(())
}

#[tokio::test]
async fn excluded_files_are_ignored() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("target"))?;
    let cfg = MonitorConfigBuilder::new(0, dir.path())
        .exclude("target")
        .exclude("target/**")
        .build();

    let runner = RecordingRunner::new();
    let (tx, rx) = mpsc::unbounded_channel();
    let _watcher = spawn_watcher(cfg.directories(), tx)?;
    let handle = tokio::spawn(build_watch_loop(&cfg, Arc::new(runner.clone()), rx).run());

    sleep(Duration::from_millis(200)).await;
    fs::write(dir.path().join("target/out.bin"), b"x")?;
    sleep(Duration::from_millis(500)).await;

    assert_eq!(runner.count(), 0);
    handle.abort();
    Ok(())
}
