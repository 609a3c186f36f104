use std::sync::{Arc, Mutex};

use quiesce::exec::{ActionCommand, ActionOutcome, ActionRunner, RunFuture};
use tokio::sync::Notify;
use tokio::time::Instant;

/// One recorded action start.
#[derive(Debug, Clone)]
pub struct RecordedRun {
    /// When the runner was invoked, on the tokio clock (paused in tests).
    pub at: Instant,
    pub command: String,
}

/// A fake runner that:
/// - records every invocation with its tokio timestamp
/// - optionally fails to "start" (returns `Err`)
/// - optionally blocks each run until [`RecordingRunner::release`] is called
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    runs: Arc<Mutex<Vec<RecordedRun>>>,
    finished: Arc<Mutex<usize>>,
    fail_to_start: bool,
    exit_code: i32,
    gate: Option<Arc<Notify>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every run returns a start error instead of an outcome.
    pub fn failing() -> Self {
        Self {
            fail_to_start: true,
            ..Self::default()
        }
    }

    /// Runs report this exit code.
    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    /// Runs block after being recorded until `release` is called.
    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Notify::new())),
            ..Self::default()
        }
    }

    /// Let one gated run finish.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn runs(&self) -> Vec<RecordedRun> {
        self.runs.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.runs.lock().unwrap().len()
    }

    /// Runs that returned (successfully or not).
    pub fn finished(&self) -> usize {
        *self.finished.lock().unwrap()
    }

    /// Start times relative to `origin`, in whole seconds.
    pub fn fire_offsets(&self, origin: Instant) -> Vec<u64> {
        self.runs()
            .iter()
            .map(|r| r.at.duration_since(origin).as_secs())
            .collect()
    }
}

impl ActionRunner for RecordingRunner {
    fn run<'a>(&'a self, command: &'a ActionCommand) -> RunFuture<'a> {
        Box::pin(async move {
            self.runs.lock().unwrap().push(RecordedRun {
                at: Instant::now(),
                command: command.to_string(),
            });

            if let Some(gate) = &self.gate {
                gate.notified().await;
            }

            *self.finished.lock().unwrap() += 1;

            if self.fail_to_start {
                anyhow::bail!("spawning action `{command}`: no such file or directory");
            }
            Ok(ActionOutcome::exited(self.exit_code))
        })
    }
}
