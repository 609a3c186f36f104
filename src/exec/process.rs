// src/exec/process.rs

//! Production runner: one OS process per action.

use anyhow::Context;
use tracing::debug;

use super::command::ActionCommand;
use super::runner::{ActionOutcome, ActionRunner, RunFuture};

/// Runs the action as a child process and waits for it to exit.
///
/// The child inherits the working directory, environment and stdio of
/// `quiesce`. It is not killed if the scheduler moves on while it runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ActionRunner for ProcessRunner {
    fn run<'a>(&'a self, command: &'a ActionCommand) -> RunFuture<'a> {
        Box::pin(async move {
            let mut child = command
                .to_command()
                .kill_on_drop(false)
                .spawn()
                .with_context(|| format!("spawning action `{command}`"))?;

            debug!(pid = ?child.id(), "action process started");

            let status = child
                .wait()
                .await
                .with_context(|| format!("waiting for action `{command}`"))?;

            Ok(ActionOutcome::from(status))
        })
    }
}
