// src/exec/runner.rs

//! Pluggable action runner abstraction.
//!
//! The scheduler talks to an `ActionRunner` instead of spawning processes
//! itself. Production uses [`ProcessRunner`]; tests provide a runner that
//! records calls against the (paused) tokio clock.

use std::future::Future;
use std::pin::Pin;
use std::process::ExitStatus;

use anyhow::Result;

use super::command::ActionCommand;

/// How a started action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Exit code, or `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl ActionOutcome {
    pub fn exited(code: i32) -> Self {
        Self {
            exit_code: Some(code),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

impl From<ExitStatus> for ActionOutcome {
    fn from(status: ExitStatus) -> Self {
        Self {
            exit_code: status.code(),
        }
    }
}

/// Boxed future returned by [`ActionRunner::run`].
pub type RunFuture<'a> = Pin<Box<dyn Future<Output = Result<ActionOutcome>> + Send + 'a>>;

/// Trait abstracting how the action is executed.
///
/// `Err` means the action could not be started (or waited on); a command
/// that ran and exited non-zero is an `Ok` outcome.
pub trait ActionRunner: Send + Sync {
    fn run<'a>(&'a self, command: &'a ActionCommand) -> RunFuture<'a>;
}
