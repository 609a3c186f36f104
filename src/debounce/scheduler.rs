// src/debounce/scheduler.rs

use std::fmt;
use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

use crate::debounce::pending::{ActionId, ActionPhase, CancelOutcome, PendingAction, PhaseCell};
use crate::debounce::window::DebounceWindow;
use crate::exec::{ActionCommand, ActionOutcome, ActionRunner};

/// Collapses bursts of events into a single action run.
///
/// Holds at most one [`PendingAction`]. Every event invalidates the previous
/// one before a new one is created, so two events can never both end up
/// running the command unless the first one had already started it.
///
/// `notify_event` takes `&mut self`; the watch loop awaits it inline, so
/// calls are serialized and the pending slot needs no lock.
pub struct Scheduler {
    window: DebounceWindow,
    command: Arc<ActionCommand>,
    runner: Arc<dyn ActionRunner>,
    throttle: bool,
    pending: Option<PendingAction>,
    next_id: u64,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("window", &self.window)
            .field("command", &self.command)
            .field("throttle", &self.throttle)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl Scheduler {
    /// New scheduler with throttling enabled.
    pub fn new(
        window: DebounceWindow,
        command: ActionCommand,
        runner: Arc<dyn ActionRunner>,
    ) -> Self {
        Self {
            window,
            command: Arc::new(command),
            runner,
            throttle: true,
            pending: None,
            next_id: 0,
        }
    }

    /// Enable or disable the inline half-delay wait in `notify_event`.
    pub fn with_throttle(mut self, throttle: bool) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn window(&self) -> DebounceWindow {
        self.window
    }

    pub fn command(&self) -> &ActionCommand {
        &self.command
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    /// True if an action is waiting to fire or currently running.
    pub fn is_scheduled(&self) -> bool {
        self.pending.as_ref().is_some_and(PendingAction::is_live)
    }

    /// React to one batch of filesystem events.
    ///
    /// 1. log the batch
    /// 2. cancel whatever is pending
    /// 3. wait `half_delay` inline when throttling (the watcher buffers
    ///    events meanwhile; they arrive as the next batch)
    /// 4. schedule a new action that fires after another `half_delay`
    pub async fn notify_event(&mut self, description: &str) -> ActionId {
        info!(event = %description, "received filesystem event");

        self.cancel_pending();

        let half = self.window.half();
        if self.throttle && !half.is_zero() {
            debug!(?half, "throttling before rescheduling");
            tokio::time::sleep(half).await;
        }

        self.schedule()
    }

    /// Cancel the pending action, if any.
    ///
    /// Never blocks and always leaves the slot empty. An action whose
    /// command has already started keeps running.
    pub fn cancel_pending(&mut self) -> CancelOutcome {
        let Some(mut pending) = self.pending.take() else {
            debug!("no pending action to cancel");
            return CancelOutcome::Idle;
        };

        let id = pending.id;
        match pending
            .phase
            .transition(ActionPhase::Waiting, ActionPhase::Cancelled)
        {
            Ok(()) => {
                if let Some(wake) = pending.wake.take() {
                    // Receiver gone means the task already saw the phase change.
                    let _ = wake.send(());
                }
                info!(action_id = %id, "canceled pending action");
                CancelOutcome::Cancelled(id)
            }
            Err(ActionPhase::Firing) => {
                info!(
                    action_id = %id,
                    "action already running; letting it complete"
                );
                CancelOutcome::AlreadyRunning(id)
            }
            Err(observed) => {
                warn!(
                    action_id = %id,
                    phase = ?observed,
                    task_finished = pending.is_task_finished(),
                    "no pending action found for handle"
                );
                CancelOutcome::Stale(id)
            }
        }
    }

    fn schedule(&mut self) -> ActionId {
        self.next_id += 1;
        let id = ActionId(self.next_id);

        let phase = Arc::new(PhaseCell::new());
        let (wake_tx, wake_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(run_scheduled(
            id,
            self.window,
            Arc::clone(&self.command),
            Arc::clone(&self.runner),
            Arc::clone(&phase),
            wake_rx,
        ));

        self.pending = Some(PendingAction {
            id,
            phase,
            wake: Some(wake_tx),
            handle,
        });

        info!(
            action_id = %id,
            fires_in = ?self.window.half(),
            "scheduled action"
        );
        id
    }
}

/// Body of the background task behind a [`PendingAction`].
async fn run_scheduled(
    id: ActionId,
    window: DebounceWindow,
    command: Arc<ActionCommand>,
    runner: Arc<dyn ActionRunner>,
    phase: Arc<PhaseCell>,
    mut wake: oneshot::Receiver<()>,
) {
    let half = window.half();
    let woken = if half.is_zero() {
        false
    } else {
        tokio::select! {
            biased;
            _ = &mut wake => true,
            _ = tokio::time::sleep(half) => false,
        }
    };

    if woken {
        // Either an explicit cancel or the scheduler was dropped.
        let _ = phase.transition(ActionPhase::Waiting, ActionPhase::Cancelled);
        debug!(action_id = %id, "pending action cancelled while waiting");
        return;
    }

    if let Err(observed) = phase.transition(ActionPhase::Waiting, ActionPhase::Firing) {
        debug!(action_id = %id, phase = ?observed, "pending action cancelled before firing");
        return;
    }

    fire(id, window, &command, runner.as_ref()).await;
    phase.set(ActionPhase::Finished);
}

/// Run the action once and log how it went.
///
/// Failures are logged only; there is no retry within a window.
pub async fn fire(
    id: ActionId,
    window: DebounceWindow,
    command: &ActionCommand,
    runner: &dyn ActionRunner,
) -> Option<ActionOutcome> {
    info!(
        action_id = %id,
        command = %command,
        "performing action after {:?} of inactivity",
        window.delay()
    );

    match runner.run(command).await {
        Ok(outcome) if outcome.success() => {
            info!(action_id = %id, "action completed successfully");
            Some(outcome)
        }
        Ok(outcome) => {
            warn!(
                action_id = %id,
                exit_code = ?outcome.exit_code,
                "action exited with failure status"
            );
            Some(outcome)
        }
        Err(err) => {
            let chain = format!("{err:#}");
            error!(action_id = %id, error = %chain, "failed to start action");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::RunFuture;

    struct FixedRunner(Option<i32>);

    impl ActionRunner for FixedRunner {
        fn run<'a>(&'a self, _command: &'a ActionCommand) -> RunFuture<'a> {
            let code = self.0;
            Box::pin(async move {
                match code {
                    Some(code) => Ok(ActionOutcome::exited(code)),
                    None => anyhow::bail!("spawn failed"),
                }
            })
        }
    }

    fn command() -> ActionCommand {
        ActionCommand::new(vec!["true".to_string()], false).unwrap()
    }

    #[tokio::test]
    async fn fire_reports_outcome_or_none_on_start_failure() {
        let window = DebounceWindow::from_secs(2);

        let ok = fire(ActionId(1), window, &command(), &FixedRunner(Some(0))).await;
        assert_eq!(ok, Some(ActionOutcome::exited(0)));

        let failed = fire(ActionId(2), window, &command(), &FixedRunner(Some(3))).await;
        assert_eq!(failed.and_then(|o| o.exit_code), Some(3));

        assert_eq!(fire(ActionId(3), window, &command(), &FixedRunner(None)).await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn new_scheduler_is_idle() {
        let mut sched = Scheduler::new(
            DebounceWindow::from_secs(4),
            command(),
            Arc::new(FixedRunner(Some(0))),
        );
        assert!(!sched.is_scheduled());
        assert!(sched.pending().is_none());
        assert_eq!(sched.cancel_pending(), CancelOutcome::Idle);
    }
}
