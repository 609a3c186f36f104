// src/debounce/pending.rs

//! The single scheduled-or-running action and its shared phase.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Identifier of a scheduled action, unique per scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActionId(pub u64);

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a scheduled action is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ActionPhase {
    /// Sleeping out the second half of the window.
    Waiting = 0,
    /// The command is running.
    Firing = 1,
    /// The command exited (or failed to start).
    Finished = 2,
    /// Cancelled before it fired.
    Cancelled = 3,
}

impl ActionPhase {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => ActionPhase::Waiting,
            1 => ActionPhase::Firing,
            2 => ActionPhase::Finished,
            _ => ActionPhase::Cancelled,
        }
    }
}

/// Phase shared between the scheduler and the background task.
///
/// Leaving `Waiting` is a compare-and-swap: the task moves to `Firing`, the
/// scheduler moves to `Cancelled`, and only one of them can succeed.
#[derive(Debug)]
pub struct PhaseCell(AtomicU8);

impl PhaseCell {
    pub fn new() -> Self {
        Self(AtomicU8::new(ActionPhase::Waiting as u8))
    }

    pub fn get(&self) -> ActionPhase {
        ActionPhase::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Move `from -> to`; on failure returns the phase actually observed.
    pub fn transition(&self, from: ActionPhase, to: ActionPhase) -> Result<(), ActionPhase> {
        self.0
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(ActionPhase::from_u8)
    }

    pub fn set(&self, phase: ActionPhase) {
        self.0.store(phase as u8, Ordering::Release);
    }
}

impl Default for PhaseCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle held by the scheduler for the live action.
///
/// Dropping it detaches the task; a task still `Waiting` then notices its
/// wake channel closed and cancels itself.
#[derive(Debug)]
pub struct PendingAction {
    pub(crate) id: ActionId,
    pub(crate) phase: Arc<PhaseCell>,
    pub(crate) wake: Option<oneshot::Sender<()>>,
    pub(crate) handle: JoinHandle<()>,
}

impl PendingAction {
    pub fn id(&self) -> ActionId {
        self.id
    }

    pub fn phase(&self) -> ActionPhase {
        self.phase.get()
    }

    /// True while waiting or running.
    pub fn is_live(&self) -> bool {
        matches!(self.phase(), ActionPhase::Waiting | ActionPhase::Firing)
    }

    pub fn is_task_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// What `cancel_pending` found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// Nothing was scheduled.
    Idle,
    /// The action was still waiting and will not fire.
    Cancelled(ActionId),
    /// The command is already running and is left alone.
    AlreadyRunning(ActionId),
    /// The handle no longer referred to a live action.
    Stale(ActionId),
}
