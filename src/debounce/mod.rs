// src/debounce/mod.rs

//! Debounce scheduling.
//!
//! A fixed delay is split in two halves. When an event batch arrives the
//! [`Scheduler`] cancels any pending action, optionally waits out the first
//! half inline (throttling how often it reschedules during dense bursts),
//! then schedules a background task that waits the second half and runs the
//! command. Only the action scheduled by the last batch of a burst fires.
//!
//! Cancellation is deterministic: the pending task and the scheduler race on
//! a single compare-and-swap of the [`ActionPhase`], so an action is either
//! cancelled before it starts or it runs to completion.

pub mod pending;
pub mod scheduler;
pub mod window;

pub use pending::{ActionId, ActionPhase, CancelOutcome, PendingAction};
pub use scheduler::{Scheduler, fire};
pub use window::DebounceWindow;
