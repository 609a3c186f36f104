// src/exec/mod.rs

//! Action execution layer.
//!
//! - [`command`] holds the user's command as an argument vector with an
//!   explicit shell opt-in.
//! - [`runner`] provides the `ActionRunner` trait the scheduler calls, so
//!   tests can swap in a recording fake.
//! - [`process`] is the production runner built on `tokio::process`.

pub mod command;
pub mod process;
pub mod runner;

pub use command::ActionCommand;
pub use process::ProcessRunner;
pub use runner::{ActionOutcome, ActionRunner, RunFuture};
