// src/watch/mod.rs

//! File watching.
//!
//! This module is responsible for:
//! - Wiring up a cross-platform recursive filesystem watcher (`notify`).
//! - Classifying raw events into the watched kinds and applying exclude
//!   globs (`filter`).
//! - Grouping whatever is queued into batches and handing each batch to the
//!   debounce scheduler (`event_loop`).
//!
//! It does **not** decide when the action runs; that is the scheduler's job.

pub mod batch;
pub mod event_loop;
pub mod filter;
pub mod path_utils;
pub mod watcher;

pub use batch::EventBatch;
pub use event_loop::WatchLoop;
pub use filter::{EventFilter, build_globset, classify};
pub use watcher::{WatchResult, WatcherHandle, spawn_watcher};
