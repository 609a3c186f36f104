// src/watch/watcher.rs

use std::path::PathBuf;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::info;

use crate::errors::Result;

/// What the watcher forwards into the async world.
pub type WatchResult = notify::Result<Event>;

/// Handle for the filesystem watcher.
///
/// Keeps the underlying `RecommendedWatcher` alive; dropping it stops
/// watching and closes the event channel.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
    roots: Vec<PathBuf>,
}

impl WatcherHandle {
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle")
            .field("roots", &self.roots)
            .finish_non_exhaustive()
    }
}

/// Start watching every directory in `roots` recursively.
///
/// Each `notify` callback result (events and errors alike) is forwarded to
/// `event_tx`; the watch loop decides what to do with them. Failing to
/// create the watcher or register a root is a
/// [`QuiesceError::WatchUnavailable`](crate::errors::QuiesceError::WatchUnavailable).
pub fn spawn_watcher(
    roots: &[PathBuf],
    event_tx: mpsc::UnboundedSender<WatchResult>,
) -> Result<WatcherHandle> {
    // Called synchronously on notify's own thread.
    let mut watcher = RecommendedWatcher::new(
        move |res: WatchResult| {
            if event_tx.send(res).is_err() {
                // Receiver dropped: the watch loop is shutting down.
                eprintln!("quiesce: watch loop gone; dropping filesystem event");
            }
        },
        Config::default(),
    )?;

    for root in roots {
        watcher.watch(root, RecursiveMode::Recursive)?;
        info!("file watcher started on {:?}", root);
    }

    Ok(WatcherHandle {
        _inner: watcher,
        roots: roots.to_vec(),
    })
}
