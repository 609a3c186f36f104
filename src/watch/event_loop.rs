// src/watch/event_loop.rs

//! The watch loop: watcher results in, one `notify_event` per batch out.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::debounce::Scheduler;
use crate::watch::batch::EventBatch;
use crate::watch::filter::EventFilter;
use crate::watch::watcher::WatchResult;

/// Bridges the directory watcher to the [`Scheduler`].
///
/// Each iteration blocks for one watcher result, then drains everything
/// already queued into the same batch. Results that arrive while the
/// scheduler is throttling stay queued and become the next batch.
#[derive(Debug)]
pub struct WatchLoop {
    scheduler: Scheduler,
    filter: EventFilter,
    events: mpsc::UnboundedReceiver<WatchResult>,
}

impl WatchLoop {
    pub fn new(
        scheduler: Scheduler,
        filter: EventFilter,
        events: mpsc::UnboundedReceiver<WatchResult>,
    ) -> Self {
        Self {
            scheduler,
            filter,
            events,
        }
    }

    /// Run until the event channel closes.
    ///
    /// In production that only happens when the watcher is dropped; the
    /// process is normally stopped by a signal. Returns the scheduler so a
    /// caller can inspect or drop whatever is still pending.
    pub async fn run(mut self) -> Scheduler {
        info!("watch loop started");

        while let Some(batch) = self.next_batch().await {
            if batch.is_empty() {
                continue;
            }
            debug!(entries = batch.len(), "dispatching event batch");
            self.scheduler.notify_event(&batch.describe()).await;
        }

        info!("event channel closed; watch loop exiting");
        self.scheduler
    }

    /// Wait for the next result and fold in everything already queued.
    ///
    /// Returns `None` once the channel is closed and drained.
    async fn next_batch(&mut self) -> Option<EventBatch> {
        let first = self.events.recv().await?;

        let mut batch = EventBatch::default();
        self.absorb(first, &mut batch);
        while let Ok(next) = self.events.try_recv() {
            self.absorb(next, &mut batch);
        }

        Some(batch)
    }

    fn absorb(&self, result: WatchResult, batch: &mut EventBatch) {
        match result {
            Ok(event) => batch.extend(self.filter.accept(&event)),
            Err(err) => warn!(error = %err, paths = ?err.paths, "file watch error"),
        }
    }
}
