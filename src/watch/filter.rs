// src/watch/filter.rs

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use notify::Event;
use notify::event::{AccessKind, AccessMode, EventKind, ModifyKind, RenameMode};
use tracing::trace;

use crate::config::MonitorConfig;
use crate::types::WatchEventKind;
use crate::watch::path_utils::relative_to_any;

/// Decides which raw `notify` events count as activity.
///
/// An event passes if its kind maps to one of the configured
/// [`WatchEventKind`]s and its path is not excluded. Exclude globs are
/// matched against the path relative to the watched root containing it
/// (e.g. `"target/debug/app"`), falling back to the full path.
#[derive(Clone)]
pub struct EventFilter {
    roots: Vec<PathBuf>,
    kinds: Vec<WatchEventKind>,
    exclude: Option<GlobSet>,
}

impl fmt::Debug for EventFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventFilter")
            .field("roots", &self.roots)
            .field("kinds", &self.kinds)
            .field("has_exclude", &self.exclude.is_some())
            .finish()
    }
}

impl EventFilter {
    pub fn new(
        roots: Vec<PathBuf>,
        kinds: Vec<WatchEventKind>,
        exclude: Option<GlobSet>,
    ) -> Self {
        Self {
            roots,
            kinds,
            exclude,
        }
    }

    pub fn from_config(cfg: &MonitorConfig) -> Self {
        Self::new(
            cfg.directories().to_vec(),
            cfg.events().to_vec(),
            cfg.exclude_set().cloned(),
        )
    }

    /// Returns true if `path` matches an exclude glob.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let Some(exclude) = &self.exclude else {
            return false;
        };
        match relative_to_any(&self.roots, path) {
            Some(rel) => exclude.is_match(&rel),
            None => exclude.is_match(path),
        }
    }

    /// Paths of `event` that count as activity, tagged with their kind.
    pub fn accept(&self, event: &Event) -> Vec<(WatchEventKind, PathBuf)> {
        let Some(kind) = classify(&event.kind) else {
            trace!(kind = ?event.kind, "ignoring unwatched event kind");
            return Vec::new();
        };
        if !self.kinds.contains(&kind) {
            trace!(%kind, "event kind not selected");
            return Vec::new();
        }

        // A `Both` rename carries [from, to]; only the destination moved in.
        let paths: &[PathBuf] = match event.kind {
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
                event.paths.last().map(std::slice::from_ref).unwrap_or(&[])
            }
            _ => &event.paths,
        };

        paths
            .iter()
            .filter(|p| {
                let excluded = self.is_excluded(p);
                if excluded {
                    trace!(path = %p.display(), "ignoring excluded path");
                }
                !excluded
            })
            .map(|p| (kind, p.clone()))
            .collect()
    }
}

/// Map a `notify` event kind onto the kinds we watch.
///
/// Metadata changes, removals, opens and reads are not activity.
pub fn classify(kind: &EventKind) -> Option<WatchEventKind> {
    match kind {
        EventKind::Create(_) => Some(WatchEventKind::Create),
        EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Any | ModifyKind::Other) => {
            Some(WatchEventKind::Modify)
        }
        EventKind::Modify(ModifyKind::Name(
            RenameMode::To | RenameMode::Both | RenameMode::Any,
        )) => Some(WatchEventKind::MovedTo),
        EventKind::Access(AccessKind::Close(AccessMode::Write)) => Some(WatchEventKind::CloseWrite),
        _ => None,
    }
}

/// Build a GlobSet from string patterns; `None` when there are none.
pub fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).with_context(|| format!("invalid exclude pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(Some(builder.build()?))
}
