#![allow(dead_code)]

use std::path::{Path, PathBuf};

use notify::event::{AccessKind, AccessMode, CreateKind, DataChange, MetadataKind, ModifyKind, RenameMode};
use notify::{Event, EventKind};
use quiesce::config::{MonitorConfig, RawMonitorConfig};
use quiesce::types::WatchEventKind;

/// Builder for `MonitorConfig` to simplify test setup.
///
/// Directories must exist; validation runs in `build`.
pub struct MonitorConfigBuilder {
    raw: RawMonitorConfig,
}

impl MonitorConfigBuilder {
    pub fn new(delay_secs: u64, dir: impl AsRef<Path>) -> Self {
        Self {
            raw: RawMonitorConfig::new(
                delay_secs,
                vec![dir.as_ref().to_path_buf()],
                vec!["true".to_string()],
            ),
        }
    }

    pub fn dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.raw.directories.push(dir.as_ref().to_path_buf());
        self
    }

    pub fn command(mut self, argv: &[&str]) -> Self {
        self.raw.command = argv.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn shell(mut self, val: bool) -> Self {
        self.raw.shell = val;
        self
    }

    pub fn events(mut self, kinds: &[WatchEventKind]) -> Self {
        self.raw.events = kinds.to_vec();
        self
    }

    pub fn exclude(mut self, pattern: &str) -> Self {
        self.raw.exclude.push(pattern.to_string());
        self
    }

    pub fn throttle(mut self, val: bool) -> Self {
        self.raw.throttle = val;
        self
    }

    pub fn raw(self) -> RawMonitorConfig {
        self.raw
    }

    pub fn build(self) -> MonitorConfig {
        MonitorConfig::try_from(self.raw).expect("Failed to build valid config from builder")
    }
}

fn event(kind: EventKind, path: impl Into<PathBuf>) -> Event {
    Event::new(kind).add_path(path.into())
}

pub fn created(path: impl Into<PathBuf>) -> Event {
    event(EventKind::Create(CreateKind::File), path)
}

pub fn modified(path: impl Into<PathBuf>) -> Event {
    event(EventKind::Modify(ModifyKind::Data(DataChange::Content)), path)
}

pub fn close_write(path: impl Into<PathBuf>) -> Event {
    event(EventKind::Access(AccessKind::Close(AccessMode::Write)), path)
}

pub fn moved_to(path: impl Into<PathBuf>) -> Event {
    event(EventKind::Modify(ModifyKind::Name(RenameMode::To)), path)
}

/// An event kind that is never treated as activity.
pub fn metadata(path: impl Into<PathBuf>) -> Event {
    event(
        EventKind::Modify(ModifyKind::Metadata(MetadataKind::Permissions)),
        path,
    )
}
