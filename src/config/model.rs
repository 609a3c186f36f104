// src/config/model.rs

use std::path::PathBuf;

use globset::GlobSet;
use serde::Deserialize;

use crate::debounce::DebounceWindow;
use crate::exec::ActionCommand;
use crate::types::WatchEventKind;

/// Optional TOML config file, passed with `--config`.
///
/// ```toml
/// [watch]
/// events = ["create", "close-write"]
/// exclude = ["target/**", "**/*.swp"]
/// throttle = true
///
/// [action]
/// shell = false
/// ```
///
/// All sections and fields are optional; command-line flags win.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigFile {
    /// `[watch]` section.
    #[serde(default)]
    pub watch: WatchSection,

    /// `[action]` section.
    #[serde(default)]
    pub action: ActionSection,
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct WatchSection {
    /// Event kinds counting as activity. `None` means all of them.
    #[serde(default)]
    pub events: Option<Vec<WatchEventKind>>,

    /// Globs for paths whose events are ignored. CLI `--exclude` patterns
    /// are appended to these.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Inline half-delay wait before rescheduling; defaults to `true`.
    #[serde(default)]
    pub throttle: Option<bool>,
}

/// `[action]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ActionSection {
    /// Run the command through the platform shell; defaults to `false`.
    #[serde(default)]
    pub shell: Option<bool>,
}

/// Monitor settings after merging CLI and config file, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMonitorConfig {
    pub delay_secs: u64,
    pub directories: Vec<PathBuf>,
    pub command: Vec<String>,
    pub shell: bool,
    pub events: Vec<WatchEventKind>,
    pub exclude: Vec<String>,
    pub throttle: bool,
}

impl RawMonitorConfig {
    /// Settings with every optional knob at its default.
    pub fn new(delay_secs: u64, directories: Vec<PathBuf>, command: Vec<String>) -> Self {
        Self {
            delay_secs,
            directories,
            command,
            shell: false,
            events: WatchEventKind::ALL.to_vec(),
            exclude: Vec::new(),
            throttle: true,
        }
    }
}

/// Validated monitor configuration.
///
/// Only obtainable through `TryFrom<RawMonitorConfig>`, which guarantees
/// that every directory exists (and is stored canonicalized), the command is
/// non-empty and the exclude globs compile.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    window: DebounceWindow,
    directories: Vec<PathBuf>,
    command: ActionCommand,
    events: Vec<WatchEventKind>,
    exclude_set: Option<GlobSet>,
    throttle: bool,
}

impl MonitorConfig {
    pub(crate) fn new_unchecked(
        window: DebounceWindow,
        directories: Vec<PathBuf>,
        command: ActionCommand,
        events: Vec<WatchEventKind>,
        exclude_set: Option<GlobSet>,
        throttle: bool,
    ) -> Self {
        Self {
            window,
            directories,
            command,
            events,
            exclude_set,
            throttle,
        }
    }

    pub fn window(&self) -> DebounceWindow {
        self.window
    }

    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    pub fn command(&self) -> &ActionCommand {
        &self.command
    }

    pub fn events(&self) -> &[WatchEventKind] {
        &self.events
    }

    pub fn exclude_set(&self) -> Option<&GlobSet> {
        self.exclude_set.as_ref()
    }

    pub fn throttle(&self) -> bool {
        self.throttle
    }
}
