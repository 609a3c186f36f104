// src/config/validate.rs

use std::path::PathBuf;

use tracing::warn;

use crate::config::model::{MonitorConfig, RawMonitorConfig};
use crate::debounce::DebounceWindow;
use crate::errors::{QuiesceError, Result};
use crate::exec::ActionCommand;
use crate::types::WatchEventKind;
use crate::watch::filter::build_globset;

impl TryFrom<RawMonitorConfig> for MonitorConfig {
    type Error = QuiesceError;

    fn try_from(raw: RawMonitorConfig) -> std::result::Result<Self, Self::Error> {
        let directories = validate_directories(&raw.directories)?;
        let command = ActionCommand::new(raw.command, raw.shell)?;
        warn_if_unsplit(&command);

        let events = normalize_events(raw.events)?;

        let exclude_set = build_globset(&raw.exclude)
            .map_err(|e| QuiesceError::ConfigError(format!("{e:#}")))?;

        Ok(MonitorConfig::new_unchecked(
            DebounceWindow::from_secs(raw.delay_secs),
            directories,
            command,
            events,
            exclude_set,
            raw.throttle,
        ))
    }
}

/// Every directory must exist. Returns canonical paths without duplicates.
fn validate_directories(dirs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if dirs.is_empty() {
        return Err(QuiesceError::ConfigError(
            "PATHS must name at least one directory".to_string(),
        ));
    }

    let mut out: Vec<PathBuf> = Vec::with_capacity(dirs.len());
    for dir in dirs {
        if !dir.is_dir() {
            return Err(QuiesceError::MissingDirectory(dir.clone()));
        }
        let canonical = dir.canonicalize()?;
        if !out.contains(&canonical) {
            out.push(canonical);
        }
    }
    Ok(out)
}

fn normalize_events(mut events: Vec<WatchEventKind>) -> Result<Vec<WatchEventKind>> {
    if events.is_empty() {
        return Err(QuiesceError::ConfigError(
            "at least one event kind must be watched".to_string(),
        ));
    }
    events.sort();
    events.dedup();
    Ok(events)
}

/// `quiesce monitor 5 . "make test"` without `--shell` tries to execute a
/// program literally named `make test`.
fn warn_if_unsplit(command: &ActionCommand) {
    if !command.uses_shell()
        && command.args().is_empty()
        && command.program().contains(char::is_whitespace)
    {
        warn!(
            command = %command.program(),
            "command contains whitespace but --shell was not given; it will be executed as a single program name"
        );
    }
}
