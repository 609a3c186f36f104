// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::WatchArgs;
use crate::config::model::{ConfigFile, MonitorConfig, RawMonitorConfig};
use crate::errors::{QuiesceError, Result};
use crate::types::WatchEventKind;

/// Load a TOML config file.
///
/// This only performs deserialization; no directory checks happen here.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        QuiesceError::ConfigError(format!("reading config file {}: {e}", path.display()))
    })?;

    let config: ConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Split the comma-separated `PATHS` argument. Empty segments are skipped.
pub fn split_paths(paths: &str) -> Vec<PathBuf> {
    paths
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Combine command-line arguments with an (optional) config file.
///
/// - `events`: CLI list, else file list, else all kinds.
/// - `exclude`: file patterns followed by CLI patterns.
/// - `shell`: true if either side asks for it.
/// - `throttle`: `--no-throttle` wins, else file, else true.
pub fn merge(args: &WatchArgs, file: ConfigFile) -> RawMonitorConfig {
    let events = if !args.events.is_empty() {
        args.events.clone()
    } else {
        file.watch
            .events
            .unwrap_or_else(|| WatchEventKind::ALL.to_vec())
    };

    let mut exclude = file.watch.exclude;
    exclude.extend(args.exclude.iter().cloned());

    RawMonitorConfig {
        delay_secs: args.debounce_seconds,
        directories: split_paths(&args.paths),
        command: args.command.clone(),
        shell: args.shell || file.action.shell.unwrap_or(false),
        events,
        exclude,
        throttle: !args.no_throttle && file.watch.throttle.unwrap_or(true),
    }
}

/// Resolve `WatchArgs` (plus `--config`, when given) into raw settings.
pub fn resolve(args: &WatchArgs) -> Result<RawMonitorConfig> {
    let file = match &args.config {
        Some(path) => {
            debug!(path = %path.display(), "loading config file");
            load_from_path(path)?
        }
        None => ConfigFile::default(),
    };
    Ok(merge(args, file))
}

/// Resolve and validate in one go.
///
/// This is the entry point used by `monitor`: it fails with
/// [`QuiesceError::MissingDirectory`] before any watch is registered.
pub fn load_and_validate(args: &WatchArgs) -> Result<MonitorConfig> {
    let raw = resolve(args)?;
    MonitorConfig::try_from(raw)
}
