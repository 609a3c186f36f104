// src/errors.rs

//! Crate-wide error type and exit-code mapping.

use std::path::PathBuf;

use thiserror::Error;

/// Watch capability missing or failed to register a path.
pub const EXIT_WATCH_UNAVAILABLE: i32 = 1;
/// Too few positional arguments, bad values, invalid config.
pub const EXIT_USAGE: i32 = 2;
/// A directory listed in `PATHS` does not exist.
pub const EXIT_MISSING_DIRECTORY: i32 = 3;

#[derive(Error, Debug)]
pub enum QuiesceError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("File watching unavailable: {0}")]
    WatchUnavailable(#[from] notify::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QuiesceError {
    /// Process exit code for this error when it aborts startup.
    pub fn exit_code(&self) -> i32 {
        match self {
            QuiesceError::ConfigError(_) | QuiesceError::TomlError(_) => EXIT_USAGE,
            QuiesceError::MissingDirectory(_) => EXIT_MISSING_DIRECTORY,
            QuiesceError::WatchUnavailable(_) => EXIT_WATCH_UNAVAILABLE,
            QuiesceError::IoError(_) | QuiesceError::Other(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, QuiesceError>;
