// src/config/mod.rs

//! Configuration loading and validation.
//!
//! - `model.rs`: the TOML file model, the merged `RawMonitorConfig` and the
//!   validated `MonitorConfig`.
//! - `loader.rs`: reads the file and merges it with CLI arguments.
//! - `validate.rs`: `TryFrom<RawMonitorConfig> for MonitorConfig`.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, merge, resolve, split_paths};
pub use model::{ActionSection, ConfigFile, MonitorConfig, RawMonitorConfig, WatchSection};
