// src/lib.rs

pub mod cli;
pub mod config;
pub mod debounce;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod service;
pub mod types;
pub mod watch;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cli::{CliArgs, LogLevel, Mode, WatchArgs};
use crate::config::{MonitorConfig, load_and_validate};
use crate::debounce::Scheduler;
use crate::errors::{QuiesceError, Result};
use crate::exec::{ActionRunner, ProcessRunner};
use crate::service::ServiceUnit;
use crate::watch::{EventFilter, WatchLoop, WatchResult, spawn_watcher};

/// High-level entry point used by `main.rs`.
///
/// `service` prints a unit file and returns. `monitor` validates the
/// configuration, starts the watcher and runs until Ctrl-C.
pub async fn run(args: CliArgs) -> Result<()> {
    match args.mode {
        Some(Mode::Service(watch)) => print_service_unit(&watch, args.log_level),
        Some(Mode::Monitor(watch)) => monitor(&watch).await,
        None => Err(QuiesceError::ConfigError("no mode given".to_string())),
    }
}

fn print_service_unit(args: &WatchArgs, log_level: Option<LogLevel>) -> Result<()> {
    let exe = std::env::current_exe()?;
    let cwd = std::env::current_dir()?;
    let unit = ServiceUnit::new(&exe, &cwd, args, log_level);
    print!("{}", unit.render());
    Ok(())
}

async fn monitor(args: &WatchArgs) -> Result<()> {
    let cfg = load_and_validate(args)?;
    info!(
        directories = ?cfg.directories(),
        delay = ?cfg.window().delay(),
        command = %cfg.command(),
        "starting monitor"
    );

    let (tx, rx) = mpsc::unbounded_channel::<WatchResult>();
    // Must outlive the loop; dropping it closes the channel.
    let _watcher = spawn_watcher(cfg.directories(), tx)?;

    let watch_loop = build_watch_loop(&cfg, Arc::new(ProcessRunner::new()), rx);

    tokio::select! {
        scheduler = watch_loop.run() => {
            debug!(?scheduler, "watch loop returned");
        }
        _ = wait_for_ctrl_c() => {
            info!("received Ctrl-C; shutting down");
        }
    }

    Ok(())
}

/// Wire a validated config, a runner and a watcher channel into a loop.
pub fn build_watch_loop(
    cfg: &MonitorConfig,
    runner: Arc<dyn ActionRunner>,
    events: mpsc::UnboundedReceiver<WatchResult>,
) -> WatchLoop {
    let scheduler = Scheduler::new(cfg.window(), cfg.command().clone(), runner)
        .with_throttle(cfg.throttle());
    WatchLoop::new(scheduler, EventFilter::from_config(cfg), events)
}

async fn wait_for_ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
}
