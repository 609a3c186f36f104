// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Usage errors are handed back to `main` instead of exiting inside clap so
//! that the documented exit codes can be applied (see [`usage_exit_code`]).

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::errors::EXIT_USAGE;
use crate::types::WatchEventKind;

/// Command-line arguments for `quiesce`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "quiesce",
    version,
    about = "Run a command once a set of directories has been quiet for a while.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `QUIESCE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Mode {
    /// Print a systemd service unit that runs `quiesce monitor` with these arguments.
    Service(WatchArgs),
    /// Watch PATHS and run COMMAND after DEBOUNCE_SECONDS of inactivity.
    Monitor(WatchArgs),
}

/// Arguments shared by `service` and `monitor`.
#[derive(Debug, Clone, Args)]
pub struct WatchArgs {
    /// Run COMMAND through the platform shell instead of executing it directly.
    #[arg(long)]
    pub shell: bool,

    /// Ignore events for paths matching this glob (relative to the watched directory).
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Event kinds that count as activity (default: all).
    #[arg(long, value_enum, value_delimiter = ',', value_name = "KIND")]
    pub events: Vec<WatchEventKind>,

    /// Schedule immediately instead of waiting half the delay before rescheduling.
    #[arg(long)]
    pub no_throttle: bool,

    /// Optional TOML file with `[watch]` / `[action]` settings.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Total debounce window in seconds.
    #[arg(value_name = "DEBOUNCE_SECONDS")]
    pub debounce_seconds: u64,

    /// Comma-separated list of directories to watch recursively.
    #[arg(value_name = "PATHS")]
    pub paths: String,

    /// Command to run, with its arguments.
    #[arg(
        value_name = "COMMAND",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Parse the process arguments without exiting on error.
pub fn parse() -> Result<CliArgs, clap::Error> {
    CliArgs::try_parse()
}

/// Parse from an explicit argument list (used by tests).
pub fn parse_from<I, T>(args: I) -> Result<CliArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    CliArgs::try_parse_from(args)
}

/// Exit code for a clap parse failure.
///
/// - help / version output: 0
/// - unknown or missing mode: 1 (usage is printed)
/// - anything else (missing positionals, bad numbers): 2
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        ErrorKind::InvalidSubcommand
        | ErrorKind::MissingSubcommand
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 1,
        _ => EXIT_USAGE,
    }
}

/// Print top-level usage to stdout.
pub fn print_usage() {
    use clap::CommandFactory;

    let mut cmd = CliArgs::command();
    if let Err(err) = cmd.print_help() {
        eprintln!("quiesce: failed to print usage: {err}");
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monitor_collects_trailing_command() {
        let args = parse_from(["quiesce", "monitor", "10", "/a,/b", "make", "-j4", "all"])
            .expect("valid arguments");
        let Some(Mode::Monitor(watch)) = args.mode else {
            panic!("expected monitor mode");
        };
        assert_eq!(watch.debounce_seconds, 10);
        assert_eq!(watch.paths, "/a,/b");
        assert_eq!(watch.command, vec!["make", "-j4", "all"]);
        assert!(!watch.shell);
    }

    #[test]
    fn options_precede_positionals() {
        let args = parse_from([
            "quiesce",
            "--log-level",
            "debug",
            "service",
            "--shell",
            "--exclude",
            "target/**",
            "--events",
            "create,close-write",
            "5",
            "/src",
            "cargo build && cargo test",
        ])
        .expect("valid arguments");
        assert!(matches!(args.log_level, Some(LogLevel::Debug)));
        let Some(Mode::Service(watch)) = args.mode else {
            panic!("expected service mode");
        };
        assert!(watch.shell);
        assert_eq!(watch.exclude, vec!["target/**"]);
        assert_eq!(
            watch.events,
            vec![WatchEventKind::Create, WatchEventKind::CloseWrite]
        );
    }

    #[test]
    fn no_mode_parses_to_none() {
        let args = parse_from(["quiesce"]).expect("mode is optional at parse time");
        assert!(args.mode.is_none());
    }

    #[test]
    fn too_few_positionals_is_exit_code_two() {
        let err = parse_from(["quiesce", "monitor", "10", "/tmp"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), 2);
    }

    #[test]
    fn non_numeric_delay_is_exit_code_two() {
        let err = parse_from(["quiesce", "monitor", "soon", "/tmp", "true"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), 2);
    }

    #[test]
    fn unknown_mode_is_exit_code_one() {
        let err = parse_from(["quiesce", "observe", "10", "/tmp", "true"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), 1);
    }
}
