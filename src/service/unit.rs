// src/service/unit.rs

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::cli::{LogLevel, WatchArgs};

/// A systemd unit that runs `quiesce monitor` with a fixed argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUnit {
    description: String,
    working_directory: PathBuf,
    exec_start: Vec<String>,
}

impl ServiceUnit {
    /// Build the unit for `args`, launched via `exe` from `working_directory`.
    ///
    /// A relative `--config` path is made absolute against
    /// `working_directory` so the service finds it regardless of where
    /// systemd starts it.
    pub fn new(
        exe: &Path,
        working_directory: &Path,
        args: &WatchArgs,
        log_level: Option<LogLevel>,
    ) -> Self {
        let mut argv = vec![exe.display().to_string()];
        if let Some(level) = log_level {
            argv.push("--log-level".to_string());
            argv.push(level.as_str().to_string());
        }
        argv.push("monitor".to_string());

        if args.shell {
            argv.push("--shell".to_string());
        }
        if args.no_throttle {
            argv.push("--no-throttle".to_string());
        }
        if !args.events.is_empty() {
            let kinds: Vec<&str> = args.events.iter().map(|k| k.as_str()).collect();
            argv.push("--events".to_string());
            argv.push(kinds.join(","));
        }
        for glob in &args.exclude {
            argv.push("--exclude".to_string());
            argv.push(glob.clone());
        }
        if let Some(config) = &args.config {
            argv.push("--config".to_string());
            argv.push(working_directory.join(config).display().to_string());
        }

        argv.push("--".to_string());
        argv.push(args.debounce_seconds.to_string());
        argv.push(args.paths.clone());
        argv.extend(args.command.iter().cloned());

        let description = format!(
            "quiesce: run {} after {}s of inactivity in {}",
            args.command.join(" "),
            args.debounce_seconds,
            args.paths
        );

        Self {
            description,
            working_directory: working_directory.to_path_buf(),
            exec_start: argv,
        }
    }

    pub fn exec_start(&self) -> &[String] {
        &self.exec_start
    }

    /// Unit file text, ready to be written to `~/.config/systemd/user/`.
    pub fn render(&self) -> String {
        let exec: Vec<String> = self.exec_start.iter().map(|a| quote_arg(a)).collect();

        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "[Unit]");
        let _ = writeln!(out, "Description={}", escape_specifiers(&self.description));
        let _ = writeln!(out, "After=local-fs.target");
        let _ = writeln!(out);
        let _ = writeln!(out, "[Service]");
        let _ = writeln!(out, "Type=simple");
        // Taken literally by systemd: no quote removal, no `$` expansion.
        let _ = writeln!(
            out,
            "WorkingDirectory={}",
            escape_specifiers(&self.working_directory.display().to_string())
        );
        let _ = writeln!(out, "ExecStart={}", exec.join(" "));
        let _ = writeln!(out, "Restart=on-failure");
        let _ = writeln!(out, "RestartSec=5");
        let _ = writeln!(out);
        let _ = writeln!(out, "[Install]");
        let _ = writeln!(out, "WantedBy=default.target");
        out
    }
}

/// `%` starts a systemd specifier; double it to keep it literal.
fn escape_specifiers(s: &str) -> String {
    s.replace('%', "%%")
}

/// Quote one command-line word for a systemd `ExecStart=` line.
pub fn quote_arg(arg: &str) -> String {
    let escaped = escape_specifiers(arg).replace('$', "$$");

    let needs_quotes = arg.is_empty()
        || arg
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '\\'));
    if !needs_quotes {
        return escaped;
    }

    let mut out = String::with_capacity(escaped.len() + 2);
    out.push('"');
    for c in escaped.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}
