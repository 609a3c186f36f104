// src/exec/command.rs

//! The user-supplied action, as an argument vector.

use std::fmt;

use tokio::process::Command;

use crate::errors::{QuiesceError, Result};

/// Command run when the watched directories go quiet.
///
/// By default the command is executed directly (`program args...`) with no
/// shell involved. With `shell = true` the arguments are joined with spaces
/// and handed to `sh -c` (`cmd /C` on Windows) so pipelines and `&&` work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionCommand {
    program: String,
    args: Vec<String>,
    shell: bool,
}

impl ActionCommand {
    /// Build from an argument vector. Fails if `argv` is empty.
    pub fn new(argv: Vec<String>, shell: bool) -> Result<Self> {
        let mut iter = argv.into_iter();
        let program = iter
            .next()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| QuiesceError::ConfigError("COMMAND must not be empty".to_string()))?;

        Ok(Self {
            program,
            args: iter.collect(),
            shell,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn uses_shell(&self) -> bool {
        self.shell
    }

    /// Full argument vector, program first.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// The string passed to the shell in `shell` mode.
    pub fn script(&self) -> String {
        self.argv().join(" ")
    }

    /// Build a `tokio::process::Command` inheriting cwd, env and stdio.
    pub fn to_command(&self) -> Command {
        if self.shell {
            let script = self.script();
            if cfg!(windows) {
                let mut c = Command::new("cmd");
                c.arg("/C").arg(script);
                c
            } else {
                let mut c = Command::new("sh");
                c.arg("-c").arg(script);
                c
            }
        } else {
            let mut c = Command::new(&self.program);
            c.args(&self.args);
            c
        }
    }
}

impl fmt::Display for ActionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shell {
            return write!(f, "sh -c {:?}", self.script());
        }
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {arg:?}")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!(ActionCommand::new(Vec::new(), false).is_err());
        assert!(ActionCommand::new(argv(&["  "]), true).is_err());
    }

    #[test]
    fn splits_program_from_args() {
        let cmd = ActionCommand::new(argv(&["rsync", "-a", "src/", "dst/"]), false).unwrap();
        assert_eq!(cmd.program(), "rsync");
        assert_eq!(cmd.args(), &argv(&["-a", "src/", "dst/"])[..]);
        assert_eq!(cmd.argv(), argv(&["rsync", "-a", "src/", "dst/"]));
    }

    #[test]
    fn direct_mode_does_not_touch_the_shell() {
        let cmd = ActionCommand::new(argv(&["echo", "a b"]), false).unwrap();
        let std_cmd = cmd.to_command();
        let std_cmd = std_cmd.as_std();
        assert_eq!(std_cmd.get_program(), "echo");
        let args: Vec<_> = std_cmd.get_args().collect();
        assert_eq!(args, vec!["a b"]);
        assert_eq!(cmd.to_string(), "echo \"a b\"");
    }

    #[cfg(unix)]
    #[test]
    fn shell_mode_joins_into_one_script() {
        let cmd = ActionCommand::new(argv(&["make", "&&", "make install"]), true).unwrap();
        let std_cmd = cmd.to_command();
        let std_cmd = std_cmd.as_std();
        assert_eq!(std_cmd.get_program(), "sh");
        let args: Vec<_> = std_cmd.get_args().collect();
        assert_eq!(args, vec!["-c", "make && make install"]);
    }
}
