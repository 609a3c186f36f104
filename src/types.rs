use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

/// Filesystem event kinds that can trigger the debounced action.
///
/// - `Create`: a file or directory appeared.
/// - `Modify`: file contents changed.
/// - `CloseWrite`: a file opened for writing was closed.
/// - `MovedTo`: something was renamed into a watched directory.
///
/// Metadata-only changes, removals and reads never trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum WatchEventKind {
    Create,
    Modify,
    CloseWrite,
    MovedTo,
}

impl WatchEventKind {
    pub const ALL: [WatchEventKind; 4] = [
        WatchEventKind::Create,
        WatchEventKind::Modify,
        WatchEventKind::CloseWrite,
        WatchEventKind::MovedTo,
    ];

    /// Name as accepted on the command line and in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            WatchEventKind::Create => "create",
            WatchEventKind::Modify => "modify",
            WatchEventKind::CloseWrite => "close-write",
            WatchEventKind::MovedTo => "moved-to",
        }
    }
}

impl fmt::Display for WatchEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WatchEventKind::Create => "CREATE",
            WatchEventKind::Modify => "MODIFY",
            WatchEventKind::CloseWrite => "CLOSE_WRITE",
            WatchEventKind::MovedTo => "MOVED_TO",
        };
        f.write_str(label)
    }
}

impl FromStr for WatchEventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "create" => Ok(WatchEventKind::Create),
            "modify" => Ok(WatchEventKind::Modify),
            "close-write" => Ok(WatchEventKind::CloseWrite),
            "moved-to" => Ok(WatchEventKind::MovedTo),
            other => Err(format!(
                "invalid event kind: {other} (expected create, modify, close-write or moved-to)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_spellings() {
        assert_eq!("close_write".parse(), Ok(WatchEventKind::CloseWrite));
        assert_eq!("Moved-To".parse(), Ok(WatchEventKind::MovedTo));
        assert!("delete".parse::<WatchEventKind>().is_err());
    }

    #[test]
    fn cli_names_round_trip_through_from_str() {
        for kind in WatchEventKind::ALL {
            assert_eq!(kind.as_str().parse(), Ok(kind));
        }
    }

    #[test]
    fn display_uses_inotify_style_labels() {
        assert_eq!(WatchEventKind::CloseWrite.to_string(), "CLOSE_WRITE");
        assert_eq!(WatchEventKind::Create.to_string(), "CREATE");
    }
}
