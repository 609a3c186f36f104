// src/debounce/window.rs

use std::time::Duration;

/// Total debounce delay and its two halves.
///
/// The first half is the optional inline throttle in
/// [`Scheduler::notify_event`](super::Scheduler::notify_event); the second
/// is how long a scheduled action waits before firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceWindow {
    delay: Duration,
    half: Duration,
}

impl DebounceWindow {
    /// Whole-second window as given on the command line.
    ///
    /// `half = floor(secs / 2)`, so 0 and 1 both give a zero half.
    pub fn from_secs(secs: u64) -> Self {
        Self {
            delay: Duration::from_secs(secs),
            half: Duration::from_secs(secs / 2),
        }
    }

    /// Sub-second window; the half is exact.
    pub fn from_duration(delay: Duration) -> Self {
        Self {
            delay,
            half: delay / 2,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn half(&self) -> Duration {
        self.half
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_is_floored_for_whole_seconds() {
        assert_eq!(DebounceWindow::from_secs(10).half(), Duration::from_secs(5));
        assert_eq!(DebounceWindow::from_secs(7).half(), Duration::from_secs(3));
        assert_eq!(DebounceWindow::from_secs(1).half(), Duration::ZERO);
        assert_eq!(DebounceWindow::from_secs(0).half(), Duration::ZERO);
    }

    #[test]
    fn from_duration_keeps_sub_second_precision() {
        let w = DebounceWindow::from_duration(Duration::from_millis(300));
        assert_eq!(w.delay(), Duration::from_millis(300));
        assert_eq!(w.half(), Duration::from_millis(150));
    }
}
