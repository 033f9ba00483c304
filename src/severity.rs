use std::{fmt, str::FromStr};

use thiserror::Error;

/// Defines the severity levels for log messages.
///
/// The ordering is only used for filtering decisions: a sink that accepts
/// `Info` for a tag also accepts `Warn` and `Error` for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Designates very fine-grained informational events (logcat `VERBOSE`).
    Trace,
    /// Designates fine-grained informational events that are most useful to debug an application.
    Debug,
    /// Designates informational messages that highlight the progress of the application at coarse-grained level.
    Info,
    /// Designates potentially harmful situations.
    Warn,
    /// Designates error events that might still allow the application to continue running.
    Error,
}

impl Severity {
    /// Every severity, lowest first.
    pub const ALL: [Severity; 5] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
    ];

    /// Android log priority (`ANDROID_LOG_VERBOSE` = 2 … `ANDROID_LOG_ERROR` = 6).
    #[must_use]
    pub const fn priority(self) -> i32 {
        match self {
            Severity::Trace => 2,
            Severity::Debug => 3,
            Severity::Info => 4,
            Severity::Warn => 5,
            Severity::Error => 6,
        }
    }

    /// Single-letter label used by logcat's brief format.
    #[must_use]
    pub const fn label(self) -> char {
        match self {
            Severity::Trace => 'V',
            Severity::Debug => 'D',
            Severity::Info => 'I',
            Severity::Warn => 'W',
            Severity::Error => 'E',
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown severity: {0:?}")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    /// Accepts level names (`trace`/`verbose`, `debug`, `info`, `warn`/`warning`,
    /// `error`) in any case, or the logcat letters `V D I W E`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "trace" | "verbose" | "v" => Ok(Severity::Trace),
            "debug" | "d" => Ok(Severity::Debug),
            "info" | "i" => Ok(Severity::Info),
            "warn" | "warning" | "w" => Ok(Severity::Warn),
            "error" | "e" => Ok(Severity::Error),
            _ => Err(ParseSeverityError(trimmed.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn ordering_follows_importance() {
        assert!(Severity::Trace < Severity::Debug);
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        let mut sorted = Severity::ALL;
        sorted.sort();
        assert_eq!(sorted, Severity::ALL);
    }

    #[test]
    fn priorities_match_android_constants() {
        let prios: Vec<i32> = Severity::ALL.iter().map(|s| s.priority()).collect();
        assert_eq!(prios, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn parses_names_and_letters() {
        assert_eq!("verbose".parse::<Severity>().unwrap(), Severity::Trace);
        assert_eq!("TRACE".parse::<Severity>().unwrap(), Severity::Trace);
        assert_eq!(" Debug ".parse::<Severity>().unwrap(), Severity::Debug);
        assert_eq!("I".parse::<Severity>().unwrap(), Severity::Info);
        assert_eq!("warning".parse::<Severity>().unwrap(), Severity::Warn);
        assert_eq!("e".parse::<Severity>().unwrap(), Severity::Error);
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "loud".parse::<Severity>().unwrap_err();
        assert_eq!(err, ParseSeverityError("loud".into()));
        assert_eq!(err.to_string(), "unknown severity: \"loud\"");
    }
}
