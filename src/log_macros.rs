//! Leveled logging macros over a [`LogFacade`](crate::LogFacade).
//!
//! Each macro runs the facade's gate check before building the message, so a
//! suppressed call never formats its arguments. Arity mismatches in the
//! format string are compile errors.
//!
//! ```
//! use logcat::{BuildEnvironment, Failure, LogFacade, NoopSink, log_debug, log_error};
//!
//! let log = LogFacade::new(NoopSink, BuildEnvironment::development());
//! log_debug!(log, "Net", "connected to {}:{}", "10.0.0.2", 443);
//!
//! let failure = Failure::new("handshake timed out");
//! log_error!(log, "Net", failure = &failure, "giving up after {} tries", 3);
//! ```
//!
//! Only `log_warn!` and `log_error!` take a `failure = ...` argument:
//!
//! ```compile_fail
//! use logcat::{BuildEnvironment, Failure, LogFacade, NoopSink, log_debug};
//!
//! let log = LogFacade::new(NoopSink, BuildEnvironment::development());
//! let f = Failure::new("boom");
//! log_debug!(log, "T", failure = &f, "x");
//! ```
//!
//! # Feature Flags
//! specific log levels are controlled by cargo features:
//! `log-trace`, `log-debug`, `log-info`, `log-warn`, `log-error`.
//!
//! If a feature is disabled, the corresponding macro expands to `()`, removing
//! the gate check and all formatting at compile time. The default build
//! enables every level and leaves filtering to the runtime gate.

// ============================================================================
// 1. GENERIC MACROS
// ============================================================================

/// Logs a plain message at an explicit severity.
#[macro_export]
macro_rules! facade_log {
    ($facade:expr, $lvl:expr, $tag:expr, $fmt:literal $($arg:tt)*) => {{
        let __facade = &$facade;
        let __tag: &str = $tag;
        let __lvl: $crate::Severity = $lvl;
        if __facade.is_loggable(__tag, __lvl) {
            __facade.emit(
                __lvl,
                __tag,
                ::core::option::Option::None,
                ::core::format_args!($fmt $($arg)*),
            );
        }
    }};
}

/// Failure-carrying worker behind `log_warn!` and `log_error!`. The level is
/// part of the pattern, so nothing below WARN can reach the emit arm.
/// `$failure` accepts `&Failure` or `Option<&Failure>`.
#[doc(hidden)]
#[macro_export]
macro_rules! __facade_log_failure {
    (Warn, $($rest:tt)+) => {
        $crate::__facade_log_failure!(@emit $crate::Severity::Warn, $($rest)+)
    };
    (Error, $($rest:tt)+) => {
        $crate::__facade_log_failure!(@emit $crate::Severity::Error, $($rest)+)
    };
    (@emit $lvl:expr, $facade:expr, $tag:expr, $failure:expr, $fmt:literal $($arg:tt)*) => {{
        let __facade = &$facade;
        let __tag: &str = $tag;
        let __lvl: $crate::Severity = $lvl;
        if __facade.is_loggable(__tag, __lvl) {
            __facade.emit(
                __lvl,
                __tag,
                ::core::option::Option::<&$crate::Failure>::from($failure),
                ::core::format_args!($fmt $($arg)*),
            );
        }
    }};
}

// ============================================================================
// 2. LEVEL-SPECIFIC MACROS (Feature Gated)
// ============================================================================

// ---------------------- TRACE ----------------------
#[cfg(feature = "log-trace")]
#[macro_export]
macro_rules! log_trace {
    ($facade:expr, $tag:expr, $fmt:literal $($arg:tt)*) => {
        $crate::facade_log!($facade, $crate::Severity::Trace, $tag, $fmt $($arg)*)
    };
}

#[cfg(not(feature = "log-trace"))]
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- DEBUG ----------------------
#[cfg(feature = "log-debug")]
#[macro_export]
macro_rules! log_debug {
    ($facade:expr, $tag:expr, $fmt:literal $($arg:tt)*) => {
        $crate::facade_log!($facade, $crate::Severity::Debug, $tag, $fmt $($arg)*)
    };
}

#[cfg(not(feature = "log-debug"))]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- INFO ----------------------
#[cfg(feature = "log-info")]
#[macro_export]
macro_rules! log_info {
    ($facade:expr, $tag:expr, $fmt:literal $($arg:tt)*) => {
        $crate::facade_log!($facade, $crate::Severity::Info, $tag, $fmt $($arg)*)
    };
}

#[cfg(not(feature = "log-info"))]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- WARN ----------------------
#[cfg(feature = "log-warn")]
#[macro_export]
macro_rules! log_warn {
    ($facade:expr, $tag:expr, failure = $failure:expr, $fmt:literal $($arg:tt)*) => {
        $crate::__facade_log_failure!(Warn, $facade, $tag, $failure, $fmt $($arg)*)
    };
    ($facade:expr, $tag:expr, $fmt:literal $($arg:tt)*) => {
        $crate::facade_log!($facade, $crate::Severity::Warn, $tag, $fmt $($arg)*)
    };
}

#[cfg(not(feature = "log-warn"))]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- ERROR ----------------------
// Generally always enabled, but consistent structure allows user to disable if really needed.
#[cfg(feature = "log-error")]
#[macro_export]
macro_rules! log_error {
    ($facade:expr, $tag:expr, failure = $failure:expr, $fmt:literal $($arg:tt)*) => {
        $crate::__facade_log_failure!(Error, $facade, $tag, $failure, $fmt $($arg)*)
    };
    ($facade:expr, $tag:expr, $fmt:literal $($arg:tt)*) => {
        $crate::facade_log!($facade, $crate::Severity::Error, $tag, $fmt $($arg)*)
    };
}

#[cfg(not(feature = "log-error"))]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        ()
    };
}

#[cfg(all(test, feature = "log-trace"))]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use crate::{BuildEnvironment, Failure, LogFacade, PlatformSink, Severity, StackFrame};
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    #[derive(Default)]
    struct Recorder {
        accept: bool,
        lines: Mutex<Vec<String>>,
    }

    impl PlatformSink for Recorder {
        fn is_loggable(&self, _tag: &str, _severity: Severity) -> bool {
            self.accept
        }

        fn write(&self, severity: Severity, tag: &str, message: &str) {
            self.lines
                .lock()
                .unwrap()
                .push(format!("{}/{}: {}", severity.label(), tag, message));
        }
    }

    fn facade(accept: bool) -> LogFacade<Recorder> {
        let sink = Recorder {
            accept,
            ..Recorder::default()
        };
        LogFacade::new(sink, BuildEnvironment::production())
    }

    #[test]
    fn macros_format_and_tag() {
        let log = facade(true);
        crate::log_trace!(log, "A", "t{}", 1);
        crate::log_debug!(log, "A", "d{}", 2);
        crate::log_info!(log, "B", "plain");
        crate::log_warn!(log, "B", "w{x}", x = 4);
        crate::log_error!(log, "C", "e{}", 5);
        assert_eq!(
            *log.sink().lines.lock().unwrap(),
            vec!["V/A: t1", "D/A: d2", "I/B: plain", "W/B: w4", "E/C: e5"]
        );
    }

    #[test]
    fn generic_macro_takes_explicit_severity() {
        let log = facade(true);
        crate::facade_log!(log, Severity::Info, "G", "n={}", 7);
        crate::log_error!(log, "G", "failure={}", "named");
        assert_eq!(*log.sink().lines.lock().unwrap(), vec!["I/G: n=7", "E/G: failure=named"]);
    }

    #[test]
    fn suppressed_macro_does_not_evaluate_arguments() {
        let log = facade(false);
        let calls = AtomicUsize::new(0);
        let expensive = || {
            calls.fetch_add(1, Ordering::SeqCst);
            "value"
        };
        crate::log_debug!(log, "A", "{}", expensive());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(log.sink().lines.lock().unwrap().is_empty());
    }

    #[test]
    fn failure_forms_append_trace() {
        let log = facade(true);
        let failure =
            Failure::with_frames("boom", vec![StackFrame::new("f", Some("f.rs:1:1".into()))]);
        crate::log_error!(log, "T", failure = &failure, "ctx={}", 5);
        crate::log_warn!(log, "T", failure = None, "hello");
        assert_eq!(
            *log.sink().lines.lock().unwrap(),
            vec!["E/T: ctx=5\nboom\n\tat f (f.rs:1:1)\n", "W/T: hello"]
        );
    }
}
