use std::{
    fmt,
    sync::atomic::{AtomicBool, Ordering},
};

use crate::{
    build_env::BuildEnvironment,
    failure::Failure,
    log_sink::PlatformSink,
    printf::{Arg, FormatError, sprintf},
    severity::Severity,
};

/// Build-variant-aware front end over a [`PlatformSink`].
///
/// A call reaches the sink when the debug override is active or when the sink
/// itself reports the `(tag, severity)` pair as loggable. The check runs
/// before any formatting, so suppressed calls cost one atomic load and one
/// sink query.
///
/// The override starts from [`BuildEnvironment::default_debuggable`] and is
/// replaced outright by [`set_debuggable`](Self::set_debuggable). It is read
/// on every call, so a change is seen by the next check on any thread.
///
/// # Architecture
///
/// 1. **Callers**: use the per-severity methods or the `log_*!` macros.
/// 2. **Gate**: override flag, then the sink's loggability answer.
/// 3. **Render**: message text, then the failure trace for warn/error records.
/// 4. **Sink**: receives exactly one combined string per emitted call.
///
/// # Example
///
/// ```
/// use logcat::{BuildEnvironment, LogFacade, TagThresholds, WriterSink};
///
/// let sink = WriterSink::new(Vec::new(), TagThresholds::default());
/// let log = LogFacade::new(sink, BuildEnvironment::production());
///
/// log.debug("Net", "hidden on production builds");
/// log.set_debuggable(true);
/// log.debug("Net", "shown once the override is on");
/// ```
pub struct LogFacade<S> {
    sink: S,
    environment: BuildEnvironment,
    debuggable: AtomicBool,
}

impl<S: fmt::Debug> fmt::Debug for LogFacade<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogFacade")
            .field("sink", &self.sink)
            .field("environment", &self.environment)
            .field("debuggable", &self.debuggable.load(Ordering::Acquire))
            .finish()
    }
}

impl<S: PlatformSink> LogFacade<S> {
    /// Creates a facade whose override starts from the environment's default.
    pub fn new(sink: S, environment: BuildEnvironment) -> Self {
        let debuggable = environment.default_debuggable();
        Self::with_debuggable(sink, environment, debuggable)
    }

    /// Creates a facade with an explicit initial override.
    pub fn with_debuggable(sink: S, environment: BuildEnvironment, debuggable: bool) -> Self {
        Self {
            sink,
            environment,
            debuggable: AtomicBool::new(debuggable),
        }
    }

    /// Creates a facade for the detected platform environment.
    pub fn detect(sink: S) -> Self {
        Self::new(sink, BuildEnvironment::detect())
    }

    /// Overrides the default debuggable policy. Takes effect on the next check.
    pub fn set_debuggable(&self, debuggable: bool) {
        self.debuggable.store(debuggable, Ordering::Release);
    }

    #[must_use]
    pub fn is_debuggable(&self) -> bool {
        self.debuggable.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn environment(&self) -> &BuildEnvironment {
        &self.environment
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the facade and returns its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// The gate check: whether a record for `(tag, severity)` would be written.
    #[must_use]
    pub fn is_loggable(&self, tag: &str, severity: Severity) -> bool {
        self.is_debuggable() || self.sink.is_loggable(tag, severity)
    }

    /// Emits `msg` verbatim at `severity`.
    pub fn log(&self, severity: Severity, tag: &str, msg: &str) {
        self.print(severity, tag, None, msg);
    }

    /// Emits `format` interpolated with `args` at `severity`.
    ///
    /// # Errors
    ///
    /// Returns the [`FormatError`] when `args` do not match the specifiers of
    /// `format`. Nothing is written in that case. Suppressed calls return
    /// `Ok(())` without formatting.
    pub fn log_fmt(
        &self,
        severity: Severity,
        tag: &str,
        format: &str,
        args: &[Arg<'_>],
    ) -> Result<(), FormatError> {
        self.print_fmt(severity, tag, None, format, args)
    }

    pub fn trace(&self, tag: &str, msg: &str) {
        self.print(Severity::Trace, tag, None, msg);
    }

    /// # Errors
    ///
    /// See [`log_fmt`](Self::log_fmt).
    pub fn trace_fmt(&self, tag: &str, format: &str, args: &[Arg<'_>]) -> Result<(), FormatError> {
        self.print_fmt(Severity::Trace, tag, None, format, args)
    }

    pub fn debug(&self, tag: &str, msg: &str) {
        self.print(Severity::Debug, tag, None, msg);
    }

    /// # Errors
    ///
    /// See [`log_fmt`](Self::log_fmt).
    pub fn debug_fmt(&self, tag: &str, format: &str, args: &[Arg<'_>]) -> Result<(), FormatError> {
        self.print_fmt(Severity::Debug, tag, None, format, args)
    }

    pub fn info(&self, tag: &str, msg: &str) {
        self.print(Severity::Info, tag, None, msg);
    }

    /// # Errors
    ///
    /// See [`log_fmt`](Self::log_fmt).
    pub fn info_fmt(&self, tag: &str, format: &str, args: &[Arg<'_>]) -> Result<(), FormatError> {
        self.print_fmt(Severity::Info, tag, None, format, args)
    }

    pub fn warn(&self, tag: &str, msg: &str) {
        self.print(Severity::Warn, tag, None, msg);
    }

    /// # Errors
    ///
    /// See [`log_fmt`](Self::log_fmt).
    pub fn warn_fmt(&self, tag: &str, format: &str, args: &[Arg<'_>]) -> Result<(), FormatError> {
        self.print_fmt(Severity::Warn, tag, None, format, args)
    }

    /// Emits `msg` followed by the failure's trace. `None` appends nothing.
    pub fn warn_failure(&self, tag: &str, failure: Option<&Failure>, msg: &str) {
        self.print(Severity::Warn, tag, failure, msg);
    }

    /// # Errors
    ///
    /// See [`log_fmt`](Self::log_fmt).
    pub fn warn_failure_fmt(
        &self,
        tag: &str,
        failure: Option<&Failure>,
        format: &str,
        args: &[Arg<'_>],
    ) -> Result<(), FormatError> {
        self.print_fmt(Severity::Warn, tag, failure, format, args)
    }

    pub fn error(&self, tag: &str, msg: &str) {
        self.print(Severity::Error, tag, None, msg);
    }

    /// # Errors
    ///
    /// See [`log_fmt`](Self::log_fmt).
    pub fn error_fmt(&self, tag: &str, format: &str, args: &[Arg<'_>]) -> Result<(), FormatError> {
        self.print_fmt(Severity::Error, tag, None, format, args)
    }

    /// Emits `msg` followed by the failure's trace. `None` appends nothing.
    pub fn error_failure(&self, tag: &str, failure: Option<&Failure>, msg: &str) {
        self.print(Severity::Error, tag, failure, msg);
    }

    /// # Errors
    ///
    /// See [`log_fmt`](Self::log_fmt).
    pub fn error_failure_fmt(
        &self,
        tag: &str,
        failure: Option<&Failure>,
        format: &str,
        args: &[Arg<'_>],
    ) -> Result<(), FormatError> {
        self.print_fmt(Severity::Error, tag, failure, format, args)
    }

    /// Writes an already gated record built from `format_args!`.
    ///
    /// Used by the `log_*!` macros after [`is_loggable`](Self::is_loggable)
    /// has passed; calling it directly bypasses the gate.
    #[doc(hidden)]
    pub fn emit(
        &self,
        severity: Severity,
        tag: &str,
        failure: Option<&Failure>,
        args: fmt::Arguments<'_>,
    ) {
        match args.as_str() {
            Some(msg) => self.write_record(severity, tag, failure, msg),
            None => self.write_record(severity, tag, failure, &args.to_string()),
        }
    }

    fn print(&self, severity: Severity, tag: &str, failure: Option<&Failure>, msg: &str) {
        if !self.is_loggable(tag, severity) {
            return;
        }
        self.write_record(severity, tag, failure, msg);
    }

    fn print_fmt(
        &self,
        severity: Severity,
        tag: &str,
        failure: Option<&Failure>,
        format: &str,
        args: &[Arg<'_>],
    ) -> Result<(), FormatError> {
        if !self.is_loggable(tag, severity) {
            return Ok(());
        }
        let msg = sprintf(format, args)?;
        self.write_record(severity, tag, failure, &msg);
        Ok(())
    }

    fn write_record(&self, severity: Severity, tag: &str, failure: Option<&Failure>, msg: &str) {
        match failure {
            Some(failure) => {
                let trace = failure.render();
                let mut combined = String::with_capacity(msg.len() + 1 + trace.len());
                combined.push_str(msg);
                combined.push('\n');
                combined.push_str(&trace);
                self.sink.write(severity, tag, &combined);
            }
            None => self.sink.write(severity, tag, msg),
        }
    }
}
