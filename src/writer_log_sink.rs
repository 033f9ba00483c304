use std::{
    collections::HashMap,
    io::{self, Write},
    sync::{Mutex, PoisonError},
};

use crate::{log_sink::PlatformSink, severity::Severity};

/// Per-tag minimum severities, the host-side stand-in for Android's
/// `log.tag.<TAG>` properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagThresholds {
    default: Severity,
    per_tag: HashMap<String, Severity>,
}

impl Default for TagThresholds {
    /// Android treats untagged properties as `INFO`.
    fn default() -> Self {
        Self::new(Severity::Info)
    }
}

impl TagThresholds {
    #[must_use]
    pub fn new(default: Severity) -> Self {
        Self {
            default,
            per_tag: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>, min: Severity) -> Self {
        self.set(tag, min);
        self
    }

    pub fn set(&mut self, tag: impl Into<String>, min: Severity) {
        self.per_tag.insert(tag.into(), min);
    }

    pub fn set_default(&mut self, min: Severity) {
        self.default = min;
    }

    #[must_use]
    pub fn default_threshold(&self) -> Severity {
        self.default
    }

    /// Minimum severity accepted for `tag`.
    #[must_use]
    pub fn threshold(&self, tag: &str) -> Severity {
        self.per_tag.get(tag).copied().unwrap_or(self.default)
    }

    #[must_use]
    pub fn allows(&self, tag: &str, severity: Severity) -> bool {
        severity >= self.threshold(tag)
    }
}

/// Line-oriented sink writing logcat's brief format (`D/Tag: text`) to any
/// [`Write`] implementor.
///
/// Multi-line messages produce one output line per message line, each with
/// the same prefix, the way logcat splits a record when displaying it.
/// I/O errors are dropped.
pub struct WriterSink<W> {
    out: Mutex<W>,
    thresholds: TagThresholds,
}

impl WriterSink<io::Stderr> {
    #[must_use]
    pub fn stderr(thresholds: TagThresholds) -> Self {
        Self::new(io::stderr(), thresholds)
    }
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(out: W, thresholds: TagThresholds) -> Self {
        Self {
            out: Mutex::new(out),
            thresholds,
        }
    }

    #[must_use]
    pub fn thresholds(&self) -> &TagThresholds {
        &self.thresholds
    }

    /// Consumes the sink and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> PlatformSink for WriterSink<W> {
    fn is_loggable(&self, tag: &str, severity: Severity) -> bool {
        self.thresholds.allows(tag, severity)
    }

    fn write(&self, severity: Severity, tag: &str, message: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let body = message.strip_suffix('\n').unwrap_or(message);
        for line in body.split('\n') {
            let _ = writeln!(out, "{}/{}: {}", severity.label(), tag, line);
        }
        let _ = out.flush();
    }
}
