use crate::{log_sink::PlatformSink, severity::Severity};

/// Sink that rejects every tag and discards writes.
///
/// With the debug override active the facade still calls `write`, which
/// makes this useful for measuring formatting cost in isolation.
#[derive(Debug, Clone, Default)]
pub struct NoopSink;

impl PlatformSink for NoopSink {
    #[inline]
    fn is_loggable(&self, _tag: &str, _severity: Severity) -> bool {
        false
    }

    #[inline]
    fn write(&self, _severity: Severity, _tag: &str, _message: &str) {}
}
