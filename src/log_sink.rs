use std::sync::Arc;

use crate::severity::Severity;

/// The platform logging channel a [`LogFacade`](crate::LogFacade) forwards to.
///
/// Implementations answer per-tag loggability queries and accept one fully
/// formatted message per call. Write failures stay inside the sink.
pub trait PlatformSink: Send + Sync {
    fn is_loggable(&self, tag: &str, severity: Severity) -> bool;
    fn write(&self, severity: Severity, tag: &str, message: &str);
}

impl<S: PlatformSink + ?Sized> PlatformSink for Box<S> {
    #[inline]
    fn is_loggable(&self, tag: &str, severity: Severity) -> bool {
        (**self).is_loggable(tag, severity)
    }

    #[inline]
    fn write(&self, severity: Severity, tag: &str, message: &str) {
        (**self).write(severity, tag, message);
    }
}

impl<S: PlatformSink + ?Sized> PlatformSink for Arc<S> {
    #[inline]
    fn is_loggable(&self, tag: &str, severity: Severity) -> bool {
        (**self).is_loggable(tag, severity)
    }

    #[inline]
    fn write(&self, severity: Severity, tag: &str, message: &str) {
        (**self).write(severity, tag, message);
    }
}
