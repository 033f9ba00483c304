//! Bridge sink that forwards records into the `tracing` ecosystem.
//!
//! Loggability is whatever the active subscriber reports as enabled for the
//! matching level; the tag is folded into the message text.

use tracing::Level;

use crate::{log_sink::PlatformSink, severity::Severity};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl PlatformSink for TracingSink {
    fn is_loggable(&self, _tag: &str, severity: Severity) -> bool {
        match severity {
            Severity::Trace => tracing::enabled!(Level::TRACE),
            Severity::Debug => tracing::enabled!(Level::DEBUG),
            Severity::Info => tracing::enabled!(Level::INFO),
            Severity::Warn => tracing::enabled!(Level::WARN),
            Severity::Error => tracing::enabled!(Level::ERROR),
        }
    }

    fn write(&self, severity: Severity, tag: &str, message: &str) {
        match severity {
            Severity::Trace => tracing::trace!("{tag}: {message}"),
            Severity::Debug => tracing::debug!("{tag}: {message}"),
            Severity::Info => tracing::info!("{tag}: {message}"),
            Severity::Warn => tracing::warn!("{tag}: {message}"),
            Severity::Error => tracing::error!("{tag}: {message}"),
        }
    }
}
