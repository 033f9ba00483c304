//! logcat is a build-variant-aware logging facade over a platform log sink.
//!
//! Verbose and debug output is hidden on production (`user`) builds running
//! on real hardware unless the debug override is switched on; everywhere
//! else every record goes through. The facade adds `printf`-style and native
//! formatting plus failure traces on warn/error records, and forwards one
//! combined string per call to the sink.
//!
//! ```
//! use logcat::{BuildEnvironment, Failure, LogFacade, TagThresholds, WriterSink, args};
//!
//! let sink = WriterSink::new(Vec::new(), TagThresholds::default());
//! let log = LogFacade::new(sink, BuildEnvironment::development());
//!
//! log.info("Sync", "starting");
//! log.debug_fmt("Sync", "%d items queued", args![12]).unwrap();
//! log.error_failure("Sync", Some(&Failure::new("timeout")), "upload failed");
//!
//! let out = String::from_utf8(log.into_sink().into_inner()).unwrap();
//! assert_eq!(
//!     out,
//!     "I/Sync: starting\nD/Sync: 12 items queued\nE/Sync: upload failed\nE/Sync: timeout\n"
//! );
//! ```

/// Android liblog sink and system property access.
#[cfg(target_os = "android")]
pub mod android;
/// Build and device signals that seed the debug override.
pub mod build_env;
/// Handles configuration loading and management.
pub mod config;
/// Failures and stack frames attached to warn/error records.
pub mod failure;
/// Process-wide facade instance.
pub mod global;
/// The facade itself: gate check, formatting and forwarding.
pub mod log_facade;
/// Leveled logging macros.
pub mod log_macros;
/// The platform sink trait.
pub mod log_sink;
/// Sink that discards everything.
pub mod noop_log_sink;
/// Runtime `printf`-style formatting.
pub mod printf;
/// Severity levels.
pub mod severity;
/// Bridge into the `tracing` ecosystem.
#[cfg(feature = "tracing")]
pub mod tracing_log_sink;
/// Line-oriented sink for stderr or any writer.
pub mod writer_log_sink;

#[cfg(target_os = "android")]
pub use android::AndroidSink;
pub use build_env::BuildEnvironment;
pub use config::{ConfigError, LogConfig};
pub use failure::{Failure, StackFrame};
pub use log_facade::LogFacade;
pub use log_sink::PlatformSink;
pub use noop_log_sink::NoopSink;
pub use printf::{Arg, FormatError};
pub use severity::Severity;
#[cfg(feature = "tracing")]
pub use tracing_log_sink::TracingSink;
pub use writer_log_sink::{TagThresholds, WriterSink};
