//! Process-wide facade for code that cannot thread a handle through.
//!
//! Install once at startup with [`init`]; afterwards [`get`] hands out the
//! same `&'static` facade to every caller.

use std::sync::OnceLock;

use thiserror::Error;

use crate::{log_facade::LogFacade, log_sink::PlatformSink};

/// Facade type stored in the process-wide slot.
pub type SharedFacade = LogFacade<Box<dyn PlatformSink>>;

static GLOBAL: OnceLock<SharedFacade> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GlobalError {
    #[error("the process-wide log facade is already initialized")]
    AlreadyInitialized,
}

/// Installs `facade` as the process-wide instance.
///
/// # Errors
///
/// [`GlobalError::AlreadyInitialized`] if a facade was installed before; the
/// existing one stays in place.
pub fn init(facade: SharedFacade) -> Result<&'static SharedFacade, GlobalError> {
    GLOBAL
        .set(facade)
        .map_err(|_| GlobalError::AlreadyInitialized)?;
    GLOBAL.get().ok_or(GlobalError::AlreadyInitialized)
}

#[must_use]
pub fn get() -> Option<&'static SharedFacade> {
    GLOBAL.get()
}

/// Sets the override on the installed facade. Returns `false` when none is
/// installed yet.
pub fn set_debuggable(debuggable: bool) -> bool {
    match GLOBAL.get() {
        Some(facade) => {
            facade.set_debuggable(debuggable);
            true
        }
        None => false,
    }
}
