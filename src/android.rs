//! Android bindings: liblog for the sink, bionic system properties for build
//! detection.

use std::ffi::{CStr, CString, c_char, c_int};

use crate::{log_sink::PlatformSink, severity::Severity};

/// `PROP_VALUE_MAX` from `<sys/system_properties.h>`.
const PROP_VALUE_MAX: usize = 92;

#[link(name = "log")]
unsafe extern "C" {
    fn __android_log_write(prio: c_int, tag: *const c_char, text: *const c_char) -> c_int;
    fn __android_log_is_loggable(prio: c_int, tag: *const c_char, default_prio: c_int) -> c_int;
}

unsafe extern "C" {
    fn __system_property_get(name: *const c_char, value: *mut c_char) -> c_int;
}

/// Interior NULs would truncate the C string; replace them instead of failing.
fn c_string(s: &str) -> CString {
    CString::new(s.replace('\0', "\u{FFFD}")).unwrap_or_default()
}

/// Sink backed by the device log buffer (`adb logcat`).
#[derive(Debug, Clone, Copy)]
pub struct AndroidSink {
    default_severity: Severity,
}

impl Default for AndroidSink {
    fn default() -> Self {
        Self {
            default_severity: Severity::Info,
        }
    }
}

impl AndroidSink {
    /// `default_severity` applies to tags with no `log.tag.<TAG>` property.
    #[must_use]
    pub fn new(default_severity: Severity) -> Self {
        Self { default_severity }
    }
}

impl PlatformSink for AndroidSink {
    fn is_loggable(&self, tag: &str, severity: Severity) -> bool {
        let tag = c_string(tag);
        // SAFETY: `tag` is a valid NUL-terminated string for the duration of the call.
        let r = unsafe {
            __android_log_is_loggable(
                severity.priority(),
                tag.as_ptr(),
                self.default_severity.priority(),
            )
        };
        r != 0
    }

    fn write(&self, severity: Severity, tag: &str, message: &str) {
        let tag = c_string(tag);
        let text = c_string(message);
        // SAFETY: both pointers are valid NUL-terminated strings for the duration of the call.
        unsafe {
            __android_log_write(severity.priority(), tag.as_ptr(), text.as_ptr());
        }
    }
}

/// Reads a system property such as `ro.build.type`; `None` when unset.
pub(crate) fn system_property(name: &str) -> Option<String> {
    let name = c_string(name);
    let mut buf = [0 as c_char; PROP_VALUE_MAX];
    // SAFETY: `buf` has PROP_VALUE_MAX bytes, the size bionic writes at most.
    let len = unsafe { __system_property_get(name.as_ptr(), buf.as_mut_ptr()) };
    if len <= 0 {
        return None;
    }
    // SAFETY: bionic NUL-terminates the value within the buffer.
    let value = unsafe { CStr::from_ptr(buf.as_ptr()) };
    Some(value.to_string_lossy().into_owned())
}
